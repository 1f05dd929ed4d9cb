/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Byte-level codec for cached glyph payloads.
//!
//! Outline blobs start with a vertex-count header followed by `count`
//! fixed-size command vertices. Mono blobs carry an inclusive bounds
//! header followed by scanlines of coverage spans. Both use native
//! endianness; the cache stores them verbatim and the adaptors decode
//! them on replay.

use api::units::{DeviceIntRect, DeviceIntPoint, DeviceIntSize, Scalar};
use byteorder::{ByteOrder, NativeEndian};

use crate::path::PathCmd;

pub const OUTLINE_HEADER_SIZE: usize = 4;
pub const OUTLINE_VERTEX_SIZE: usize = 12;

const MONO_BOUNDS_SIZE: usize = 16;
const MONO_SCANLINE_HEADER_SIZE: usize = 8;
const MONO_SPAN_SIZE: usize = 9;

pub fn write_outline_blob(vertices: &[(PathCmd, Scalar, Scalar)]) -> Vec<u8> {
    let mut buf = vec![0u8; OUTLINE_HEADER_SIZE + vertices.len() * OUTLINE_VERTEX_SIZE];
    NativeEndian::write_u32(&mut buf[..OUTLINE_HEADER_SIZE], vertices.len() as u32);
    let mut pos = OUTLINE_HEADER_SIZE;
    for &(cmd, x, y) in vertices {
        NativeEndian::write_u32(&mut buf[pos..pos + 4], cmd.to_raw());
        NativeEndian::write_f32(&mut buf[pos + 4..pos + 8], x);
        NativeEndian::write_f32(&mut buf[pos + 8..pos + 12], y);
        pos += OUTLINE_VERTEX_SIZE;
    }
    buf
}

/// Reads the outline count header, validating that the blob is at least
/// header-sized. Returns the vertex count and the body offset.
pub fn read_outline_header(data: &[u8]) -> Option<(u32, usize)> {
    if data.len() < OUTLINE_HEADER_SIZE {
        return None;
    }
    let count = NativeEndian::read_u32(&data[..OUTLINE_HEADER_SIZE]);
    Some((count, OUTLINE_HEADER_SIZE))
}

/// Reads one command vertex at `pos`, or `None` past the end of `data`.
pub fn read_outline_vertex(data: &[u8], pos: usize) -> Option<(u32, Scalar, Scalar)> {
    let end = pos.checked_add(OUTLINE_VERTEX_SIZE)?;
    if end > data.len() {
        return None;
    }
    Some((
        NativeEndian::read_u32(&data[pos..pos + 4]),
        NativeEndian::read_f32(&data[pos + 4..pos + 8]),
        NativeEndian::read_f32(&data[pos + 8..pos + 12]),
    ))
}

/// A single horizontal run of coverage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverageSpan {
    pub x: i32,
    pub y: i32,
    pub len: i32,
    pub cover: u8,
}

/// Serializes mono coverage into a blob. Used by backends when writing a
/// prepared bitmap glyph into its cache record.
pub struct MonoBlobWriter {
    buf: Vec<u8>,
}

impl MonoBlobWriter {
    pub fn new(bounds: DeviceIntRect) -> MonoBlobWriter {
        let mut buf = vec![0u8; MONO_BOUNDS_SIZE];
        // The header stores inclusive extents; euclid's max_x/max_y are
        // one past the last pixel.
        NativeEndian::write_i32(&mut buf[0..4], bounds.min_x());
        NativeEndian::write_i32(&mut buf[4..8], bounds.min_y());
        NativeEndian::write_i32(&mut buf[8..12], bounds.max_x() - 1);
        NativeEndian::write_i32(&mut buf[12..16], bounds.max_y() - 1);
        MonoBlobWriter { buf }
    }

    /// Appends one scanline of `(x, len, cover)` spans at row `y`.
    pub fn scanline(&mut self, y: i32, spans: &[(i32, i32, u8)]) {
        let mut header = [0u8; MONO_SCANLINE_HEADER_SIZE];
        NativeEndian::write_i32(&mut header[0..4], y);
        NativeEndian::write_u32(&mut header[4..8], spans.len() as u32);
        self.buf.extend_from_slice(&header);
        for &(x, len, cover) in spans {
            let mut span = [0u8; MONO_SPAN_SIZE];
            NativeEndian::write_i32(&mut span[0..4], x);
            NativeEndian::write_i32(&mut span[4..8], len);
            span[8] = cover;
            self.buf.extend_from_slice(&span);
        }
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Decodes a mono blob. Malformed input simply ends the span stream.
pub struct MonoBlobReader<'a> {
    data: &'a [u8],
}

impl<'a> MonoBlobReader<'a> {
    pub fn new(data: &'a [u8]) -> Option<MonoBlobReader<'a>> {
        if data.len() < MONO_BOUNDS_SIZE {
            return None;
        }
        Some(MonoBlobReader { data })
    }

    /// The glyph bounds recorded by the writer, inclusive on both ends.
    pub fn bounds(&self) -> DeviceIntRect {
        let min_x = NativeEndian::read_i32(&self.data[0..4]);
        let min_y = NativeEndian::read_i32(&self.data[4..8]);
        let max_x = NativeEndian::read_i32(&self.data[8..12]);
        let max_y = NativeEndian::read_i32(&self.data[12..16]);
        DeviceIntRect::new(
            DeviceIntPoint::new(min_x, min_y),
            DeviceIntSize::new(max_x - min_x + 1, max_y - min_y + 1),
        )
    }

    pub fn spans(&self) -> MonoSpanIter<'a> {
        MonoSpanIter {
            data: self.data,
            pos: MONO_BOUNDS_SIZE,
            y: 0,
            remaining: 0,
        }
    }
}

pub struct MonoSpanIter<'a> {
    data: &'a [u8],
    pos: usize,
    y: i32,
    remaining: u32,
}

impl<'a> Iterator for MonoSpanIter<'a> {
    type Item = CoverageSpan;

    fn next(&mut self) -> Option<CoverageSpan> {
        while self.remaining == 0 {
            if self.pos + 8 > self.data.len() {
                return None;
            }
            self.y = NativeEndian::read_i32(&self.data[self.pos..self.pos + 4]);
            self.remaining = NativeEndian::read_u32(&self.data[self.pos + 4..self.pos + 8]);
            self.pos += 8;
        }
        if self.pos + MONO_SPAN_SIZE > self.data.len() {
            self.remaining = 0;
            return None;
        }
        let x = NativeEndian::read_i32(&self.data[self.pos..self.pos + 4]);
        let len = NativeEndian::read_i32(&self.data[self.pos + 4..self.pos + 8]);
        let cover = self.data[self.pos + 8];
        self.pos += MONO_SPAN_SIZE;
        self.remaining -= 1;
        Some(CoverageSpan { x, y: self.y, len, cover })
    }
}

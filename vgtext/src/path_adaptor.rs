/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Replays a cached outline blob as a vertex stream.

use api::units::Scalar;
use std::sync::Arc;

use crate::blob::{read_outline_vertex, OUTLINE_VERTEX_SIZE};
use crate::path::{PathCmd, VertexSource};

/// Holds the outline body of the most recently rasterized vector glyph
/// and serves its command stream on demand. The blob bytes are shared
/// with the owning glyph cache, not copied.
#[derive(Default)]
pub struct PathAdaptor {
    data: Option<Arc<[u8]>>,
    body: usize,
    count: u32,
    pos: usize,
    emitted: u32,
    dx: Scalar,
    dy: Scalar,
}

impl PathAdaptor {
    pub fn new() -> PathAdaptor {
        PathAdaptor::default()
    }

    /// Points the adaptor at an outline body of `count` vertices
    /// starting at `offset` inside `data`, and resets translation.
    pub fn serialize_from(&mut self, count: u32, data: Arc<[u8]>, offset: usize) {
        self.count = count;
        self.body = offset;
        self.pos = offset;
        self.emitted = 0;
        self.dx = 0.0;
        self.dy = 0.0;
        self.data = Some(data);
    }

    pub fn translate(&mut self, x: Scalar, y: Scalar) {
        self.dx += x;
        self.dy += y;
    }
}

impl VertexSource for PathAdaptor {
    fn rewind(&mut self) {
        self.pos = self.body;
        self.emitted = 0;
    }

    fn vertex(&mut self, x: &mut Scalar, y: &mut Scalar) -> PathCmd {
        if self.emitted >= self.count {
            return PathCmd::Stop;
        }
        let data = match &self.data {
            Some(data) => data,
            None => return PathCmd::Stop,
        };
        // A count that overruns the blob ends the stream early.
        let (raw, vx, vy) = match read_outline_vertex(data, self.pos) {
            Some(v) => v,
            None => return PathCmd::Stop,
        };
        self.pos += OUTLINE_VERTEX_SIZE;
        self.emitted += 1;

        let cmd = PathCmd::from_raw(raw);
        if cmd.is_vertex() {
            *x = vx + self.dx;
            *y = vy + self.dy;
        } else {
            *x = vx;
            *y = vy;
        }
        cmd
    }
}

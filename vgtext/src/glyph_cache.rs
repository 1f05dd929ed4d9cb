/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Per-adapter glyph storage.

use api::units::{DeviceIntRect, Scalar, Size};
use api::GlyphType;
use std::sync::Arc;

use crate::internal_types::FastHashMap;

/// One cached glyph: source code unit, backend index, metrics and the
/// serialized payload.
///
/// Records are immutable once the backend has written the blob. The
/// payload is behind an `Arc`, so cloning a record (or handing its
/// bytes to an adaptor) shares rather than copies; a record fetched
/// twice for the same code compares equal and aliases the same blob.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRecord {
    pub code: u32,
    pub index: u32,
    pub glyph_type: GlyphType,
    pub bounds: DeviceIntRect,
    pub height: Scalar,
    pub advance_x: Scalar,
    pub advance_y: Scalar,
    data: Arc<[u8]>,
}

impl GlyphRecord {
    pub fn data(&self) -> &Arc<[u8]> {
        &self.data
    }

    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    /// Occupied size of the glyph: advance along the baseline by glyph
    /// height. The vertical advance plays no part here.
    pub fn extent(&self) -> Size {
        Size::new(self.advance_x, self.height)
    }

    /// Writable view of the blob, only meaningful between cache insert
    /// and the backend's write.
    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        Arc::get_mut(&mut self.data).expect("BUG: glyph blob aliased during insert")
    }
}

/// Maps code units to glyph records for one font adapter.
///
/// Inserts never evict; the cache is dropped whole with its adapter,
/// which releases every record and blob it owns.
#[derive(Default)]
pub struct GlyphCache {
    glyphs: FastHashMap<u32, GlyphRecord>,
}

impl GlyphCache {
    pub fn new() -> GlyphCache {
        GlyphCache::default()
    }

    pub fn find(&self, code: u32) -> Option<&GlyphRecord> {
        self.glyphs.get(&code)
    }

    /// Allocates a record with a zeroed `size`-byte blob the backend
    /// writes into. The caller checks `find` first; inserting a code
    /// twice is a bug.
    pub fn insert(
        &mut self,
        code: u32,
        index: u32,
        size: usize,
        glyph_type: GlyphType,
        bounds: DeviceIntRect,
        height: Scalar,
        advance_x: Scalar,
        advance_y: Scalar,
    ) -> &mut GlyphRecord {
        debug_assert!(
            !self.glyphs.contains_key(&code),
            "BUG: glyph {} cached twice",
            code
        );
        self.glyphs.entry(code).or_insert(GlyphRecord {
            code,
            index,
            glyph_type,
            bounds,
            height,
            advance_x,
            advance_y,
            data: Arc::from(vec![0u8; size]),
        })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Binds one descriptor/transform/antialias combination to a backend
//! instance and its caches.

use api::units::{Scalar, Transform};
use api::{FontDescriptor, GlyphType};
use log::warn;

use crate::backend::FontInstance;
use crate::blob::read_outline_header;
use crate::glyph_cache::{GlyphCache, GlyphRecord};
use crate::mono_adaptor::MonoAdaptor;
use crate::path_adaptor::PathAdaptor;
use crate::signature::FontSignature;

pub struct FontAdapter {
    desc: FontDescriptor,
    signature: FontSignature,
    transform: Transform,
    antialias: bool,
    instance: Box<dyn FontInstance>,
    cache: GlyphCache,
    path_adaptor: PathAdaptor,
    mono_adaptor: MonoAdaptor,
    // Kerning pair context, stored as cached codes. Both reset whenever
    // the adapter changes activation so kerning never crosses a font
    // switch.
    prev_glyph: Option<u32>,
    last_glyph: Option<u32>,
}

impl FontAdapter {
    pub(crate) fn new(
        desc: FontDescriptor,
        signature: FontSignature,
        transform: Transform,
        antialias: bool,
        instance: Box<dyn FontInstance>,
    ) -> FontAdapter {
        FontAdapter {
            desc,
            signature,
            transform,
            antialias,
            instance,
            cache: GlyphCache::new(),
            path_adaptor: PathAdaptor::new(),
            mono_adaptor: MonoAdaptor::new(),
            prev_glyph: None,
            last_glyph: None,
        }
    }

    pub fn descriptor(&self) -> &FontDescriptor {
        &self.desc
    }

    pub fn signature(&self) -> &FontSignature {
        &self.signature
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn activate(&mut self) {
        self.instance.activate();
        self.prev_glyph = None;
        self.last_glyph = None;
    }

    pub fn deactivate(&mut self) {
        self.prev_glyph = None;
        self.last_glyph = None;
        self.instance.deactivate();
    }

    /// Returns the cached glyph for `code`, preparing and caching it on
    /// first request. `None` means the backend cannot provide the glyph;
    /// the kerning history is left untouched in that case.
    pub fn get_glyph(&mut self, code: u32) -> Option<&GlyphRecord> {
        if self.cache.find(code).is_some() {
            self.prev_glyph = self.last_glyph;
            self.last_glyph = Some(code);
            return self.cache.find(code);
        }

        let prepared = self.instance.prepare_glyph(code)?;
        self.prev_glyph = self.last_glyph;
        self.last_glyph = Some(code);
        let record = self.cache.insert(
            code,
            prepared.index,
            prepared.data_size,
            prepared.glyph_type,
            prepared.bounds,
            prepared.height,
            prepared.advance_x,
            prepared.advance_y,
        );
        self.instance.write_glyph(record.data_mut());
        Some(record)
    }

    /// Applies the backend kerning adjustment for the two most recently
    /// fetched glyphs. No-op until two glyphs have been fetched since
    /// the last (de)activation.
    pub fn add_kerning(&mut self, x: &mut Scalar, y: &mut Scalar) {
        if let (Some(prev), Some(last)) = (self.prev_glyph, self.last_glyph) {
            let prev_index = self.cache.find(prev).map(|g| g.index);
            let last_index = self.cache.find(last).map(|g| g.index);
            if let (Some(prev_index), Some(last_index)) = (prev_index, last_index) {
                self.instance.add_kerning(prev_index, last_index, x, y);
            }
        }
    }

    /// Loads `glyph` into the matching adaptor at pen position `(x, y)`.
    /// Returns false when an outline blob is too short for its header.
    pub fn generate_raster(&mut self, glyph: &GlyphRecord, x: Scalar, y: Scalar) -> bool {
        match glyph.glyph_type {
            GlyphType::Mono => {
                self.mono_adaptor.serialize_from(glyph.data().clone(), x, y);
                true
            }
            GlyphType::Outline => match read_outline_header(glyph.data()) {
                Some((count, offset)) => {
                    self.path_adaptor
                        .serialize_from(count, glyph.data().clone(), offset);
                    self.path_adaptor.translate(x, y);
                    true
                }
                None => {
                    warn!("outline glyph {} has a truncated blob", glyph.code);
                    false
                }
            },
        }
    }

    pub fn ascent(&self) -> Scalar {
        self.instance.ascent()
    }

    pub fn descent(&self) -> Scalar {
        self.instance.descent()
    }

    pub fn leading(&self) -> Scalar {
        self.instance.leading()
    }

    pub fn height(&self) -> Scalar {
        self.instance.height()
    }

    pub fn units_per_em(&self) -> u32 {
        self.instance.units_per_em()
    }

    pub fn path_adaptor(&mut self) -> &mut PathAdaptor {
        &mut self.path_adaptor
    }

    pub fn mono_adaptor(&self) -> &MonoAdaptor {
        &self.mono_adaptor
    }

    pub fn glyph_count(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FontBackend;
    use crate::mock_backend::{mock_advance, new_log, MockBackend, SharedLog, MOCK_KERN_X};
    use crate::path::{PathCmd, VertexSource};

    fn make_adapter(antialias: bool) -> (FontAdapter, SharedLog) {
        let log = new_log();
        let desc = FontDescriptor::default();
        let transform = Transform::identity();
        let mut backend = MockBackend::new(&log);
        let instance = backend
            .create_instance(&desc, &transform, antialias)
            .unwrap();
        let signature = FontSignature::compute(&desc, &transform, antialias);
        (
            FontAdapter::new(desc, signature, transform, antialias, instance),
            log,
        )
    }

    #[test]
    fn glyphs_are_cached() {
        let (mut adapter, log) = make_adapter(false);

        let first = adapter.get_glyph(65).unwrap().clone();
        let again = adapter.get_glyph(65).unwrap().clone();
        assert_eq!(first, again);
        assert_eq!(log.borrow().prepare_calls, vec![65]);
        assert_eq!(adapter.glyph_count(), 1);
        assert_eq!(first.advance_x, mock_advance(65));
    }

    #[test]
    fn missing_glyph_returns_none() {
        let (mut adapter, log) = make_adapter(false);
        assert!(adapter.get_glyph(0).is_none());
        assert_eq!(adapter.glyph_count(), 0);
        assert_eq!(log.borrow().prepare_calls, vec![0]);

        // A failed lookup leaves the kerning history untouched.
        let (mut x, mut y) = (0.0, 0.0);
        adapter.add_kerning(&mut x, &mut y);
        assert_eq!(log.borrow().kerning_calls.len(), 0);
    }

    #[test]
    fn kerning_needs_two_glyphs() {
        let (mut adapter, log) = make_adapter(false);
        let (mut x, mut y) = (0.0, 0.0);

        adapter.activate();
        adapter.add_kerning(&mut x, &mut y);
        assert!(log.borrow().kerning_calls.is_empty());

        adapter.get_glyph(65).unwrap();
        adapter.add_kerning(&mut x, &mut y);
        assert!(log.borrow().kerning_calls.is_empty());

        adapter.get_glyph(86).unwrap();
        adapter.add_kerning(&mut x, &mut y);
        assert_eq!(log.borrow().kerning_calls, vec![(65, 86)]);
        assert_eq!(x, MOCK_KERN_X);
    }

    #[test]
    fn activation_clears_kerning_history() {
        let (mut adapter, log) = make_adapter(false);
        let (mut x, mut y) = (0.0, 0.0);

        adapter.get_glyph(65).unwrap();
        adapter.get_glyph(86).unwrap();
        adapter.deactivate();
        adapter.activate();
        adapter.add_kerning(&mut x, &mut y);
        assert!(log.borrow().kerning_calls.is_empty());
        assert_eq!(x, 0.0);
    }

    #[test]
    fn raster_dispatches_on_glyph_type() {
        let (mut adapter, _log) = make_adapter(false);
        let glyph = adapter.get_glyph(65).unwrap().clone();
        assert_eq!(glyph.glyph_type, GlyphType::Mono);
        assert!(adapter.generate_raster(&glyph, 10.0, 20.0));
        let span = adapter.mono_adaptor().spans().next().unwrap();
        assert_eq!((span.x, span.y), (10, 20));

        let (mut adapter, _log) = make_adapter(true);
        let glyph = adapter.get_glyph(65).unwrap().clone();
        assert_eq!(glyph.glyph_type, GlyphType::Outline);
        assert!(adapter.generate_raster(&glyph, 10.0, 20.0));
        let (mut x, mut y) = (0.0, 0.0);
        assert_eq!(adapter.path_adaptor().vertex(&mut x, &mut y), PathCmd::MoveTo);
        assert_eq!((x, y), (10.0, 20.0));
    }
}

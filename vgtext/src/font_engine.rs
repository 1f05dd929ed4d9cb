/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Bounded pool of font adapters keyed by signature.

use api::units::Transform;
use api::FontDescriptor;
use log::{debug, warn};

use crate::backend::FontSystem;
use crate::font_adapter::FontAdapter;
use crate::signature::FontSignature;

pub const DEFAULT_MAX_FONTS: usize = 16;

/// Owns every live font adapter and selects the current one.
///
/// The pool is bounded: once `max_fonts` adapters exist, creating a
/// font with a new signature destroys the oldest adapter first, cache
/// and all. Lookups never re-promote, so eviction order is strictly
/// first-in first-out.
pub struct FontEngine {
    system: FontSystem,
    fonts: Vec<FontAdapter>,
    max_fonts: usize,
    current: Option<usize>,
    transform: Transform,
    antialias: bool,
    stamp_change: bool,
}

impl FontEngine {
    pub fn new(system: FontSystem, max_fonts: usize) -> FontEngine {
        let max_fonts = max_fonts.max(1);
        FontEngine {
            system,
            fonts: Vec::with_capacity(max_fonts),
            max_fonts,
            current: None,
            transform: Transform::identity(),
            antialias: false,
            stamp_change: false,
        }
    }

    /// An engine sized for the expected working set of a drawing
    /// context ([`DEFAULT_MAX_FONTS`] adapters).
    pub fn with_default_capacity(system: FontSystem) -> FontEngine {
        FontEngine::new(system, DEFAULT_MAX_FONTS)
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        if self.transform != *transform {
            self.transform = *transform;
            self.stamp_change = true;
        }
    }

    pub fn set_antialias(&mut self, antialias: bool) {
        if self.antialias != antialias {
            self.antialias = antialias;
            self.stamp_change = true;
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    /// True when the transform or antialias setting changed after the
    /// last successful `create_font`.
    pub fn stamp_change(&self) -> bool {
        self.stamp_change
    }

    fn find_font(&self, signature: &FontSignature) -> Option<usize> {
        self.fonts.iter().position(|f| f.signature() == signature)
    }

    /// Selects (or constructs) the adapter for `desc` under the current
    /// transform and antialias settings and activates it. Returns false
    /// when the backend rejects the instance; no adapter is selected in
    /// that case.
    pub fn create_font(&mut self, desc: &FontDescriptor) -> bool {
        let signature = FontSignature::compute(desc, &self.transform, self.antialias);

        if let Some(current) = self.current.take() {
            self.fonts[current].deactivate();
        }

        match self.find_font(&signature) {
            Some(idx) => self.current = Some(idx),
            None => {
                if self.fonts.len() >= self.max_fonts {
                    // The oldest adapter goes, releasing its whole
                    // glyph cache, before the replacement is built.
                    let evicted = self.fonts.remove(0);
                    debug!("font pool full, evicting {:?}", evicted.signature());
                }
                let instance =
                    match self.system.create_instance(desc, &self.transform, self.antialias) {
                        Some(instance) => instance,
                        None => {
                            warn!("backend rejected font instance {:?}", signature);
                            return false;
                        }
                    };
                self.fonts.push(FontAdapter::new(
                    desc.clone(),
                    signature,
                    self.transform,
                    self.antialias,
                    instance,
                ));
                self.current = Some(self.fonts.len() - 1);
            }
        }

        let current = self.current.expect("BUG: no current font after create");
        self.fonts[current].activate();
        self.stamp_change = false;
        true
    }

    pub fn current_font(&self) -> Option<&FontAdapter> {
        self.current.map(|idx| &self.fonts[idx])
    }

    pub fn current_font_mut(&mut self) -> Option<&mut FontAdapter> {
        match self.current {
            Some(idx) => self.fonts.get_mut(idx),
            None => None,
        }
    }

    pub fn num_fonts(&self) -> usize {
        self.fonts.len()
    }

    pub fn max_fonts(&self) -> usize {
        self.max_fonts
    }
}

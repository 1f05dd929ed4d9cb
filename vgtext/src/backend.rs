/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The capability set a platform font backend provides to the engine.
//!
//! A backend wraps whatever the platform offers (FreeType, DirectWrite,
//! CoreText) behind two trait objects: a process-wide factory and a
//! per-instance handle. The engine never touches font files or system
//! tables itself.

use api::units::{DeviceIntRect, Scalar, Transform};
use api::{FontDescriptor, GlyphType, TextError};
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Metrics and payload description of the glyph most recently prepared
/// by a backend instance. Valid until the next `prepare_glyph` call on
/// that instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreparedGlyph {
    pub index: u32,
    pub data_size: usize,
    pub glyph_type: GlyphType,
    pub bounds: DeviceIntRect,
    pub height: Scalar,
    pub advance_x: Scalar,
    pub advance_y: Scalar,
}

/// A single font instance bound to a descriptor, transform and
/// antialias setting.
pub trait FontInstance {
    /// Makes this instance the backend's current one.
    fn activate(&mut self);

    /// Releases backend-current state.
    fn deactivate(&mut self);

    /// Loads the glyph for `code`. On success the returned description
    /// stays valid until the next call, and `write_glyph` will emit
    /// exactly `data_size` blob bytes.
    fn prepare_glyph(&mut self, code: u32) -> Option<PreparedGlyph>;

    /// Writes the last prepared glyph's blob into `dst`, whose length
    /// equals the prepared `data_size`.
    fn write_glyph(&mut self, dst: &mut [u8]);

    /// Applies the kerning adjustment between two glyph indices to the
    /// pen position.
    fn add_kerning(&mut self, prev_index: u32, curr_index: u32, x: &mut Scalar, y: &mut Scalar);

    fn ascent(&self) -> Scalar;
    fn descent(&self) -> Scalar;
    fn leading(&self) -> Scalar;
    fn height(&self) -> Scalar;
    fn units_per_em(&self) -> u32;
}

/// Process-wide font services.
pub trait FontBackend {
    /// One-time setup of shared platform state. Returns false when the
    /// platform font machinery is unavailable.
    fn init(&mut self) -> bool;

    /// Tears down whatever `init` set up.
    fn shutdown(&mut self);

    /// Builds an instance matching all of descriptor, transform and
    /// antialias, or `None` when the platform has no such face.
    fn create_instance(
        &mut self,
        desc: &FontDescriptor,
        transform: &Transform,
        antialias: bool,
    ) -> Option<Box<dyn FontInstance>>;
}

static ACTIVE_SYSTEMS: AtomicUsize = AtomicUsize::new(0);

/// True while at least one [`FontSystem`] acquisition is alive.
pub fn device_ready() -> bool {
    ACTIVE_SYSTEMS.load(Ordering::Acquire) > 0
}

/// Scoped ownership of an initialized backend.
///
/// Engine construction consumes one of these, so no engine can exist
/// over an uninitialized backend, and dropping the last engine shuts
/// the backend down again.
pub struct FontSystem {
    backend: Box<dyn FontBackend>,
}

impl FontSystem {
    pub fn acquire(mut backend: Box<dyn FontBackend>) -> Result<FontSystem, TextError> {
        if !backend.init() {
            return Err(TextError::DeviceNotReady);
        }
        ACTIVE_SYSTEMS.fetch_add(1, Ordering::AcqRel);
        debug!("font system acquired");
        Ok(FontSystem { backend })
    }

    pub(crate) fn create_instance(
        &mut self,
        desc: &FontDescriptor,
        transform: &Transform,
        antialias: bool,
    ) -> Option<Box<dyn FontInstance>> {
        self.backend.create_instance(desc, transform, antialias)
    }
}

impl Drop for FontSystem {
    fn drop(&mut self) {
        self.backend.shutdown();
        ACTIVE_SYSTEMS.fetch_sub(1, Ordering::AcqRel);
        debug!("font system released");
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Public API types for the vgtext font and text subsystem.
//!
//! These are the plain value types that cross the boundary between a
//! drawing context and the text engine: font descriptors, alignment
//! flags, colors, geometry aliases and the error taxonomy. Engine state
//! lives in the `vgtext` crate.

use bitflags::bitflags;

mod color;
mod font;
pub mod units;

pub use crate::color::ColorF;
pub use crate::font::{Charset, FontDescriptor, FontInfo};
pub use crate::font::{MAX_FONT_NAME_LENGTH, MAX_FONT_WEIGHT, MIN_FONT_WEIGHT};

bitflags! {
    /// Placement of rect-area text. An empty set centers on both axes.
    pub struct TextAlign: u32 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const RIGHT = 8;
    }
}

impl Default for TextAlign {
    fn default() -> Self {
        TextAlign::empty()
    }
}

/// How rect-area text is emitted once its path has been accumulated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DrawTextStyle {
    Fill,
    Stroke,
    Both,
}

/// Coverage style requested from the raster text pipeline.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextRenderType {
    Smooth = 0,
    Mono = 1,
    Stroke = 2,
}

/// Representation of a cached glyph's payload.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GlyphType {
    /// Bitmap coverage spans.
    Mono = 0,
    /// Vector outline command stream.
    Outline = 1,
}

/// Failures reported across the public text boundary.
///
/// Glyph-level failures never surface here: a run that cannot resolve a
/// code unit skips it and keeps producing output.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextError {
    /// The process-wide font backend is not initialized.
    DeviceNotReady,
    /// Null-equivalent input, zero length, or an out-of-range value.
    InvalidArgument,
    OutOfMemory,
    /// The backend rejected the requested font instance.
    FontCreationFailed,
    /// A text operation could not activate a font for no identified cause.
    UnknownError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_default_is_centered() {
        let align = TextAlign::default();
        assert!(!align.contains(TextAlign::LEFT));
        assert!(!align.contains(TextAlign::RIGHT));
        assert!(!align.contains(TextAlign::TOP));
        assert!(!align.contains(TextAlign::BOTTOM));
    }

    #[test]
    fn align_flags_combine() {
        let align = TextAlign::LEFT | TextAlign::TOP;
        assert!(align.contains(TextAlign::LEFT));
        assert!(align.contains(TextAlign::TOP));
        assert!(!align.contains(TextAlign::BOTTOM));
    }
}

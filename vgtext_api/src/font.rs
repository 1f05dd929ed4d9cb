/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::units::Scalar;
use crate::TextError;

/// Longest accepted font family name, in bytes.
pub const MAX_FONT_NAME_LENGTH: usize = 128;

pub const MIN_FONT_WEIGHT: i32 = 100;
pub const MAX_FONT_WEIGHT: i32 = 900;

/// Interpretation of the code units fed to a text run.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Charset {
    /// 8-bit code units.
    Ansi = 0,
    /// 16-bit code units.
    Unicode = 1,
}

impl Charset {
    pub fn tag(self) -> u32 {
        self as u32
    }
}

/// Description of a font face plus the settings that select a concrete
/// instance of it.
///
/// Descriptors are plain values: cloning one is cheap and two clones
/// compare equal field for field. Equal descriptors produce identical
/// engine signatures under the same transform and antialias settings.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescriptor {
    name: String,
    charset: Charset,
    height: Scalar,
    weight: i32,
    italic: bool,
    hint: bool,
    flip_y: bool,
}

impl FontDescriptor {
    pub fn new(name: &str, charset: Charset, height: Scalar, weight: i32, italic: bool) -> Self {
        FontDescriptor {
            name: bounded_name(name),
            charset,
            height,
            weight,
            italic,
            hint: true,
            flip_y: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn height(&self) -> Scalar {
        self.height
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn hint(&self) -> bool {
        self.hint
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn set_charset(&mut self, charset: Charset) {
        self.charset = charset;
    }

    /// Sets the face height. Negative sizes are rejected.
    pub fn set_height(&mut self, height: Scalar) -> Result<(), TextError> {
        if height < 0.0 {
            return Err(TextError::InvalidArgument);
        }
        self.height = height;
        Ok(())
    }

    /// Sets the face weight. Only values in
    /// [`MIN_FONT_WEIGHT`]`..=`[`MAX_FONT_WEIGHT`] are accepted.
    pub fn set_weight(&mut self, weight: i32) -> Result<(), TextError> {
        if weight < MIN_FONT_WEIGHT || weight > MAX_FONT_WEIGHT {
            return Err(TextError::InvalidArgument);
        }
        self.weight = weight;
        Ok(())
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn set_hint(&mut self, hint: bool) {
        self.hint = hint;
    }

    pub fn set_flip_y(&mut self, flip_y: bool) {
        self.flip_y = flip_y;
    }

    /// Compatibility setter that stores the inverse of its argument.
    /// TODO: remove the inversion once callers migrate to `set_flip_y`.
    pub fn set_flip(&mut self, flip: bool) {
        self.flip_y = !flip;
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        FontDescriptor::new("Arial", Charset::Ansi, 12.0, 400, false)
    }
}

fn bounded_name(name: &str) -> String {
    if name.len() <= MAX_FONT_NAME_LENGTH {
        return name.to_string();
    }
    // Truncate on a character boundary at or below the byte limit.
    let mut end = MAX_FONT_NAME_LENGTH;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}

/// Metrics of the currently selected font instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontInfo {
    pub size: Scalar,
    pub ascent: Scalar,
    pub descent: Scalar,
    pub leading: Scalar,
    pub units_per_em: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_descriptor() {
        let desc = FontDescriptor::default();
        assert_eq!(desc.name(), "Arial");
        assert_eq!(desc.charset(), Charset::Ansi);
        assert_eq!(desc.height(), 12.0);
        assert_eq!(desc.weight(), 400);
        assert!(!desc.italic());
        assert!(desc.hint());
        assert!(desc.flip_y());
    }

    #[test]
    fn weight_range_enforced() {
        let mut desc = FontDescriptor::default();
        assert_eq!(desc.set_weight(99), Err(TextError::InvalidArgument));
        assert_eq!(desc.set_weight(901), Err(TextError::InvalidArgument));
        assert_eq!(desc.set_weight(100), Ok(()));
        assert_eq!(desc.set_weight(900), Ok(()));
        assert_eq!(desc.weight(), 900);
    }

    #[test]
    fn negative_height_rejected() {
        let mut desc = FontDescriptor::default();
        assert_eq!(desc.set_height(-1.0), Err(TextError::InvalidArgument));
        assert_eq!(desc.height(), 12.0);
        assert_eq!(desc.set_height(0.0), Ok(()));
    }

    #[test]
    fn name_is_bounded() {
        let long = "x".repeat(MAX_FONT_NAME_LENGTH + 40);
        let desc = FontDescriptor::new(&long, Charset::Ansi, 10.0, 400, false);
        assert_eq!(desc.name().len(), MAX_FONT_NAME_LENGTH);
    }

    #[test]
    fn set_flip_inverts_its_argument() {
        let mut desc = FontDescriptor::default();
        desc.set_flip(true);
        assert!(!desc.flip_y());
        desc.set_flip(false);
        assert!(desc.flip_y());
    }

    #[test]
    fn clones_compare_equal() {
        let mut desc = FontDescriptor::new("Vera", Charset::Unicode, 16.0, 700, true);
        let copy = desc.clone();
        assert_eq!(desc, copy);
        desc.set_hint(false);
        assert_ne!(desc, copy);
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Canonical instance signatures.
//!
//! A signature is the engine's lookup key for a font adapter: the
//! descriptor fields in fixed order, then the antialias flag, then the
//! six affine components as 16.16 fixed-point hex. The encoding is
//! bit-exact across platforms so two equivalent instances always
//! collide and two inequivalent ones never do.

use api::units::Transform;
use api::FontDescriptor;
use smallvec::SmallVec;
use std::fmt::{self, Write};

/// Converts a scalar to 32-bit signed fixed point with 16 fractional
/// bits, truncating toward zero.
pub fn scalar_to_fixed(v: f64) -> i32 {
    (v * 65536.0) as i32
}

/// An adapter lookup key. Typical signatures fit the inline buffer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FontSignature {
    bytes: SmallVec<[u8; 128]>,
}

impl FontSignature {
    pub fn compute(desc: &FontDescriptor, transform: &Transform, antialias: bool) -> FontSignature {
        let mut sig = FontSignature::default();
        // Infallible: the sink only appends to a growable buffer.
        let _ = write!(
            sig,
            "{},{},{},{},{},{},{},{}-",
            desc.name(),
            desc.charset().tag(),
            desc.height() as i32,
            desc.weight(),
            desc.italic() as u8,
            desc.hint() as u8,
            desc.flip_y() as u8,
            antialias as u8,
        );
        let _ = write!(
            sig,
            "{:08X}{:08X}{:08X}{:08X}{:08X}{:08X}",
            scalar_to_fixed(transform.m11 as f64) as u32,
            scalar_to_fixed(transform.m22 as f64) as u32,
            scalar_to_fixed(transform.m21 as f64) as u32,
            scalar_to_fixed(transform.m12 as f64) as u32,
            scalar_to_fixed(transform.m31 as f64) as u32,
            scalar_to_fixed(transform.m32 as f64) as u32,
        );
        sig
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        // The buffer is only ever filled through `fmt::Write`.
        std::str::from_utf8(&self.bytes).unwrap_or("")
    }
}

impl Write for FontSignature {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.bytes.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl fmt::Debug for FontSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("FontSignature").field(&self.as_str()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Charset;

    fn desc() -> FontDescriptor {
        FontDescriptor::default()
    }

    #[test]
    fn identity_signature_format() {
        let sig = FontSignature::compute(&desc(), &Transform::identity(), false);
        let affine = format!("{}{}{}", "00010000", "00010000", "0".repeat(32));
        assert_eq!(sig.as_str(), format!("Arial,0,12,400,0,1,1,0-{}", affine));
    }

    #[test]
    fn fixed_point_encoding() {
        assert_eq!(scalar_to_fixed(1.0), 0x10000);
        assert_eq!(scalar_to_fixed(0.5), 0x8000);
        assert_eq!(scalar_to_fixed(-1.0), -0x10000);
        assert_eq!(format!("{:08X}", scalar_to_fixed(-1.0) as u32), "FFFF0000");
        // Precision below 1/65536 does not separate signatures.
        assert_eq!(scalar_to_fixed(1e-6), 0);
    }

    #[test]
    fn signature_separates_descriptor_fields() {
        let t = Transform::identity();
        let base = FontSignature::compute(&desc(), &t, false);

        let mut other = desc();
        other.set_weight(700).unwrap();
        assert_ne!(FontSignature::compute(&other, &t, false), base);

        let mut other = desc();
        other.set_italic(true);
        assert_ne!(FontSignature::compute(&other, &t, false), base);

        let mut other = desc();
        other.set_charset(Charset::Unicode);
        assert_ne!(FontSignature::compute(&other, &t, false), base);

        assert_ne!(FontSignature::compute(&desc(), &t, true), base);
    }

    #[test]
    fn signature_separates_transforms() {
        let base = FontSignature::compute(&desc(), &Transform::identity(), false);
        let scaled = Transform::new(2.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert_ne!(FontSignature::compute(&desc(), &scaled, false), base);

        let translated = Transform::new(1.0, 0.0, 0.0, 1.0, 3.0, -4.0);
        assert_ne!(FontSignature::compute(&desc(), &translated, false), base);
    }

    #[test]
    fn equivalent_inputs_collide() {
        let t = Transform::new(1.5, 0.25, -0.5, 2.0, 10.0, 20.0);
        let a = FontSignature::compute(&desc(), &t, true);
        let b = FontSignature::compute(&desc().clone(), &t, true);
        assert_eq!(a, b);
    }
}

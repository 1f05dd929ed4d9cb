/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Scalar and geometry aliases shared by the engine and its callers.
//!
//! The affine transform follows the row-vector convention, so for a
//! transform `m` a point maps as `x' = m11*x + m21*y + m31`. In the
//! terminology used throughout the text engine that means `sx = m11`,
//! `shy = m12`, `shx = m21`, `sy = m22`, `tx = m31` and `ty = m32`.

pub type Scalar = f32;

pub type Transform = euclid::default::Transform2D<Scalar>;
pub type Point = euclid::default::Point2D<Scalar>;
pub type Size = euclid::default::Size2D<Scalar>;
pub type Rect = euclid::default::Rect<Scalar>;

/// Integer rectangle in device pixels, used for glyph bounds.
pub type DeviceIntRect = euclid::default::Rect<i32>;
pub type DeviceIntPoint = euclid::default::Point2D<i32>;
pub type DeviceIntSize = euclid::default::Size2D<i32>;

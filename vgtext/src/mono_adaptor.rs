/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Replays a cached mono coverage blob at a pen position.

use api::units::{DeviceIntRect, Scalar};
use std::sync::Arc;

use crate::blob::{CoverageSpan, MonoBlobReader, MonoSpanIter};

/// Holds the mono blob of the most recently rasterized bitmap glyph and
/// serves its coverage spans translated to the pen position. The blob
/// bytes are shared with the owning glyph cache, not copied.
#[derive(Default)]
pub struct MonoAdaptor {
    data: Option<Arc<[u8]>>,
    dx: i32,
    dy: i32,
}

impl MonoAdaptor {
    pub fn new() -> MonoAdaptor {
        MonoAdaptor::default()
    }

    pub fn serialize_from(&mut self, data: Arc<[u8]>, x: Scalar, y: Scalar) {
        self.dx = x.round() as i32;
        self.dy = y.round() as i32;
        self.data = Some(data);
    }

    /// Bounds of the current glyph translated to the pen position, or
    /// `None` when no glyph has been serialized.
    pub fn bounds(&self) -> Option<DeviceIntRect> {
        let reader = MonoBlobReader::new(self.data.as_deref()?)?;
        Some(reader.bounds().translate(euclid::default::Vector2D::new(self.dx, self.dy)))
    }

    pub fn spans(&self) -> MonoAdaptorSpans {
        MonoAdaptorSpans {
            inner: self
                .data
                .as_deref()
                .and_then(MonoBlobReader::new)
                .map(|r| r.spans()),
            dx: self.dx,
            dy: self.dy,
        }
    }
}

pub struct MonoAdaptorSpans<'a> {
    inner: Option<MonoSpanIter<'a>>,
    dx: i32,
    dy: i32,
}

impl<'a> Iterator for MonoAdaptorSpans<'a> {
    type Item = CoverageSpan;

    fn next(&mut self) -> Option<CoverageSpan> {
        let span = self.inner.as_mut()?.next()?;
        Some(CoverageSpan {
            x: span.x + self.dx,
            y: span.y + self.dy,
            ..span
        })
    }
}

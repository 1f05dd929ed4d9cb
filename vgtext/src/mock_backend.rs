/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Deterministic in-memory backend and renderer used by the engine
//! tests. Glyph metrics are simple functions of the code unit so tests
//! can predict pen positions exactly.

use api::units::{DeviceIntPoint, DeviceIntRect, DeviceIntSize, Scalar, Transform};
use api::{ColorF, FontDescriptor, GlyphType, TextRenderType};
use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{FontBackend, FontInstance, PreparedGlyph};
use crate::blob::{write_outline_blob, MonoBlobWriter};
use crate::font_adapter::FontAdapter;
use crate::path::{GraphicPath, PathCmd, VertexSource};
use crate::renderer::TextRenderer;

pub const MOCK_ASCENT: Scalar = 10.0;
pub const MOCK_DESCENT: Scalar = 2.0;
pub const MOCK_LEADING: Scalar = 1.0;
pub const MOCK_HEIGHT: Scalar = 12.0;
pub const MOCK_GLYPH_HEIGHT: Scalar = 8.0;
pub const MOCK_KERN_X: Scalar = -1.0;

/// Advance width of a mock glyph.
pub fn mock_advance(code: u32) -> Scalar {
    6.0 + (code % 4) as Scalar
}

#[derive(Default)]
pub struct BackendLog {
    pub init_calls: usize,
    pub shutdown_calls: usize,
    pub instances_created: usize,
    pub instances_dropped: usize,
    pub activations: usize,
    pub deactivations: usize,
    pub prepare_calls: Vec<u32>,
    pub kerning_calls: Vec<(u32, u32)>,
}

pub type SharedLog = Rc<RefCell<BackendLog>>;

pub fn new_log() -> SharedLog {
    Rc::new(RefCell::new(BackendLog::default()))
}

pub struct MockBackend {
    log: SharedLog,
    /// Family names the platform pretends not to have.
    pub missing_families: Vec<String>,
}

impl MockBackend {
    pub fn new(log: &SharedLog) -> MockBackend {
        MockBackend {
            log: Rc::clone(log),
            missing_families: Vec::new(),
        }
    }
}

impl FontBackend for MockBackend {
    fn init(&mut self) -> bool {
        self.log.borrow_mut().init_calls += 1;
        true
    }

    fn shutdown(&mut self) {
        self.log.borrow_mut().shutdown_calls += 1;
    }

    fn create_instance(
        &mut self,
        desc: &FontDescriptor,
        _transform: &Transform,
        antialias: bool,
    ) -> Option<Box<dyn FontInstance>> {
        if self.missing_families.iter().any(|f| f == desc.name()) {
            return None;
        }
        self.log.borrow_mut().instances_created += 1;
        Some(Box::new(MockInstance {
            log: Rc::clone(&self.log),
            outline: antialias,
            pending: None,
        }))
    }
}

struct MockInstance {
    log: SharedLog,
    outline: bool,
    pending: Option<Vec<u8>>,
}

impl MockInstance {
    fn make_blob(&self, code: u32) -> (GlyphType, Vec<u8>) {
        let w = mock_advance(code) - 1.0;
        if self.outline {
            let blob = write_outline_blob(&[
                (PathCmd::MoveTo, 0.0, 0.0),
                (PathCmd::LineTo, w, 0.0),
                (PathCmd::LineTo, w, -MOCK_GLYPH_HEIGHT),
                (PathCmd::LineTo, 0.0, -MOCK_GLYPH_HEIGHT),
                (PathCmd::EndPoly { close: true }, 0.0, 0.0),
            ]);
            (GlyphType::Outline, blob)
        } else {
            let bounds = DeviceIntRect::new(
                DeviceIntPoint::new(0, -(MOCK_GLYPH_HEIGHT as i32)),
                DeviceIntSize::new(w as i32, MOCK_GLYPH_HEIGHT as i32),
            );
            let mut writer = MonoBlobWriter::new(bounds);
            for row in 0..2 {
                writer.scanline(-row, &[(0, w as i32, 255)]);
            }
            (GlyphType::Mono, writer.finish())
        }
    }
}

impl FontInstance for MockInstance {
    fn activate(&mut self) {
        self.log.borrow_mut().activations += 1;
    }

    fn deactivate(&mut self) {
        self.log.borrow_mut().deactivations += 1;
    }

    fn prepare_glyph(&mut self, code: u32) -> Option<PreparedGlyph> {
        self.log.borrow_mut().prepare_calls.push(code);
        // Code 0 stands in for a character the face cannot map.
        if code == 0 {
            self.pending = None;
            return None;
        }
        let (glyph_type, blob) = self.make_blob(code);
        let prepared = PreparedGlyph {
            index: code,
            data_size: blob.len(),
            glyph_type,
            bounds: DeviceIntRect::new(
                DeviceIntPoint::new(0, -(MOCK_GLYPH_HEIGHT as i32)),
                DeviceIntSize::new(mock_advance(code) as i32, MOCK_GLYPH_HEIGHT as i32),
            ),
            height: MOCK_GLYPH_HEIGHT,
            advance_x: mock_advance(code),
            advance_y: 0.0,
        };
        self.pending = Some(blob);
        Some(prepared)
    }

    fn write_glyph(&mut self, dst: &mut [u8]) {
        if let Some(blob) = self.pending.take() {
            dst.copy_from_slice(&blob);
        }
    }

    fn add_kerning(&mut self, prev_index: u32, curr_index: u32, x: &mut Scalar, _y: &mut Scalar) {
        self.log.borrow_mut().kerning_calls.push((prev_index, curr_index));
        // Only the A/V pair kerns, so runs without it keep exact pens.
        if prev_index == 65 && curr_index == 86 {
            *x += MOCK_KERN_X;
        }
    }

    fn ascent(&self) -> Scalar {
        MOCK_ASCENT
    }

    fn descent(&self) -> Scalar {
        MOCK_DESCENT
    }

    fn leading(&self) -> Scalar {
        MOCK_LEADING
    }

    fn height(&self) -> Scalar {
        MOCK_HEIGHT
    }

    fn units_per_em(&self) -> u32 {
        2048
    }
}

impl Drop for MockInstance {
    fn drop(&mut self) {
        self.log.borrow_mut().instances_dropped += 1;
    }
}

/// What a collecting renderer saw. Glyph events record where the glyph
/// landed: the first span for mono output, the first move-to for
/// outlines.
#[derive(Debug, PartialEq)]
pub enum RenderEvent {
    Glyph {
        glyph_type: GlyphType,
        spans: usize,
        vertices: usize,
        origin: (Scalar, Scalar),
    },
    RasterFlush(TextRenderType),
    Fill { vertices: usize, color: ColorF },
    Stroke { vertices: usize, color: ColorF },
    Paint { vertices: usize },
    Shadow { fill: bool, stroke: bool },
    Blur,
}

#[derive(Default)]
pub struct CollectingRenderer {
    pub events: Vec<RenderEvent>,
    /// Clones of every path handed to fill/stroke/paint, in order.
    pub paths: Vec<GraphicPath>,
}

impl CollectingRenderer {
    pub fn new() -> CollectingRenderer {
        CollectingRenderer::default()
    }

    pub fn glyph_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Glyph { .. }))
            .count()
    }

    pub fn glyph_origins(&self) -> Vec<(Scalar, Scalar)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Glyph { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }
}

impl TextRenderer for CollectingRenderer {
    fn render_glyph(&mut self, font: &mut FontAdapter, glyph_type: GlyphType) {
        let event = match glyph_type {
            GlyphType::Mono => {
                let mut spans = 0;
                let mut origin = (0.0, 0.0);
                for (i, span) in font.mono_adaptor().spans().enumerate() {
                    if i == 0 {
                        origin = (span.x as Scalar, span.y as Scalar);
                    }
                    spans += 1;
                }
                RenderEvent::Glyph { glyph_type, spans, vertices: 0, origin }
            }
            GlyphType::Outline => {
                let adaptor = font.path_adaptor();
                adaptor.rewind();
                let mut vertices = 0;
                let mut origin = (0.0, 0.0);
                let (mut x, mut y) = (0.0, 0.0);
                while !adaptor.vertex(&mut x, &mut y).is_stop() {
                    if vertices == 0 {
                        origin = (x, y);
                    }
                    vertices += 1;
                }
                RenderEvent::Glyph { glyph_type, spans: 0, vertices, origin }
            }
        };
        self.events.push(event);
    }

    fn render_glyphs_raster(&mut self, render_type: TextRenderType) {
        self.events.push(RenderEvent::RasterFlush(render_type));
    }

    fn render_fill(&mut self, path: &GraphicPath, color: ColorF) {
        self.paths.push(path.clone());
        self.events.push(RenderEvent::Fill { vertices: path.len(), color });
    }

    fn render_stroke(&mut self, path: &GraphicPath, color: ColorF) {
        self.paths.push(path.clone());
        self.events.push(RenderEvent::Stroke { vertices: path.len(), color });
    }

    fn render_paint(&mut self, path: &GraphicPath, _fill: ColorF, _stroke: ColorF) {
        self.paths.push(path.clone());
        self.events.push(RenderEvent::Paint { vertices: path.len() });
    }

    fn render_shadow(&mut self, _path: &GraphicPath, fill: bool, stroke: bool) {
        self.events.push(RenderEvent::Shadow { fill, stroke });
    }

    fn render_blur(&mut self) {
        self.events.push(RenderEvent::Blur);
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The text boundary of a drawing context: state setters, argument
//! validation and the run loops that drive the font engine.

use api::units::{Rect, Scalar, Size, Transform};
use api::{
    Charset, ColorF, DrawTextStyle, FontDescriptor, FontInfo, GlyphType, TextAlign, TextError,
    TextRenderType,
};
use smallvec::SmallVec;

use crate::backend::device_ready;
use crate::curve::CurveConverter;
use crate::font_adapter::FontAdapter;
use crate::font_engine::FontEngine;
use crate::glyph_cache::GlyphRecord;
use crate::path::{GraphicPath, PathCmd, VertexSource};
use crate::renderer::TextRenderer;

/// Code units for one run. The variant, not the descriptor charset,
/// decides how the buffer is stepped; the charset only governs how
/// single characters are truncated in [`TextContext::get_glyph`].
#[derive(Clone, Copy, Debug)]
pub enum TextSource<'a> {
    Latin(&'a str),
    Wide(&'a [u16]),
}

impl<'a> TextSource<'a> {
    pub fn is_empty(&self) -> bool {
        match *self {
            TextSource::Latin(s) => s.is_empty(),
            TextSource::Wide(w) => w.is_empty(),
        }
    }

    fn code_units(&self) -> SmallVec<[u32; 64]> {
        match *self {
            TextSource::Latin(s) => s.bytes().map(u32::from).collect(),
            TextSource::Wide(w) => w.iter().map(|&c| u32::from(c)).collect(),
        }
    }
}

/// Per-context text state plus the font engine it drives.
///
/// All operations are synchronous and happen in issue order; a context
/// is a unit of serialization and is never shared across threads.
pub struct TextContext {
    engine: FontEngine,
    font: FontDescriptor,
    text_matrix: Transform,
    antialias: bool,
    kerning: bool,
    render_type: TextRenderType,
    fill_color: ColorF,
    stroke_color: ColorF,
}

impl TextContext {
    pub fn new(engine: FontEngine) -> TextContext {
        TextContext {
            engine,
            font: FontDescriptor::default(),
            text_matrix: Transform::identity(),
            antialias: false,
            kerning: false,
            render_type: TextRenderType::Smooth,
            fill_color: ColorF::BLACK,
            stroke_color: ColorF::BLACK,
        }
    }

    pub fn engine(&self) -> &FontEngine {
        &self.engine
    }

    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    pub fn set_font(&mut self, desc: &FontDescriptor) -> Result<(), TextError> {
        ensure_ready()?;
        self.font = desc.clone();
        Ok(())
    }

    pub fn set_text_antialias(&mut self, antialias: bool) -> Result<(), TextError> {
        ensure_ready()?;
        self.antialias = antialias;
        Ok(())
    }

    pub fn set_text_kerning(&mut self, kerning: bool) -> Result<(), TextError> {
        ensure_ready()?;
        self.kerning = kerning;
        Ok(())
    }

    pub fn set_text_render_type(&mut self, render_type: TextRenderType) -> Result<(), TextError> {
        ensure_ready()?;
        self.render_type = render_type;
        Ok(())
    }

    pub fn set_text_color(&mut self, color: ColorF) -> Result<(), TextError> {
        ensure_ready()?;
        self.fill_color = color;
        Ok(())
    }

    pub fn set_text_stroke_color(&mut self, color: ColorF) -> Result<(), TextError> {
        ensure_ready()?;
        self.stroke_color = color;
        Ok(())
    }

    pub fn set_text_matrix(&mut self, matrix: &Transform) -> Result<(), TextError> {
        ensure_ready()?;
        self.text_matrix = *matrix;
        Ok(())
    }

    /// Post-multiplies the text matrix by `matrix`.
    pub fn text_transform(&mut self, matrix: &Transform) -> Result<(), TextError> {
        ensure_ready()?;
        self.text_matrix = self.text_matrix.then(matrix);
        Ok(())
    }

    /// Applies the context settings to the engine and makes sure the
    /// context font is the active one. Returns false when the backend
    /// cannot provide the font; text operations then produce nothing.
    fn prepare_run(&mut self) -> bool {
        self.engine.set_transform(&self.text_matrix);
        self.engine.set_antialias(self.antialias);

        // Fast path: the active adapter already matches.
        if !self.engine.stamp_change() {
            if let Some(current) = self.engine.current_font() {
                if current.descriptor() == &self.font {
                    return true;
                }
            }
        }
        self.engine.create_font(&self.font)
    }

    /// Draws a run of 8-bit code units with the baseline pen starting
    /// at `(x, y + ascent)`.
    pub fn text_out(
        &mut self,
        x: Scalar,
        y: Scalar,
        text: &str,
        renderer: &mut dyn TextRenderer,
    ) -> Result<(), TextError> {
        ensure_ready()?;
        if text.is_empty() {
            return Err(TextError::InvalidArgument);
        }
        self.raster_run(x, y, TextSource::Latin(text), renderer);
        Ok(())
    }

    /// Draws a run of 16-bit code units.
    pub fn wide_text_out(
        &mut self,
        x: Scalar,
        y: Scalar,
        text: &[u16],
        renderer: &mut dyn TextRenderer,
    ) -> Result<(), TextError> {
        ensure_ready()?;
        if text.is_empty() {
            return Err(TextError::InvalidArgument);
        }
        self.raster_run(x, y, TextSource::Wide(text), renderer);
        Ok(())
    }

    fn raster_run(
        &mut self,
        x: Scalar,
        y: Scalar,
        text: TextSource,
        renderer: &mut dyn TextRenderer,
    ) {
        if !self.prepare_run() {
            return;
        }
        let kerning = self.kerning;
        let render_type = self.render_type;
        let codes = text.code_units();
        let adapter = match self.engine.current_font_mut() {
            Some(adapter) => adapter,
            None => return,
        };

        let mut gx = x;
        let mut gy = y + adapter.ascent();
        for &code in &codes {
            if let Some(glyph) = adapter.get_glyph(code).cloned() {
                if kerning {
                    adapter.add_kerning(&mut gx, &mut gy);
                }
                if adapter.generate_raster(&glyph, gx, gy) {
                    renderer.render_glyph(adapter, glyph.glyph_type);
                }
                gx += glyph.advance_x;
                gy += glyph.advance_y;
            }
        }
        renderer.render_glyphs_raster(render_type);
    }

    /// Draws text aligned inside `area` by accumulating glyph outlines
    /// into a path and emitting it per `style`. Antialiasing is forced
    /// on for the duration so the backend yields outline glyphs.
    pub fn draw_text(
        &mut self,
        area: &Rect,
        text: TextSource,
        style: DrawTextStyle,
        align: TextAlign,
        renderer: &mut dyn TextRenderer,
    ) -> Result<(), TextError> {
        ensure_ready()?;
        if text.is_empty() {
            return Err(TextError::InvalidArgument);
        }

        let saved_antialias = self.antialias;
        self.antialias = true;

        let mut text_path = GraphicPath::new();
        if self.prepare_run() {
            let kerning = self.kerning;
            let codes = text.code_units();
            let len = codes.len();
            if let Some(adapter) = self.engine.current_font_mut() {
                // Width estimated from the first glyph only; exact
                // measurement would require resolving the whole run.
                let (mut w, mut h) = (0.0, 0.0);
                if let Some(glyph) = adapter.get_glyph(codes[0]) {
                    w = glyph.advance_x;
                    h = glyph.height;
                }
                let w = w * len as Scalar;

                let mut x = if align.contains(TextAlign::LEFT) {
                    area.min_x()
                } else if align.contains(TextAlign::RIGHT) {
                    area.min_x() + (area.size.width - w)
                } else {
                    area.min_x() + (area.size.width - w) / 2.0
                };
                let mut y = if align.contains(TextAlign::TOP) {
                    area.min_y() + adapter.ascent()
                } else if align.contains(TextAlign::BOTTOM) {
                    area.min_y() + (area.size.height - h) - adapter.descent()
                } else {
                    area.min_y()
                        + (area.size.height - h) / 2.0
                        + (adapter.ascent() - adapter.descent()) / 2.0
                };

                for &code in &codes {
                    if let Some(glyph) = adapter.get_glyph(code).cloned() {
                        if kerning {
                            adapter.add_kerning(&mut x, &mut y);
                        }
                        if glyph.glyph_type == GlyphType::Outline
                            && adapter.generate_raster(&glyph, x, y)
                        {
                            append_glyph_outline(adapter, &mut text_path);
                        }
                        x += glyph.advance_x;
                        y += glyph.advance_y;
                    }
                }
            }
        }
        text_path.close_polygon();
        self.antialias = saved_antialias;

        match style {
            DrawTextStyle::Fill => {
                renderer.render_shadow(&text_path, true, false);
                renderer.render_fill(&text_path, self.fill_color);
                renderer.render_blur();
            }
            DrawTextStyle::Stroke => {
                renderer.render_shadow(&text_path, false, true);
                renderer.render_stroke(&text_path, self.stroke_color);
                renderer.render_blur();
            }
            DrawTextStyle::Both => {
                renderer.render_shadow(&text_path, true, true);
                renderer.render_paint(&text_path, self.fill_color, self.stroke_color);
                renderer.render_blur();
            }
        }
        Ok(())
    }

    /// Width of `text` as the sum of resolved advances, and the current
    /// font height.
    pub fn text_extent(&mut self, text: TextSource) -> Result<Size, TextError> {
        ensure_ready()?;
        if text.is_empty() {
            return Err(TextError::InvalidArgument);
        }

        let mut width = 0.0;
        let mut height = 0.0;
        if self.prepare_run() {
            if let Some(adapter) = self.engine.current_font_mut() {
                for &code in &text.code_units() {
                    if let Some(glyph) = adapter.get_glyph(code) {
                        width += glyph.advance_x;
                    }
                }
                height = adapter.height();
            }
        }
        Ok(Size::new(width, height))
    }

    /// Renders already-fetched glyph records with the usual advance and
    /// kerning bookkeeping.
    pub fn show_glyphs(
        &mut self,
        x: Scalar,
        y: Scalar,
        glyphs: &[GlyphRecord],
        renderer: &mut dyn TextRenderer,
    ) -> Result<(), TextError> {
        ensure_ready()?;
        if glyphs.is_empty() {
            return Err(TextError::InvalidArgument);
        }

        if self.prepare_run() {
            let kerning = self.kerning;
            let render_type = self.render_type;
            if let Some(adapter) = self.engine.current_font_mut() {
                let mut gx = x;
                let mut gy = y + adapter.ascent();
                for glyph in glyphs {
                    if kerning {
                        adapter.add_kerning(&mut gx, &mut gy);
                    }
                    if adapter.generate_raster(glyph, gx, gy) {
                        renderer.render_glyph(adapter, glyph.glyph_type);
                    }
                    gx += glyph.advance_x;
                    gy += glyph.advance_y;
                }
                renderer.render_glyphs_raster(render_type);
            }
        }
        Ok(())
    }

    /// Fetches one glyph through the current font, truncating `ch` to
    /// the descriptor charset's code unit width. `Ok(None)` means the
    /// face has no glyph for the character.
    pub fn get_glyph(&mut self, ch: u32) -> Result<Option<GlyphRecord>, TextError> {
        ensure_ready()?;
        if !self.prepare_run() {
            return Err(TextError::UnknownError);
        }
        let code = match self.font.charset() {
            Charset::Ansi => ch & 0xFF,
            Charset::Unicode => ch & 0xFFFF,
        };
        match self.engine.current_font_mut() {
            Some(adapter) => Ok(adapter.get_glyph(code).cloned()),
            None => Err(TextError::UnknownError),
        }
    }

    /// Replaces `path` with the outline of `glyph` placed at the
    /// baseline. A mono record is re-fetched as an outline, which is
    /// why antialiasing is forced on for the duration.
    pub fn path_from_glyph(
        &mut self,
        glyph: &GlyphRecord,
        path: &mut GraphicPath,
    ) -> Result<(), TextError> {
        ensure_ready()?;
        path.remove_all();

        let saved_antialias = self.antialias;
        self.antialias = true;
        if self.prepare_run() {
            if let Some(adapter) = self.engine.current_font_mut() {
                let record = if glyph.glyph_type == GlyphType::Outline {
                    Some(glyph.clone())
                } else {
                    adapter.get_glyph(glyph.code).cloned()
                };
                if let Some(record) = record {
                    if record.glyph_type == GlyphType::Outline {
                        let y = adapter.ascent();
                        if adapter.generate_raster(&record, 0.0, y) {
                            append_glyph_outline(adapter, path);
                        }
                    }
                }
            }
        }
        path.close_polygon();
        self.antialias = saved_antialias;
        Ok(())
    }

    /// Metrics of the currently selected font.
    pub fn font_info(&mut self) -> Result<FontInfo, TextError> {
        ensure_ready()?;
        if !self.prepare_run() {
            return Err(TextError::UnknownError);
        }
        match self.engine.current_font() {
            Some(adapter) => Ok(FontInfo {
                size: adapter.height(),
                ascent: adapter.ascent(),
                descent: adapter.descent(),
                leading: adapter.leading(),
                units_per_em: adapter.units_per_em(),
            }),
            None => Err(TextError::UnknownError),
        }
    }
}

fn ensure_ready() -> Result<(), TextError> {
    if device_ready() {
        Ok(())
    } else {
        Err(TextError::DeviceNotReady)
    }
}

/// Drains the adapter's path adaptor through curve conversion into
/// `path`, appending the closing vertex on stop.
fn append_glyph_outline(adapter: &mut FontAdapter, path: &mut GraphicPath) {
    let mut curve = CurveConverter::new(adapter.path_adaptor());
    let (mut x, mut y) = (0.0, 0.0);
    loop {
        let cmd = curve.vertex(&mut x, &mut y);
        if cmd.is_stop() {
            path.add_vertex(x, y, PathCmd::EndPoly { close: true });
            break;
        }
        path.add_vertex(x, y, cmd);
    }
}

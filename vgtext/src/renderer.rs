/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The surface the text engine produces into.

use api::{ColorF, GlyphType, TextRenderType};

use crate::font_adapter::FontAdapter;
use crate::path::GraphicPath;

/// Consumer of text output. A raster run feeds one `render_glyph` per
/// resolved code unit (the adapter's mono or path adaptor holds that
/// glyph's coverage or outline at the current pen) and ends with one
/// `render_glyphs_raster` flush. Rect-area text instead accumulates a
/// path and emits it through the fill/stroke entry points, bracketed by
/// the shadow and blur hooks.
pub trait TextRenderer {
    fn render_glyph(&mut self, font: &mut FontAdapter, glyph_type: GlyphType);

    fn render_glyphs_raster(&mut self, render_type: TextRenderType);

    fn render_fill(&mut self, path: &GraphicPath, color: ColorF);

    fn render_stroke(&mut self, path: &GraphicPath, color: ColorF);

    fn render_paint(&mut self, path: &GraphicPath, fill: ColorF, stroke: ColorF);

    fn render_shadow(&mut self, _path: &GraphicPath, _fill: bool, _stroke: bool) {}

    fn render_blur(&mut self) {}
}

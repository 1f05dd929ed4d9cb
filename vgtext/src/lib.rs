/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Font engine, glyph caches and text runs for a 2D vector graphics
//! renderer.
//!
//! The engine keeps a bounded pool of font adapters, each binding one
//! (descriptor, transform, antialias) combination to a platform backend
//! instance together with its own glyph cache. A [`TextContext`] sits
//! on top: it validates boundary arguments, selects the right adapter
//! per run (reusing signatures where possible) and feeds either
//! coverage spans or outline vertices to a [`TextRenderer`].
//!
//! Platform font backends (FreeType, DirectWrite, CoreText wrappers)
//! plug in through the [`FontBackend`] / [`FontInstance`] traits; the
//! engine itself never reads font files.

pub mod backend;
pub mod blob;
pub mod context;
pub mod curve;
pub mod font_adapter;
pub mod font_engine;
pub mod glyph_cache;
mod internal_types;
#[cfg(test)]
mod mock_backend;
pub mod mono_adaptor;
pub mod path;
pub mod path_adaptor;
pub mod renderer;
pub mod signature;

pub use api;

pub use crate::backend::{device_ready, FontBackend, FontInstance, FontSystem, PreparedGlyph};
pub use crate::context::{TextContext, TextSource};
pub use crate::font_adapter::FontAdapter;
pub use crate::font_engine::{FontEngine, DEFAULT_MAX_FONTS};
pub use crate::glyph_cache::{GlyphCache, GlyphRecord};
pub use crate::mono_adaptor::MonoAdaptor;
pub use crate::path::{GraphicPath, PathCmd, VertexSource};
pub use crate::path_adaptor::PathAdaptor;
pub use crate::renderer::TextRenderer;
pub use crate::signature::FontSignature;

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Path commands, the vertex stream contract and growable path storage.
//!
//! The command encoding is the one the outline glyph blobs carry on the
//! wire, so the raw `u32` values are part of the blob format.

use api::units::Scalar;

const RAW_STOP: u32 = 0;
const RAW_MOVE_TO: u32 = 1;
const RAW_LINE_TO: u32 = 2;
const RAW_CURVE3: u32 = 3;
const RAW_CURVE4: u32 = 4;
const RAW_END_POLY: u32 = 0x0F;
const RAW_CMD_MASK: u32 = 0x0F;
const RAW_FLAG_CLOSE: u32 = 0x40;

/// One command of a vertex stream.
///
/// `Curve3` carries a quadratic control point followed by one more
/// `Curve3` vertex for the end point; `Curve4` carries two cubic control
/// points followed by a `Curve4` end point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    Stop,
    MoveTo,
    LineTo,
    Curve3,
    Curve4,
    EndPoly { close: bool },
}

impl PathCmd {
    pub fn to_raw(self) -> u32 {
        match self {
            PathCmd::Stop => RAW_STOP,
            PathCmd::MoveTo => RAW_MOVE_TO,
            PathCmd::LineTo => RAW_LINE_TO,
            PathCmd::Curve3 => RAW_CURVE3,
            PathCmd::Curve4 => RAW_CURVE4,
            PathCmd::EndPoly { close } => {
                RAW_END_POLY | if close { RAW_FLAG_CLOSE } else { 0 }
            }
        }
    }

    /// Decodes a raw command. Unknown values decode as `Stop` so a
    /// corrupt stream terminates instead of looping.
    pub fn from_raw(raw: u32) -> PathCmd {
        match raw & RAW_CMD_MASK {
            RAW_MOVE_TO => PathCmd::MoveTo,
            RAW_LINE_TO => PathCmd::LineTo,
            RAW_CURVE3 => PathCmd::Curve3,
            RAW_CURVE4 => PathCmd::Curve4,
            RAW_END_POLY => PathCmd::EndPoly {
                close: raw & RAW_FLAG_CLOSE != 0,
            },
            _ => PathCmd::Stop,
        }
    }

    pub fn is_stop(self) -> bool {
        self == PathCmd::Stop
    }

    /// True for commands that carry a point in glyph space.
    pub fn is_vertex(self) -> bool {
        match self {
            PathCmd::MoveTo | PathCmd::LineTo | PathCmd::Curve3 | PathCmd::Curve4 => true,
            _ => false,
        }
    }
}

/// Pull-style vertex iteration, the seam between cached outline blobs
/// and their consumers.
pub trait VertexSource {
    /// Restart iteration from the first vertex.
    fn rewind(&mut self);

    /// Writes the next vertex into `x`/`y` and returns its command.
    /// Returns `Stop` once the stream is exhausted.
    fn vertex(&mut self, x: &mut Scalar, y: &mut Scalar) -> PathCmd;
}

/// Growable vertex storage used to accumulate rect-area text outlines
/// before handing them to the renderer.
#[derive(Clone, Debug, Default)]
pub struct GraphicPath {
    vertices: Vec<(PathCmd, Scalar, Scalar)>,
    read: usize,
}

impl GraphicPath {
    pub fn new() -> GraphicPath {
        GraphicPath::default()
    }

    pub fn add_vertex(&mut self, x: Scalar, y: Scalar, cmd: PathCmd) {
        self.vertices.push((cmd, x, y));
    }

    /// Closes the current polygon if it does not already end in one.
    pub fn close_polygon(&mut self) {
        if let Some(&(cmd, _, _)) = self.vertices.last() {
            if cmd.is_vertex() {
                self.vertices.push((PathCmd::EndPoly { close: true }, 0.0, 0.0));
            }
        }
    }

    pub fn remove_all(&mut self) {
        self.vertices.clear();
        self.read = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[(PathCmd, Scalar, Scalar)] {
        &self.vertices
    }
}

impl VertexSource for GraphicPath {
    fn rewind(&mut self) {
        self.read = 0;
    }

    fn vertex(&mut self, x: &mut Scalar, y: &mut Scalar) -> PathCmd {
        match self.vertices.get(self.read) {
            Some(&(cmd, vx, vy)) => {
                self.read += 1;
                *x = vx;
                *y = vy;
                cmd
            }
            None => PathCmd::Stop,
        }
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Expands curve control vertices into line approximations.

use api::units::Scalar;
use std::collections::VecDeque;

use crate::path::{PathCmd, VertexSource};

/// Number of line segments substituted for one curve command.
const CURVE_STEPS: u32 = 16;

/// Wraps a vertex source and replaces `Curve3`/`Curve4` command groups
/// with `LineTo` approximations. Every other command passes through.
pub struct CurveConverter<'a, S: VertexSource + ?Sized> {
    source: &'a mut S,
    pending: VecDeque<(Scalar, Scalar)>,
    last: (Scalar, Scalar),
}

impl<'a, S: VertexSource + ?Sized> CurveConverter<'a, S> {
    pub fn new(source: &'a mut S) -> CurveConverter<'a, S> {
        source.rewind();
        CurveConverter {
            source,
            pending: VecDeque::new(),
            last: (0.0, 0.0),
        }
    }

    fn flatten_quad(&mut self, ctrl: (Scalar, Scalar), end: (Scalar, Scalar)) {
        let (x0, y0) = self.last;
        for i in 1..=CURVE_STEPS {
            let t = i as Scalar / CURVE_STEPS as Scalar;
            let u = 1.0 - t;
            let x = u * u * x0 + 2.0 * u * t * ctrl.0 + t * t * end.0;
            let y = u * u * y0 + 2.0 * u * t * ctrl.1 + t * t * end.1;
            self.pending.push_back((x, y));
        }
        self.last = end;
    }

    fn flatten_cubic(&mut self, c1: (Scalar, Scalar), c2: (Scalar, Scalar), end: (Scalar, Scalar)) {
        let (x0, y0) = self.last;
        for i in 1..=CURVE_STEPS {
            let t = i as Scalar / CURVE_STEPS as Scalar;
            let u = 1.0 - t;
            let x = u * u * u * x0
                + 3.0 * u * u * t * c1.0
                + 3.0 * u * t * t * c2.0
                + t * t * t * end.0;
            let y = u * u * u * y0
                + 3.0 * u * u * t * c1.1
                + 3.0 * u * t * t * c2.1
                + t * t * t * end.1;
            self.pending.push_back((x, y));
        }
        self.last = end;
    }

    fn read_point(&mut self, expect: PathCmd) -> Option<(Scalar, Scalar)> {
        let (mut x, mut y) = (0.0, 0.0);
        if self.source.vertex(&mut x, &mut y) == expect {
            Some((x, y))
        } else {
            None
        }
    }
}

impl<'a, S: VertexSource + ?Sized> VertexSource for CurveConverter<'a, S> {
    fn rewind(&mut self) {
        self.source.rewind();
        self.pending.clear();
        self.last = (0.0, 0.0);
    }

    fn vertex(&mut self, x: &mut Scalar, y: &mut Scalar) -> PathCmd {
        if let Some((px, py)) = self.pending.pop_front() {
            *x = px;
            *y = py;
            return PathCmd::LineTo;
        }

        let cmd = self.source.vertex(x, y);
        match cmd {
            PathCmd::MoveTo | PathCmd::LineTo => {
                self.last = (*x, *y);
                cmd
            }
            PathCmd::Curve3 => {
                let ctrl = (*x, *y);
                let end = match self.read_point(PathCmd::Curve3) {
                    Some(p) => p,
                    // Truncated group: terminate rather than emit garbage.
                    None => return PathCmd::Stop,
                };
                self.flatten_quad(ctrl, end);
                let (px, py) = self.pending.pop_front().unwrap();
                *x = px;
                *y = py;
                PathCmd::LineTo
            }
            PathCmd::Curve4 => {
                let c1 = (*x, *y);
                let c2 = match self.read_point(PathCmd::Curve4) {
                    Some(p) => p,
                    None => return PathCmd::Stop,
                };
                let end = match self.read_point(PathCmd::Curve4) {
                    Some(p) => p,
                    None => return PathCmd::Stop,
                };
                self.flatten_cubic(c1, c2, end);
                let (px, py) = self.pending.pop_front().unwrap();
                *x = px;
                *y = py;
                PathCmd::LineTo
            }
            _ => cmd,
        }
    }
}

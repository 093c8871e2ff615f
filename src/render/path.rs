use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Close,
}

/// Backend-agnostic vector path in pixel space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Straight segments through `points`.
    #[must_use]
    pub fn polyline(points: &[PixelPoint]) -> Self {
        let mut path = Self::new();
        for (index, point) in points.iter().enumerate() {
            if index == 0 {
                path.move_to(point.x, point.y);
            } else {
                path.line_to(point.x, point.y);
            }
        }
        path
    }

    /// Centripetal-style Catmull-Rom spline through `points`, as cubic Beziers.
    ///
    /// `alpha` parameterizes knot spacing (`0.5` is centripetal). Two points
    /// produce a single straight segment.
    #[must_use]
    pub fn catmull_rom(points: &[PixelPoint], alpha: f64) -> Self {
        let mut spline = CatmullRomBuilder::new(alpha);
        for point in points {
            spline.point(point.x, point.y);
        }
        spline.finish()
    }

    /// SVG path data (`M`, `L`, `C`, `Z`).
    #[must_use]
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            // Writing into a String cannot fail.
            let _ = match *command {
                PathCommand::MoveTo { x, y } => write!(out, "M{x},{y}"),
                PathCommand::LineTo { x, y } => write!(out, "L{x},{y}"),
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => write!(out, "C{x1},{y1},{x2},{y2},{x},{y}"),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }

    /// Last on-curve point, if any.
    #[must_use]
    pub fn current_point(&self) -> Option<PixelPoint> {
        self.commands.iter().rev().find_map(|command| match *command {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::CubicTo { x, y, .. } => Some(PixelPoint::new(x, y)),
            PathCommand::Close => None,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        let finite = self.commands.iter().all(|command| match *command {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => [x1, y1, x2, y2, x, y].iter().all(|value| value.is_finite()),
            PathCommand::Close => true,
        });
        if finite {
            Ok(())
        } else {
            Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ))
        }
    }
}

const KNOT_EPSILON: f64 = 1e-12;

/// Streaming Catmull-Rom segment emitter.
///
/// Keeps a sliding window of the last three points plus the alpha-scaled
/// chord lengths between them; each new point completes the segment between
/// the two middle points of the window.
struct CatmullRomBuilder {
    alpha: f64,
    path: Path,
    seen: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    l01_a: f64,
    l12_a: f64,
    l23_a: f64,
    l01_2a: f64,
    l12_2a: f64,
    l23_2a: f64,
}

impl CatmullRomBuilder {
    fn new(alpha: f64) -> Self {
        Self {
            alpha,
            path: Path::new(),
            seen: 0,
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
            x2: f64::NAN,
            y2: f64::NAN,
            l01_a: 0.0,
            l12_a: 0.0,
            l23_a: 0.0,
            l01_2a: 0.0,
            l12_2a: 0.0,
            l23_2a: 0.0,
        }
    }

    fn point(&mut self, x: f64, y: f64) {
        if self.seen > 0 {
            let x23 = self.x2 - x;
            let y23 = self.y2 - y;
            self.l23_2a = (x23 * x23 + y23 * y23).powf(self.alpha);
            self.l23_a = self.l23_2a.sqrt();
        }

        match self.seen {
            0 => {
                self.seen = 1;
                self.path.move_to(x, y);
            }
            1 => self.seen = 2,
            _ => {
                self.seen = 3;
                self.emit_segment(x, y);
            }
        }

        self.l01_a = self.l12_a;
        self.l12_a = self.l23_a;
        self.l01_2a = self.l12_2a;
        self.l12_2a = self.l23_2a;
        self.x0 = self.x1;
        self.x1 = self.x2;
        self.x2 = x;
        self.y0 = self.y1;
        self.y1 = self.y2;
        self.y2 = y;
    }

    /// Emits the cubic from `(x1, y1)` to `(x2, y2)`; `(x, y)` is the point after it.
    fn emit_segment(&mut self, x: f64, y: f64) {
        let mut cx1 = self.x1;
        let mut cy1 = self.y1;
        let mut cx2 = self.x2;
        let mut cy2 = self.y2;

        if self.l01_a > KNOT_EPSILON {
            let a = 2.0 * self.l01_2a + 3.0 * self.l01_a * self.l12_a + self.l12_2a;
            let n = 3.0 * self.l01_a * (self.l01_a + self.l12_a);
            cx1 = (cx1 * a - self.x0 * self.l12_2a + self.x2 * self.l01_2a) / n;
            cy1 = (cy1 * a - self.y0 * self.l12_2a + self.y2 * self.l01_2a) / n;
        }

        if self.l23_a > KNOT_EPSILON {
            let b = 2.0 * self.l23_2a + 3.0 * self.l23_a * self.l12_a + self.l12_2a;
            let m = 3.0 * self.l23_a * (self.l23_a + self.l12_a);
            cx2 = (cx2 * b + self.x1 * self.l23_2a - x * self.l12_2a) / m;
            cy2 = (cy2 * b + self.y1 * self.l23_2a - y * self.l12_2a) / m;
        }

        self.path.cubic_to(cx1, cy1, cx2, cy2, self.x2, self.y2);
    }

    fn finish(mut self) -> Path {
        match self.seen {
            2 => self.path.line_to(self.x2, self.y2),
            3 => {
                let (x, y) = (self.x2, self.y2);
                self.point(x, y);
            }
            _ => {}
        }
        self.path
    }
}

//! Triangles
//!
//! A triangle fills its box with the apex centered on one side and the base
//! on the opposite side. Both edges are walked in lock-step from the apex
//! with a 16.16 slope; the edge pixel of each line is blended by its
//! coverage and the apex line at half intensity.

use stipple_paint::{FillMode, Rect, TriangleOrientation};

use super::circle::Fill;
use super::Brush;
use crate::surface::Pixel;
use crate::target::Target;

/// One line of the triangle, in offsets across the box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TriangleLine {
    pub lo: i32,
    pub hi: i32,
    /// Coverage of the two edge pixels
    pub coverage: u8,
}

/// Lines from apex to base of a triangle `length` lines long whose base is
/// `breadth` pixels wide
pub(crate) fn triangle_lines(breadth: i32, length: i32) -> Vec<TriangleLine> {
    let line = |lo: i32, coverage: u8| TriangleLine {
        lo,
        hi: breadth - 1 - lo,
        coverage,
    };
    if breadth == length {
        // 45 degree edges: half a pixel per line
        return (0..length)
            .map(|i| {
                let halves = breadth - 1 - i;
                line(halves >> 1, if halves & 1 == 1 { 127 } else { 255 })
            })
            .collect();
    }
    let half = ((breadth - 1) as i64) << 15;
    let slope = if length > 1 {
        half / (length - 1) as i64
    } else {
        0
    };
    (0..length)
        .map(|i| {
            let pos = half - slope * i as i64;
            let frac = (pos & 0xFFFF) as u32;
            line((pos >> 16) as i32, (255 - (frac >> 8)) as u8)
        })
        .collect()
}

pub(crate) fn draw_triangle<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    orientation: TriangleOrientation,
) {
    if w <= 0 || h <= 0 {
        tracing::trace!("skipping degenerate triangle {}x{}", w, h);
        return;
    }
    if !t.begin(Rect::from_xywh(x, y, w, h)) {
        return;
    }
    let orientation = match orientation {
        TriangleOrientation::Auto if w >= h => TriangleOrientation::Down,
        TriangleOrientation::Auto => TriangleOrientation::Right,
        o => o,
    };

    let stroke = b.stroke();
    let cache;
    let (paint, outline) = match b.style.fill_mode {
        FillMode::Disabled => (None, true),
        FillMode::Foreground => (Some(Fill::Solid(b.fg)), false),
        FillMode::Background => (Some(Fill::Solid(b.bg)), stroke > 0),
        FillMode::Gradient => {
            cache = b.gradient(h);
            (Some(Fill::Gradient(&cache, y)), stroke > 0)
        }
    };

    let walker = Walker {
        x,
        y,
        w,
        h,
        orientation,
    };
    let lines = triangle_lines(walker.breadth(), walker.length());
    let last = lines.len() as i32 - 1;

    if let Some(paint) = paint {
        for (i, line) in lines.iter().enumerate() {
            let i = i as i32;
            if i == 0 {
                walker.run(t, i, line.lo, line.hi, &paint, 128);
            } else if line.lo == line.hi {
                walker.run(t, i, line.lo, line.lo, &paint, line.coverage);
            } else {
                walker.run(t, i, line.lo + 1, line.hi - 1, &paint, 0xFF);
                walker.run(t, i, line.lo, line.lo, &paint, line.coverage);
                walker.run(t, i, line.hi, line.hi, &paint, line.coverage);
            }
        }
    }

    if outline {
        let ink = Fill::Solid(b.fg);
        for (i, line) in lines.iter().enumerate() {
            let i = i as i32;
            if i == 0 {
                walker.run(t, i, line.lo, line.hi, &ink, 128);
            } else if i == last {
                walker.run(t, i, line.lo, line.hi, &ink, 0xFF);
            } else {
                walker.run(t, i, line.lo, line.lo, &ink, line.coverage);
                if line.hi != line.lo {
                    walker.run(t, i, line.hi, line.hi, &ink, line.coverage);
                }
            }
        }
    }
}

/// Maps apex-to-base line offsets onto the box
struct Walker {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    orientation: TriangleOrientation,
}

impl Walker {
    fn vertical(&self) -> bool {
        matches!(
            self.orientation,
            TriangleOrientation::Up | TriangleOrientation::Down
        )
    }

    fn length(&self) -> i32 {
        if self.vertical() {
            self.h
        } else {
            self.w
        }
    }

    fn breadth(&self) -> i32 {
        if self.vertical() {
            self.w
        } else {
            self.h
        }
    }

    /// Paint offsets `k0..=k1` of line `i`
    fn run<P: Pixel>(&self, t: &mut Target<'_, P>, i: i32, k0: i32, k1: i32, paint: &Fill<'_>, alpha: u8) {
        if k0 > k1 {
            return;
        }
        match self.orientation {
            TriangleOrientation::Up | TriangleOrientation::Down => {
                let row = if self.orientation == TriangleOrientation::Up {
                    self.y + i
                } else {
                    self.y + self.h - 1 - i
                };
                if alpha == 0xFF {
                    paint.span(t, row, self.x + k0, self.x + k1);
                } else {
                    t.blend_span(row, self.x + k0, self.x + k1, paint.color(row), alpha);
                }
            }
            _ => {
                let col = if self.orientation == TriangleOrientation::Left {
                    self.x + i
                } else {
                    self.x + self.w - 1 - i
                };
                for k in k0..=k1 {
                    let row = self.y + k;
                    if alpha == 0xFF {
                        t.put(col, row, paint.pixel(col, row));
                    } else {
                        t.blend(col, row, paint.color(row), alpha);
                    }
                }
            }
        }
    }
}

//! Clip-aware write target
//!
//! Every primitive writes through a [`Target`]: a typed view of the surface
//! storage plus the effective clip. Before drawing, a primitive calls
//! [`Target::begin`] with its bounding box. When the box lies inside the
//! clip the target takes the fast path and spans are written unchecked
//! against the clip; otherwise each span is intersected with it.
//!
//! Spans are inclusive on both ends.

use stipple_paint::Rect;

use crate::blend::Blender;
use crate::gradient::RowFill;
use crate::surface::{Pixel, Surface};

pub struct Target<'a, P: Pixel> {
    pixels: &'a mut [P],
    pitch: usize,
    blender: Blender,
    clip: Rect,
    bounds: Option<Rect>,
    occluder: Option<Rect>,
}

impl<'a, P: Pixel> Target<'a, P> {
    /// Borrow `surface` with `clip` (already intersected with the surface)
    ///
    /// Returns `None` when the surface storage is not `P`.
    pub fn new(surface: &'a mut Surface, clip: Rect) -> Option<Self> {
        let pitch = surface.pitch();
        let blender = Blender::new(surface.format());
        let clip = clip.intersect(&surface.bounds());
        let pixels = surface.pixels_mut::<P>()?;
        Some(Self {
            pixels,
            pitch,
            blender,
            clip,
            bounds: Some(clip),
            occluder: None,
        })
    }

    pub fn blender(&self) -> &Blender {
        &self.blender
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Rows of `top..=bottom` inside the clip
    pub fn rows(&self, top: i32, bottom: i32) -> std::ops::RangeInclusive<i32> {
        top.max(self.clip.top)..=bottom.min(self.clip.bottom - 1)
    }

    /// Prepare for a shape covering `bbox`; `false` when nothing can show
    pub fn begin(&mut self, bbox: Rect) -> bool {
        self.occluder = None;
        if self.clip.is_empty() || bbox.is_empty() || !bbox.intersects(&self.clip) {
            tracing::trace!("shape {:?} outside clip {:?}", bbox, self.clip);
            return false;
        }
        self.bounds = if self.clip.contains(&bbox) {
            None
        } else {
            Some(self.clip)
        };
        true
    }

    /// True when spans are currently checked against the clip
    pub fn is_clipped(&self) -> bool {
        self.bounds.is_some()
    }

    /// Pixels inside `rect` are skipped by [`Target::blend_span`]
    pub fn set_occluder(&mut self, rect: Option<Rect>) {
        self.occluder = rect.filter(|r| !r.is_empty());
    }

    #[inline]
    fn span(&self, y: i32, x0: i32, x1: i32) -> Option<(usize, usize)> {
        let (x0, x1) = match self.bounds {
            None => (x0, x1),
            Some(c) => {
                if y < c.top || y >= c.bottom {
                    return None;
                }
                (x0.max(c.left), x1.min(c.right - 1))
            }
        };
        if x0 > x1 || x0 < 0 || y < 0 {
            return None;
        }
        let row = y as usize * self.pitch;
        let (a, b) = (row + x0 as usize, row + x1 as usize);
        (b < self.pixels.len()).then_some((a, b))
    }

    #[inline]
    fn at(&self, x: i32, y: i32) -> Option<usize> {
        self.span(y, x, x).map(|(i, _)| i)
    }

    /// Current packed value at `(x, y)`, if visible
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.at(x, y).map(|i| self.pixels[i].to_u32())
    }

    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.at(x, y) {
            self.pixels[i] = P::from_u32(color);
        }
    }

    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, color: u32, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if let Some(i) = self.at(x, y) {
            let dst = self.pixels[i].to_u32();
            self.pixels[i] = P::from_u32(self.blender.blend(dst, color, alpha));
        }
    }

    #[inline]
    pub fn blend_dest_alpha(&mut self, x: i32, y: i32, color: u32, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if let Some(i) = self.at(x, y) {
            let dst = self.pixels[i].to_u32();
            self.pixels[i] = P::from_u32(self.blender.blend_dest_alpha(dst, color, alpha));
        }
    }

    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: u32) {
        if let Some((a, b)) = self.span(y, x0, x1) {
            self.pixels[a..=b].fill(P::from_u32(color));
        }
    }

    pub fn fill_vspan(&mut self, x: i32, y0: i32, y1: i32, color: u32) {
        for y in y0..=y1 {
            self.put(x, y, color);
        }
    }

    /// Fill `[x, x + w) x [y, y + h)`
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for row in y..y + h {
            self.fill_span(row, x, x + w - 1, color);
        }
    }

    /// Blend a span, skipping the occluder
    pub fn blend_span(&mut self, y: i32, x0: i32, x1: i32, color: u32, alpha: u8) {
        if alpha == 0 {
            return;
        }
        match self.occluder {
            Some(o) if y >= o.top && y < o.bottom && x0 < o.right && x1 >= o.left => {
                self.blend_run(y, x0, x1.min(o.left - 1), color, alpha);
                self.blend_run(y, x0.max(o.right), x1, color, alpha);
            }
            _ => self.blend_run(y, x0, x1, color, alpha),
        }
    }

    fn blend_run(&mut self, y: i32, x0: i32, x1: i32, color: u32, alpha: u8) {
        if let Some((a, b)) = self.span(y, x0, x1) {
            let blender = self.blender;
            for px in &mut self.pixels[a..=b] {
                *px = P::from_u32(blender.blend(px.to_u32(), color, alpha));
            }
        }
    }

    /// Quarter the channels of a span
    pub fn darken_span(&mut self, y: i32, x0: i32, x1: i32) {
        let blender = self.blender;
        self.map_span(y, x0, x1, |p| blender.darken(p));
    }

    /// Rewrite every pixel of a span through `f`
    pub fn map_span(&mut self, y: i32, x0: i32, x1: i32, f: impl Fn(u32) -> u32) {
        if let Some((a, b)) = self.span(y, x0, x1) {
            for px in &mut self.pixels[a..=b] {
                *px = P::from_u32(f(px.to_u32()));
            }
        }
    }

    /// Paint a gradient row, dithering on absolute columns
    pub fn gradient_span(&mut self, y: i32, x0: i32, x1: i32, fill: &RowFill) {
        match *fill {
            RowFill::Solid(color) => self.fill_span(y, x0, x1, color),
            _ => {
                let (cx0, cx1) = match self.bounds {
                    Some(c) => (x0.max(c.left), x1.min(c.right - 1)),
                    None => (x0, x1),
                };
                if let Some((a, _)) = self.span(y, x0, x1) {
                    for (i, x) in (cx0..=cx1).enumerate() {
                        self.pixels[a + i] = P::from_u32(fill.pixel(x));
                    }
                }
            }
        }
    }
}

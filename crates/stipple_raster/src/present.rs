//! Presenting finished frames
//!
//! The renderer never talks to a window system. Finished regions are handed
//! as raw bytes to a [`DisplayBackend`] supplied by the host.

use smallvec::SmallVec;
use stipple_paint::Rect;

use crate::renderer::VectorRenderer;
use crate::surface::Surface;

/// Presentation capability provided by the host
pub trait DisplayBackend {
    /// Copy a `w` x `h` block whose first row starts at `pixels[0]`, with
    /// rows `pitch` bytes apart, to screen position `(x, y)`
    fn copy_rect_to_screen(&mut self, pixels: &[u8], pitch: usize, x: i32, y: i32, w: i32, h: i32);

    /// Make the copied regions visible
    fn update_screen(&mut self) {}
}

/// Copy `rect` (clipped to the surface) of `surface` to `backend`
pub fn copy_rect(surface: &Surface, backend: &mut dyn DisplayBackend, rect: Rect) {
    let r = rect.clip_to_size(surface.width(), surface.height());
    if r.is_empty() {
        return;
    }
    let bpp = surface.format().bytes_per_pixel as usize;
    let pitch = surface.pitch_bytes();
    let start = r.top as usize * pitch + r.left as usize * bpp;
    let end = start + (r.height() as usize - 1) * pitch + r.width() as usize * bpp;
    let Some(bytes) = surface.as_bytes().get(start..end) else {
        tracing::warn!("frame rect {:?} outside surface storage", r);
        return;
    };
    backend.copy_rect_to_screen(bytes, pitch, r.left, r.top, r.width(), r.height());
}

/// Regions waiting to be copied to the screen
///
/// Adding a rectangle already covered by a queued one is a no-op; queued
/// rectangles covered by a new one are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyRects {
    rects: SmallVec<[Rect; 8]>,
}

impl DirtyRects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rect: Rect) {
        if rect.is_empty() || self.rects.iter().any(|r| r.contains(&rect)) {
            return;
        }
        self.rects.retain(|r| !rect.contains(r));
        self.rects.push(rect);
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    /// Union of every queued rectangle
    pub fn bounds(&self) -> Option<Rect> {
        self.rects.iter().copied().reduce(|a, b| a.union(&b))
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Copy every queued region, update the screen once, then forget them
    pub fn flush(
        &mut self,
        renderer: &dyn VectorRenderer,
        surface: &Surface,
        backend: &mut dyn DisplayBackend,
    ) {
        if self.rects.is_empty() {
            return;
        }
        tracing::trace!("flushing {} dirty rects", self.rects.len());
        for rect in self.rects.drain(..) {
            renderer.copy_frame(surface, backend, rect);
        }
        backend.update_screen();
    }
}

//! Surface fills and bitmap blits

use image::imageops::{self, FilterType};
use image::RgbaImage;
use stipple_paint::{AutoScale, FillMode, Point, Rect, TextAlign, TextAlignVertical};

use crate::format::PixelFormat;
use crate::raster::Brush;
use crate::surface::{Pixel, Surface};
use crate::target::Target;

/// Paint the clip area with the style fill
///
/// Gradients run over the full `height` of the surface so that partial
/// refreshes line up with earlier full ones.
pub(crate) fn fill_surface<P: Pixel>(t: &mut Target<'_, P>, b: &Brush<'_>, height: i32) {
    let clip = t.clip();
    if !t.begin(clip) {
        return;
    }
    match b.style.fill_mode {
        FillMode::Disabled => {}
        FillMode::Foreground | FillMode::Background => {
            let color = if b.style.fill_mode == FillMode::Foreground {
                b.fg
            } else {
                b.bg
            };
            t.fill_rect(clip.left, clip.top, clip.width(), clip.height(), color);
        }
        FillMode::Gradient => {
            let cache = b.gradient(height);
            for y in clip.top..clip.bottom {
                t.gradient_span(y, clip.left, clip.right - 1, &cache.row_fill(y));
            }
        }
    }
}

/// Copy `src_rect` of `source` to `dest`, skipping pixels equal to `key`
pub(crate) fn copy<P: Pixel>(
    t: &mut Target<'_, P>,
    source: &Surface,
    src_rect: Rect,
    dest: Point,
    key: Option<u32>,
) {
    let src_rect = src_rect.intersect(&source.bounds());
    if src_rect.is_empty() {
        return;
    }
    let Some(pixels) = source.pixels::<P>() else {
        return;
    };
    if !t.begin(Rect::from_xywh(dest.x, dest.y, src_rect.width(), src_rect.height())) {
        return;
    }
    let pitch = source.pitch();
    for sy in src_rect.top..src_rect.bottom {
        let dy = dest.y + sy - src_rect.top;
        let row = sy as usize * pitch;
        for sx in src_rect.left..src_rect.right {
            let value = pixels[row + sx as usize].to_u32();
            if key == Some(value) {
                continue;
            }
            t.put(dest.x + sx - src_rect.left, dy, value);
        }
    }
}

/// Place a `w` x `h` box inside `area`
pub(crate) fn align_in(area: Rect, w: i32, h: i32, align: TextAlign, valign: TextAlignVertical) -> Point {
    let x = match align {
        TextAlign::Left => area.left,
        TextAlign::Center => area.left + (area.width() - w) / 2,
        TextAlign::Right => area.right - w,
    };
    let y = match valign {
        TextAlignVertical::Top => area.top,
        TextAlignVertical::Center => area.top + (area.height() - h) / 2,
        TextAlignVertical::Bottom => area.bottom - h,
    };
    Point::new(x, y)
}

/// Blend an RGBA bitmap into `area`, scaled per `scale`
///
/// Pixels outside `area` are never touched.
#[allow(clippy::too_many_arguments)]
pub(crate) fn blit_alpha<P: Pixel>(
    t: &mut Target<'_, P>,
    format: &PixelFormat,
    source: &RgbaImage,
    area: Rect,
    scale: AutoScale,
    align: TextAlign,
    valign: TextAlignVertical,
) {
    if area.is_empty() || source.width() == 0 || source.height() == 0 {
        tracing::trace!("skipping alpha blit into {:?}", area);
        return;
    }
    let (aw, ah) = (area.width() as u32, area.height() as u32);
    let scaled;
    let image = match scale {
        AutoScale::None => source,
        AutoScale::Stretch => {
            scaled = imageops::resize(source, aw, ah, FilterType::Nearest);
            &scaled
        }
        AutoScale::Fit => {
            let (w, h) = fit_size(source.width(), source.height(), aw, ah);
            scaled = imageops::resize(source, w, h, FilterType::Nearest);
            &scaled
        }
        AutoScale::NinePatch => match NinePatch::detect(source) {
            Some(patch) => {
                scaled = patch.render(source, aw, ah);
                &scaled
            }
            None => {
                tracing::warn!("bitmap has no nine-patch markers; stretching instead");
                scaled = imageops::resize(source, aw, ah, FilterType::Nearest);
                &scaled
            }
        },
    };

    let (w, h) = (image.width() as i32, image.height() as i32);
    let origin = align_in(area, w, h, align, valign);
    let visible = area.intersect(&t.clip());
    if !t.begin(Rect::from_xywh(origin.x, origin.y, w, h).intersect(&visible)) {
        return;
    }
    for (sx, sy, px) in image.enumerate_pixels() {
        let (x, y) = (origin.x + sx as i32, origin.y + sy as i32);
        let [r, g, b, a] = px.0;
        if a == 0 || !visible.contains_point(x, y) {
            continue;
        }
        t.blend(x, y, format.rgb_to_color(r, g, b), a);
    }
}

/// Largest size with the source aspect ratio inside `max_w` x `max_h`
fn fit_size(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let (w, h, max_w, max_h) = (w as u64, h as u64, max_w as u64, max_h as u64);
    if w * max_h <= h * max_w {
        (((w * max_h) / h).max(1) as u32, max_h as u32)
    } else {
        (max_w as u32, ((h * max_w) / w).max(1) as u32)
    }
}

/// Stretchable band of a nine-patch bitmap
///
/// The outer one-pixel frame carries the markers: opaque black pixels on
/// the top row mark stretchable columns, on the left column stretchable
/// rows. Coordinates are relative to the content inside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NinePatch {
    pub columns: (u32, u32),
    pub rows: (u32, u32),
}

impl NinePatch {
    pub fn detect(image: &RgbaImage) -> Option<Self> {
        if image.width() < 3 || image.height() < 3 {
            return None;
        }
        let marked = |x: u32, y: u32| {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            a == 255 && r == 0 && g == 0 && b == 0
        };
        let span = |marks: Vec<u32>| Some((*marks.first()?, *marks.last()? + 1));
        let columns = span((1..image.width() - 1).filter(|&x| marked(x, 0)).map(|x| x - 1).collect())?;
        let rows = span((1..image.height() - 1).filter(|&y| marked(0, y)).map(|y| y - 1).collect())?;
        Some(Self { columns, rows })
    }

    /// Content scaled to `w` x `h` with the corners kept at natural size
    pub fn render(&self, image: &RgbaImage, w: u32, h: u32) -> RgbaImage {
        let content = imageops::crop_imm(image, 1, 1, image.width() - 2, image.height() - 2).to_image();
        let xs = stretch_map(content.width(), self.columns, w);
        let ys = stretch_map(content.height(), self.rows, h);
        RgbaImage::from_fn(w, h, |x, y| *content.get_pixel(xs[x as usize], ys[y as usize]))
    }
}

/// Source index for each of `len` destination positions
fn stretch_map(src_len: u32, (s0, s1): (u32, u32), len: u32) -> Vec<u32> {
    let head = s0;
    let tail = src_len - s1;
    let middle = s1 - s0;
    let dst_middle = len.saturating_sub(head + tail);
    (0..len)
        .map(|d| {
            if d < head {
                d
            } else if d >= len.saturating_sub(tail) && len >= tail {
                src_len - (len - d)
            } else if dst_middle == 0 {
                s0
            } else {
                s0 + (d - head) * middle / dst_middle
            }
        })
        .map(|s| s.min(src_len - 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_fit_size_keeps_aspect() {
        assert_eq!(fit_size(20, 10, 40, 40), (40, 20));
        assert_eq!(fit_size(10, 20, 40, 40), (20, 40));
        assert_eq!(fit_size(10, 10, 30, 5), (5, 5));
    }

    #[test]
    fn test_align_in() {
        let area = Rect::from_xywh(10, 10, 20, 10);
        assert_eq!(
            align_in(area, 4, 4, TextAlign::Center, TextAlignVertical::Center),
            Point::new(18, 13)
        );
        assert_eq!(
            align_in(area, 4, 4, TextAlign::Right, TextAlignVertical::Bottom),
            Point::new(26, 16)
        );
    }

    #[test]
    fn test_nine_patch_detect_and_stretch() {
        // 5x5 content with the middle column and row stretchable
        let mut image = RgbaImage::from_pixel(7, 7, Rgba([255, 255, 255, 255]));
        for i in 0..7 {
            image.put_pixel(i, 0, Rgba([0, 0, 0, 0]));
            image.put_pixel(0, i, Rgba([0, 0, 0, 0]));
        }
        image.put_pixel(3, 0, Rgba([0, 0, 0, 255]));
        image.put_pixel(0, 3, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
        image.put_pixel(5, 5, Rgba([0, 0, 255, 255]));

        let patch = NinePatch::detect(&image).unwrap();
        assert_eq!(patch.columns, (2, 3));
        assert_eq!(patch.rows, (2, 3));

        let out = patch.render(&image, 12, 9);
        assert_eq!(out.dimensions(), (12, 9));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(11, 8).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_stretch_map_keeps_edges() {
        let map = stretch_map(5, (2, 3), 9);
        assert_eq!(&map[..2], &[0, 1]);
        assert_eq!(&map[7..], &[3, 4]);
        assert!(map[2..7].iter().all(|&s| s == 2));
    }

    #[test]
    fn test_no_markers() {
        let image = RgbaImage::from_pixel(6, 6, Rgba([10, 10, 10, 255]));
        assert_eq!(NinePatch::detect(&image), None);
    }
}

//! Drop shadows
//!
//! A shadow of offset `s` is `s + 1` black layers of the shape outline,
//! each one pixel smaller on every side and shifted one pixel down-right.
//! Layers overlap, so the shadow darkens toward the shape. Pixels the
//! opaque shape will overpaint are skipped through the target occluder.

use stipple_paint::{Rect, ShadowFillMode};

use super::{half_width, Brush, RoundRect};
use crate::surface::Pixel;
use crate::target::Target;

/// Base layer alpha; 16-bit targets get harder shadows since faint blends
/// vanish in 5-bit channels
fn base_alpha(b: &Brush<'_>) -> u32 {
    if b.format.bytes_per_pixel > 2 {
        24
    } else {
        32
    }
}

/// Alpha for each of the `offset + 1` layers, outermost first
///
/// Exponential layers grow by half each step and stay opaque once they
/// reach 255.
pub(crate) fn layer_alphas(b: &Brush<'_>, offset: i32) -> impl Iterator<Item = u8> {
    let base = base_alpha(b);
    let (layers, mut alpha, grows) = match b.style.shadow_fill_mode {
        ShadowFillMode::None => (0, 0, false),
        ShadowFillMode::Linear => (offset.max(0) + 1, base, false),
        ShadowFillMode::Exponential => (offset.max(0) + 1, base / 2, true),
    };
    (0..layers).map(move |_| {
        let a = alpha as u8;
        if grows {
            alpha = (alpha * 3 / 2).max(alpha + 1).min(255);
        }
        a
    })
}

fn layers<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    shape: RoundRect,
    rounded_bottom: bool,
    occluder: Rect,
) {
    let offset = b.style.shadow_offset.min(i16::MAX as u32) as i32;
    t.set_occluder(Some(occluder));
    let clip = t.clip();
    for (i, alpha) in (0..).zip(layer_alphas(b, offset)) {
        let Some(layer) = RoundRect::new(
            shape.x + i,
            shape.y + i,
            shape.w + offset - 2 * i,
            shape.h + offset - 2 * i,
            shape.r,
        ) else {
            break;
        };
        layer.rows(clip, |dy| half_width(layer.r, dy), rounded_bottom, |row, x0, x1| {
            t.blend_span(row, x0, x1, b.black, alpha)
        });
    }
    t.set_occluder(None);
}

/// Shadow of a rectangle with radius `r` (0 for plain squares)
pub(crate) fn rounded_shadow<P: Pixel>(t: &mut Target<'_, P>, b: &Brush<'_>, shape: RoundRect) {
    let occluder = Rect::from_xywh(shape.x, shape.y + shape.r, shape.w, shape.h - 2 * shape.r);
    layers(t, b, shape, true, occluder);
}

/// Shadow of a tab: rounded top, square bottom
pub(crate) fn tab_shadow<P: Pixel>(t: &mut Target<'_, P>, b: &Brush<'_>, shape: RoundRect) {
    let occluder = Rect::from_xywh(shape.x, shape.y + shape.r, shape.w, shape.h - shape.r);
    layers(t, b, shape, false, occluder);
}

/// Shadow of a circle, occluding its inscribed square
pub(crate) fn circle_shadow<P: Pixel>(t: &mut Target<'_, P>, b: &Brush<'_>, cx: i32, cy: i32, r: i32) {
    let Some(shape) = RoundRect::new(cx - r, cy - r, 2 * r + 1, 2 * r + 1, r) else {
        return;
    };
    let half = (r * 2) / 3;
    let occluder = Rect::new(cx - half, cy - half, cx + half + 1, cy + half + 1);
    layers(t, b, shape, true, occluder);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;
    use stipple_paint::{FillMode, Style};

    #[test]
    fn test_linear_alphas_constant() {
        let style = Style::new().with_shadow(3, ShadowFillMode::Linear);
        let b = Brush::new(PixelFormat::argb8888(), &style, false);
        assert_eq!(layer_alphas(&b, 3).collect::<Vec<_>>(), vec![24, 24, 24, 24]);
        let b = Brush::new(PixelFormat::rgb565(), &style, false);
        assert_eq!(layer_alphas(&b, 2).collect::<Vec<_>>(), vec![32, 32, 32]);
    }

    #[test]
    fn test_exponential_alphas_grow() {
        let style = Style::new()
            .with_fill(FillMode::Foreground)
            .with_shadow(4, ShadowFillMode::Exponential);
        let b = Brush::new(PixelFormat::argb8888(), &style, false);
        assert_eq!(layer_alphas(&b, 4).collect::<Vec<_>>(), vec![12, 18, 27, 40, 60]);
    }

    #[test]
    fn test_exponential_alphas_saturate() {
        let style = Style::new().with_shadow(200, ShadowFillMode::Exponential);
        let b = Brush::new(PixelFormat::rgb565(), &style, false);
        let alphas: Vec<u8> = layer_alphas(&b, 200).collect();
        assert_eq!(alphas.len(), 201);
        assert!(alphas.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(alphas[10..], [255u8; 191]);
        assert_eq!(layer_alphas(&b, i16::MAX as i32).last(), Some(255));
    }

    #[test]
    fn test_no_shadow_layers() {
        let style = Style::new().with_shadow(3, ShadowFillMode::None);
        let b = Brush::new(PixelFormat::rgb565(), &style, false);
        assert_eq!(layer_alphas(&b, 3).count(), 0);
    }
}

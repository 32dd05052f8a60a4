use image::{Rgba, RgbaImage};
use stipple_paint::{
    AutoScale, Color, FillMode, Point, Rect, ShadowFillMode, Style, TextAlign, TextAlignVertical,
    TriangleOrientation,
};
use stipple_raster::{
    create_renderer, Font, GlyphBitmap, PixelFormat, RenderMode, Surface, TabBase, TextOptions,
    VectorRenderer,
};

const WIDTH: u32 = 32;
const HEIGHT: u32 = 24;

fn clip() -> Rect {
    Rect::new(6, 5, 18, 15)
}

/// Run `draw` on 16-bit and 32-bit surfaces in both render modes and check
/// that only pixels inside the clip change, and that some of them do
fn assert_clipped(what: &str, draw: impl Fn(&dyn VectorRenderer, &mut Surface, Rect)) {
    let clip = clip();
    for (bits, format) in [(16, PixelFormat::rgb565()), (32, PixelFormat::argb8888())] {
        for mode in [RenderMode::Aliased, RenderMode::Antialiased] {
            let r = create_renderer(format, mode).unwrap();
            let mut surface = Surface::new(WIDTH, HEIGHT, format).unwrap();
            surface.clear(surface.map_color(Color::gray(90)));
            let before = surface.clone();

            draw(r.as_ref(), &mut surface, clip);

            let mut changed_inside = false;
            for y in 0..surface.height() {
                for x in 0..surface.width() {
                    let same = surface.get_pixel(x, y) == before.get_pixel(x, y);
                    if clip.contains_point(x, y) {
                        changed_inside |= !same;
                    } else {
                        assert!(same, "{what} ({bits}-bit, {mode:?}): ({x}, {y}) changed");
                    }
                }
            }
            assert!(changed_inside, "{what} ({bits}-bit, {mode:?}): nothing drawn");
        }
    }
}

fn style(clip: Rect) -> Style {
    Style::new()
        .with_fg(Color::WHITE)
        .with_bg(Color::RED)
        .with_bevel_color(Color::BLUE)
        .with_clip(clip)
}

/// Glyphs are 3x9 blocks on a 4 pixel advance, 10 pixel line
struct TallFont;

impl Font for TallFont {
    fn height(&self) -> i32 {
        10
    }

    fn advance(&self, _ch: char) -> i32 {
        4
    }

    fn glyph(&self, ch: char) -> Option<GlyphBitmap> {
        (ch != ' ').then(|| GlyphBitmap {
            width: 3,
            height: 9,
            left: 0,
            top: 0,
            coverage: vec![200; 27],
        })
    }
}

#[test]
fn lines_stay_inside_clip() {
    assert_clipped("thin line", |r, s, clip| {
        r.draw_line(s, &style(clip), Point::new(0, 1), Point::new(31, 22));
    });
    assert_clipped("steep line", |r, s, clip| {
        r.draw_line(s, &style(clip), Point::new(20, 0), Point::new(9, 23));
    });
    assert_clipped("thick line", |r, s, clip| {
        r.draw_line(s, &style(clip).with_stroke(3), Point::new(0, 20), Point::new(31, 2));
    });
}

#[test]
fn triangles_stay_inside_clip() {
    let area = Rect::from_xywh(1, 1, 30, 22);
    for orientation in [TriangleOrientation::Left, TriangleOrientation::Right] {
        assert_clipped("filled triangle", |r, s, clip| {
            let style = style(clip).with_fill(FillMode::Foreground);
            r.draw_triangle(s, &style, area, orientation);
        });
        assert_clipped("framed triangle", |r, s, clip| {
            let style = style(clip).with_fill(FillMode::Background).with_stroke(2);
            r.draw_triangle(s, &style, area, orientation);
        });
    }
}

#[test]
fn tabs_with_base_stay_inside_clip() {
    assert_clipped("rounded tab", |r, s, clip| {
        let style = style(clip)
            .with_fill(FillMode::Background)
            .with_shadow(2, ShadowFillMode::Exponential);
        r.draw_tab(s, &style, Rect::from_xywh(10, 3, 12, 11), 4, TabBase::new(9, 12));
    });
    assert_clipped("flat bevel tab", |r, s, clip| {
        let style = style(clip).with_fill(FillMode::Background).with_bevel(2);
        r.draw_tab(s, &style, Rect::from_xywh(10, 3, 12, 11), 0, TabBase::new(9, 12));
    });
}

#[test]
fn beveled_rounded_square_border_stays_inside_clip() {
    assert_clipped("beveled rounded border", |r, s, clip| {
        let style = style(clip).with_bevel(1).with_stroke(2);
        r.draw_rounded_square(s, &style, Rect::from_xywh(9, 8, 18, 14), 7);
    });
    assert_clipped("beveled rounded fill", |r, s, clip| {
        let style = style(clip)
            .with_bevel(1)
            .with_fill(FillMode::Background)
            .with_shadow(3, ShadowFillMode::Linear);
        r.draw_rounded_square(s, &style, Rect::from_xywh(8, 7, 20, 14), 5);
    });
}

#[test]
fn beveled_square_stays_inside_clip() {
    assert_clipped("beveled square", |r, s, clip| {
        let style = style(clip).with_bevel(3).with_fill(FillMode::Background);
        r.draw_beveled_square(s, &style, Rect::from_xywh(4, 4, 20, 14));
    });
}

#[test]
fn text_stays_inside_clip() {
    assert_clipped("string", |r, s, clip| {
        let options = TextOptions {
            ellipsis: false,
            ..TextOptions::default()
        };
        let area = Rect::from_xywh(0, 2, 32, 12);
        r.draw_string(s, &style(clip), &TallFont, "clipped text", area, &options);
    });
}

#[test]
fn stretched_bitmap_stays_inside_clip() {
    let mut image = RgbaImage::from_pixel(3, 2, Rgba([0, 200, 255, 255]));
    image.put_pixel(1, 0, Rgba([255, 40, 0, 128]));
    assert_clipped("stretched bitmap", |r, s, clip| {
        r.blit_alpha_bitmap(
            s,
            &style(clip),
            &image,
            Rect::from_xywh(0, 0, 32, 24),
            AutoScale::Stretch,
            TextAlign::Left,
            TextAlignVertical::Top,
        );
    });
}

#[test]
fn huge_circle_stays_inside_clip() {
    // The top of the circle runs through the clip
    let center = Point::new(10, 70_010);
    assert_clipped("huge circle outline", |r, s, clip| {
        let style = style(clip).with_stroke(2);
        r.draw_circle(s, &style, center, 70_000);
    });
    assert_clipped("huge filled circle", |r, s, clip| {
        let style = style(clip)
            .with_fill(FillMode::Background)
            .with_shadow(2, ShadowFillMode::Linear);
        r.draw_circle(s, &style, center, 70_000);
    });
}

#[test]
fn huge_circle_edge_is_drawn() {
    let format = PixelFormat::rgb888();
    let r = create_renderer(format, RenderMode::Antialiased).unwrap();
    let mut surface = Surface::new(WIDTH, HEIGHT, format).unwrap();
    let style = Style::new()
        .with_fg(Color::WHITE)
        .with_fill(FillMode::Foreground)
        .with_clip(Rect::new(5, 5, 15, 15));
    r.draw_circle(&mut surface, &style, Point::new(10, 70_010), 70_000);

    // Two rows below the top of the circle the fill spans the whole clip
    for x in 5..15 {
        assert_eq!(surface.color_at(x, 12), Some(Color::WHITE), "({x}, 12)");
    }
    assert_eq!(surface.color_at(10, 9), Some(Color::BLACK));
    assert_eq!(surface.color_at(10, 16), Some(Color::BLACK));
}

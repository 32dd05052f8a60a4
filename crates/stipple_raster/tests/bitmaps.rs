use image::{Rgba, RgbaImage};
use stipple_paint::{
    AutoScale, Color, Point, Rect, ShadingStyle, Style, TextAlign, TextAlignVertical,
};
use stipple_raster::{
    create_renderer, Canvas, DirtyRects, DisplayBackend, Font, GlyphBitmap, PixelFormat,
    RenderMode, Surface, TextOptions, VectorRenderer,
};

fn rgb565_renderer() -> Box<dyn VectorRenderer> {
    create_renderer(PixelFormat::rgb565(), RenderMode::Aliased).unwrap()
}

fn solid(w: u32, h: u32, color: Color) -> Surface {
    let mut s = Surface::new(w, h, PixelFormat::rgb565()).unwrap();
    s.clear(s.map_color(color));
    s
}

/// Glyphs are 2x3 blocks on a 3 pixel advance, 4 pixel line
struct TestFont;

impl Font for TestFont {
    fn height(&self) -> i32 {
        4
    }

    fn advance(&self, _ch: char) -> i32 {
        3
    }

    fn glyph(&self, ch: char) -> Option<GlyphBitmap> {
        if ch == ' ' {
            return None;
        }
        Some(GlyphBitmap {
            width: 2,
            height: 3,
            left: 0,
            top: 1,
            coverage: vec![255; 6],
        })
    }
}

/// Screen copy kept in memory, laid out like the source surface
struct MemoryBackend {
    width: usize,
    bpp: usize,
    screen: Vec<u8>,
    copies: Vec<Rect>,
    updates: usize,
}

impl MemoryBackend {
    fn new(width: usize, height: usize, bpp: usize) -> Self {
        Self {
            width,
            bpp,
            screen: vec![0; width * height * bpp],
            copies: Vec::new(),
            updates: 0,
        }
    }
}

impl DisplayBackend for MemoryBackend {
    fn copy_rect_to_screen(&mut self, pixels: &[u8], pitch: usize, x: i32, y: i32, w: i32, h: i32) {
        let row_bytes = w as usize * self.bpp;
        for row in 0..h as usize {
            let src = &pixels[row * pitch..row * pitch + row_bytes];
            let dst = ((y as usize + row) * self.width + x as usize) * self.bpp;
            self.screen[dst..dst + row_bytes].copy_from_slice(src);
        }
        self.copies.push(Rect::from_xywh(x, y, w, h));
    }

    fn update_screen(&mut self) {
        self.updates += 1;
    }
}

#[test]
fn blit_surface_copies_and_clips() {
    let r = rgb565_renderer();
    let mut target = solid(10, 10, Color::BLACK);
    let source = solid(4, 4, Color::RED);
    let style = Style::new().with_clip(Rect::new(0, 0, 8, 8));

    r.blit_surface(&mut target, &style, &source, Point::new(6, 6));
    assert_eq!(target.color_at(6, 6), Some(Color::RED));
    assert_eq!(target.color_at(7, 7), Some(Color::RED));
    assert_eq!(target.color_at(8, 8), Some(Color::BLACK));
    assert_eq!(target.color_at(5, 5), Some(Color::BLACK));
}

#[test]
fn blit_sub_surface_takes_region() {
    let r = rgb565_renderer();
    let mut target = solid(10, 10, Color::BLACK);
    let mut source = solid(4, 4, Color::RED);
    source.set_pixel(2, 2, source.map_color(Color::GREEN));

    r.blit_sub_surface(
        &mut target,
        &Style::new(),
        &source,
        Rect::from_xywh(2, 2, 2, 2),
        Point::new(0, 0),
    );
    assert_eq!(target.color_at(0, 0), Some(Color::GREEN));
    assert_eq!(target.color_at(1, 1), Some(Color::RED));
    assert_eq!(target.color_at(2, 2), Some(Color::BLACK));
}

#[test]
fn key_bitmap_skips_key_color() {
    let r = rgb565_renderer();
    let mut target = solid(6, 6, Color::BLUE);
    let mut source = solid(3, 3, Color::MAGENTA);
    source.set_pixel(1, 1, source.map_color(Color::WHITE));

    r.blit_key_bitmap(&mut target, &Style::new(), &source, Point::new(1, 1), Color::MAGENTA);
    assert_eq!(target.color_at(2, 2), Some(Color::WHITE));
    assert_eq!(target.color_at(1, 1), Some(Color::BLUE));
    assert_eq!(target.color_at(3, 3), Some(Color::BLUE));
}

#[test]
fn foreign_bitmap_is_ignored() {
    let r = rgb565_renderer();
    let mut target = solid(6, 6, Color::BLUE);
    let before = target.clone();
    let mut source = Surface::new(2, 2, PixelFormat::argb8888()).unwrap();
    source.clear(source.map_color(Color::WHITE));

    r.blit_surface(&mut target, &Style::new(), &source, Point::new(0, 0));
    assert_eq!(target, before);
}

#[test]
fn alpha_bitmap_aligns_and_blends() {
    let format = PixelFormat::rgb888();
    let r = create_renderer(format, RenderMode::Aliased).unwrap();
    let mut target = Surface::new(10, 10, format).unwrap();
    let mut image = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
    image.put_pixel(1, 1, Rgba([255, 255, 255, 0]));

    r.blit_alpha_bitmap(
        &mut target,
        &Style::new(),
        &image,
        Rect::from_size(10, 10),
        AutoScale::None,
        TextAlign::Center,
        TextAlignVertical::Center,
    );
    assert_eq!(target.color_at(4, 4), Some(Color::WHITE));
    assert_eq!(target.color_at(5, 4), Some(Color::WHITE));
    assert_eq!(target.color_at(5, 5), Some(Color::BLACK));
    assert_eq!(target.color_at(3, 4), Some(Color::BLACK));
}

#[test]
fn alpha_bitmap_stretch_fills_area_only() {
    let format = PixelFormat::rgb888();
    let r = create_renderer(format, RenderMode::Aliased).unwrap();
    let mut target = Surface::new(10, 10, format).unwrap();
    let image = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 255]));
    let area = Rect::from_xywh(2, 3, 4, 3);

    r.blit_alpha_bitmap(
        &mut target,
        &Style::new(),
        &image,
        area,
        AutoScale::Stretch,
        TextAlign::Left,
        TextAlignVertical::Top,
    );
    for y in 0..10 {
        for x in 0..10 {
            let expected = if area.contains_point(x, y) {
                Color::GREEN
            } else {
                Color::BLACK
            };
            assert_eq!(target.color_at(x, y), Some(expected), "({x}, {y})");
        }
    }
}

#[test]
fn alpha_bitmap_fit_keeps_aspect() {
    let format = PixelFormat::rgb888();
    let r = create_renderer(format, RenderMode::Aliased).unwrap();
    let mut target = Surface::new(12, 12, format).unwrap();
    let image = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));

    r.blit_alpha_bitmap(
        &mut target,
        &Style::new(),
        &image,
        Rect::from_xywh(0, 0, 8, 8),
        AutoScale::Fit,
        TextAlign::Left,
        TextAlignVertical::Top,
    );
    assert_eq!(target.color_at(7, 3), Some(Color::RED));
    assert_eq!(target.color_at(0, 4), Some(Color::BLACK));
}

#[test]
fn text_is_aligned_and_scrolled() {
    let mut surface = solid(20, 10, Color::BLACK);
    let mut canvas = Canvas::new(rgb565_renderer(), &mut surface).unwrap();
    canvas.set_fg_color(Color::WHITE);
    let area = Rect::from_xywh(2, 2, 12, 4);

    canvas.draw_string(&TestFont, "ab", area, &TextOptions::default());
    // First glyph occupies x 2..4, rows 3..6
    assert_eq!(canvas.surface().color_at(2, 3), Some(Color::WHITE));
    assert_eq!(canvas.surface().color_at(3, 5), Some(Color::WHITE));
    assert_eq!(canvas.surface().color_at(4, 3), Some(Color::BLACK));
    assert_eq!(canvas.surface().color_at(5, 3), Some(Color::WHITE));
    assert_eq!(canvas.surface().color_at(2, 2), Some(Color::BLACK));

    let mut right = solid(20, 10, Color::BLACK);
    let mut canvas = Canvas::new(rgb565_renderer(), &mut right).unwrap();
    canvas.set_fg_color(Color::WHITE);
    let options = TextOptions::aligned(TextAlign::Right, TextAlignVertical::Top);
    canvas.draw_string(&TestFont, "ab", area, &options);
    // Pen starts at 14 - 6; glyphs at x 8..10 and 11..13
    assert_eq!(canvas.surface().color_at(8, 3), Some(Color::WHITE));
    assert_eq!(canvas.surface().color_at(10, 3), Some(Color::BLACK));
    assert_eq!(canvas.surface().color_at(12, 3), Some(Color::WHITE));
    assert_eq!(canvas.surface().color_at(13, 3), Some(Color::BLACK));

    let mut scrolled = solid(20, 10, Color::BLACK);
    let mut canvas = Canvas::new(rgb565_renderer(), &mut scrolled).unwrap();
    canvas.set_fg_color(Color::WHITE);
    let options = TextOptions {
        deltax: 3,
        ..TextOptions::default()
    };
    canvas.draw_string(&TestFont, "ab", area, &options);
    // First glyph scrolled out of the area, second now at x 2..4
    assert_eq!(canvas.surface().color_at(2, 3), Some(Color::WHITE));
    assert_eq!(canvas.surface().color_at(5, 3), Some(Color::BLACK));
    assert_eq!(canvas.surface().color_at(0, 3), Some(Color::BLACK));
}

#[test]
fn text_respects_drawable_area_and_ellipsis() {
    let mut surface = solid(30, 10, Color::BLACK);
    let mut canvas = Canvas::new(rgb565_renderer(), &mut surface).unwrap();
    canvas.set_fg_color(Color::WHITE);
    let area = Rect::from_xywh(0, 0, 12, 4);
    let options = TextOptions {
        drawable_area: Some(Rect::from_xywh(3, 0, 30, 4)),
        ..TextOptions::default()
    };

    // "abcdef" is 18 wide; ellipsized to "a..." (12)
    canvas.draw_string(&TestFont, "abcdef", area, &options);
    let s = canvas.surface();
    assert_eq!(s.color_at(0, 1), Some(Color::BLACK), "outside drawable area");
    assert_eq!(s.color_at(3, 1), Some(Color::WHITE));
    assert_eq!(s.color_at(9, 1), Some(Color::WHITE));
    assert_eq!(s.color_at(12, 1), Some(Color::BLACK), "outside text area");
}

#[test]
fn screen_shading_dims_everything() {
    let mut surface = Surface::new(4, 4, PixelFormat::rgb888()).unwrap();
    surface.clear(surface.map_color(Color::new(200, 100, 50)));
    let r = create_renderer(PixelFormat::rgb888(), RenderMode::Aliased).unwrap();
    r.apply_screen_shading(&mut surface, ShadingStyle::Dim);
    assert_eq!(surface.color_at(3, 3), Some(Color::new(100, 50, 25)));
}

#[test]
fn copy_frame_hands_over_rect_bytes() {
    let format = PixelFormat::rgb565();
    let mut surface = Surface::from_data(
        8,
        4,
        10,
        format,
        stipple_raster::PixelData::U16(vec![0; 40]),
    )
    .unwrap();
    let r = create_renderer(format, RenderMode::Aliased).unwrap();
    let white = surface.map_color(Color::WHITE);
    surface.set_pixel(3, 2, white);

    let mut backend = MemoryBackend::new(8, 4, 2);
    r.copy_frame(&surface, &mut backend, Rect::from_xywh(2, 1, 4, 3));
    assert_eq!(backend.copies, vec![Rect::from_xywh(2, 1, 4, 3)]);
    let at = (2 * 8 + 3) * 2;
    assert_eq!(&backend.screen[at..at + 2], &(white as u16).to_ne_bytes());

    // Off-surface parts are dropped
    r.copy_frame(&surface, &mut backend, Rect::from_xywh(6, 2, 10, 10));
    assert_eq!(backend.copies[1], Rect::from_xywh(6, 2, 2, 2));
}

#[test]
fn whole_frame_and_dirty_flush() {
    let format = PixelFormat::argb8888();
    let mut surface = Surface::new(6, 5, format).unwrap();
    surface.clear(surface.map_color(Color::BLUE));
    let r = create_renderer(format, RenderMode::Aliased).unwrap();

    let mut backend = MemoryBackend::new(6, 5, 4);
    r.copy_whole_frame(&surface, &mut backend);
    assert_eq!(backend.screen.as_slice(), surface.as_bytes());

    let mut dirty = DirtyRects::new();
    dirty.add(Rect::from_xywh(0, 0, 2, 2));
    dirty.add(Rect::from_xywh(3, 3, 2, 2));
    dirty.add(Rect::from_xywh(3, 3, 1, 1));
    dirty.flush(r.as_ref(), &surface, &mut backend);
    assert_eq!(backend.copies.len(), 3);
    assert_eq!(backend.updates, 1);
    assert!(dirty.is_empty());
}

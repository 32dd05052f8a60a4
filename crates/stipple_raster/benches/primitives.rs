use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stipple_paint::{Color, FillMode, Point, Rect, ShadowFillMode, Style};
use stipple_raster::{create_renderer, PixelFormat, RenderMode, Surface};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 200;

fn widget_style() -> Style {
    Style::new()
        .with_fg(Color::from_hex(0x203040))
        .with_bg(Color::from_hex(0xC0C8D0))
        .with_gradient(Color::from_hex(0xF0F0F0), Color::from_hex(0x808890))
        .with_fill(FillMode::Gradient)
        .with_shadow(3, ShadowFillMode::Exponential)
}

fn bench_rounded_square(c: &mut Criterion) {
    for (name, mode) in [
        ("rounded_square_aliased", RenderMode::Aliased),
        ("rounded_square_aa", RenderMode::Antialiased),
    ] {
        let format = PixelFormat::rgb565();
        let renderer = create_renderer(format, mode).unwrap();
        let mut surface = Surface::new(WIDTH, HEIGHT, format).unwrap();
        let style = widget_style();

        c.bench_function(name, |b| {
            b.iter(|| {
                renderer.draw_rounded_square(
                    &mut surface,
                    &style,
                    black_box(Rect::from_xywh(20, 20, 200, 40)),
                    black_box(8),
                );
            })
        });
    }
}

fn bench_circle(c: &mut Criterion) {
    let format = PixelFormat::argb8888();
    let renderer = create_renderer(format, RenderMode::Antialiased).unwrap();
    let mut surface = Surface::new(WIDTH, HEIGHT, format).unwrap();
    let style = Style::new()
        .with_fg(Color::WHITE)
        .with_bg(Color::BLUE)
        .with_fill(FillMode::Background)
        .with_stroke(2);

    c.bench_function("circle_aa_r60", |b| {
        b.iter(|| {
            renderer.draw_circle(&mut surface, &style, Point::new(160, 100), black_box(60));
        })
    });
}

fn bench_line(c: &mut Criterion) {
    let format = PixelFormat::rgb565();
    let renderer = create_renderer(format, RenderMode::Antialiased).unwrap();
    let mut surface = Surface::new(WIDTH, HEIGHT, format).unwrap();
    let style = Style::new().with_fg(Color::WHITE);

    c.bench_function("line_aa", |b| {
        b.iter(|| {
            renderer.draw_line(
                &mut surface,
                &style,
                Point::new(0, 0),
                black_box(Point::new(319, 137)),
            );
        })
    });
}

fn bench_fill_gradient(c: &mut Criterion) {
    let format = PixelFormat::rgb565();
    let renderer = create_renderer(format, RenderMode::Aliased).unwrap();
    let mut surface = Surface::new(WIDTH, HEIGHT, format).unwrap();
    let style = widget_style();

    c.bench_function("fill_surface_gradient", |b| {
        b.iter(|| renderer.fill_surface(&mut surface, black_box(&style)))
    });
}

criterion_group!(
    benches,
    bench_rounded_square,
    bench_circle,
    bench_line,
    bench_fill_gradient
);
criterion_main!(benches);

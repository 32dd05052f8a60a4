//! Scene rendering

use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::Path;

use stipple_paint::{FillMode, Rect, Style};
use stipple_raster::{Canvas, Surface};

use crate::config::SceneConfig;

/// Draw every step of `scene` onto a fresh surface
pub fn render(scene: &SceneConfig) -> Result<RgbaImage> {
    let config = scene.renderer_config()?;
    let renderer = config.build()?;
    let mut surface = Surface::new(scene.surface.width, scene.surface.height, config.format.format())
        .context("Failed to create surface")?;

    {
        let mut canvas = Canvas::new(renderer, &mut surface)?;
        canvas.set_style(
            Style::new()
                .with_fg(scene.background()?)
                .with_fill(FillMode::Foreground),
        );
        canvas.fill_surface();
        canvas.set_style(Style::default());

        let mut dirty = Rect::EMPTY;
        for (index, step_config) in scene.steps.iter().enumerate() {
            let step = step_config
                .to_step()
                .with_context(|| format!("Invalid step #{}", index + 1))?;
            let changed = canvas.draw_step(
                step_config.area(),
                step_config.clip(),
                &step,
                step_config.extra(),
            );
            tracing::debug!("step #{} {:?} touched {:?}", index + 1, step.shape, changed);
            dirty = dirty.union(&changed);
        }
        tracing::info!(
            "rendered {} steps, {}x{} px changed",
            scene.steps.len(),
            dirty.width(),
            dirty.height()
        );
    }

    Ok(surface.to_rgba_image())
}

/// Render `scene` and write it as PNG
pub fn render_to_file(scene: &SceneConfig, output: &Path) -> Result<()> {
    let image = render(scene)?;
    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_background_and_square() {
        let scene = SceneConfig::parse(
            r##"
[surface]
width = 16
height = 16
format = "rgb888"
background = "#0000ff"

[[step]]
shape = "square"
area = [4, 4, 8, 8]
fg = "#ffffff"
fill = "foreground"
"##,
        )
        .unwrap();

        let image = render(&scene).unwrap();
        assert_eq!(image.dimensions(), (16, 16));
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(6, 6).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(12, 12).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_step_clip_respected() {
        let scene = SceneConfig::parse(
            r##"
[surface]
width = 16
height = 16
format = "rgb565"

[[step]]
shape = "fill"
area = [0, 0, 16, 16]
clip = [0, 0, 8, 16]
fg = "#ffffff"
fill = "foreground"
"##,
        )
        .unwrap();

        let image = render(&scene).unwrap();
        assert_eq!(image.get_pixel(3, 10).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(12, 10).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_invalid_step_reports_index() {
        let scene = SceneConfig::parse(
            "[[step]]\nshape = \"square\"\narea = [0, 0, 4, 4]\nbg = \"nope\"\n",
        )
        .unwrap();
        let err = render(&scene).unwrap_err();
        assert!(format!("{:#}", err).contains("step #1"));
    }
}

use std::io::Cursor;

use plotters::prelude::{BitMapBackend, IntoDrawingArea};
use qfield_core::{LatticeConfig, QuadraticField};

use crate::error::{RenderError, Result};
use crate::plot::{draw_scene, prepare_scene};
use crate::settings::RenderSettings;

/// Render the lattice figure into an RGB image.
pub fn render_rgb(
    field: &QuadraticField,
    config: &LatticeConfig,
    settings: &RenderSettings,
) -> Result<image::RgbImage> {
    let scene = prepare_scene(field, config, settings)?;
    let (width, height) = (settings.width, settings.height);

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw_scene(&root, &scene, settings)?;
    }

    image::RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| RenderError::Encode(format!("pixel buffer does not match {width}x{height}")))
}

/// Render the lattice figure as PNG bytes.
pub fn render_png(
    field: &QuadraticField,
    config: &LatticeConfig,
    settings: &RenderSettings,
) -> Result<Vec<u8>> {
    let img = render_rgb(field, config, settings)?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    log::info!("rendered {field} to PNG ({} bytes)", bytes.len());
    Ok(bytes)
}

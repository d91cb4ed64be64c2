use plotters::prelude::{IntoDrawingArea, SVGBackend};
use qfield_core::{LatticeConfig, QuadraticField};

use crate::error::Result;
use crate::plot::{draw_scene, prepare_scene};
use crate::settings::RenderSettings;

/// Render the lattice figure of `field` as an SVG document.
pub fn render_svg(
    field: &QuadraticField,
    config: &LatticeConfig,
    settings: &RenderSettings,
) -> Result<String> {
    let scene = prepare_scene(field, config, settings)?;

    let mut document = String::new();
    {
        let root = SVGBackend::with_string(&mut document, (settings.width, settings.height))
            .into_drawing_area();
        draw_scene(&root, &scene, settings)?;
    }

    log::info!("rendered {field} to SVG ({} bytes)", document.len());
    Ok(document)
}

//! Bundled glyphs so text rasterises without system fonts.

use plotters::style::{register_font, FontStyle};

use crate::error::{RenderError, Result};

/// DejaVu Sans, which covers ω, √ and ℚ.
static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Make `family` resolve to the bundled font.
pub fn register_family(family: &str) -> Result<()> {
    register_font(family, FontStyle::Normal, DEJAVU_SANS)
        .map_err(|_| RenderError::Drawing(format!("bundled font rejected for '{family}'")))?;
    log::debug!("registered bundled font as '{family}'");
    Ok(())
}

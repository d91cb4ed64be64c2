//! Output dispatch: picks a renderer from the target file extension.

use std::path::Path;

use qfield_core::{LatticeConfig, QuadraticField};

use crate::error::{RenderError, Result};
use crate::settings::RenderSettings;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    /// Detect the format from an extension string (case-insensitive).
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| RenderError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

/// Render the figure in the given format.
pub fn render(
    field: &QuadraticField,
    config: &LatticeConfig,
    settings: &RenderSettings,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Svg => crate::svg::render_svg(field, config, settings).map(String::into_bytes),
        OutputFormat::Png => crate::png::render_png(field, config, settings),
    }
}

/// Render the figure and write it to `path`, choosing the format from the
/// file extension.
pub fn render_to_file(
    path: &Path,
    field: &QuadraticField,
    config: &LatticeConfig,
    settings: &RenderSettings,
) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path)?;
    let bytes = render(field, config, settings, format)?;
    std::fs::write(path, bytes)?;
    log::info!("wrote {}", path.display());
    Ok(format)
}

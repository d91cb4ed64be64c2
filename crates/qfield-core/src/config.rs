use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::style::{Color, LineStyle};
use crate::viewport::Viewport;

/// Parameters of a lattice plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// How neighbouring points are connected.
    pub connect_dots: LineStyle,
    /// Draw a translucent circle around every lattice point.
    pub plot_circles: bool,
    pub circle_color: Color,
    /// Circle opacity. Range: 0.0..1.0
    pub circle_alpha: f64,
    /// Circle radius in data units.
    pub radius: f64,
    /// Requested data window before aspect fitting.
    pub viewport: Viewport,
    /// Annotate 0, ω and 1 + ω.
    pub show_labels: bool,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            connect_dots: LineStyle::Solid,
            plot_circles: false,
            circle_color: Color::BLUE,
            circle_alpha: 0.3,
            radius: 2.5,
            viewport: Viewport::default(),
            show_labels: true,
        }
    }
}

impl LatticeConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.circle_alpha) {
            return Err(Error::InvalidConfig(format!(
                "circle_alpha must be within 0..1, got {}",
                self.circle_alpha
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        self.viewport.validate()
    }
}

/// Save a configuration to disk as JSON.
pub fn save_config(path: &Path, config: &LatticeConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load and validate a configuration file. Missing fields take defaults.
pub fn load_config(path: &Path) -> Result<LatticeConfig> {
    let json = std::fs::read_to_string(path)?;
    let config: LatticeConfig = serde_json::from_str(&json)?;
    config.validate()?;
    log::debug!("loaded lattice config from {}", path.display());
    Ok(config)
}

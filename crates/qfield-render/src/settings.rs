use qfield_core::Color;

use crate::error::{RenderError, Result};

/// Visual parameters for the lattice figure.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Pixels per inch, used to turn point sizes into pixels.
    pub dpi: f64,
    /// Blank border around the chart in pixels.
    pub margin: u32,
    /// Height of the tick-label strip under the chart.
    pub x_label_area: u32,
    /// Width of the tick-label strip left of the chart.
    pub y_label_area: u32,
    pub font_family: String,
    /// Title size in points.
    pub title_font_size: f64,
    /// Tick and axis description size in points.
    pub tick_font_size: f64,
    /// Draw the dashed background grid.
    pub grid: bool,
    pub grid_color: Color,
    /// Dash and gap lengths in pixels for dashed strokes.
    pub dash: (f64, f64),
    /// Draw title, tick labels and annotations.
    pub draw_text: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            dpi: 100.0,
            margin: 20,
            x_label_area: 40,
            y_label_area: 50,
            font_family: "sans-serif".to_string(),
            title_font_size: 14.0,
            tick_font_size: 10.0,
            grid: true,
            grid_color: Color::rgb(176, 176, 176),
            dash: (6.0, 4.0),
            draw_text: true,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<()> {
        let (plot_w, plot_h) = self.plot_size();
        if plot_w < 10 || plot_h < 10 {
            return Err(RenderError::InvalidSettings(format!(
                "canvas {}x{} leaves no room for the chart",
                self.width, self.height
            )));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(RenderError::InvalidSettings(format!("dpi must be positive, got {}", self.dpi)));
        }
        Ok(())
    }

    /// Convert a size in points to pixels.
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    /// Height of the title strip above the chart, zero without text.
    pub fn title_height(&self) -> u32 {
        if self.draw_text {
            (self.points_to_pixels(self.title_font_size) * 2.0).round() as u32
        } else {
            0
        }
    }

    fn label_areas(&self) -> (u32, u32) {
        if self.draw_text {
            (self.x_label_area, self.y_label_area)
        } else {
            (0, 0)
        }
    }

    /// Pixel size of the plotting area once title, margins and label strips
    /// are taken off.
    pub fn plot_size(&self) -> (u32, u32) {
        let (x_area, y_area) = self.label_areas();
        let w = self.width.saturating_sub(2 * self.margin + y_area);
        let h = self
            .height
            .saturating_sub(self.title_height() + 2 * self.margin + x_area);
        (w, h)
    }

    pub(crate) fn x_label_area_size(&self) -> u32 {
        self.label_areas().0
    }

    pub(crate) fn y_label_area_size(&self) -> u32 {
        self.label_areas().1
    }
}

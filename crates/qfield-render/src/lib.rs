pub mod error;
pub mod fonts;
pub mod output;
pub mod plot;
pub mod png;
pub mod settings;
pub mod svg;

pub use error::{RenderError, Result};
pub use output::{render, render_to_file, OutputFormat};
pub use plot::{draw_scene, prepare_scene};
pub use png::{render_png, render_rgb};
pub use settings::RenderSettings;
pub use svg::render_svg;

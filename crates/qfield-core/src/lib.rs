pub mod config;
pub mod error;
pub mod field;
pub mod lattice;
pub mod point;
pub mod scene;
pub mod shape;
pub mod style;
pub mod viewport;

pub use config::{load_config, save_config, LatticeConfig};
pub use error::{Error, Result};
pub use field::{is_square_free, Omega, QuadraticField};
pub use lattice::Lattice;
pub use point::LatticePoint;
pub use scene::{Element, Layer, Scene, SceneItem};
pub use shape::{Bounds, Disc, HAlign, Label, Marker, Polygon, Segment, Shape, Stroke};
pub use style::{Color, LineStyle, Paint};
pub use viewport::{IndexRange, Viewport};

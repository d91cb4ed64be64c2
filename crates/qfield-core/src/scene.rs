use glam::DVec2;

use crate::config::LatticeConfig;
use crate::error::Result;
use crate::field::QuadraticField;
use crate::lattice::Lattice;
use crate::shape::{bounds_of, Bounds, Disc, HAlign, Label, Marker, Polygon, Segment, Shape, Stroke, DISC_SEGMENTS};
use crate::style::{Color, LineStyle, Paint};
use crate::viewport::Viewport;

pub const AXIS_WIDTH: f64 = 0.5;
pub const EDGE_WIDTH: f64 = 0.5;
pub const MARKER_RADIUS: f64 = 4.0;
pub const CELL_ALPHA: f64 = 0.5;
pub const LABEL_FONT_SIZE: f64 = 14.0;

/// Which part of the figure an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Axis,
    Grid,
    Circle,
    Point,
    Cell,
    Label,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Segment(Segment),
    Marker(Marker),
    Disc(Disc),
    Polygon(Polygon),
    Label(Label),
}

impl Element {
    pub fn as_shape(&self) -> &dyn Shape {
        match self {
            Element::Segment(s) => s,
            Element::Marker(m) => m,
            Element::Disc(d) => d,
            Element::Polygon(p) => p,
            Element::Label(l) => l,
        }
    }

    /// Restrict the element to `viewport`. Discs crossing the border turn
    /// into clipped polygons.
    pub fn clip(self, viewport: &Viewport) -> Option<Element> {
        match self {
            Element::Segment(s) => s.clip(viewport).map(Element::Segment),
            Element::Marker(m) => viewport.contains(m.position).then_some(Element::Marker(m)),
            Element::Label(l) => viewport.contains(l.anchor).then_some(Element::Label(l)),
            Element::Polygon(p) => p.clip(viewport).map(Element::Polygon),
            Element::Disc(d) => {
                let b = d.bounds();
                if viewport.contains(b.min) && viewport.contains(b.max) {
                    Some(Element::Disc(d))
                } else {
                    d.to_polygon(DISC_SEGMENTS).clip(viewport).map(Element::Polygon)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub layer: Layer,
    pub element: Element,
}

/// Everything needed to draw one lattice figure, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub title: String,
    pub title_tex: String,
    pub x_label: String,
    pub y_label: String,
    pub viewport: Viewport,
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn new(title: impl Into<String>, viewport: Viewport) -> Self {
        let title = title.into();
        Self {
            title_tex: title.clone(),
            title,
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            viewport,
            items: Vec::new(),
        }
    }

    /// Lay out the lattice of `field` over `viewport`.
    ///
    /// Draw order: axes, grid edges, circles, points, fundamental cell,
    /// labels.
    pub fn build(field: &QuadraticField, config: &LatticeConfig, viewport: Viewport) -> Result<Scene> {
        config.validate()?;
        viewport.validate()?;

        let lattice = Lattice::new(field);
        let omega = lattice.omega().position();
        let range = viewport.index_range(lattice.omega())?;
        log::debug!(
            "building lattice scene for {field}: a in ±{}, b in ±{}",
            range.a_max,
            range.b_max
        );

        let mut scene = Scene::new(field.title_text(), viewport);
        scene.title_tex = field.title_tex();

        let axis = Stroke::new(Color::GRAY, AXIS_WIDTH, LineStyle::Solid);
        scene.push(
            Layer::Axis,
            Element::Segment(Segment::new(
                DVec2::new(viewport.x_min, 0.0),
                DVec2::new(viewport.x_max, 0.0),
                axis,
            )),
        );
        scene.push(
            Layer::Axis,
            Element::Segment(Segment::new(
                DVec2::new(0.0, viewport.y_min),
                DVec2::new(0.0, viewport.y_max),
                axis,
            )),
        );

        if config.connect_dots.is_visible() {
            let stroke = Stroke::new(Color::BLUE, EDGE_WIDTH, config.connect_dots);
            for (p, q) in lattice.edges(range) {
                scene.push(Layer::Grid, Element::Segment(Segment::new(p.position, q.position, stroke)));
            }
        }

        let points = lattice.points(range);

        if config.plot_circles {
            let fill = Paint::translucent(config.circle_color, config.circle_alpha);
            for p in &points {
                scene.push(Layer::Circle, Element::Disc(Disc::new(p.position, config.radius, fill)));
            }
        }

        for p in &points {
            scene.push(Layer::Point, Element::Marker(Marker::new(p.position, MARKER_RADIUS, Color::BLUE)));
        }

        scene.push(
            Layer::Cell,
            Element::Polygon(Polygon::new(
                lattice.fundamental_cell().to_vec(),
                Paint::translucent(Color::GRAY, CELL_ALPHA),
            )),
        );

        if config.show_labels {
            let omega_text = field.omega_text();
            let omega_tex = field.omega_tex();
            let labels = [
                Label::new(DVec2::ZERO, "0", "0").aligned(HAlign::Right),
                Label::new(omega, omega_text.clone(), omega_tex.clone()).aligned(HAlign::Right),
                Label::new(
                    DVec2::X + omega,
                    format!("1 + {omega_text}"),
                    format!("1 + {omega_tex}"),
                )
                .aligned(HAlign::Left),
            ];
            for label in labels {
                let label = Label { font_size: LABEL_FONT_SIZE, ..label.colored(Color::RED) };
                scene.push(Layer::Label, Element::Label(label));
            }
        }

        Ok(scene)
    }

    pub fn push(&mut self, layer: Layer, element: Element) {
        self.items.push(SceneItem { layer, element });
    }

    /// Clip every element to the scene viewport, dropping what is outside.
    pub fn clip(&mut self) {
        let viewport = self.viewport;
        let before = self.items.len();
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .filter_map(|item| {
                let layer = item.layer;
                let kind = item.element.as_shape().shape_type();
                let clipped = item.element.clip(&viewport);
                if clipped.is_none() {
                    log::trace!("dropped {kind} on {layer:?} layer outside the viewport");
                }
                clipped.map(|element| SceneItem { layer, element })
            })
            .collect();
        log::debug!("clipped scene from {before} to {} elements", self.items.len());
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Element> {
        self.items.iter().filter(move |i| i.layer == layer).map(|i| &i.element)
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.layer(layer).count()
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.items.iter().filter_map(|i| match &i.element {
            Element::Label(l) => Some(l),
            _ => None,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.items.iter().filter_map(|i| match &i.element {
            Element::Segment(s) => Some(s),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.items.iter().filter_map(|i| match &i.element {
            Element::Marker(m) => Some(m),
            _ => None,
        })
    }

    /// Bounds of all elements, `None` for an empty scene.
    pub fn bounds(&self) -> Option<Bounds> {
        bounds_of(self.items.iter().map(|i| i.element.as_shape()))
    }
}

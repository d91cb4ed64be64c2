use glam::DVec2;

use crate::style::{Color, LineStyle, Paint};
use crate::viewport::Viewport;

/// Number of chords used when a circle is turned into a polygon.
pub const DISC_SEGMENTS: usize = 64;

/// Clipped polygons with less area than this are dropped.
const AREA_EPSILON: f64 = 1e-12;

/// A drawable primitive in data coordinates that can be sampled at any
/// drawing progress in [0, 1].
pub trait Shape: Send + Sync {
    /// Sample the outline at a given drawing progress in [0, 1].
    fn sample(&self, t: f64) -> DVec2;

    /// Path length of the outline.
    fn length(&self) -> f64;

    /// Shape type name for debugging.
    fn shape_type(&self) -> &'static str;

    /// Axis-aligned bounds estimated by sampling the outline.
    fn bounds(&self) -> Bounds {
        let samples = (0..=16).map(|i| self.sample(i as f64 / 16.0));
        Bounds::from_points(samples).unwrap_or(Bounds::point(self.sample(0.0)))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn point(p: DVec2) -> Self {
        Self { min: p, max: p }
    }

    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| match acc {
            Some(b) => Some(Bounds { min: b.min.min(p), max: b.max.max(p) }),
            None => Some(Bounds::point(p)),
        })
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
}

/// Combined bounds of a collection of shapes, `None` when empty.
pub fn bounds_of<'a>(shapes: impl IntoIterator<Item = &'a dyn Shape>) -> Option<Bounds> {
    shapes
        .into_iter()
        .map(|s| s.bounds())
        .reduce(|a, b| a.union(&b))
}

/// Stroke parameters for line-like shapes. Width is in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub style: LineStyle,
}

impl Stroke {
    pub fn new(color: Color, width: f64, style: LineStyle) -> Self {
        Self { paint: Paint::solid(color), width, style }
    }
}

// --- Concrete shape implementations ---

/// A line segment between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
    pub stroke: Stroke,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2, stroke: Stroke) -> Self {
        Self { start, end, stroke }
    }

    /// Split into solid dashes of length `on` separated by gaps of `off`.
    ///
    /// Non-positive dash lengths return the whole segment as one dash.
    pub fn dashes(&self, on: f64, off: f64) -> Vec<Segment> {
        let solid = Stroke { style: LineStyle::Solid, ..self.stroke };
        let total = self.length();
        if on <= 0.0 || off < 0.0 || total <= on {
            return vec![Segment::new(self.start, self.end, solid)];
        }

        let direction = (self.end - self.start) / total;
        let mut dashes = Vec::new();
        let mut pos = 0.0;
        while pos < total {
            let stop = (pos + on).min(total);
            dashes.push(Segment::new(
                self.start + direction * pos,
                self.start + direction * stop,
                solid,
            ));
            pos += on + off;
        }
        dashes
    }

    /// Clip against a viewport (Liang-Barsky). `None` when fully outside.
    pub fn clip(&self, viewport: &Viewport) -> Option<Segment> {
        let d = self.end - self.start;
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        let edges = [
            (-d.x, self.start.x - viewport.x_min),
            (d.x, viewport.x_max - self.start.x),
            (-d.y, self.start.y - viewport.y_min),
            (d.y, viewport.y_max - self.start.y),
        ];

        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some(Segment::new(self.start + d * t0, self.start + d * t1, self.stroke))
    }
}

impl Shape for Segment {
    fn sample(&self, t: f64) -> DVec2 {
        self.start.lerp(self.end, t)
    }

    fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    fn shape_type(&self) -> &'static str {
        "Segment"
    }
}

/// A dot drawn at a lattice point. `radius` is in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: DVec2,
    pub radius: f64,
    pub paint: Paint,
}

impl Marker {
    pub fn new(position: DVec2, radius: f64, color: Color) -> Self {
        Self { position, radius, paint: Paint::solid(color) }
    }
}

impl Shape for Marker {
    fn sample(&self, _t: f64) -> DVec2 {
        self.position
    }

    fn length(&self) -> f64 {
        0.0
    }

    fn shape_type(&self) -> &'static str {
        "Marker"
    }
}

/// A filled circle whose radius is measured in data units.
#[derive(Debug, Clone, PartialEq)]
pub struct Disc {
    pub center: DVec2,
    pub radius: f64,
    pub fill: Paint,
}

impl Disc {
    pub fn new(center: DVec2, radius: f64, fill: Paint) -> Self {
        Self { center, radius, fill }
    }

    /// The circle as a closed polygon with `segments` vertices.
    pub fn to_polygon(&self, segments: usize) -> Polygon {
        let n = segments.max(3);
        let vertices = (0..n).map(|i| self.sample(i as f64 / n as f64)).collect();
        Polygon::new(vertices, self.fill)
    }
}

impl Shape for Disc {
    fn sample(&self, t: f64) -> DVec2 {
        let angle = std::f64::consts::TAU * t;
        self.center + DVec2::new(angle.cos(), angle.sin()) * self.radius
    }

    fn length(&self) -> f64 {
        std::f64::consts::TAU * self.radius
    }

    fn shape_type(&self) -> &'static str {
        "Disc"
    }

    fn bounds(&self) -> Bounds {
        let r = DVec2::splat(self.radius);
        Bounds { min: self.center - r, max: self.center + r }
    }
}

/// A filled closed polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<DVec2>,
    pub fill: Paint,
}

impl Polygon {
    pub fn new(vertices: Vec<DVec2>, fill: Paint) -> Self {
        Self { vertices, fill }
    }

    /// Signed area (positive for counter-clockwise vertices).
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| self.vertices[i].perp_dot(self.vertices[(i + 1) % n]))
            .sum::<f64>()
            / 2.0
    }

    /// Clip against a viewport (Sutherland-Hodgman). `None` when nothing
    /// with positive extent is left.
    pub fn clip(&self, viewport: &Viewport) -> Option<Polygon> {
        let vp = *viewport;
        let mut vertices = clip_edge(
            &self.vertices,
            |p| p.x >= vp.x_min,
            |a, b| at_x(a, b, vp.x_min),
        );
        vertices = clip_edge(&vertices, |p| p.x <= vp.x_max, |a, b| at_x(a, b, vp.x_max));
        vertices = clip_edge(&vertices, |p| p.y >= vp.y_min, |a, b| at_y(a, b, vp.y_min));
        vertices = clip_edge(&vertices, |p| p.y <= vp.y_max, |a, b| at_y(a, b, vp.y_max));

        let clipped = Polygon::new(vertices, self.fill);
        if clipped.vertices.len() < 3 || clipped.signed_area().abs() < AREA_EPSILON {
            return None;
        }
        Some(clipped)
    }
}

fn clip_edge(
    polygon: &[DVec2],
    inside: impl Fn(DVec2) -> bool,
    intersect: impl Fn(DVec2, DVec2) -> DVec2,
) -> Vec<DVec2> {
    let Some(&last) = polygon.last() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(polygon.len() + 2);
    let mut prev = last;
    for &cur in polygon {
        match (inside(prev), inside(cur)) {
            (true, true) => out.push(cur),
            (true, false) => out.push(intersect(prev, cur)),
            (false, true) => {
                out.push(intersect(prev, cur));
                out.push(cur);
            }
            (false, false) => {}
        }
        prev = cur;
    }
    out
}

fn at_x(a: DVec2, b: DVec2, x: f64) -> DVec2 {
    let t = (x - a.x) / (b.x - a.x);
    DVec2::new(x, a.y + (b.y - a.y) * t)
}

fn at_y(a: DVec2, b: DVec2, y: f64) -> DVec2 {
    let t = (y - a.y) / (b.y - a.y);
    DVec2::new(a.x + (b.x - a.x) * t, y)
}

impl Shape for Polygon {
    fn sample(&self, t: f64) -> DVec2 {
        let n = self.vertices.len();
        if n == 0 {
            return DVec2::ZERO;
        }
        let total = self.length();
        if total == 0.0 {
            return self.vertices[0];
        }

        let mut remaining = t.clamp(0.0, 1.0) * total;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let edge = a.distance(b);
            if remaining <= edge && edge > 0.0 {
                return a.lerp(b, remaining / edge);
            }
            remaining -= edge;
        }
        self.vertices[0]
    }

    fn length(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| self.vertices[i].distance(self.vertices[(i + 1) % n]))
            .sum()
    }

    fn shape_type(&self) -> &'static str {
        "Polygon"
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(self.vertices.iter().copied()).unwrap_or(Bounds::point(DVec2::ZERO))
    }
}

/// Horizontal placement of label text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// A text annotation anchored at a data point. `font_size` is in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub anchor: DVec2,
    pub text: String,
    pub tex: String,
    pub align: HAlign,
    pub color: Color,
    pub font_size: f64,
}

impl Label {
    pub fn new(anchor: DVec2, text: impl Into<String>, tex: impl Into<String>) -> Self {
        Self {
            anchor,
            text: text.into(),
            tex: tex.into(),
            align: HAlign::Left,
            color: Color::BLACK,
            font_size: 14.0,
        }
    }

    pub fn aligned(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Shape for Label {
    fn sample(&self, _t: f64) -> DVec2 {
        self.anchor
    }

    fn length(&self) -> f64 {
        0.0
    }

    fn shape_type(&self) -> &'static str {
        "Label"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn stroke() -> Stroke {
        Stroke::new(Color::BLUE, 0.5, LineStyle::Dashed)
    }

    fn unit_square() -> Polygon {
        Polygon::new(
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(1.0, 0.0),
                DVec2::new(1.0, 1.0),
                DVec2::new(0.0, 1.0),
            ],
            Paint::solid(Color::GRAY),
        )
    }

    #[test]
    fn test_segment_interpolation() {
        let seg = Segment::new(DVec2::ZERO, DVec2::new(10.0, 10.0), stroke());
        assert!(seg.sample(0.5).abs_diff_eq(DVec2::new(5.0, 5.0), EPSILON));
    }

    #[test]
    fn test_segment_length() {
        let seg = Segment::new(DVec2::ZERO, DVec2::new(3.0, 4.0), stroke());
        assert!((seg.length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_dashes_cover_segment() {
        let seg = Segment::new(DVec2::ZERO, DVec2::new(10.0, 0.0), stroke());
        let dashes = seg.dashes(2.0, 1.0);
        // dashes start at 0, 3, 6, 9
        assert_eq!(dashes.len(), 4);
        assert!(dashes.iter().all(|d| d.stroke.style == LineStyle::Solid));
        assert!(dashes[3].end.abs_diff_eq(DVec2::new(10.0, 0.0), EPSILON));
        assert!((dashes[1].start.x - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_dashes_degenerate_pattern() {
        let seg = Segment::new(DVec2::ZERO, DVec2::new(1.0, 0.0), stroke());
        assert_eq!(seg.dashes(0.0, 1.0).len(), 1);
        assert_eq!(seg.dashes(5.0, 1.0).len(), 1);
    }

    #[test]
    fn test_segment_clip_crossing() {
        let vp = Viewport::default();
        let seg = Segment::new(DVec2::new(-10.0, 0.0), DVec2::new(10.0, 0.0), stroke());
        let clipped = seg.clip(&vp).unwrap();
        assert!(clipped.start.abs_diff_eq(DVec2::new(-5.0, 0.0), EPSILON));
        assert!(clipped.end.abs_diff_eq(DVec2::new(5.0, 0.0), EPSILON));
    }

    #[test]
    fn test_segment_clip_outside() {
        let vp = Viewport::default();
        let seg = Segment::new(DVec2::new(6.0, -10.0), DVec2::new(6.0, 10.0), stroke());
        assert!(seg.clip(&vp).is_none());
        let seg = Segment::new(DVec2::new(-10.0, 9.0), DVec2::new(10.0, 11.0), stroke());
        assert!(seg.clip(&vp).is_none());
    }

    #[test]
    fn test_segment_clip_inside_is_unchanged() {
        let vp = Viewport::default();
        let seg = Segment::new(DVec2::new(-1.0, -1.0), DVec2::new(2.0, 3.0), stroke());
        assert_eq!(seg.clip(&vp), Some(seg.clone()));
    }

    #[test]
    fn test_polygon_area() {
        assert!((unit_square().signed_area() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_clip_partial() {
        let vp = Viewport::new(0.5, 5.0, -5.0, 0.5).unwrap();
        let clipped = unit_square().clip(&vp).unwrap();
        assert!((clipped.signed_area() - 0.25).abs() < EPSILON);
        for v in &clipped.vertices {
            assert!(vp.contains(*v));
        }
    }

    #[test]
    fn test_polygon_clip_outside() {
        let vp = Viewport::new(2.0, 3.0, 2.0, 3.0).unwrap();
        assert!(unit_square().clip(&vp).is_none());
    }

    #[test]
    fn test_polygon_perimeter_sampling() {
        let square = unit_square();
        assert!((square.length() - 4.0).abs() < EPSILON);
        assert!(square.sample(0.25).abs_diff_eq(DVec2::new(1.0, 0.0), EPSILON));
        assert!(square.sample(0.5).abs_diff_eq(DVec2::new(1.0, 1.0), EPSILON));
    }

    #[test]
    fn test_disc_polygon_area() {
        let disc = Disc::new(DVec2::ZERO, 2.0, Paint::translucent(Color::BLUE, 0.3));
        let poly = disc.to_polygon(DISC_SEGMENTS);
        assert_eq!(poly.vertices.len(), DISC_SEGMENTS);
        let exact = std::f64::consts::PI * 4.0;
        assert!((poly.signed_area() - exact).abs() / exact < 0.01);
    }

    #[test]
    fn test_disc_bounds() {
        let disc = Disc::new(DVec2::new(1.0, 1.0), 2.5, Paint::solid(Color::BLUE));
        let b = disc.bounds();
        assert!(b.min.abs_diff_eq(DVec2::new(-1.5, -1.5), EPSILON));
        assert!(b.max.abs_diff_eq(DVec2::new(3.5, 3.5), EPSILON));
    }

    #[test]
    fn test_bounds_of_shapes() {
        let a = Segment::new(DVec2::ZERO, DVec2::new(3.0, 4.0), stroke());
        let b = Segment::new(DVec2::ZERO, DVec2::new(-6.0, 8.0), stroke());
        let shapes: Vec<&dyn Shape> = vec![&a, &b];
        let bounds = bounds_of(shapes).unwrap();
        assert!(bounds.min.abs_diff_eq(DVec2::new(-6.0, 0.0), EPSILON));
        assert!(bounds.max.abs_diff_eq(DVec2::new(3.0, 8.0), EPSILON));
    }

    #[test]
    fn test_polygon_clip_drops_slivers() {
        // touches the window along one edge only
        let vp = Viewport::new(1.0, 2.0, 0.0, 1.0).unwrap();
        assert!(unit_square().clip(&vp).is_none());
    }

    #[test]
    fn test_shape_type_names() {
        assert_eq!(unit_square().shape_type(), "Polygon");
        let disc = Disc::new(DVec2::ZERO, 1.0, Paint::solid(Color::BLUE));
        assert_eq!(disc.shape_type(), "Disc");
    }
}

//! Scene drawing on top of any `plotters` backend.

use glam::DVec2;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Polygon as FilledPolygon;
use plotters::prelude::{
    ChartBuilder, ChartContext, Circle, Color as _, DrawingArea, DrawingBackend, FontDesc,
    FontFamily, FontStyle, PathElement, RGBAColor, RGBColor, ShapeStyle, Text, TextStyle, WHITE,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use qfield_core::shape::DISC_SEGMENTS;
use qfield_core::{
    Color, Element, HAlign, LatticeConfig, LineStyle, Paint, QuadraticField, Scene, Segment, Stroke,
};

use crate::error::{RenderError, Result};
use crate::fonts;
use crate::settings::RenderSettings;

type Chart<'a, DB> = ChartContext<
    'a,
    DB,
    plotters::coord::cartesian::Cartesian2d<
        plotters::coord::types::RangedCoordf64,
        plotters::coord::types::RangedCoordf64,
    >,
>;

fn drawing<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(err.to_string())
}

fn rgb(color: Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn rgba(paint: Paint) -> RGBAColor {
    rgb(paint.color).mix(paint.alpha)
}

fn stroke_style(stroke: &Stroke) -> ShapeStyle {
    rgba(stroke.paint).stroke_width(stroke.width.ceil().max(1.0) as u32)
}

fn font<'a>(settings: &'a RenderSettings, points: f64) -> FontDesc<'a> {
    FontDesc::new(
        FontFamily::from(settings.font_family.as_str()),
        settings.points_to_pixels(points),
        FontStyle::Normal,
    )
}

fn h_pos(align: HAlign) -> HPos {
    match align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    }
}

/// Grid spacing of 1, 2 or 5 times a power of ten, giving at most about
/// ten lines across `span`.
pub fn grid_step(span: f64) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / 10.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Multiples of `step` within `[min, max]`.
pub fn grid_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Lay out the lattice over the requested viewport and clip the result.
pub fn prepare_scene(
    field: &QuadraticField,
    config: &LatticeConfig,
    settings: &RenderSettings,
) -> Result<Scene> {
    settings.validate()?;
    config.validate()?;
    let viewport = config.viewport;
    let mut scene = Scene::build(field, config, viewport)?;
    scene.clip();
    log::debug!(
        "prepared scene: {} markers, {} segments, {} labels, content bounds {:?}",
        scene.markers().count(),
        scene.segments().count(),
        scene.labels().count(),
        scene.bounds()
    );
    Ok(scene)
}

/// Draw a prepared scene onto `root` and present it.
///
/// The data limits are kept as given; the chart box shrinks along one axis
/// so both axes share a scale.
pub fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene,
    settings: &RenderSettings,
) -> Result<()> {
    if settings.draw_text {
        fonts::register_family(&settings.font_family)?;
    }
    root.fill(&WHITE).map_err(drawing)?;

    let (title_area, body) = root.split_vertically(settings.title_height());
    if settings.draw_text {
        let style = font(settings, settings.title_font_size)
            .color(&rgb(Color::BLACK))
            .pos(Pos::new(HPos::Center, VPos::Center));
        let (w, h) = title_area.dim_in_pixel();
        title_area
            .draw_text(&scene.title, &style, (w as i32 / 2, h as i32 / 2))
            .map_err(drawing)?;
    }

    let viewport = scene.viewport;
    let (plot_w, plot_h) = settings.plot_size();
    let (box_w, box_h) = viewport.pixel_box(plot_w, plot_h);
    let (pad_x, pad_y) = (plot_w - box_w, plot_h - box_h);
    let mut chart = ChartBuilder::on(&body)
        .margin_left(settings.margin + pad_x / 2)
        .margin_right(settings.margin + pad_x - pad_x / 2)
        .margin_top(settings.margin + pad_y / 2)
        .margin_bottom(settings.margin + pad_y - pad_y / 2)
        .x_label_area_size(settings.x_label_area_size())
        .y_label_area_size(settings.y_label_area_size())
        .build_cartesian_2d(viewport.x_range(), viewport.y_range())
        .map_err(drawing)?;

    if settings.draw_text {
        let tick_font = font(settings, settings.tick_font_size);
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(scene.x_label.as_str())
            .y_desc(scene.y_label.as_str())
            .label_style(tick_font.clone())
            .axis_desc_style(tick_font)
            .draw()
            .map_err(drawing)?;
    }

    let units_per_pixel = viewport.width() / box_w.max(1) as f64;
    let (dash_on, dash_off) = (settings.dash.0 * units_per_pixel, settings.dash.1 * units_per_pixel);

    if settings.grid {
        draw_grid(&mut chart, scene, settings, dash_on, dash_off)?;
    }

    for item in &scene.items {
        match &item.element {
            Element::Segment(segment) => draw_segment(&mut chart, segment, dash_on, dash_off)?,
            Element::Marker(marker) => {
                let radius = marker.radius.round().max(1.0) as u32;
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (marker.position.x, marker.position.y),
                        radius,
                        rgba(marker.paint).filled(),
                    )))
                    .map_err(drawing)?;
            }
            Element::Disc(disc) => {
                let polygon = disc.to_polygon(DISC_SEGMENTS);
                draw_polygon(&mut chart, &polygon.vertices, polygon.fill)?;
            }
            Element::Polygon(polygon) => draw_polygon(&mut chart, &polygon.vertices, polygon.fill)?,
            Element::Label(label) => {
                if !settings.draw_text {
                    continue;
                }
                let style: TextStyle = font(settings, label.font_size)
                    .color(&rgb(label.color))
                    .pos(Pos::new(h_pos(label.align), VPos::Bottom));
                chart
                    .draw_series(std::iter::once(Text::new(
                        label.text.clone(),
                        (label.anchor.x, label.anchor.y),
                        style,
                    )))
                    .map_err(drawing)?;
            }
        }
    }

    root.present().map_err(drawing)?;
    Ok(())
}

fn draw_grid<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    scene: &Scene,
    settings: &RenderSettings,
    dash_on: f64,
    dash_off: f64,
) -> Result<()> {
    let vp = scene.viewport;
    let step = grid_step(vp.width().max(vp.height()));
    let stroke = Stroke::new(settings.grid_color, 0.5, LineStyle::Dashed);

    let vertical = grid_ticks(vp.x_min, vp.x_max, step)
        .into_iter()
        .map(|x| Segment::new(DVec2::new(x, vp.y_min), DVec2::new(x, vp.y_max), stroke));
    let horizontal = grid_ticks(vp.y_min, vp.y_max, step)
        .into_iter()
        .map(|y| Segment::new(DVec2::new(vp.x_min, y), DVec2::new(vp.x_max, y), stroke));

    for segment in vertical.chain(horizontal) {
        draw_segment(chart, &segment, dash_on, dash_off)?;
    }
    Ok(())
}

fn draw_segment<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    segment: &Segment,
    dash_on: f64,
    dash_off: f64,
) -> Result<()> {
    let pieces = match segment.stroke.style {
        LineStyle::None => return Ok(()),
        LineStyle::Solid => vec![segment.clone()],
        LineStyle::Dashed => segment.dashes(dash_on, dash_off),
    };
    let style = stroke_style(&segment.stroke);
    chart
        .draw_series(pieces.iter().map(|piece| {
            PathElement::new(
                vec![(piece.start.x, piece.start.y), (piece.end.x, piece.end.y)],
                style,
            )
        }))
        .map_err(drawing)?;
    Ok(())
}

fn draw_polygon<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    vertices: &[DVec2],
    fill: Paint,
) -> Result<()> {
    if vertices.len() < 3 {
        return Ok(());
    }
    let points: Vec<(f64, f64)> = vertices.iter().map(|v| (v.x, v.y)).collect();
    chart
        .draw_series(std::iter::once(FilledPolygon::new(points, rgba(fill).filled())))
        .map_err(drawing)?;
    Ok(())
}

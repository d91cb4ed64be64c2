use qfield_core::{LatticeConfig, LineStyle, QuadraticField, Viewport};
use qfield_render::{
    render, render_png, render_rgb, render_svg, render_to_file, OutputFormat, RenderError,
    RenderSettings,
};

// ── Helpers ──────────────────────────────────────────────────────

/// Settings that avoid text so rendering does not depend on system fonts.
fn textless(width: u32, height: u32) -> RenderSettings {
    RenderSettings { width, height, draw_text: false, ..Default::default() }
}

fn field(d: i64) -> QuadraticField {
    QuadraticField::new(d).expect("d should be square-free")
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// The SVG backend writes text content on its own line inside `<text>`.
fn text_node(text: &str) -> String {
    format!(">\n{text}\n</text>")
}

fn red_pixels(img: &image::RgbImage) -> usize {
    img.pixels()
        .filter(|p| p.0[0] > 200 && p.0[1] < 60 && p.0[2] < 60)
        .count()
}

// ── 1. SVG output ────────────────────────────────────────────────

#[test]
fn svg_output_is_parseable() {
    let svg = render_svg(&field(-7), &LatticeConfig::default(), &textless(400, 400))
        .expect("SVG render should succeed");
    let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default());
    assert!(tree.is_ok(), "emitted SVG failed to parse");
}

#[test]
fn dashed_grid_emits_more_paths_than_solid() {
    let settings = textless(400, 400);
    let solid = LatticeConfig { connect_dots: LineStyle::Solid, ..Default::default() };
    let dashed = LatticeConfig { connect_dots: LineStyle::Dashed, ..Default::default() };
    let solid_svg = render_svg(&field(-1), &solid, &settings).unwrap();
    let dashed_svg = render_svg(&field(-1), &dashed, &settings).unwrap();
    assert!(count(&dashed_svg, "<polyline") > count(&solid_svg, "<polyline"));
}

#[test]
fn no_connections_draws_fewer_paths() {
    let settings = RenderSettings { grid: false, ..textless(400, 400) };
    let none = LatticeConfig { connect_dots: LineStyle::None, ..Default::default() };
    let svg = render_svg(&field(-1), &none, &settings).unwrap();
    // only the two axis lines remain
    assert_eq!(count(&svg, "<polyline"), 2);
}

#[test]
fn circles_add_polygons() {
    let settings = textless(400, 400);
    let plain = render_svg(&field(-3), &LatticeConfig::default(), &settings).unwrap();
    let circled = LatticeConfig { plot_circles: true, ..Default::default() };
    let with_circles = render_svg(&field(-3), &circled, &settings).unwrap();
    assert!(count(&with_circles, "<polygon") > count(&plain, "<polygon"));
}

#[test]
fn marker_count_matches_visible_points() {
    let settings = textless(400, 400);
    let config = LatticeConfig {
        viewport: Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
        ..Default::default()
    };
    let svg = render_svg(&field(-1), &config, &settings).unwrap();
    // square canvas keeps the window at [-2, 2]^2: 25 Gaussian integers
    assert_eq!(count(&svg, "<circle"), 25);
}

#[test]
fn svg_text_includes_title_and_labels() {
    let f = field(-3);
    let settings = RenderSettings { width: 400, height: 400, ..Default::default() };
    let svg = render_svg(&f, &LatticeConfig::default(), &settings).expect("text render should succeed");
    let omega = f.omega_text();
    for text in [f.title_text(), "0".to_string(), omega.clone(), format!("1 + {omega}")] {
        assert!(svg.contains(&text_node(&text)), "missing text {text:?}");
    }
}

// ── 2. Raster text ───────────────────────────────────────────────

#[test]
fn png_with_default_settings_renders() {
    let png = render_png(&field(-3), &LatticeConfig::default(), &RenderSettings::default())
        .expect("default PNG render should succeed");
    let img = image::load_from_memory(&png).expect("PNG should decode");
    assert_eq!((img.width(), img.height()), (1000, 1000));
}

#[test]
fn png_labels_are_rasterised_in_red() {
    let settings = RenderSettings { width: 400, height: 400, grid: false, ..Default::default() };
    let img = render_rgb(&field(-3), &LatticeConfig::default(), &settings).expect("text render should succeed");
    assert!(red_pixels(&img) > 20, "expected red label glyphs");

    let config = LatticeConfig { show_labels: false, ..Default::default() };
    let unlabelled = render_rgb(&field(-3), &config, &settings).unwrap();
    assert_eq!(red_pixels(&unlabelled), 0);
}

#[test]
fn png_title_darkens_the_title_strip() {
    let settings = RenderSettings { width: 400, height: 400, grid: false, ..Default::default() };
    let img = render_rgb(&field(5), &LatticeConfig::default(), &settings).unwrap();
    let strip = settings.title_height();
    let dark = (0..strip)
        .flat_map(|y| (0..img.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| img.get_pixel(x, y).0.iter().all(|&c| c < 100))
        .count();
    assert!(dark > 0, "title strip is blank");
}

// ── 3. Dispatch and files ────────────────────────────────────────

#[test]
fn render_dispatches_by_format() {
    let settings = textless(160, 120);
    let svg = render(&field(2), &LatticeConfig::default(), &settings, OutputFormat::Svg).unwrap();
    assert!(String::from_utf8(svg).unwrap().contains("<svg"));
    let png = render(&field(2), &LatticeConfig::default(), &settings, OutputFormat::Png).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn render_to_file_writes_png() {
    let path = std::env::temp_dir().join(format!("qfield-render-{}.png", std::process::id()));
    let format = render_to_file(&path, &field(5), &LatticeConfig::default(), &textless(120, 120))
        .expect("render to file should succeed");
    assert_eq!(format, OutputFormat::Png);
    let img = image::open(&path).expect("written PNG should decode");
    std::fs::remove_file(&path).ok();
    assert_eq!((img.width(), img.height()), (120, 120));
}

#[test]
fn render_to_file_rejects_unknown_extension() {
    let path = std::env::temp_dir().join("qfield-render.bmpx");
    let result = render_to_file(&path, &field(5), &LatticeConfig::default(), &textless(120, 120));
    assert!(matches!(result, Err(RenderError::UnsupportedFormat(_))));
    assert!(!path.exists());
}

#[test]
fn invalid_settings_are_reported() {
    let result = render_svg(&field(5), &LatticeConfig::default(), &textless(30, 30));
    assert!(matches!(result, Err(RenderError::InvalidSettings(_))));
}

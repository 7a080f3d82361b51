//! Zeichnet eine `RetainedScene` mit dem egui-Painter.

use envelope_engine::{EnvelopeOptions, MarkerStyle, PolylineLayer, RetainedScene};
use glam::Vec2;

/// Deckkraft der Fläche unter der Kurve.
pub const FILL_OPACITY: f32 = 0.2;
/// Eckenradius des Hintergrunds in Pixeln.
const BACKGROUND_ROUNDING: f32 = 5.0;
/// Strichbreite der Kurve in Pixeln.
const CURVE_STROKE_WIDTH: f32 = 2.0;
/// Strich- und Lückenlänge der Achse in Pixeln.
const AXIS_DASH: (f32, f32) = (4.0, 4.0);

/// Farbschema der Zeichenfläche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: egui::Color32,
    /// Akzentfarbe mit `FILL_OPACITY` für die Fläche unter der Kurve
    pub area: egui::Color32,
    pub fill: egui::Color32,
    pub axis: egui::Color32,
    pub display: egui::Color32,
}

impl Palette {
    /// Übernimmt die RGBA-Farben aus den Optionen.
    pub fn from_options(options: &EnvelopeOptions) -> Self {
        Self {
            accent: to_color32(options.color_accent, 1.0),
            area: to_color32(options.color_accent, FILL_OPACITY),
            fill: to_color32(options.color_fill, 1.0),
            axis: to_color32(options.color_axis, 1.0),
            display: to_color32(options.color_display, 1.0),
        }
    }
}

/// RGBA `[0, 1]` → `Color32`, Alpha mit `opacity` multipliziert.
pub fn to_color32(rgba: [f32; 4], opacity: f32) -> egui::Color32 {
    let [r, g, b, a] = rgba;
    egui::Rgba::from_rgba_unmultiplied(r, g, b, (a * opacity).clamp(0.0, 1.0)).into()
}

/// Zerlegt die Flächen-Polylinie (Kurvenzug plus untere rechte und untere
/// linke Ecke) in konvexe Vierecke bis zur Unterkante.
///
/// egui füllt nur konvexe Polygone, die Fläche ist im Allgemeinen konkav.
pub fn fill_strips(fill: &[Vec2]) -> Vec<[Vec2; 4]> {
    let Some(curve_len) = fill.len().checked_sub(2) else {
        return Vec::new();
    };
    let bottom = fill[fill.len() - 1].y;

    fill[..curve_len]
        .windows(2)
        .filter(|pair| pair[1].x > pair[0].x)
        .map(|pair| {
            [
                pair[0],
                pair[1],
                Vec2::new(pair[1].x, bottom),
                Vec2::new(pair[0].x, bottom),
            ]
        })
        .collect()
}

/// Zeichnet Hintergrund, Füllung, Kurve, Achse und Marker in `rect`.
pub fn paint_scene(
    painter: &egui::Painter,
    rect: egui::Rect,
    scene: &RetainedScene,
    palette: &Palette,
) {
    let to_screen = |p: Vec2| rect.min + egui::vec2(p.x, p.y);

    painter.rect_filled(rect, BACKGROUND_ROUNDING, palette.fill);

    for strip in fill_strips(scene.polyline(PolylineLayer::Fill)) {
        painter.add(egui::Shape::convex_polygon(
            strip.iter().map(|p| to_screen(*p)).collect(),
            palette.area,
            egui::Stroke::NONE,
        ));
    }

    let curve = scene.polyline(PolylineLayer::Curve);
    if curve.len() >= 2 {
        painter.add(egui::Shape::line(
            curve.iter().map(|p| to_screen(*p)).collect(),
            egui::Stroke::new(CURVE_STROKE_WIDTH, palette.accent),
        ));
    }

    let axis: Vec<egui::Pos2> = scene
        .polyline(PolylineLayer::Axis)
        .iter()
        .map(|p| to_screen(*p))
        .collect();
    if axis.len() >= 2 {
        painter.extend(egui::Shape::dashed_line(
            &axis,
            egui::Stroke::new(1.0, palette.axis),
            AXIS_DASH.0,
            AXIS_DASH.1,
        ));
    }

    for (_, marker) in scene.markers() {
        let center = to_screen(marker.center);
        match marker.style {
            MarkerStyle::Breakpoint => {
                painter.circle_filled(center, marker.radius, palette.accent);
            }
            MarkerStyle::Display => {
                painter.circle(
                    center,
                    marker.radius,
                    palette.display,
                    egui::Stroke::new(1.0, palette.axis),
                );
            }
        }
    }
}

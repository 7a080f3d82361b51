//! Abtastung der Hüllkurve zu Polylinien in Pixel-Koordinaten.

use crate::core::breakpoint::normalized_to_view;
use crate::core::curve::{level_at, EMPTY_LEVEL};
use crate::core::{math, Breakpoint};
use glam::Vec2;

/// Kleinste zulässige Schrittweite der Abtastung in Pixeln.
const MIN_RESOLUTION_PX: f32 = 1.0;

fn level_to_view_y(level: f32, size: Vec2) -> f32 {
    normalized_to_view(Vec2::new(0.0, level), size).y
}

/// Kurvenzug: vom linken Rand auf Höhe des ersten Punkts über alle
/// Abtastwerte bis zum rechten Rand auf Höhe des letzten Punkts.
pub fn curve_polyline(nodes: &[Breakpoint], size: Vec2, resolution_px: f32) -> Vec<Vec2> {
    let step = resolution_px.max(MIN_RESOLUTION_PX);
    let first_level = nodes.first().map_or(EMPTY_LEVEL, Breakpoint::y);
    let last_level = nodes.last().map_or(EMPTY_LEVEL, Breakpoint::y);

    let samples = (size.x / step).ceil().max(0.0) as usize;
    let mut points = Vec::with_capacity(samples + 2);
    points.push(Vec2::new(0.0, level_to_view_y(first_level, size)));

    for i in 0..samples {
        let x = i as f32 * step;
        if x >= size.x {
            break;
        }
        let level = level_at(nodes, math::normalize(x, 0.0, size.x));
        points.push(Vec2::new(x, level_to_view_y(level, size)));
    }

    points.push(Vec2::new(size.x, level_to_view_y(last_level, size)));
    points
}

/// Flächen-Variante: Kurvenzug plus untere rechte und untere linke Ecke.
pub fn fill_polyline(curve: &[Vec2], size: Vec2) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(curve.len() + 2);
    points.extend_from_slice(curve);
    points.push(Vec2::new(size.x, size.y));
    points.push(Vec2::new(0.0, size.y));
    points
}

/// Horizontale Mittellinie bei y = 0.5.
pub fn axis_polyline(size: Vec2) -> Vec<Vec2> {
    let y = 0.5 * size.y;
    vec![Vec2::new(0.0, y), Vec2::new(size.x, y)]
}

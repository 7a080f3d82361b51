//! Einzelner Stützpunkt (Breakpoint) einer Hüllkurve.

use super::math;
use crate::render::MarkerId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Untere X-Grenze eines Breakpoints (normalisiert).
pub const X_MIN: f32 = 0.0;
/// Obere X-Grenze eines Breakpoints (normalisiert).
pub const X_MAX: f32 = 1.0;
/// Untere Y-Grenze eines Breakpoints (normalisiert).
pub const Y_MIN: f32 = 0.0;
/// Obere Y-Grenze eines Breakpoints (normalisiert).
pub const Y_MAX: f32 = 1.0;
/// Kleinste zulässige Krümmung.
pub const P_MIN: f32 = 0.001;
/// Größte zulässige Krümmung.
pub const P_MAX: f32 = 10.0;
/// Krümmung eines linearen Segments.
pub const DEFAULT_CURVATURE: f32 = 1.0;

/// Exportierter Schnappschuss eines Breakpoints (`{x, y, p}`).
///
/// Dient sowohl als Payload des `Changed`-Events als auch als Eingabeformat
/// für Startpunkte; `p` ist dort optional und fällt auf `1.0` zurück.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_curvature")]
    pub p: f32,
}

impl EnvelopePoint {
    /// Erstellt einen linearen Punkt (`p = 1`).
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            p: DEFAULT_CURVATURE,
        }
    }

    /// Erstellt einen Punkt mit expliziter Krümmung.
    pub fn with_curvature(x: f32, y: f32, p: f32) -> Self {
        Self { x, y, p }
    }
}

fn default_curvature() -> f32 {
    DEFAULT_CURVATURE
}

/// Ein verschiebbarer Stützpunkt mit Position und Krümmung.
///
/// Die Krümmung gehört zum Segment *links* des Punkts. Nachbar-Grenzen kennt
/// der Punkt selbst nicht, sie werden von der besitzenden Hüllkurve über
/// [`neighbor_range`] ermittelt.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoint {
    position: Vec2,
    curvature: f32,
    marker: MarkerId,
}

impl Breakpoint {
    pub(crate) fn new(position: Vec2, curvature: f32, marker: MarkerId) -> Self {
        Self {
            position,
            curvature,
            marker,
        }
    }

    /// Normalisierte X-Position.
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Normalisierte Y-Position.
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Normalisierte Position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Krümmung (Exponent) des linken Segments.
    pub fn curvature(&self) -> f32 {
        self.curvature
    }

    /// Handle des zugehörigen Markers auf der Render-Oberfläche.
    pub fn marker(&self) -> MarkerId {
        self.marker
    }

    /// Setzt die Position; `None` (oder ein nicht-endlicher Wert) behält die Achse bei.
    ///
    /// X wird auf `x_range` (Nachbar-Intervall), Y auf `[Y_MIN, Y_MAX]` begrenzt.
    pub(crate) fn move_to(&mut self, x: Option<f32>, y: Option<f32>, x_range: (f32, f32)) {
        if let Some(x) = x.filter(|v| v.is_finite()) {
            self.position.x = x;
        }
        if let Some(y) = y.filter(|v| v.is_finite()) {
            self.position.y = y;
        }
        self.position.x = math::clip(self.position.x, x_range.0, x_range.1);
        self.position.y = math::clip(self.position.y, Y_MIN, Y_MAX);
    }

    pub(crate) fn set_curve(&mut self, p: f32) {
        if p.is_finite() {
            self.curvature = p;
        }
    }

    pub(crate) fn adjust_curve(&mut self, offset: f32) {
        self.set_curve(self.curvature + offset);
    }

    /// Begrenzt die Krümmung auf `[P_MIN, P_MAX]`.
    pub(crate) fn clip_curvature(&mut self) {
        self.curvature = math::clip(self.curvature, P_MIN, P_MAX);
    }

    /// Pixel-Koordinaten innerhalb einer Fläche der Größe `size` (Y zeigt nach unten).
    pub fn to_view(&self, size: Vec2) -> Vec2 {
        normalized_to_view(self.position, size)
    }

    /// Exportierter `{x, y, p}`-Schnappschuss.
    pub fn to_point(&self) -> EnvelopePoint {
        EnvelopePoint::with_curvature(self.position.x, self.position.y, self.curvature)
    }
}

/// Erlaubtes X-Intervall für den Breakpoint an `index`.
///
/// Fehlende Nachbarn fallen auf die Listengrenzen 0 bzw. 1 zurück.
pub fn neighbor_range(nodes: &[Breakpoint], index: usize) -> (f32, f32) {
    let low = index
        .checked_sub(1)
        .and_then(|i| nodes.get(i))
        .map_or(X_MIN, |prev| prev.x())
        .max(X_MIN);
    let high = nodes
        .get(index + 1)
        .map_or(X_MAX, |next| next.x())
        .min(X_MAX);
    (low, high)
}

/// Normalisiert → Pixel: `(x * w, (1 - y) * h)`.
pub fn normalized_to_view(position: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(position.x * size.x, (1.0 - position.y) * size.y)
}

/// Pixel → normalisiert (Umkehrung von [`normalized_to_view`]).
///
/// Bei einer Fläche ohne Ausdehnung wird die jeweilige Achse zu `0`.
pub fn view_to_normalized(pixel: Vec2, size: Vec2) -> Vec2 {
    let x = if size.x > 0.0 { pixel.x / size.x } else { 0.0 };
    let y = if size.y > 0.0 {
        1.0 - pixel.y / size.y
    } else {
        0.0
    };
    Vec2::new(x, y)
}

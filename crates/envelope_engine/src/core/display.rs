//! Read-only Anzeige-Marker (Cursor-Echo).

use super::breakpoint::normalized_to_view;
use crate::render::MarkerId;
use glam::Vec2;

/// Zeigt eine beliebige Position auf der Hüllkurve an, z.B. den Abspielkopf.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMarker {
    position: Vec2,
    marker: MarkerId,
}

impl DisplayMarker {
    pub(crate) fn new(marker: MarkerId) -> Self {
        Self {
            position: Vec2::ZERO,
            marker,
        }
    }

    /// Normalisierte Position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Handle des Markers auf der Render-Oberfläche.
    pub fn marker(&self) -> MarkerId {
        self.marker
    }

    /// Setzt die Position; `None` behält die jeweilige Achse bei.
    pub(crate) fn set(&mut self, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x.filter(|v| v.is_finite()) {
            self.position.x = x;
        }
        if let Some(y) = y.filter(|v| v.is_finite()) {
            self.position.y = y;
        }
    }

    /// Pixel-Koordinaten innerhalb einer Fläche der Größe `size`.
    pub fn to_view(&self, size: Vec2) -> Vec2 {
        normalized_to_view(self.position, size)
    }
}

//! Render-Oberfläche als injizierte Fähigkeit der Hüllkurve.
//!
//! Die Hüllkurve erzeugt und platziert Marker sowie Polylinien ausschließlich
//! über [`RenderSurface`]. [`RetainedScene`] hält den letzten Stand im Speicher,
//! ein Frontend zeichnet ihn pro Frame.

use glam::Vec2;
use indexmap::IndexMap;

/// Handle eines Markers (Kreis) auf der Render-Oberfläche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Erstellt ein Handle aus einer rohen ID.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Rohe ID.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Darstellungsart eines Markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Verschiebbarer Breakpoint (Akzentfarbe, gefüllt)
    Breakpoint,
    /// Read-only Cursor-Echo (schwarz mit Achsen-Kontur)
    Display,
}

/// Polylinien-Ebenen der Hüllkurve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolylineLayer {
    /// Kurvenzug
    Curve,
    /// Kurvenzug plus untere rechte und untere linke Ecke (Flächenfüllung).
    /// Das Polygon ist im Allgemeinen konkav; Oberflächen, die nur konvex
    /// füllen, zerlegen es in Streifen.
    Fill,
    /// Gestrichelte Mittellinie bei y = 0.5
    Axis,
}

/// Zustand eines Markers in Pixel-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerShape {
    pub style: MarkerStyle,
    pub center: Vec2,
    pub radius: f32,
}

/// Primitive, die die Hüllkurve für ihre Darstellung benötigt.
pub trait RenderSurface {
    /// Erzeugt einen neuen (noch unplatzierten) Marker.
    fn create_marker(&mut self, style: MarkerStyle) -> MarkerId;
    /// Platziert einen Marker in Pixel-Koordinaten.
    fn update_marker(&mut self, id: MarkerId, center: Vec2, radius: f32);
    /// Gibt einen Marker frei.
    fn remove_marker(&mut self, id: MarkerId);
    /// Ersetzt die Punkte einer Polylinie (leere Liste = nicht zeichnen).
    fn set_polyline(&mut self, layer: PolylineLayer, points: Vec<Vec2>);
}

/// In-Memory-Szene: letzter Stand aller Marker und Polylinien.
#[derive(Debug, Clone, Default)]
pub struct RetainedScene {
    next_id: u64,
    /// Marker in Erzeugungsreihenfolge (bestimmt die Zeichenreihenfolge)
    markers: IndexMap<MarkerId, MarkerShape>,
    polylines: IndexMap<PolylineLayer, Vec<Vec2>>,
}

impl RetainedScene {
    /// Erstellt eine leere Szene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alle lebenden Marker in Zeichenreihenfolge.
    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &MarkerShape)> {
        self.markers.iter().map(|(id, shape)| (*id, shape))
    }

    /// Einzelner Marker.
    pub fn marker(&self, id: MarkerId) -> Option<&MarkerShape> {
        self.markers.get(&id)
    }

    /// Anzahl lebender Marker.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Punkte einer Polylinie (leer, wenn nie gesetzt).
    pub fn polyline(&self, layer: PolylineLayer) -> &[Vec2] {
        self.polylines.get(&layer).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl RenderSurface for RetainedScene {
    fn create_marker(&mut self, style: MarkerStyle) -> MarkerId {
        let id = MarkerId::new(self.next_id);
        self.next_id += 1;
        self.markers.insert(
            id,
            MarkerShape {
                style,
                center: Vec2::ZERO,
                radius: 0.0,
            },
        );
        id
    }

    fn update_marker(&mut self, id: MarkerId, center: Vec2, radius: f32) {
        if let Some(shape) = self.markers.get_mut(&id) {
            shape.center = center;
            shape.radius = radius;
        } else {
            log::warn!("Marker {} existiert nicht mehr", id.raw());
        }
    }

    fn remove_marker(&mut self, id: MarkerId) {
        // shift_remove erhält die Zeichenreihenfolge der übrigen Marker
        self.markers.shift_remove(&id);
    }

    fn set_polyline(&mut self, layer: PolylineLayer, points: Vec<Vec2>) {
        self.polylines.insert(layer, points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_keep_creation_order_after_removal() {
        let mut scene = RetainedScene::new();
        let a = scene.create_marker(MarkerStyle::Breakpoint);
        let b = scene.create_marker(MarkerStyle::Breakpoint);
        let c = scene.create_marker(MarkerStyle::Display);

        scene.remove_marker(b);
        let order: Vec<MarkerId> = scene.markers().map(|(id, _)| id).collect();

        assert_eq!(order, vec![a, c]);
        assert_eq!(scene.marker_count(), 2);
    }

    #[test]
    fn update_places_marker() {
        let mut scene = RetainedScene::new();
        let id = scene.create_marker(MarkerStyle::Breakpoint);
        scene.update_marker(id, Vec2::new(30.0, 90.0), 5.0);

        let shape = scene.marker(id).expect("Marker erwartet");
        assert_eq!(shape.center, Vec2::new(30.0, 90.0));
        assert_eq!(shape.radius, 5.0);
    }

    #[test]
    fn unknown_polyline_is_empty() {
        let scene = RetainedScene::new();
        assert!(scene.polyline(PolylineLayer::Axis).is_empty());
    }
}

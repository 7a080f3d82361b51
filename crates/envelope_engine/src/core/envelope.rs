//! Die zentrale Hüllkurven-Datenstruktur: geordnete Breakpoints, Mutation,
//! Kurvenauswertung und Hit-Test.

#[cfg(test)]
mod tests;

use super::breakpoint::{
    DEFAULT_CURVATURE, X_MAX, X_MIN, Y_MAX, Y_MIN, neighbor_range, view_to_normalized,
};
use super::curve::{self, Neighbors};
use super::hit_test::{self, HitTarget, HitTolerance};
use super::{Breakpoint, DisplayMarker, EnvelopePoint, SpatialIndex, math};
use crate::error::EnvelopeError;
use crate::render::{MarkerStyle, PolylineLayer, RenderSurface, path};
use crate::shared::{EnvelopeOptions, RESET_LEVEL};
use glam::Vec2;

/// Beobachtbare Ereignisse einer Hüllkurve.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeEvent {
    /// Nach jeder erfolgreichen Mutation: aktuelle, nach X geordnete Punkte
    Changed(Vec<EnvelopePoint>),
    /// Ergebnis eines expliziten `scan`
    Scanned(f32),
}

/// Interaktive Hüllkurve über einer injizierten Render-Oberfläche.
///
/// Invarianten nach jedem öffentlichen Aufruf:
/// - `nodes` ist aufsteigend nach X sortiert, kein Punkt überholt seine Nachbarn
/// - alle Koordinaten liegen in `[0, 1]`, alle Krümmungen in `[P_MIN, P_MAX]`
/// - `points()` und Spatial-Index entsprechen dem aktuellen Stand von `nodes`
#[derive(Debug)]
pub struct Envelope<S: RenderSurface> {
    nodes: Vec<Breakpoint>,
    /// Exportierter Schnappschuss, nach jeder Mutation neu berechnet
    points: Vec<EnvelopePoint>,
    spatial: SpatialIndex,
    display: DisplayMarker,
    surface: S,
    size: Vec2,
    max_points: usize,
    no_new_points: bool,
    show_axis: bool,
    path_resolution_px: f32,
    tolerance: HitTolerance,
    events: Vec<EnvelopeEvent>,
}

impl<S: RenderSurface> Envelope<S> {
    /// Erstellt eine Hüllkurve aus den Optionen und zeichnet sie auf `surface`.
    ///
    /// Die Startpunkte werden unabhängig von `no_new_points` übernommen, nach X
    /// sortiert, begrenzt und auf `max_points` gekürzt. Es wird kein
    /// `Changed`-Event ausgelöst.
    pub fn new(options: &EnvelopeOptions, mut surface: S) -> Self {
        let mut initial: Vec<EnvelopePoint> = options
            .points
            .iter()
            .copied()
            .filter(|p| {
                let valid = p.x.is_finite() && p.y.is_finite();
                if !valid {
                    log::warn!("Ungültiger Startpunkt ignoriert: {:?}", p);
                }
                valid
            })
            .collect();
        initial.sort_by(|a, b| a.x.total_cmp(&b.x));
        if initial.len() > options.max_points {
            log::warn!(
                "{} Startpunkte, nur {} erlaubt: überzählige Punkte verworfen",
                initial.len(),
                options.max_points
            );
            initial.truncate(options.max_points);
        }

        let nodes: Vec<Breakpoint> = initial
            .iter()
            .map(|p| {
                let marker = surface.create_marker(MarkerStyle::Breakpoint);
                let curvature = if p.p.is_finite() {
                    p.p
                } else {
                    DEFAULT_CURVATURE
                };
                Breakpoint::new(Vec2::new(p.x, p.y), curvature, marker)
            })
            .collect();
        let display = DisplayMarker::new(surface.create_marker(MarkerStyle::Display));

        let mut envelope = Self {
            nodes,
            points: Vec::new(),
            spatial: SpatialIndex::empty(),
            display,
            surface,
            size: Vec2::new(options.size[0], options.size[1]),
            max_points: options.max_points,
            no_new_points: options.no_new_points,
            show_axis: options.show_axis,
            path_resolution_px: options.path_resolution_px,
            tolerance: options.hit_tolerance(),
            events: Vec::new(),
        };

        for index in 0..envelope.nodes.len() {
            envelope.scale_node(index);
        }
        envelope.refresh();
        envelope.place_markers();
        envelope.render();
        envelope
    }

    // ── Zugriff ─────────────────────────────────────────────────────

    /// Geordnete Breakpoints.
    pub fn nodes(&self) -> &[Breakpoint] {
        &self.nodes
    }

    /// Exportierte `{x, y, p}`-Punkte.
    pub fn points(&self) -> &[EnvelopePoint] {
        &self.points
    }

    /// Anzahl Breakpoints.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true`, wenn keine Breakpoints existieren.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Größe in Pixeln.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Render-Oberfläche (zum Zeichnen des letzten Stands).
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Anzeige-Marker.
    pub fn display(&self) -> &DisplayMarker {
        &self.display
    }

    /// Trefferschwellen des Hit-Tests.
    pub fn tolerance(&self) -> HitTolerance {
        self.tolerance
    }

    /// Maximale Anzahl Breakpoints.
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Setzt die maximale Anzahl Breakpoints (bestehende Punkte bleiben erhalten).
    pub fn set_max_points(&mut self, max_points: usize) {
        self.max_points = max_points;
    }

    /// Ist das Einfügen gesperrt?
    pub fn no_new_points(&self) -> bool {
        self.no_new_points
    }

    /// Sperrt bzw. erlaubt das Einfügen neuer Breakpoints.
    pub fn set_no_new_points(&mut self, no_new_points: bool) {
        self.no_new_points = no_new_points;
    }

    /// Entnimmt alle seit dem letzten Aufruf ausgelösten Ereignisse.
    pub fn take_events(&mut self) -> Vec<EnvelopeEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Geometrie ───────────────────────────────────────────────────

    /// Ändert die Größe, platziert alle Marker neu und zeichnet die Kurve.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
        self.place_markers();
        self.render();
    }

    /// Marker-Radius in Pixeln: `floor(min(w, h) / 50) + 2`.
    pub fn marker_radius(&self) -> f32 {
        (self.size.x.min(self.size.y) / 50.0).floor() + 2.0
    }

    /// Pixel-Position → normalisierte Position.
    pub fn to_normalized(&self, pixel: Vec2) -> Vec2 {
        view_to_normalized(pixel, self.size)
    }

    // ── Auswertung ──────────────────────────────────────────────────

    /// Index des ersten Breakpoints rechts von `x`.
    pub fn index_from_x(&self, x: f32) -> usize {
        curve::index_from_x(&self.nodes, x)
    }

    /// Umschließendes Breakpoint-Paar für `x`.
    pub fn find_neighbors(&self, x: f32) -> Option<Neighbors> {
        curve::find_neighbors(&self.nodes, x)
    }

    /// Pegel an `x` ohne Ereignis (für Rendering und Hit-Test).
    pub fn level_at(&self, x: f32) -> f32 {
        curve::level_at(&self.nodes, x)
    }

    /// Pegel an `x`; löst ein `Scanned`-Ereignis aus.
    pub fn scan(&mut self, x: f32) -> f32 {
        let value = self.level_at(x);
        self.events.push(EnvelopeEvent::Scanned(value));
        value
    }

    /// Hit-Test für eine Zeigerposition in Pixeln.
    pub fn find_nearest_element(&self, pointer: Vec2) -> Option<HitTarget> {
        let pos = self.to_normalized(pointer);
        hit_test::find_nearest_element(&self.nodes, &self.spatial, pos, self.tolerance)
    }

    // ── Mutation ────────────────────────────────────────────────────

    /// Sortiert die Breakpoints stabil nach X.
    pub fn sort_points(&mut self) {
        self.nodes.sort_by(|a, b| a.x().total_cmp(&b.x()));
    }

    /// Begrenzt Position und Krümmung eines Breakpoints auf seine Grenzen.
    pub fn scale_node(&mut self, index: usize) {
        let range = neighbor_range(&self.nodes, index);
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        let x = math::clip(node.x(), X_MIN, X_MAX);
        let y = math::clip(node.y(), Y_MIN, Y_MAX);
        node.move_to(Some(x), Some(y), range);
        node.clip_curvature();
    }

    /// Fügt einen Breakpoint ein; `None`, wenn das Einfügen abgelehnt wird.
    pub fn add_point(&mut self, x: f32, y: f32) -> Option<usize> {
        match self.try_add_point(x, y) {
            Ok(index) => Some(index),
            Err(e) => {
                log::info!(
                    "Breakpoint nicht eingefügt: {} (Anzahl: {}, Maximum: {})",
                    e,
                    self.nodes.len(),
                    self.max_points
                );
                None
            }
        }
    }

    /// Fügt einen Breakpoint ein und gibt seinen Listenindex zurück.
    pub fn try_add_point(&mut self, x: f32, y: f32) -> Result<usize, EnvelopeError> {
        let index = self.insert_point(x, y)?;
        self.commit();
        Ok(index)
    }

    /// Verschiebt einen Breakpoint auf eine absolute Position.
    pub fn move_point(&mut self, index: usize, x: f32, y: f32) -> Result<(), EnvelopeError> {
        self.check_index(index)?;
        let range = neighbor_range(&self.nodes, index);
        self.nodes[index].move_to(Some(x), Some(y), range);
        self.scale_node(index);
        self.commit();
        Ok(())
    }

    /// Verschiebt einen Breakpoint relativ.
    pub fn adjust_point(
        &mut self,
        index: usize,
        x_offset: f32,
        y_offset: f32,
    ) -> Result<(), EnvelopeError> {
        self.check_index(index)?;
        let current = self.nodes[index].position();
        self.move_point(index, current.x + x_offset, current.y + y_offset)
    }

    /// Entfernt einen Breakpoint und gibt seinen Marker frei.
    pub fn destroy_point(&mut self, index: usize) -> Result<EnvelopePoint, EnvelopeError> {
        self.check_index(index)?;
        let removed = self.nodes.remove(index);
        self.surface.remove_marker(removed.marker());
        self.commit();
        Ok(removed.to_point())
    }

    /// Setzt die Krümmung des Segments links von `index`.
    ///
    /// Der erste Breakpoint hat kein linkes Segment; dort ist der Aufruf wirkungslos.
    pub fn set_curve(&mut self, index: usize, p: f32) -> Result<(), EnvelopeError> {
        self.check_index(index)?;
        if index > 0 {
            self.nodes[index].set_curve(p);
            self.scale_node(index);
        }
        self.commit();
        Ok(())
    }

    /// Ändert die Krümmung des Segments links von `index` relativ.
    pub fn adjust_curve(&mut self, index: usize, offset: f32) -> Result<(), EnvelopeError> {
        self.check_index(index)?;
        if index > 0 {
            self.nodes[index].adjust_curve(offset);
            self.scale_node(index);
        }
        self.commit();
        Ok(())
    }

    /// Setzt einen Breakpoint auf `y = 0.5` und lineare Krümmung zurück (X bleibt).
    pub fn reset_point(&mut self, index: usize) -> Result<(), EnvelopeError> {
        self.check_index(index)?;
        let range = neighbor_range(&self.nodes, index);
        self.nodes[index].move_to(None, Some(RESET_LEVEL), range);
        if index > 0 {
            self.nodes[index].set_curve(DEFAULT_CURVATURE);
        }
        self.scale_node(index);
        self.commit();
        Ok(())
    }

    /// Ersetzt alle Breakpoints.
    ///
    /// Jeder Punkt durchläuft die Einfüge-Prüfung (`max_points`, `no_new_points`);
    /// ein angegebenes `p` wird übernommen. Es folgt genau ein `Changed`-Ereignis.
    pub fn set_points(&mut self, points: &[EnvelopePoint]) {
        for node in self.nodes.drain(..) {
            self.surface.remove_marker(node.marker());
        }

        for point in points {
            match self.insert_point(point.x, point.y) {
                Ok(index) => {
                    if index > 0 {
                        self.nodes[index].set_curve(point.p);
                        self.scale_node(index);
                    }
                }
                Err(e) => log::info!("Breakpoint {:?} nicht übernommen: {}", point, e),
            }
        }

        self.commit();
    }

    /// Setzt den Anzeige-Marker; `None` behält die jeweilige Achse bei.
    pub fn set_display(&mut self, x: Option<f32>, y: Option<f32>) {
        self.display.set(x, y);
        let center = self.display.to_view(self.size);
        let radius = self.marker_radius();
        self.surface
            .update_marker(self.display.marker(), center, radius);
    }

    // ── Interna ─────────────────────────────────────────────────────

    fn check_index(&self, index: usize) -> Result<(), EnvelopeError> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(EnvelopeError::IndexOutOfRange {
                index,
                len: self.nodes.len(),
            })
        }
    }

    /// Fügt ohne Ereignis ein; Aufrufer muss anschließend `commit` ausführen.
    fn insert_point(&mut self, x: f32, y: f32) -> Result<usize, EnvelopeError> {
        if self.no_new_points {
            return Err(EnvelopeError::InsertionDisabled);
        }
        if self.nodes.len() + 1 > self.max_points {
            return Err(EnvelopeError::CapacityReached {
                max_points: self.max_points,
            });
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(EnvelopeError::InvalidPosition { x, y });
        }

        let index = self.index_from_x(x);
        let marker = self.surface.create_marker(MarkerStyle::Breakpoint);
        self.nodes
            .insert(index, Breakpoint::new(Vec2::new(x, y), DEFAULT_CURVATURE, marker));
        self.scale_node(index);
        Ok(index)
    }

    /// Baut Schnappschuss und Spatial-Index aus `nodes` neu.
    fn refresh(&mut self) {
        self.points = self.nodes.iter().map(Breakpoint::to_point).collect();
        self.spatial = SpatialIndex::from_nodes(&self.nodes);
    }

    /// Abschluss jeder Mutation: Index, Schnappschuss, Ereignis, Darstellung.
    fn commit(&mut self) {
        self.refresh();
        self.events.push(EnvelopeEvent::Changed(self.points.clone()));
        self.place_markers();
        self.render();
    }

    fn place_markers(&mut self) {
        let radius = self.marker_radius();
        for node in &self.nodes {
            self.surface
                .update_marker(node.marker(), node.to_view(self.size), radius);
        }
        let center = self.display.to_view(self.size);
        self.surface
            .update_marker(self.display.marker(), center, radius);
    }

    /// Tastet die Kurve ab und aktualisiert alle Polylinien.
    pub fn render(&mut self) {
        let curve = path::curve_polyline(&self.nodes, self.size, self.path_resolution_px);
        let fill = path::fill_polyline(&curve, self.size);
        let axis = if self.show_axis {
            path::axis_polyline(self.size)
        } else {
            Vec::new()
        };

        self.surface.set_polyline(PolylineLayer::Curve, curve);
        self.surface.set_polyline(PolylineLayer::Fill, fill);
        self.surface.set_polyline(PolylineLayer::Axis, axis);
    }
}

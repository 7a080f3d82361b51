//! Gesten-Zustandsautomat: Drücken, Ziehen, Loslassen und Doppelklick.
//!
//! Eine Geste bezieht sich immer auf genau ein Element (Breakpoint oder
//! Segment). Die Session merkt sich die Breakpoint-Anzahl beim Start; ändert
//! sie sich von außen, wird die Session als veraltet verworfen.

use super::events::PointerIntent;
use super::interaction::InteractionHandle;
use crate::core::{Envelope, HitTarget, P_MAX, P_MIN, math};
use crate::render::RenderSurface;
use crate::shared::EnvelopeOptions;
use anyhow::bail;
use glam::Vec2;

/// Art des gegriffenen Elements.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureKind {
    /// Breakpoint folgt dem Zeiger
    Node,
    /// Segment-Krümmung folgt der vertikalen Zeigerbewegung
    Segment(InteractionHandle),
}

/// Laufende Geste zwischen Drücken und Loslassen.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    index: usize,
    kind: GestureKind,
    has_moved: bool,
    node_count: usize,
}

impl GestureSession {
    /// Index des gegriffenen Breakpoints (bei Segmenten: rechter Endpunkt).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Art der Geste.
    pub fn kind(&self) -> &GestureKind {
        &self.kind
    }

    /// Ob seit dem Drücken eine Bewegung stattfand.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Gegriffenes Element als Hit-Ziel.
    pub fn target(&self) -> HitTarget {
        match self.kind {
            GestureKind::Node => HitTarget::Node(self.index),
            GestureKind::Segment(_) => HitTarget::Segment(self.index),
        }
    }
}

/// Übersetzt Zeiger-Intents in Mutationen einer Hüllkurve.
#[derive(Debug, Clone)]
pub struct EnvelopeController {
    session: Option<GestureSession>,
    /// Vorlage für Segment-Gesten (Grenzen + Empfindlichkeit)
    handle: InteractionHandle,
}

impl Default for EnvelopeController {
    fn default() -> Self {
        Self::new(&EnvelopeOptions::default())
    }
}

impl EnvelopeController {
    /// Erstellt einen Controller für die Zeichenfläche aus den Optionen.
    pub fn new(options: &EnvelopeOptions) -> Self {
        let size = Vec2::from(options.size);
        Self {
            session: None,
            handle: InteractionHandle::relative_vertical(size)
                .with_sensitivity(options.curve_handle_sensitivity),
        }
    }

    /// Laufende Geste, falls vorhanden.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// `true`, wenn keine Geste läuft.
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Verarbeitet einen Zeiger-Intent.
    pub fn handle_intent<S: RenderSurface>(
        &mut self,
        envelope: &mut Envelope<S>,
        intent: PointerIntent,
    ) -> anyhow::Result<()> {
        match intent {
            PointerIntent::Pressed { pos } => self.press(envelope, pos),
            PointerIntent::Moved { pos } => self.drag(envelope, pos),
            PointerIntent::Released => self.release(envelope),
            PointerIntent::DoubleClicked { pos } => self.double_click(envelope, pos),
            PointerIntent::Resized { size } => {
                self.resize(envelope, size);
                Ok(())
            }
        }
    }

    fn press<S: RenderSurface>(
        &mut self,
        envelope: &mut Envelope<S>,
        pos: Vec2,
    ) -> anyhow::Result<()> {
        self.session = None;
        let Some(target) = envelope.find_nearest_element(pos) else {
            log::debug!("Drücken ins Leere bei {:?}", pos);
            return Ok(());
        };

        let node_count = envelope.len();
        match target {
            HitTarget::Node(index) => {
                let norm = envelope.to_normalized(pos);
                envelope.move_point(index, norm.x, norm.y)?;
                self.session = Some(GestureSession {
                    index,
                    kind: GestureKind::Node,
                    has_moved: false,
                    node_count,
                });
            }
            HitTarget::Segment(index) => {
                let curvature = envelope.nodes()[index].curvature();
                let mut handle = self.handle.clone();
                handle.set_anchor(pos);
                handle.set_value(math::normalize(1.0 / curvature, P_MIN, P_MAX));
                self.session = Some(GestureSession {
                    index,
                    kind: GestureKind::Segment(handle),
                    has_moved: false,
                    node_count,
                });
            }
        }

        log::debug!("Geste gestartet: {:?}", target);
        Ok(())
    }

    fn drag<S: RenderSurface>(
        &mut self,
        envelope: &mut Envelope<S>,
        pos: Vec2,
    ) -> anyhow::Result<()> {
        let len = envelope.len();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        if session.node_count != len || session.index >= len {
            let index = session.index;
            self.session = None;
            bail!(
                "Veraltete Geste verworfen: Index {} bei {} Breakpoints",
                index,
                len
            );
        }

        let pos = Vec2::new(math::clip(pos.x, 0.0, envelope.size().x), pos.y);
        session.has_moved = true;

        match &mut session.kind {
            GestureKind::Node => {
                let norm = envelope.to_normalized(pos);
                envelope.move_point(session.index, norm.x, norm.y)?;
            }
            GestureKind::Segment(handle) => {
                handle.update(pos);
                let p = 1.0 / math::scale(handle.value(), 0.0, 1.0, P_MIN, P_MAX);
                envelope.set_curve(session.index, p)?;
            }
        }
        Ok(())
    }

    fn release<S: RenderSurface>(&mut self, envelope: &mut Envelope<S>) -> anyhow::Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        if session.has_moved {
            log::debug!("Geste beendet: {:?}", session.target());
            return Ok(());
        }

        let len = envelope.len();
        if session.node_count != len || session.index >= len {
            bail!(
                "Veraltete Geste verworfen: Index {} bei {} Breakpoints",
                session.index,
                len
            );
        }

        match session.kind {
            GestureKind::Node => {
                if session.index + 1 < len {
                    envelope.set_curve(session.index + 1, 1.0)?;
                }
                envelope.destroy_point(session.index)?;
                log::debug!("Breakpoint {} per Klick entfernt", session.index);
            }
            GestureKind::Segment(_) => {
                envelope.set_curve(session.index, 1.0)?;
                log::debug!("Segment {} auf lineare Krümmung gesetzt", session.index);
            }
        }
        Ok(())
    }

    fn double_click<S: RenderSurface>(
        &mut self,
        envelope: &mut Envelope<S>,
        pos: Vec2,
    ) -> anyhow::Result<()> {
        self.session = None;

        let index = match envelope.find_nearest_element(pos) {
            Some(HitTarget::Node(index)) => {
                envelope.reset_point(index)?;
                index
            }
            _ => {
                let norm = envelope.to_normalized(pos);
                match envelope.add_point(norm.x, norm.y) {
                    Some(index) => index,
                    None => return Ok(()),
                }
            }
        };

        // Schon als bewegt markiert: das folgende Loslassen löscht nicht.
        self.session = Some(GestureSession {
            index,
            kind: GestureKind::Node,
            has_moved: true,
            node_count: envelope.len(),
        });
        log::debug!("Doppelklick auf Breakpoint {}", index);
        Ok(())
    }

    fn resize<S: RenderSurface>(&mut self, envelope: &mut Envelope<S>, size: [f32; 2]) {
        let [width, height] = size;
        envelope.resize(width, height);

        let domain = [0.0, envelope.size().x];
        let range = [envelope.size().y, 0.0];
        self.handle.resize(domain, range);
        if let Some(GestureSession {
            kind: GestureKind::Segment(handle),
            ..
        }) = self.session.as_mut()
        {
            handle.resize(domain, range);
        }
    }
}

//! Hüllkurven-Widget: verbindet Engine, Gesten-Controller und egui.

use super::input::{InputState, PointerFrame};
use super::paint::{Palette, paint_scene};
use envelope_engine::{
    Envelope, EnvelopeController, EnvelopeEvent, EnvelopeOptions, PointerIntent, RetainedScene,
};
use glam::Vec2;

/// Interaktiver Hüllkurven-Editor als egui-Widget.
#[derive(Debug)]
pub struct EnvelopeWidget {
    envelope: Envelope<RetainedScene>,
    controller: EnvelopeController,
    input: InputState,
    palette: Palette,
    last_hover: Option<Vec2>,
}

impl EnvelopeWidget {
    /// Erstellt das Widget aus den Konstruktions-Optionen.
    pub fn new(options: &EnvelopeOptions) -> Self {
        Self {
            envelope: Envelope::new(options, RetainedScene::new()),
            controller: EnvelopeController::new(options),
            input: InputState::new(),
            palette: Palette::from_options(options),
            last_hover: None,
        }
    }

    pub fn envelope(&self) -> &Envelope<RetainedScene> {
        &self.envelope
    }

    pub fn envelope_mut(&mut self) -> &mut Envelope<RetainedScene> {
        &mut self.envelope
    }

    /// Ändert die Größe der Zeichenfläche.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.apply_intent(PointerIntent::Resized {
            size: [width, height],
        });
    }

    /// Leitet einen Intent an den Controller weiter; Fehler werden geloggt.
    pub fn apply_intent(&mut self, intent: PointerIntent) {
        if let Err(e) = self.controller.handle_intent(&mut self.envelope, intent) {
            log::warn!("Zeiger-Intent {:?} verworfen: {:#}", intent, e);
        }
    }

    /// Setzt den Anzeige-Marker auf die Kurve unter dem Zeiger.
    ///
    /// Löst ein `Scanned`-Ereignis mit dem Pegel an dieser Stelle aus.
    pub fn hover(&mut self, pos: Vec2) {
        if self.last_hover == Some(pos) {
            return;
        }
        self.last_hover = Some(pos);

        let x = self.envelope.to_normalized(pos).x.clamp(0.0, 1.0);
        let level = self.envelope.scan(x);
        self.envelope.set_display(Some(x), Some(level));
    }

    /// Zeichnet das Widget, verarbeitet Zeiger-Eingaben und liefert die
    /// seit dem letzten Aufruf aufgetretenen Ereignisse.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Vec<EnvelopeEvent> {
        let size = self.envelope.size();
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(size.x, size.y), egui::Sense::click_and_drag());

        let frame = PointerFrame::capture(ui, &response, rect);
        for intent in self.input.collect_pointer_intents(frame) {
            self.apply_intent(intent);
        }

        if !self.input.is_dragging() && frame.inside {
            if let Some(pos) = frame.pos {
                self.hover(pos);
            }
        }

        paint_scene(
            &ui.painter_at(rect),
            rect,
            self.envelope.surface(),
            &self.palette,
        );

        self.envelope.take_events()
    }
}

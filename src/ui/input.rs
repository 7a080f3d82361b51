//! Zeiger-Eingaben: egui-Zeigerzustand → `PointerIntent`.
//!
//! Pro Frame wird ein `PointerFrame` erfasst und in fester Reihenfolge
//! übersetzt: Drücken, Bewegen, Loslassen, Doppelklick (+ Loslassen).

use envelope_engine::PointerIntent;
use glam::Vec2;

/// Zeigerzustand eines Frames in lokalen Pixelkoordinaten der Zeichenfläche.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    /// Primärtaste in diesem Frame gedrückt
    pub pressed: bool,
    /// Primärtaste in diesem Frame losgelassen
    pub released: bool,
    /// Primärtaste gehalten
    pub down: bool,
    /// egui hat einen Doppelklick auf der Fläche erkannt
    pub double_clicked: bool,
    /// Zeigerposition (lokal), falls bekannt
    pub pos: Option<Vec2>,
    /// Zeiger liegt innerhalb der Zeichenfläche
    pub inside: bool,
}

impl PointerFrame {
    /// Liest den Zeigerzustand relativ zu `rect`.
    pub fn capture(ui: &egui::Ui, response: &egui::Response, rect: egui::Rect) -> Self {
        let (pressed, released, down, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.interact_pos().or(i.pointer.hover_pos()),
            )
        });

        Self {
            pressed,
            released,
            down,
            double_clicked: response.double_clicked(),
            pos: pointer.map(|p| to_local(p, rect)),
            inside: pointer.is_some_and(|p| rect.contains(p)),
        }
    }
}

/// Bildschirmposition → lokale Pixelposition (Ursprung oben links).
pub fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Vec2 {
    Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y)
}

/// Verfolgt, ob eine Geste auf der Fläche begonnen hat.
#[derive(Debug, Default)]
pub struct InputState {
    dragging: bool,
    last_pos: Option<Vec2>,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true`, solange eine auf der Fläche begonnene Geste läuft.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Übersetzt einen Frame in Zeiger-Intents.
    pub fn collect_pointer_intents(&mut self, frame: PointerFrame) -> Vec<PointerIntent> {
        let mut events = Vec::new();

        if frame.pressed && frame.inside {
            if let Some(pos) = frame.pos {
                events.push(PointerIntent::Pressed { pos });
                self.dragging = true;
                self.last_pos = Some(pos);
            }
        }

        if self.dragging && frame.down {
            if let Some(pos) = frame.pos.filter(|p| Some(*p) != self.last_pos) {
                events.push(PointerIntent::Moved { pos });
                self.last_pos = Some(pos);
            }
        }

        if self.dragging && (frame.released || !frame.down) {
            events.push(PointerIntent::Released);
            self.dragging = false;
            self.last_pos = None;
        }

        if frame.double_clicked {
            if let Some(pos) = frame.pos {
                events.push(PointerIntent::DoubleClicked { pos });
                events.push(PointerIntent::Released);
            }
        }

        events
    }
}

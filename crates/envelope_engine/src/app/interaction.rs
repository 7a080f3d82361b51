//! Zeiger-Handle: bildet Zeigerpositionen auf einen Wert in `[0, 1]` ab.
//!
//! Im relativen Modus addiert jedes `update` nur die Bewegung seit dem
//! letzten Anker; Sprünge über die halbe Wertespanne werden verworfen.

use crate::core::math;
use glam::Vec2;

/// Absolute oder relative Abbildung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleMode {
    /// Wert = Zeigerposition
    Absolute,
    /// Wert += Zeigerbewegung seit dem Anker
    Relative,
}

/// Ausgewertete Zeigerachse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleDirection {
    Vertical,
    Horizontal,
}

/// Zustand eines Zeiger-Handles.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionHandle {
    mode: HandleMode,
    direction: HandleDirection,
    /// X-Grenzen in Pixeln, die auf `[0, 1]` abgebildet werden
    domain: [f32; 2],
    /// Y-Grenzen in Pixeln, die auf `[0, 1]` abgebildet werden
    range: [f32; 2],
    anchor: f32,
    value: f32,
    sensitivity: f32,
}

impl InteractionHandle {
    /// Erstellt ein Handle mit Wert `0` und Empfindlichkeit `1`.
    pub fn new(
        mode: HandleMode,
        direction: HandleDirection,
        domain: [f32; 2],
        range: [f32; 2],
    ) -> Self {
        Self {
            mode,
            direction,
            domain,
            range,
            anchor: 0.0,
            value: 0.0,
            sensitivity: 1.0,
        }
    }

    /// Relatives, vertikales Handle für eine Fläche der Größe `size`
    /// (unten = 0, oben = 1).
    pub fn relative_vertical(size: Vec2) -> Self {
        Self::new(
            HandleMode::Relative,
            HandleDirection::Vertical,
            [0.0, size.x],
            [size.y, 0.0],
        )
    }

    /// Setzt die Empfindlichkeit des relativen Modus.
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Neue Grenzen nach einer Größenänderung.
    pub fn resize(&mut self, domain: [f32; 2], range: [f32; 2]) {
        self.domain = domain;
        self.range = range;
    }

    /// Wert des letzten Ankers.
    pub fn anchor(&self) -> f32 {
        self.anchor
    }

    /// Setzt den Anker auf die Zeigerposition.
    pub fn set_anchor(&mut self, pointer: Vec2) {
        self.anchor = self.position_to_value(pointer);
    }

    /// Aktueller Wert in `[0, 1]`.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Setzt den Wert (auf `[0, 1]` begrenzt).
    pub fn set_value(&mut self, value: f32) {
        self.value = math::clip(value, 0.0, 1.0);
    }

    /// Übernimmt eine neue Zeigerposition.
    pub fn update(&mut self, pointer: Vec2) {
        let current = self.position_to_value(pointer);
        match self.mode {
            HandleMode::Relative => {
                let mut increment = current - self.anchor;
                if increment.abs() > 0.5 {
                    increment = 0.0;
                }
                self.anchor = current;
                self.set_value(self.value + increment * self.sensitivity);
            }
            HandleMode::Absolute => self.set_value(current),
        }
    }

    fn position_to_value(&self, pointer: Vec2) -> f32 {
        match self.direction {
            HandleDirection::Vertical => math::normalize(pointer.y, self.range[0], self.range[1]),
            HandleDirection::Horizontal => {
                math::normalize(pointer.x, self.domain[0], self.domain[1])
            }
        }
    }
}

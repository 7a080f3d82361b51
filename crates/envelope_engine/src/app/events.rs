//! Zeiger-Intents für den Gesten-Controller.

use glam::Vec2;

/// Zeiger-Eingaben aus der UI ohne eigene Mutationslogik.
///
/// Positionen sind Pixel relativ zur linken oberen Ecke der Zeichenfläche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerIntent {
    /// Primärtaste gedrückt
    Pressed { pos: Vec2 },
    /// Zeiger bewegt (bei gedrückter Taste)
    Moved { pos: Vec2 },
    /// Primärtaste losgelassen
    Released,
    /// Doppelklick erkannt
    DoubleClicked { pos: Vec2 },
    /// Zeichenfläche hat eine neue Größe
    Resized { size: [f32; 2] },
}

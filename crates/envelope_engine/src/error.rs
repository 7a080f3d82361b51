//! Fehlertypen der Hüllkurven-Engine.

use thiserror::Error;

/// Abgelehnte Operationen auf einer Hüllkurve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvelopeError {
    /// Ein Breakpoint-Index liegt außerhalb der aktuellen Liste.
    #[error("Breakpoint-Index {index} außerhalb des Bereichs (Anzahl: {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Die maximale Anzahl Breakpoints ist erreicht.
    #[error("Maximale Anzahl Breakpoints erreicht ({max_points})")]
    CapacityReached { max_points: usize },
    /// Das Einfügen neuer Breakpoints ist gesperrt.
    #[error("Einfügen neuer Breakpoints ist deaktiviert")]
    InsertionDisabled,
    /// Die Position enthält NaN oder Unendlich.
    #[error("Ungültige Position ({x}, {y})")]
    InvalidPosition { x: f32, y: f32 },
}

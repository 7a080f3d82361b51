//! Core-Domänentypen: Breakpoints, Kurvenauswertung, Hit-Test, Hüllkurve.

/// Einzelner Stützpunkt mit Position, Krümmung und Grenzen
pub mod breakpoint;
pub mod curve;
pub mod display;
pub mod envelope;
pub mod math;
pub mod spatial;

pub use breakpoint::{Breakpoint, EnvelopePoint, P_MAX, P_MIN};
pub use curve::{EMPTY_LEVEL, Neighbors};
pub use display::DisplayMarker;
pub use envelope::{Envelope, EnvelopeEvent};
pub use hit_test::{HitTarget, HitTolerance};
pub use spatial::{SpatialIndex, SpatialMatch};

//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Konstruktions-Optionen, die Engine und Frontend gemeinsam lesen.

pub mod options;

pub use options::EnvelopeOptions;
pub use options::{DEFAULT_MAX_POINTS, RESET_LEVEL};

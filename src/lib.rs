//! Envelope Editor Library.
//! egui-Frontend für die Hüllkurven-Engine, als Library exportiert für Tests
//! und Wiederverwendung.

pub mod ui;

pub use envelope_engine::{
    Envelope, EnvelopeController, EnvelopeError, EnvelopeEvent, EnvelopeOptions, EnvelopePoint,
    HitTarget, P_MAX, P_MIN, PointerIntent, RetainedScene,
};
pub use ui::EnvelopeWidget;

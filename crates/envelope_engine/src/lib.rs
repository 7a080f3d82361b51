//! Envelope Engine Library.
//! Breakpoint-Modell, Kurvenauswertung, Hit-Test und Gestensteuerung einer
//! interaktiven Hüllkurve, unabhängig vom UI-Framework.

pub mod app;
pub mod core;
pub mod error;
pub mod render;
pub mod shared;

pub use app::{
    EnvelopeController, GestureKind, GestureSession, InteractionHandle, PointerIntent,
};
pub use core::{
    Breakpoint, DisplayMarker, EMPTY_LEVEL, Envelope, EnvelopeEvent, EnvelopePoint, HitTarget,
    HitTolerance, P_MAX, P_MIN,
};
pub use error::EnvelopeError;
pub use render::{MarkerId, MarkerShape, MarkerStyle, PolylineLayer, RenderSurface, RetainedScene};
pub use shared::EnvelopeOptions;

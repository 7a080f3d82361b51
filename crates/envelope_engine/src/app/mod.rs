//! Gestensteuerung: Zeiger-Intents, Gesten-Session und Interaction-Handle.

pub mod events;
pub mod gesture;
pub mod interaction;

pub use events::PointerIntent;
pub use gesture::{EnvelopeController, GestureKind, GestureSession};
pub use interaction::{HandleDirection, HandleMode, InteractionHandle};

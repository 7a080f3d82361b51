//! UI-Layer mit egui: Zeiger-Eingaben, Zeichnen und das Hüllkurven-Widget.

pub mod input;
pub mod paint;
mod widget;

pub use input::{InputState, PointerFrame};
pub use paint::Palette;
pub use widget::EnvelopeWidget;

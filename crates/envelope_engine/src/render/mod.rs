//! Darstellung: Render-Oberfläche und Pfad-Abtastung.

pub mod path;
mod surface;

pub use surface::{
    MarkerId, MarkerShape, MarkerStyle, PolylineLayer, RenderSurface, RetainedScene,
};

//! Drawing surface subsystem.
//!
//! Holds the user's sketched features and announces changes. Listeners get a
//! bare [`DrawEvent`] and read the full [`crate::geo::FeatureCollection`] on
//! demand.

pub mod surface;

pub use surface::{DrawError, DrawEvent, DrawingSurface, SketchPad};

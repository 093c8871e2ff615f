//! Overlay features layered on top of a finished render pass.

pub mod markers;

pub use markers::{MarkerSide, OVERLAY_OFFSET_PX, PlacedAnnotation, place_annotations};

//! Cross-section measurement of a grown tree
//!
//! Samples a horizontal plane and totals the areas of every branch it cuts,
//! for comparison against the trunk area.

pub mod slice;

pub use slice::{analyze, spans_height, world_height, SliceStats};

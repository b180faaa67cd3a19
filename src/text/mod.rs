//! Line-level text transforms used while laying out regions.
//!
//! These are pure functions with no knowledge of slides or rendering.

pub mod list;
pub mod math;
pub mod overflow;
pub mod style_tag;

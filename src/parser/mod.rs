//! Readers that turn lesson markup into `SlideRecord`s.

pub mod markup;
pub mod questions;

pub use markup::{MarkupParser, MarkupParserOptions};

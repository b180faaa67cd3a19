//! Slide builders and the render backends they draw into.
//!
//! `builder` lays out `SlideRecord`s and emits positioned, styled content
//! through the `RenderBackend` trait; `html_preview` and `manifest` are the
//! output types that implement it.

pub mod base;
pub mod builder;
pub mod html_preview;
pub mod layout;
pub mod manifest;

use clap::ValueEnum;

/// Output types a deck can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendType {
    /// Self-contained HTML preview page.
    #[default]
    Html,
    /// JSON manifest of every render instruction.
    Json,
}

impl BackendType {
    /// File extension for the output.
    pub fn extension(&self) -> &'static str {
        match self {
            BackendType::Html => "html",
            BackendType::Json => "json",
        }
    }
}

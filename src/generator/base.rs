use crate::config::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by a render backend.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),
    #[error("Unknown slide {0}")]
    UnknownSlide(usize),
    #[error("Unknown region {0}")]
    UnknownRegion(usize),
    #[error("Failed to encode output: {0}")]
    Encode(String),
    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to a slide created by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideId(pub usize);

/// Handle to a text region or picture created by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(pub usize);

/// A positioned rectangle, in inches from the top-left corner of the slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }
}

/// Placement of a picture. Without a height the picture keeps its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAnchor {
    Top,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Resolved styling for one paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    pub font_name: String,
    /// Font size in points.
    pub font_size: f64,
    pub color: Rgb,
    pub bold: bool,
    pub italic: bool,
    /// Space after the paragraph, in points.
    pub space_after: f64,
    pub alignment: Alignment,
}

/// The document backend a deck is rendered into.
///
/// The layout engine only emits positioned, styled content through this
/// trait and never deals with the output file format itself.
pub trait RenderBackend {
    /// Whether the backend can reveal elements one after another.
    fn supports_animations(&self) -> bool;

    fn add_slide(&mut self) -> Result<SlideId, RenderError>;

    fn fill_background(&mut self, slide: SlideId, color: Rgb) -> Result<(), RenderError>;

    /// Creates an empty text region; `name` labels it for authors and tooling.
    fn create_text_region(
        &mut self,
        slide: SlideId,
        rect: Rect,
        anchor: VerticalAnchor,
        name: &str,
    ) -> Result<RegionId, RenderError>;

    fn append_paragraph(
        &mut self,
        region: RegionId,
        text: &str,
        style: &ParagraphStyle,
    ) -> Result<(), RenderError>;

    /// Places a picture. Failure here is recoverable: the caller skips the
    /// image and keeps building.
    fn place_image(
        &mut self,
        slide: SlideId,
        path: &Path,
        frame: ImageFrame,
    ) -> Result<RegionId, RenderError>;

    /// Marks regions to appear one after another, in the given order.
    fn animate_in_order(&mut self, slide: SlideId, regions: &[RegionId]) -> Result<(), RenderError>;

    fn set_speaker_notes(&mut self, slide: SlideId, lines: &[String]) -> Result<(), RenderError>;

    /// Writes the finished deck to `output_path`.
    fn finalize(&mut self, output_path: &Path) -> Result<(), RenderError>;
}

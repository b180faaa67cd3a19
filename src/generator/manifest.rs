use crate::config::Rgb;
use crate::generator::base::{
    ImageFrame, ParagraphStyle, Rect, RegionId, RenderBackend, RenderError, SlideId,
    VerticalAnchor,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestParagraph {
    pub text: String,
    pub style: ParagraphStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManifestElement {
    Text {
        id: RegionId,
        name: String,
        rect: Rect,
        anchor: VerticalAnchor,
        paragraphs: Vec<ManifestParagraph>,
    },
    Image {
        id: RegionId,
        path: PathBuf,
        frame: ImageFrame,
    },
}

impl ManifestElement {
    pub fn id(&self) -> RegionId {
        match self {
            ManifestElement::Text { id, .. } | ManifestElement::Image { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestSlide {
    pub background: Option<Rgb>,
    pub elements: Vec<ManifestElement>,
    /// Regions revealed one after another, in order.
    pub reveal_order: Vec<RegionId>,
    pub notes: Vec<String>,
}

impl ManifestSlide {
    /// Names of the text regions, in creation order.
    pub fn region_names(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                ManifestElement::Text { name, .. } => Some(name.as_str()),
                ManifestElement::Image { .. } => None,
            })
            .collect()
    }

    /// Finds a text region by name, returning its rectangle and paragraphs.
    pub fn text_region(&self, wanted: &str) -> Option<(&Rect, &[ManifestParagraph])> {
        self.elements.iter().find_map(|e| match e {
            ManifestElement::Text {
                name,
                rect,
                paragraphs,
                ..
            } if name == wanted => Some((rect, paragraphs.as_slice())),
            _ => None,
        })
    }

    pub fn images(&self) -> Vec<(&Path, &ImageFrame)> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                ManifestElement::Image { path, frame, .. } => Some((path.as_path(), frame)),
                ManifestElement::Text { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestDeck {
    pub slides: Vec<ManifestSlide>,
}

/// A backend that records every instruction and writes them out as JSON.
#[derive(Debug, Clone)]
pub struct ManifestBackend {
    deck: ManifestDeck,
    /// Region id -> (slide index, element index).
    regions: Vec<(usize, usize)>,
    animations: bool,
}

impl Default for ManifestBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestBackend {
    pub fn new() -> Self {
        ManifestBackend {
            deck: ManifestDeck::default(),
            regions: Vec::new(),
            animations: true,
        }
    }

    /// A backend that reports no animation support.
    pub fn without_animations() -> Self {
        ManifestBackend {
            animations: false,
            ..Self::new()
        }
    }

    pub fn deck(&self) -> &ManifestDeck {
        &self.deck
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        serde_json::to_string_pretty(&self.deck).map_err(|e| RenderError::Encode(e.to_string()))
    }

    fn slide_mut(&mut self, slide: SlideId) -> Result<&mut ManifestSlide, RenderError> {
        self.deck
            .slides
            .get_mut(slide.0)
            .ok_or(RenderError::UnknownSlide(slide.0))
    }

    fn push_element(
        &mut self,
        slide: SlideId,
        make: impl FnOnce(RegionId) -> ManifestElement,
    ) -> Result<RegionId, RenderError> {
        let id = RegionId(self.regions.len());
        let target = self.slide_mut(slide)?;
        target.elements.push(make(id));
        let element_index = target.elements.len() - 1;
        self.regions.push((slide.0, element_index));
        Ok(id)
    }
}

impl RenderBackend for ManifestBackend {
    fn supports_animations(&self) -> bool {
        self.animations
    }

    fn add_slide(&mut self) -> Result<SlideId, RenderError> {
        self.deck.slides.push(ManifestSlide::default());
        Ok(SlideId(self.deck.slides.len() - 1))
    }

    fn fill_background(&mut self, slide: SlideId, color: Rgb) -> Result<(), RenderError> {
        self.slide_mut(slide)?.background = Some(color);
        Ok(())
    }

    fn create_text_region(
        &mut self,
        slide: SlideId,
        rect: Rect,
        anchor: VerticalAnchor,
        name: &str,
    ) -> Result<RegionId, RenderError> {
        self.push_element(slide, |id| ManifestElement::Text {
            id,
            name: name.to_string(),
            rect,
            anchor,
            paragraphs: Vec::new(),
        })
    }

    fn append_paragraph(
        &mut self,
        region: RegionId,
        text: &str,
        style: &ParagraphStyle,
    ) -> Result<(), RenderError> {
        let (slide_index, element_index) = *self
            .regions
            .get(region.0)
            .ok_or(RenderError::UnknownRegion(region.0))?;
        match self
            .deck
            .slides
            .get_mut(slide_index)
            .and_then(|s| s.elements.get_mut(element_index))
        {
            Some(ManifestElement::Text { paragraphs, .. }) => {
                paragraphs.push(ManifestParagraph {
                    text: text.to_string(),
                    style: style.clone(),
                });
                Ok(())
            }
            _ => Err(RenderError::UnknownRegion(region.0)),
        }
    }

    fn place_image(
        &mut self,
        slide: SlideId,
        path: &Path,
        frame: ImageFrame,
    ) -> Result<RegionId, RenderError> {
        if !path.is_file() {
            return Err(RenderError::ImageNotFound(path.to_path_buf()));
        }
        self.push_element(slide, |id| ManifestElement::Image {
            id,
            path: path.to_path_buf(),
            frame,
        })
    }

    fn animate_in_order(&mut self, slide: SlideId, regions: &[RegionId]) -> Result<(), RenderError> {
        self.slide_mut(slide)?.reveal_order.extend_from_slice(regions);
        Ok(())
    }

    fn set_speaker_notes(&mut self, slide: SlideId, lines: &[String]) -> Result<(), RenderError> {
        self.slide_mut(slide)?.notes = lines.to_vec();
        Ok(())
    }

    fn finalize(&mut self, output_path: &Path) -> Result<(), RenderError> {
        let json = self.to_json()?;
        std::fs::write(output_path, json).map_err(|source| RenderError::Io {
            path: output_path.to_path_buf(),
            source,
        })
    }
}

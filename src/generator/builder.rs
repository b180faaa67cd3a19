use crate::config::{Configuration, Rgb};
use crate::deck::{ImageDirective, SlideRecord};
use crate::generator::base::{
    Alignment, ImageFrame, ParagraphStyle, Rect, RegionId, RenderBackend, RenderError, SlideId,
    VerticalAnchor,
};
use crate::generator::layout::{self, RegionPlacement, CONTENT_AREA};
use crate::template;
use crate::text::{list, math, overflow, style_tag};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

static STEP_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[step\]\s*").unwrap());

/// Joined-length thresholds (in characters) and the font-size cap each one imposes.
const FONT_SIZE_CAPS: [(usize, f64); 4] = [(300, 18.0), (500, 16.0), (700, 14.0), (1000, 12.0)];
/// Above this joined length paragraphs are packed tighter.
const DENSE_TEXT_LENGTH: usize = 300;
const DENSE_SPACE_AFTER: f64 = 3.0;
const NORMAL_SPACE_AFTER: f64 = 6.0;

/// Lowers `font_size` for long text. Caps only ever lower the size and the
/// most restrictive applicable cap wins.
pub fn shrink_font_size(font_size: f64, text_length: usize) -> f64 {
    FONT_SIZE_CAPS
        .iter()
        .filter(|(threshold, _)| text_length > *threshold)
        .fold(font_size, |size, (_, cap)| size.min(*cap))
}

/// True if any line carries a `[step]` marker, in any letter case.
pub fn has_step_marker<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|l| STEP_MARKER_REGEX.is_match(l.as_ref()))
}

/// A non-fatal problem met while building, keyed by 1-based slide number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildWarning {
    pub slide: usize,
    pub message: String,
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slide {}: {}", self.slide, self.message)
    }
}

/// Outcome of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub slide_count: usize,
    pub warnings: Vec<BuildWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct DeckBuilderOptions {
    /// Directory relative image paths are resolved against.
    pub base_dir: Option<PathBuf>,
}

/// Lays out slide records and drives a render backend.
pub struct DeckBuilder<'a> {
    config: &'a Configuration,
    options: DeckBuilderOptions,
}

impl<'a> DeckBuilder<'a> {
    pub fn new(config: &'a Configuration, options: DeckBuilderOptions) -> Self {
        DeckBuilder { config, options }
    }

    /// Renders every record into `backend`, in order.
    ///
    /// Per-item problems (a bad image, a likely overflow) become warnings in
    /// the report; only backend failures abort the build.
    pub fn build<B: RenderBackend>(
        &self,
        slides: &[SlideRecord],
        backend: &mut B,
    ) -> Result<BuildReport, RenderError> {
        let animations = self.config.enable_animations && backend.supports_animations();
        let total = slides.len();
        let mut warnings = Vec::new();

        for (index, record) in slides.iter().enumerate() {
            let record = match &record.template {
                Some(name) => template::apply(record.clone(), name),
                None => record.clone(),
            };
            let slide = backend.add_slide()?;
            let mut writer = SlideWriter {
                config: self.config,
                backend: &mut *backend,
                slide,
                number: index + 1,
                animations,
                base_dir: self.options.base_dir.as_deref(),
                warnings: &mut warnings,
            };
            writer.write(&record, total)?;
        }

        log::info!("Built {} slides", total);
        Ok(BuildReport {
            slide_count: total,
            warnings,
        })
    }

    /// Builds the deck and writes it to `output_path`.
    pub fn build_to_file<B: RenderBackend>(
        &self,
        slides: &[SlideRecord],
        backend: &mut B,
        output_path: &Path,
    ) -> Result<BuildReport> {
        let report = self.build(slides, backend)?;
        backend
            .finalize(output_path)
            .with_context(|| format!("Failed to write deck to {}", output_path.display()))?;
        log::info!("Presentation created: {}", output_path.display());
        Ok(report)
    }
}

/// Writes one slide.
struct SlideWriter<'a, B: RenderBackend> {
    config: &'a Configuration,
    backend: &'a mut B,
    slide: SlideId,
    number: usize,
    animations: bool,
    base_dir: Option<&'a Path>,
    warnings: &'a mut Vec<BuildWarning>,
}

impl<B: RenderBackend> SlideWriter<'_, B> {
    fn warn(&mut self, message: String) {
        log::warn!("Slide {}: {}", self.number, message);
        self.warnings.push(BuildWarning {
            slide: self.number,
            message,
        });
    }

    fn write(&mut self, record: &SlideRecord, total: usize) -> Result<(), RenderError> {
        self.write_background()?;
        self.write_title(&record.title)?;

        let mode = record.layout_mode();
        log::debug!("Slide {} '{}' uses {:?} layout", self.number, record.title, mode);
        for placement in layout::placements(mode) {
            self.write_text_block(&placement, record.region(placement.region))?;
        }

        for image in &record.images {
            self.write_image(image)?;
        }

        if self.config.enable_slide_numbers {
            self.write_slide_number(total)?;
        }

        if !record.notes.is_empty() {
            let lines: Vec<String> = record.notes.iter().map(|n| format!("• {}", n)).collect();
            self.backend.set_speaker_notes(self.slide, &lines)?;
        }
        Ok(())
    }

    fn write_background(&mut self) -> Result<(), RenderError> {
        let config = self.config;
        if let Some(color) = config.background_color {
            self.backend.fill_background(self.slide, color)?;
        }
        if let Some(path) = &config.background_image {
            if !path.is_file() {
                log::debug!("Background image {} not found, skipped", path.display());
                return Ok(());
            }
            let frame = ImageFrame {
                left: 0.0,
                top: 0.0,
                width: config.slide_width,
                height: Some(config.slide_height),
            };
            if let Err(e) = self.backend.place_image(self.slide, path, frame) {
                self.warn(format!("Background image skipped: {}", e));
            }
        }
        Ok(())
    }

    fn write_title(&mut self, title: &str) -> Result<(), RenderError> {
        let region = self.backend.create_text_region(
            self.slide,
            layout::TITLE_RECT,
            VerticalAnchor::Middle,
            "Title",
        )?;
        let style = ParagraphStyle {
            font_size: layout::TITLE_FONT_SIZE,
            color: self.config.title_color,
            bold: true,
            ..self.body_style(layout::TITLE_FONT_SIZE, NORMAL_SPACE_AFTER)
        };
        self.backend.append_paragraph(region, title, &style)
    }

    fn write_slide_number(&mut self, total: usize) -> Result<(), RenderError> {
        let rect = layout::footer_rect(self.config.slide_width, self.config.slide_height);
        let region =
            self.backend
                .create_text_region(self.slide, rect, VerticalAnchor::Top, "SlideNumber")?;
        let style = ParagraphStyle {
            color: Rgb::GREY,
            alignment: Alignment::Right,
            ..self.body_style(layout::FOOTER_FONT_SIZE, NORMAL_SPACE_AFTER)
        };
        let footer = format!("{} / {}", self.number, total);
        self.backend.append_paragraph(region, &footer, &style)
    }

    fn body_style(&self, font_size: f64, space_after: f64) -> ParagraphStyle {
        ParagraphStyle {
            font_name: self.config.font_name.clone(),
            font_size,
            color: self.config.text_color,
            bold: false,
            italic: false,
            space_after,
            alignment: Alignment::Left,
        }
    }

    /// Style for a line: the tag's descriptor when the tag is known, body
    /// styling otherwise.
    fn line_style(&self, tag: Option<&str>, font_size: f64, space_after: f64) -> ParagraphStyle {
        let base = self.body_style(font_size, space_after);
        match tag.and_then(|t| self.config.style(t)) {
            Some(style) => ParagraphStyle {
                font_size: style.font_size,
                color: style.color.unwrap_or(self.config.text_color),
                bold: style.bold,
                italic: style.italic,
                ..base
            },
            None => base,
        }
    }

    fn write_text_block(
        &mut self,
        placement: &RegionPlacement,
        lines: &[String],
    ) -> Result<(), RenderError> {
        if lines.is_empty() {
            return Ok(());
        }

        let joined = math::normalize(&lines.join(" "));
        let text_length = joined.chars().count();

        if self.config.enable_overflow_warnings {
            let estimate = overflow::estimate(
                &joined,
                placement.font_size,
                placement.rect.width,
                placement.rect.height,
            );
            if estimate.will_overflow {
                self.warn(format!(
                    "Potential overflow in '{}': needs {} lines, has {}",
                    placement.label, estimate.lines_needed, estimate.lines_available
                ));
            }
        }

        let font_size = shrink_font_size(placement.font_size, text_length);

        if has_step_marker(lines) {
            return self.write_steps(placement, lines, font_size);
        }

        let is_list = list::is_list(lines);
        let space_after = if text_length > DENSE_TEXT_LENGTH {
            DENSE_SPACE_AFTER
        } else {
            NORMAL_SPACE_AFTER
        };

        let region = self.backend.create_text_region(
            self.slide,
            placement.rect,
            placement.anchor,
            placement.label,
        )?;
        for line in lines.iter().filter(|l| !l.trim().is_empty()) {
            let (tag, text) = style_tag::resolve(line);
            let mut text = math::normalize(text);
            if is_list {
                text = list::clean(&text);
            }
            let style = self.line_style(tag, font_size, space_after);
            self.backend.append_paragraph(region, &text, &style)?;
        }
        Ok(())
    }

    /// One stacked box per non-blank line, revealed in order when animations
    /// are available.
    fn write_steps(
        &mut self,
        placement: &RegionPlacement,
        lines: &[String],
        font_size: f64,
    ) -> Result<(), RenderError> {
        let rect = placement.rect;
        let mut top = rect.top;
        let mut boxes: Vec<RegionId> = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let stripped = STEP_MARKER_REGEX.replace_all(line, "");
            let normalized = math::normalize(&stripped);
            let (tag, text) = style_tag::resolve(&normalized);

            let region = self.backend.create_text_region(
                self.slide,
                Rect::new(rect.left, top, rect.width, layout::STEP_HEIGHT),
                VerticalAnchor::Top,
                &format!("{}_Step{}", placement.label, i + 1),
            )?;
            let style = self.line_style(tag, font_size, NORMAL_SPACE_AFTER);
            self.backend.append_paragraph(region, text, &style)?;

            boxes.push(region);
            top += layout::STEP_ADVANCE;
        }

        if self.animations && !boxes.is_empty() {
            self.backend.animate_in_order(self.slide, &boxes)?;
        }
        Ok(())
    }

    fn parse_dimension(&mut self, image: &ImageDirective, key: &str) -> Option<Option<f64>> {
        match image.attribute(key) {
            None => Some(None),
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) => Some(Some(value)),
                Err(_) => {
                    self.warn(format!(
                        "Image {} skipped: invalid {} '{}'",
                        image.path, key, raw
                    ));
                    None
                }
            },
        }
    }

    /// `width`, `left` and `top`, or `None` after warning about the first
    /// invalid one.
    fn image_dimensions(
        &mut self,
        image: &ImageDirective,
    ) -> Option<(Option<f64>, Option<f64>, Option<f64>)> {
        let width = self.parse_dimension(image, "width")?;
        let left = self.parse_dimension(image, "left")?;
        let top = self.parse_dimension(image, "top")?;
        Some((width, left, top))
    }

    fn write_image(&mut self, image: &ImageDirective) -> Result<(), RenderError> {
        let Some((width, left, top)) = self.image_dimensions(image) else {
            return Ok(());
        };
        let width = width.unwrap_or(layout::DEFAULT_IMAGE_WIDTH);
        let left = match left {
            Some(left) => left,
            None if image.attribute("align") == Some("center") => {
                (CONTENT_AREA.width - width) / 2.0 + CONTENT_AREA.left
            }
            None => CONTENT_AREA.left,
        };
        let top = top.unwrap_or(CONTENT_AREA.top);

        let path = image.resolved_path(self.base_dir);
        let frame = ImageFrame {
            left,
            top,
            width,
            height: None,
        };
        if let Err(e) = self.backend.place_image(self.slide, &path, frame) {
            self.warn(format!("Error adding image {}: {}", image.path, e));
        }
        Ok(())
    }
}

use crate::config::Rgb;
use crate::generator::base::{
    Alignment, ImageFrame, ParagraphStyle, Rect, RegionId, RenderBackend, RenderError, SlideId,
    VerticalAnchor,
};
use crate::generator::manifest::{ManifestBackend, ManifestDeck, ManifestElement, ManifestSlide};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use std::path::Path;

const PREVIEW_CSS: &str = "body{background:#e5e5e5;margin:0;padding:24px;font-family:sans-serif}\
.slide{position:relative;overflow:hidden;margin:0 auto 24px;background:#fff;box-shadow:0 2px 8px rgba(0,0,0,.3)}\
.region{position:absolute;display:flex;flex-direction:column;overflow:visible}\
.region p{margin:0;white-space:pre-wrap}\
.picture{position:absolute}\
.notes{max-width:960px;margin:-16px auto 32px;color:#444;font-size:14px}";

#[derive(Debug, Clone)]
pub struct HtmlPreviewOptions {
    /// Slide width in inches.
    pub slide_width: f64,
    /// Slide height in inches.
    pub slide_height: f64,
    /// Document title of the preview page.
    pub title: String,
}

impl Default for HtmlPreviewOptions {
    fn default() -> Self {
        HtmlPreviewOptions {
            slide_width: 13.33,
            slide_height: 7.5,
            title: "Lesson slides".to_string(),
        }
    }
}

/// Renders the deck as a single HTML page of absolutely positioned boxes.
///
/// Instructions are recorded first and turned into HTML on `finalize`.
pub struct HtmlPreviewBackend {
    recorder: ManifestBackend,
    options: HtmlPreviewOptions,
}

fn xml_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Encode(e.to_string())
}

fn inches(value: f64) -> String {
    format!("{:.2}in", value)
}

fn rect_css(rect: &Rect) -> String {
    format!(
        "left:{};top:{};width:{};height:{}",
        inches(rect.left),
        inches(rect.top),
        inches(rect.width),
        inches(rect.height)
    )
}

/// Source attribute for a picture. With `html_dir`, the path is made relative
/// to it; paths that cannot be resolved are written as recorded.
fn image_src(path: &Path, html_dir: Option<&Path>) -> String {
    let relative = html_dir.and_then(|dir| {
        let picture = path.canonicalize().ok()?;
        let dir = dir.canonicalize().ok()?;
        pathdiff::diff_paths(picture, dir)
    });
    let src = relative.as_deref().unwrap_or(path);
    src.to_string_lossy().replace('\\', "/")
}

fn paragraph_css(style: &ParagraphStyle) -> String {
    let mut css = format!(
        "font-family:'{}';font-size:{}pt;color:{};margin-bottom:{}pt",
        style.font_name,
        style.font_size,
        style.color.to_hex(),
        style.space_after
    );
    if style.bold {
        css.push_str(";font-weight:bold");
    }
    if style.italic {
        css.push_str(";font-style:italic");
    }
    if style.alignment == Alignment::Right {
        css.push_str(";text-align:right");
    }
    css
}

impl HtmlPreviewBackend {
    pub fn new(options: HtmlPreviewOptions) -> Self {
        HtmlPreviewBackend {
            recorder: ManifestBackend::new(),
            options,
        }
    }

    /// The instructions recorded so far.
    pub fn deck(&self) -> &ManifestDeck {
        self.recorder.deck()
    }

    /// Renders the recorded deck to an HTML document.
    ///
    /// Picture sources are written as recorded. Use [`Self::render_for`] to
    /// make them resolve from the document's own directory.
    pub fn render(&self) -> Result<String, RenderError> {
        self.render_with(None)
    }

    /// Renders the deck for a document saved at `output_path`, with picture
    /// sources relative to its directory.
    pub fn render_for(&self, output_path: &Path) -> Result<String, RenderError> {
        let html_dir = match output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        self.render_with(Some(html_dir))
    }

    fn render_with(&self, html_dir: Option<&Path>) -> Result<String, RenderError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 1);
        writer
            .get_mut()
            .write_all(b"<!DOCTYPE html>\n")
            .map_err(xml_err)?;

        start(&mut writer, BytesStart::new("html"))?;
        start(&mut writer, BytesStart::new("head"))?;
        empty(
            &mut writer,
            BytesStart::new("meta").with_attributes([("charset", "utf-8")]),
        )?;
        text_element(&mut writer, BytesStart::new("title"), &self.options.title)?;
        text_element(&mut writer, BytesStart::new("style"), PREVIEW_CSS)?;
        end(&mut writer, "head")?;

        start(&mut writer, BytesStart::new("body"))?;
        for (index, slide) in self.recorder.deck().slides.iter().enumerate() {
            self.render_slide(&mut writer, index + 1, slide, html_dir)?;
        }
        end(&mut writer, "body")?;
        end(&mut writer, "html")?;

        String::from_utf8(writer.into_inner().into_inner()).map_err(xml_err)
    }

    fn render_slide(
        &self,
        writer: &mut Writer<Cursor<Vec<u8>>>,
        number: usize,
        slide: &ManifestSlide,
        html_dir: Option<&Path>,
    ) -> Result<(), RenderError> {
        let background = slide.background.unwrap_or(Rgb(255, 255, 255)).to_hex();
        let style = format!(
            "width:{};height:{};background:{}",
            inches(self.options.slide_width),
            inches(self.options.slide_height),
            background
        );
        let data_slide = number.to_string();
        start(
            writer,
            BytesStart::new("section").with_attributes([
                ("class", "slide"),
                ("data-slide", data_slide.as_str()),
                ("style", style.as_str()),
            ]),
        )?;

        for element in &slide.elements {
            let step = slide
                .reveal_order
                .iter()
                .position(|id| *id == element.id())
                .map(|p| (p + 1).to_string());

            match element {
                ManifestElement::Text {
                    name,
                    rect,
                    anchor,
                    paragraphs,
                    ..
                } => {
                    let justify = match anchor {
                        VerticalAnchor::Top => "flex-start",
                        VerticalAnchor::Middle => "center",
                    };
                    let css = format!("{};justify-content:{}", rect_css(rect), justify);
                    let mut div = BytesStart::new("div").with_attributes([
                        ("class", "region"),
                        ("data-name", name.as_str()),
                        ("style", css.as_str()),
                    ]);
                    if let Some(step) = &step {
                        div.push_attribute(("data-step", step.as_str()));
                    }
                    start(writer, div)?;
                    for paragraph in paragraphs {
                        let css = paragraph_css(&paragraph.style);
                        text_element(
                            writer,
                            BytesStart::new("p").with_attributes([("style", css.as_str())]),
                            &paragraph.text,
                        )?;
                    }
                    end(writer, "div")?;
                }
                ManifestElement::Image { path, frame, .. } => {
                    let mut css = format!(
                        "left:{};top:{};width:{}",
                        inches(frame.left),
                        inches(frame.top),
                        inches(frame.width)
                    );
                    if let Some(height) = frame.height {
                        css.push_str(&format!(";height:{}", inches(height)));
                    }
                    let src = image_src(path, html_dir);
                    let mut img = BytesStart::new("img").with_attributes([
                        ("class", "picture"),
                        ("src", src.as_str()),
                        ("style", css.as_str()),
                    ]);
                    if let Some(step) = &step {
                        img.push_attribute(("data-step", step.as_str()));
                    }
                    empty(writer, img)?;
                }
            }
        }
        end(writer, "section")?;

        if !slide.notes.is_empty() {
            start(
                writer,
                BytesStart::new("aside").with_attributes([("class", "notes")]),
            )?;
            start(writer, BytesStart::new("ul"))?;
            for note in &slide.notes {
                text_element(writer, BytesStart::new("li"), note)?;
            }
            end(writer, "ul")?;
            end(writer, "aside")?;
        }
        Ok(())
    }
}

fn start<W: Write>(writer: &mut Writer<W>, element: BytesStart) -> Result<(), RenderError> {
    writer.write_event(Event::Start(element)).map_err(xml_err)
}

fn empty<W: Write>(writer: &mut Writer<W>, element: BytesStart) -> Result<(), RenderError> {
    writer.write_event(Event::Empty(element)).map_err(xml_err)
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), RenderError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)
}

fn text_element<W: Write>(
    writer: &mut Writer<W>,
    element: BytesStart,
    text: &str,
) -> Result<(), RenderError> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    start(writer, element)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    end(writer, &name)
}

impl RenderBackend for HtmlPreviewBackend {
    fn supports_animations(&self) -> bool {
        true
    }

    fn add_slide(&mut self) -> Result<SlideId, RenderError> {
        self.recorder.add_slide()
    }

    fn fill_background(&mut self, slide: SlideId, color: Rgb) -> Result<(), RenderError> {
        self.recorder.fill_background(slide, color)
    }

    fn create_text_region(
        &mut self,
        slide: SlideId,
        rect: Rect,
        anchor: VerticalAnchor,
        name: &str,
    ) -> Result<RegionId, RenderError> {
        self.recorder.create_text_region(slide, rect, anchor, name)
    }

    fn append_paragraph(
        &mut self,
        region: RegionId,
        text: &str,
        style: &ParagraphStyle,
    ) -> Result<(), RenderError> {
        self.recorder.append_paragraph(region, text, style)
    }

    fn place_image(
        &mut self,
        slide: SlideId,
        path: &Path,
        frame: ImageFrame,
    ) -> Result<RegionId, RenderError> {
        self.recorder.place_image(slide, path, frame)
    }

    fn animate_in_order(&mut self, slide: SlideId, regions: &[RegionId]) -> Result<(), RenderError> {
        self.recorder.animate_in_order(slide, regions)
    }

    fn set_speaker_notes(&mut self, slide: SlideId, lines: &[String]) -> Result<(), RenderError> {
        self.recorder.set_speaker_notes(slide, lines)
    }

    fn finalize(&mut self, output_path: &Path) -> Result<(), RenderError> {
        let html = self.render_for(output_path)?;
        std::fs::write(output_path, html).map_err(|source| RenderError::Io {
            path: output_path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn body_style() -> ParagraphStyle {
        ParagraphStyle {
            font_name: "Montserrat".to_string(),
            font_size: 22.0,
            color: Rgb(0, 0, 102),
            bold: true,
            italic: false,
            space_after: 6.0,
            alignment: Alignment::Left,
        }
    }

    #[test]
    fn test_render_escapes_text_and_positions_regions() -> Result<(), RenderError> {
        let mut backend = HtmlPreviewBackend::new(HtmlPreviewOptions::default());
        let slide = backend.add_slide()?;
        let region = backend.create_text_region(
            slide,
            Rect::new(1.5, 1.5, 10.5, 5.0),
            VerticalAnchor::Middle,
            "Content",
        )?;
        backend.append_paragraph(region, "a < b & <b>c</b>", &body_style())?;
        backend.set_speaker_notes(slide, &["• Smile".to_string()])?;

        let html = backend.render()?;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("a &lt; b &amp; &lt;b&gt;c&lt;/b&gt;"));
        assert!(html.contains("left:1.50in;top:1.50in;width:10.50in;height:5.00in"));
        assert!(html.contains("justify-content:center"));
        assert!(html.contains("font-weight:bold"));
        assert!(html.contains("color:#000066"));
        assert!(html.contains("data-slide=\"1\""));
        assert!(html.contains("<li>• Smile</li>"));
        Ok(())
    }

    #[test]
    fn test_render_marks_step_order() -> Result<(), RenderError> {
        let mut backend = HtmlPreviewBackend::new(HtmlPreviewOptions::default());
        let slide = backend.add_slide()?;
        let first = backend.create_text_region(
            slide,
            Rect::new(1.5, 1.5, 10.5, 0.6),
            VerticalAnchor::Top,
            "Content_Step1",
        )?;
        let second = backend.create_text_region(
            slide,
            Rect::new(1.5, 2.15, 10.5, 0.6),
            VerticalAnchor::Top,
            "Content_Step2",
        )?;
        backend.animate_in_order(slide, &[second, first])?;

        let html = backend.render()?;
        let step1 = html.find("data-name=\"Content_Step1\"").unwrap();
        let step2 = html.find("data-name=\"Content_Step2\"").unwrap();
        assert!(html[step1..step2].contains("data-step=\"2\""));
        assert!(html[step2..].contains("data-step=\"1\""));
        Ok(())
    }

    #[test]
    fn test_finalize_writes_file() -> Result<(), RenderError> {
        let dir = TempDir::new().unwrap();
        let picture = dir.path().join("cat.png");
        std::fs::write(&picture, b"png").unwrap();

        let mut backend = HtmlPreviewBackend::new(HtmlPreviewOptions {
            title: "Unit 3".to_string(),
            ..HtmlPreviewOptions::default()
        });
        let slide = backend.add_slide()?;
        backend.fill_background(slide, Rgb(250, 250, 250))?;
        backend.place_image(
            slide,
            &picture,
            ImageFrame {
                left: 2.0,
                top: 3.0,
                width: 4.0,
                height: None,
            },
        )?;

        let output = dir.path().join("deck.html");
        backend.finalize(&output)?;
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("<title>Unit 3</title>"));
        assert!(html.contains("background:#fafafa"));
        assert!(html.contains("class=\"picture\""));
        assert!(html.contains("left:2.00in;top:3.00in;width:4.00in"));
        assert_eq!(backend.deck().slides.len(), 1);
        Ok(())
    }

    #[test]
    fn test_finalize_makes_picture_sources_relative() -> Result<(), RenderError> {
        let dir = TempDir::new().unwrap();
        let lessons = dir.path().join("lessons");
        let pictures = dir.path().join("pictures");
        std::fs::create_dir_all(&lessons).unwrap();
        std::fs::create_dir_all(&pictures).unwrap();
        let beside = lessons.join("cat.png");
        let elsewhere = pictures.join("dog.png");
        std::fs::write(&beside, b"png").unwrap();
        std::fs::write(&elsewhere, b"png").unwrap();

        let mut backend = HtmlPreviewBackend::new(HtmlPreviewOptions::default());
        let slide = backend.add_slide()?;
        for picture in [&beside, &elsewhere] {
            backend.place_image(
                slide,
                picture,
                ImageFrame {
                    left: 1.5,
                    top: 1.5,
                    width: 4.0,
                    height: None,
                },
            )?;
        }

        let output = lessons.join("unit3_slides.html");
        backend.finalize(&output)?;
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("src=\"cat.png\""));
        assert!(html.contains("src=\"../pictures/dog.png\""));
        Ok(())
    }
}

use crate::deck::{ImageDirective, Region, SlideRecord};
use crate::parser::questions;
use anyhow::{Context, Result};
use std::path::Path;

/// Options for configuring the `MarkupParser`.
#[derive(Debug, Clone)]
pub struct MarkupParserOptions {
    /// If true, a `LeftBottom:` line holding several numbered questions is
    /// split into one entry per question.
    pub auto_split_questions: bool,
}

impl Default for MarkupParserOptions {
    /// Returns the default options for `MarkupParser`.
    ///
    /// Default values:
    /// - `auto_split_questions`: true
    fn default() -> Self {
        MarkupParserOptions {
            auto_split_questions: true,
        }
    }
}

/// Where bare lines are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Region(Region),
    Notes,
}

/// Section headers that open a section, checked in this order.
const SECTION_HEADERS: &[(&str, Section)] = &[
    ("Content:", Section::Region(Region::Content)),
    ("Left:", Section::Region(Region::Left)),
    ("Right:", Section::Region(Region::Right)),
    ("LeftTop:", Section::Region(Region::LeftTop)),
    ("RightTop:", Section::Region(Region::RightTop)),
    ("LeftBottom:", Section::Region(Region::LeftBottom)),
    ("RightBottom:", Section::Region(Region::RightBottom)),
    ("Notes:", Section::Notes),
];

/// Substrings that mark a `LeftBottom:` remainder as a run of numbered questions.
const QUESTION_MARKERS: [&str; 3] = ["1.", "2.", "3."];

/// Parser state threaded through the fold over input lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserState {
    /// Completed records, in document order.
    pub slides: Vec<SlideRecord>,
    /// The record being built.
    pub current: SlideRecord,
    /// Section that bare lines are appended to.
    pub section: Option<Section>,
}

impl ParserState {
    fn lines_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Region(region) => self.current.region_mut(region),
            Section::Notes => &mut self.current.notes,
        }
    }

    fn push_text(&mut self, section: Section, text: &str) {
        if !text.is_empty() {
            self.lines_mut(section).push(text.to_string());
        }
    }

    /// Emits the current record if it has a title, and starts a fresh one.
    /// An untitled record is discarded.
    fn flush(&mut self) {
        let record = std::mem::take(&mut self.current);
        if record.has_title() {
            self.slides.push(record);
        }
    }

    /// Consumes one input line and returns the next state.
    fn advance(mut self, line: &str, options: &MarkupParserOptions) -> Self {
        let line = line.trim_end();

        if line.is_empty() || line == "---" || line.starts_with('#') {
            return self;
        }

        if line.starts_with("Slide ") {
            self.flush();
            self.section = None;
            return self;
        }

        if let Some(rest) = line.strip_prefix("Template:") {
            self.current.template = Some(rest.trim().to_string());
            return self;
        }

        if let Some(rest) = line.strip_prefix("Image:") {
            self.current.images.push(parse_image_directive(rest));
            return self;
        }

        if let Some(rest) = line.strip_prefix("Title:") {
            self.current.title = rest.trim().to_string();
            self.section = None;
            return self;
        }

        for (header, section) in SECTION_HEADERS {
            if let Some(rest) = line.strip_prefix(header) {
                let text = rest.trim();
                self.section = Some(*section);

                if *section == Section::Region(Region::LeftBottom)
                    && options.auto_split_questions
                    && QUESTION_MARKERS.iter().any(|m| text.contains(m))
                {
                    self.current.left_bottom.extend(questions::split(text));
                } else {
                    self.push_text(*section, text);
                }
                return self;
            }
        }

        if let Some(section) = self.section {
            self.push_text(section, line);
        }
        self
    }

    /// Ends the input, emitting the last record if it has a title.
    fn finish(mut self) -> Vec<SlideRecord> {
        self.flush();
        self.slides
    }
}

/// Parses the remainder of an `Image:` line.
///
/// The first `|`-separated segment is the path; each later segment holding a
/// `=` becomes an attribute. Segments without `=` are ignored.
pub fn parse_image_directive(rest: &str) -> ImageDirective {
    let mut parts = rest.split('|');
    let mut image = ImageDirective::new(parts.next().unwrap_or_default().trim());
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            image
                .attributes
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    image
}

/// A parser for converting lesson markup into a sequence of `SlideRecord`s.
pub struct MarkupParser {
    option: MarkupParserOptions,
}

impl MarkupParser {
    /// Creates a new `MarkupParser` with the given options.
    ///
    /// # Arguments
    ///
    /// * `option` - The `MarkupParserOptions` to configure the parser.
    pub fn new(option: MarkupParserOptions) -> Self {
        MarkupParser { option }
    }

    /// Parses markup text into slide records.
    ///
    /// Parsing is tolerant: unrecognized lines outside a section are dropped
    /// and a `Slide` block without a `Title:` produces no record.
    pub fn parse(&self, input: &str) -> Vec<SlideRecord> {
        input
            .lines()
            .fold(ParserState::default(), |state, line| {
                state.advance(line, &self.option)
            })
            .finish()
    }

    /// Reads and parses a markup file.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Vec<SlideRecord>)` on success, or an
    /// `anyhow::Error` if the file cannot be read as UTF-8 text.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<SlideRecord>> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markup file {}", path.display()))?;
        Ok(self.parse(&input))
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new(MarkupParserOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(input: &str) -> Vec<SlideRecord> {
        MarkupParser::default().parse(input)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_markup_parser_options_default() {
        let options = MarkupParserOptions::default();
        assert!(options.auto_split_questions);
    }

    #[test]
    fn test_parse_minimal_slide() {
        let slides = parse("Slide 1\nTitle: Demo\nContent: Hello world\n---\n");
        let mut expected = SlideRecord::with_title("Demo");
        expected.content = strings(&["Hello world"]);
        assert_eq!(slides, vec![expected]);
    }

    #[test]
    fn test_parse_slide_count() {
        let input = r#"
Slide 1
Title: One
Slide 2
Title: Two
---
Slide 3
Content: no title here
Slide 4
Title: Four
"#;
        let slides = parse(input);
        let titles: Vec<&str> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Four"]);
    }

    #[test]
    fn test_parse_untitled_trailing_slide_is_dropped() {
        let slides = parse("Slide 1\nTitle: A\nSlide 2\nContent: orphan\n");
        assert_eq!(slides.len(), 1);
        assert!(slides[0].content.is_empty());
    }

    #[test]
    fn test_parse_new_slide_closes_section() {
        let slides = parse("Slide 1\nTitle: A\nContent: x\nSlide 2\nstray\nTitle: B\n");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].content, strings(&["x"]));
        assert!(slides[1].content.is_empty());
        assert!(!slides[1].has_content());
    }

    #[test]
    fn test_parse_all_sections() {
        let input = r#"Slide 1
Title: Everything
Template: vocabulary
Content: c
Left: l
Right: r
LeftTop: lt
RightTop: rt
LeftBottom: lb
RightBottom: rb
Notes: n
"#;
        let slides = parse(input);
        let s = &slides[0];
        assert_eq!(s.template.as_deref(), Some("vocabulary"));
        assert_eq!(s.content, strings(&["c"]));
        assert_eq!(s.left, strings(&["l"]));
        assert_eq!(s.right, strings(&["r"]));
        assert_eq!(s.left_top, strings(&["lt"]));
        assert_eq!(s.right_top, strings(&["rt"]));
        assert_eq!(s.left_bottom, strings(&["lb"]));
        assert_eq!(s.right_bottom, strings(&["rb"]));
        assert_eq!(s.notes, strings(&["n"]));
    }

    #[test]
    fn test_parse_continuation_lines_keep_leading_whitespace() {
        let input = "Slide 1\nTitle: T\nContent: Fruits:\n  - apple   \n  - pear\nNotes:\nTalk slowly\n";
        let slides = parse(input);
        assert_eq!(slides[0].content, strings(&["Fruits:", "  - apple", "  - pear"]));
        // an empty header remainder appends nothing
        assert_eq!(slides[0].notes, strings(&["Talk slowly"]));
    }

    #[test]
    fn test_parse_lines_outside_section_are_dropped() {
        let input = "Slide 1\nstray line\nTitle: T\nanother stray\nContent: kept\n";
        let slides = parse(input);
        assert_eq!(slides[0].content, strings(&["kept"]));
    }

    #[test]
    fn test_parse_comments_and_separators_are_ignored() {
        let input = "# lesson 4\nSlide 1\nTitle: T\nContent: a\n# presenter only\n---\nb\n";
        let slides = parse(input);
        assert_eq!(slides[0].content, strings(&["a", "b"]));
    }

    #[test]
    fn test_parse_left_bottom_question_split() {
        let input = "Slide 1\nTitle: Reading\nLeftTop: A story.\nLeftBottom: 1. Who is it? 2. Where is it? 3. Why\n";
        let slides = parse(input);
        assert_eq!(
            slides[0].left_bottom,
            strings(&["1. Who is it?", "2. Where is it?", "3. Why?"])
        );
    }

    #[test]
    fn test_parse_left_bottom_split_can_be_disabled() {
        let parser = MarkupParser::new(MarkupParserOptions {
            auto_split_questions: false,
        });
        let slides = parser.parse("Slide 1\nTitle: R\nLeftBottom: 1. Who? 2. Where?\n");
        assert_eq!(slides[0].left_bottom, strings(&["1. Who? 2. Where?"]));
    }

    #[test]
    fn test_parse_left_bottom_without_markers_is_single_line() {
        let slides = parse("Slide 1\nTitle: R\nLeftBottom: Who? Where?\n");
        assert_eq!(slides[0].left_bottom, strings(&["Who? Where?"]));
    }

    #[test]
    fn test_parse_image_directive() {
        let image = parse_image_directive(" pics/cat.png | width=4 | left=2 | align=center | bogus | note = a=b");
        assert_eq!(image.path, "pics/cat.png");
        assert_eq!(image.attribute("width"), Some("4"));
        assert_eq!(image.attribute("left"), Some("2"));
        assert_eq!(image.attribute("align"), Some("center"));
        assert_eq!(image.attribute("note"), Some("a=b"));
        assert_eq!(image.attributes.len(), 4);
    }

    #[test]
    fn test_parse_image_line_keeps_section() {
        let slides = parse("Slide 1\nTitle: T\nContent: a\nImage: x.png | width=3\nb\n");
        assert_eq!(slides[0].images.len(), 1);
        assert_eq!(slides[0].content, strings(&["a", "b"]));
    }

    #[test]
    fn test_parse_title_closes_section() {
        let slides = parse("Slide 1\nContent: a\nTitle: T\nb\n");
        assert_eq!(slides[0].content, strings(&["a"]));
    }

    #[test]
    fn test_parse_file() -> Result<()> {
        let mut file = NamedTempFile::with_suffix(".txt")?;
        write!(file, "Slide 1\nTitle: From file\nContent: x\n")?;
        let slides = MarkupParser::default().parse_file(file.path())?;
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "From file");

        let missing = MarkupParser::default().parse_file(Path::new("/no/such/lesson.txt"));
        assert!(missing.is_err());
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One of the seven named content slots on a slide face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Content,
    Left,
    Right,
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

impl Region {
    /// All regions, in the order the validator and builder walk them.
    pub const ALL: [Region; 7] = [
        Region::Content,
        Region::Left,
        Region::Right,
        Region::LeftTop,
        Region::RightTop,
        Region::LeftBottom,
        Region::RightBottom,
    ];

    /// The element label used when the region is rendered.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Content => "Content",
            Region::Left => "Left",
            Region::Right => "Right",
            Region::LeftTop => "LeftTop",
            Region::RightTop => "RightTop",
            Region::LeftBottom => "LeftBottom",
            Region::RightBottom => "RightBottom",
        }
    }
}

/// An `Image:` line: a path plus free-form `key=value` attributes.
///
/// Keys the builder does not understand are kept verbatim and ignored.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct ImageDirective {
    /// Path of the image, as written in the markup.
    pub path: String,
    /// Attributes such as `width`, `left`, `top` and `align`.
    pub attributes: BTreeMap<String, String>,
}

impl ImageDirective {
    /// Creates a new `ImageDirective` with no attributes.
    pub fn new(path: &str) -> Self {
        ImageDirective {
            path: path.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Returns the attribute value for `key`, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Resolves the image path against `base_dir` unless it is absolute.
    pub fn resolved_path(&self, base_dir: Option<&Path>) -> PathBuf {
        let path = Path::new(&self.path);
        match base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// A single slide as read from the markup, in document order.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct SlideRecord {
    pub title: String,
    pub content: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub left_top: Vec<String>,
    pub right_top: Vec<String>,
    pub left_bottom: Vec<String>,
    pub right_bottom: Vec<String>,
    /// Speaker notes, never rendered on the slide face.
    pub notes: Vec<String>,
    pub images: Vec<ImageDirective>,
    /// Name of a layout template to apply before building.
    pub template: Option<String>,
}

impl SlideRecord {
    /// Creates a new, empty `SlideRecord`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record with the given title and nothing else.
    pub fn with_title(title: &str) -> Self {
        SlideRecord {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Lines of the given region.
    pub fn region(&self, region: Region) -> &[String] {
        match region {
            Region::Content => &self.content,
            Region::Left => &self.left,
            Region::Right => &self.right,
            Region::LeftTop => &self.left_top,
            Region::RightTop => &self.right_top,
            Region::LeftBottom => &self.left_bottom,
            Region::RightBottom => &self.right_bottom,
        }
    }

    /// Mutable access to the lines of the given region.
    pub fn region_mut(&mut self, region: Region) -> &mut Vec<String> {
        match region {
            Region::Content => &mut self.content,
            Region::Left => &mut self.left,
            Region::Right => &mut self.right,
            Region::LeftTop => &mut self.left_top,
            Region::RightTop => &mut self.right_top,
            Region::LeftBottom => &mut self.left_bottom,
            Region::RightBottom => &mut self.right_bottom,
        }
    }

    /// True if the record carries a non-empty title and may be emitted.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// True if at least one of the seven regions has a line.
    pub fn has_content(&self) -> bool {
        Region::ALL.iter().any(|r| !self.region(*r).is_empty())
    }

    /// Derives the layout this record renders with.
    pub fn layout_mode(&self) -> LayoutMode {
        LayoutMode::resolve(self)
    }
}

/// The mutually exclusive arrangement a slide is rendered with.
///
/// Never stored; always derived from which regions are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Passage on top, questions below.
    Reading,
    FourBox,
    TwoColumn,
    Single,
}

impl LayoutMode {
    /// Picks the layout for a record. Rules are tested in priority order and
    /// the first match wins.
    pub fn resolve(record: &SlideRecord) -> LayoutMode {
        let filled = |lines: &[String]| !lines.is_empty();

        if filled(&record.left_top)
            && filled(&record.left_bottom)
            && !filled(&record.right_top)
            && !filled(&record.right_bottom)
        {
            LayoutMode::Reading
        } else if filled(&record.left_top)
            || filled(&record.right_top)
            || filled(&record.left_bottom)
            || filled(&record.right_bottom)
        {
            LayoutMode::FourBox
        } else if filled(&record.left) || filled(&record.right) {
            LayoutMode::TwoColumn
        } else {
            LayoutMode::Single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_slide_record_new_is_empty() {
        let record = SlideRecord::new();
        assert!(!record.has_title());
        assert!(!record.has_content());
        assert_eq!(record.template, None);
        assert!(record.images.is_empty());
    }

    #[test]
    fn test_region_accessors() {
        let mut record = SlideRecord::with_title("T");
        record.region_mut(Region::RightBottom).push("x".to_string());
        assert_eq!(record.right_bottom, lines(&["x"]));
        assert_eq!(record.region(Region::RightBottom), &["x".to_string()]);
        assert!(record.has_content());
    }

    #[test]
    fn test_notes_do_not_count_as_content() {
        let mut record = SlideRecord::with_title("T");
        record.notes.push("say hello".to_string());
        assert!(!record.has_content());
    }

    #[test]
    fn test_layout_reading() {
        let mut record = SlideRecord::with_title("T");
        record.left_top = lines(&["A"]);
        record.left_bottom = lines(&["B"]);
        assert_eq!(record.layout_mode(), LayoutMode::Reading);

        // `right` alone does not block the reading layout
        record.right = lines(&["R"]);
        assert_eq!(record.layout_mode(), LayoutMode::Reading);
    }

    #[test]
    fn test_layout_four_box_beats_reading() {
        let mut record = SlideRecord::with_title("T");
        record.left_top = lines(&["A"]);
        record.left_bottom = lines(&["B"]);
        record.right_top = lines(&["C"]);
        assert_eq!(record.layout_mode(), LayoutMode::FourBox);

        let mut only_right_bottom = SlideRecord::with_title("T");
        only_right_bottom.right_bottom = lines(&["D"]);
        assert_eq!(only_right_bottom.layout_mode(), LayoutMode::FourBox);
    }

    #[test]
    fn test_layout_two_column_and_single() {
        let mut record = SlideRecord::with_title("T");
        record.content = lines(&["ignored when columns exist"]);
        record.right = lines(&["R"]);
        assert_eq!(record.layout_mode(), LayoutMode::TwoColumn);

        let mut single = SlideRecord::with_title("T");
        single.content = lines(&["Hello"]);
        assert_eq!(single.layout_mode(), LayoutMode::Single);
        assert_eq!(SlideRecord::new().layout_mode(), LayoutMode::Single);
    }

    #[test]
    fn test_image_directive_attribute() {
        let mut image = ImageDirective::new("cat.png");
        image.attributes.insert("width".to_string(), "3".to_string());
        assert_eq!(image.attribute("width"), Some("3"));
        assert_eq!(image.attribute("left"), None);
    }

    #[test]
    fn test_image_directive_resolved_path() {
        let image = ImageDirective::new("pics/cat.png");
        assert_eq!(image.resolved_path(None), PathBuf::from("pics/cat.png"));
        assert_eq!(
            image.resolved_path(Some(Path::new("/lessons"))),
            PathBuf::from("/lessons/pics/cat.png")
        );
        let absolute = ImageDirective::new("/srv/cat.png");
        assert_eq!(
            absolute.resolved_path(Some(Path::new("/lessons"))),
            PathBuf::from("/srv/cat.png")
        );
    }
}

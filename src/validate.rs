use crate::deck::SlideRecord;
use std::fmt;
use std::path::Path;

/// Titles longer than this many characters are flagged.
pub const MAX_TITLE_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    MissingTitle,
    LongTitle(usize),
    NoContent,
    ImageNotFound(String),
}

/// An advisory problem with one slide, keyed by 1-based slide position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub slide: usize,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slide {}: ", self.slide)?;
        match &self.kind {
            IssueKind::MissingTitle => write!(f, "Missing title"),
            IssueKind::LongTitle(len) => write!(f, "Title very long ({} chars)", len),
            IssueKind::NoContent => write!(f, "No content defined"),
            IssueKind::ImageNotFound(path) => write!(f, "Image not found: {}", path),
        }
    }
}

/// Checks one slide. `number` is its 1-based position.
pub fn validate_slide(
    slide: &SlideRecord,
    number: usize,
    base_dir: Option<&Path>,
) -> Vec<ValidationIssue> {
    let mut kinds = Vec::new();

    let title_length = slide.title.chars().count();
    if title_length == 0 {
        kinds.push(IssueKind::MissingTitle);
    } else if title_length > MAX_TITLE_LENGTH {
        kinds.push(IssueKind::LongTitle(title_length));
    }

    if !slide.has_content() {
        kinds.push(IssueKind::NoContent);
    }

    for image in &slide.images {
        if !image.resolved_path(base_dir).is_file() {
            kinds.push(IssueKind::ImageNotFound(image.path.clone()));
        }
    }

    kinds
        .into_iter()
        .map(|kind| ValidationIssue { slide: number, kind })
        .collect()
}

/// Checks every slide and collects the issues in slide order. Never fails.
pub fn validate_deck(slides: &[SlideRecord], base_dir: Option<&Path>) -> Vec<ValidationIssue> {
    slides
        .iter()
        .enumerate()
        .flat_map(|(i, slide)| validate_slide(slide, i + 1, base_dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::ImageDirective;
    use crate::parser::MarkupParser;
    use tempfile::TempDir;

    #[test]
    fn test_valid_slide_has_no_issues() {
        let slides = MarkupParser::default().parse("Slide 1\nTitle: Demo\nContent: Hello world\n---\n");
        assert!(validate_deck(&slides, None).is_empty());
    }

    #[test]
    fn test_missing_title_and_content() {
        let issues = validate_slide(&SlideRecord::new(), 3, None);
        assert_eq!(
            issues,
            vec![
                ValidationIssue { slide: 3, kind: IssueKind::MissingTitle },
                ValidationIssue { slide: 3, kind: IssueKind::NoContent },
            ]
        );
        assert_eq!(issues[0].to_string(), "Slide 3: Missing title");
        assert_eq!(issues[1].to_string(), "Slide 3: No content defined");
    }

    #[test]
    fn test_long_title() {
        let mut slide = SlideRecord::with_title(&"x".repeat(101));
        slide.notes.push("notes are not content".to_string());
        let issues = validate_slide(&slide, 1, None);
        assert_eq!(issues[0].kind, IssueKind::LongTitle(101));
        assert_eq!(issues[0].to_string(), "Slide 1: Title very long (101 chars)");
        assert_eq!(issues[1].kind, IssueKind::NoContent);

        let exactly = SlideRecord {
            content: vec!["c".to_string()],
            ..SlideRecord::with_title(&"x".repeat(100))
        };
        assert!(validate_slide(&exactly, 1, None).is_empty());
    }

    #[test]
    fn test_image_paths_resolve_against_base_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("here.png"), b"png").unwrap();

        let mut slide = SlideRecord::with_title("Pics");
        slide.content.push("look".to_string());
        slide.images.push(ImageDirective::new("here.png"));
        slide.images.push(ImageDirective::new("gone.png"));

        let issues = validate_deck(&[slide], Some(dir.path()));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].to_string(), "Slide 1: Image not found: gone.png");
    }

    #[test]
    fn test_issues_are_keyed_by_position() {
        let slides = vec![
            SlideRecord {
                content: vec!["a".to_string()],
                ..SlideRecord::with_title("A")
            },
            SlideRecord::with_title("B"),
        ];
        let issues = validate_deck(&slides, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].slide, 2);
    }
}

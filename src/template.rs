use crate::deck::SlideRecord;

/// Arrangement a template was designed for. Only left/right templates inject
/// column headers; the rendered layout is always derived from the populated
/// regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutHint {
    LeftRight,
    Stacked,
}

/// A named slide template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTemplate {
    pub name: &'static str,
    pub layout: LayoutHint,
    /// Header prepended to a non-empty `left` region.
    pub left_title: Option<&'static str>,
    /// Header prepended to a non-empty `right` region.
    pub right_title: Option<&'static str>,
}

/// Templates known to the applicator.
pub const SLIDE_TEMPLATES: &[SlideTemplate] = &[
    SlideTemplate {
        name: "vocabulary",
        layout: LayoutHint::LeftRight,
        left_title: Some("Word"),
        right_title: Some("Definition"),
    },
    SlideTemplate {
        name: "reading",
        layout: LayoutHint::Stacked,
        left_title: None,
        right_title: None,
    },
    SlideTemplate {
        name: "comparison",
        layout: LayoutHint::LeftRight,
        left_title: Some("Before"),
        right_title: Some("After"),
    },
];

/// Tag given to the headers a template injects.
const HEADER_TAG: &str = "emphasis";

/// Looks up a template by name.
pub fn find(name: &str) -> Option<&'static SlideTemplate> {
    SLIDE_TEMPLATES.iter().find(|t| t.name == name)
}

fn prepend_header(lines: &mut Vec<String>, header: Option<&str>) {
    if let Some(header) = header {
        if !lines.is_empty() {
            lines.insert(0, format!("[{}] {}", HEADER_TAG, header));
        }
    }
}

/// Applies the named template to a record.
///
/// Unknown names return the record unchanged. Left/right templates prepend
/// an `[emphasis]` header line to each non-empty column. Applying the same
/// template twice prepends twice.
pub fn apply(mut record: SlideRecord, template_name: &str) -> SlideRecord {
    let Some(template) = find(template_name) else {
        log::debug!("Unknown template '{}', left unchanged", template_name);
        return record;
    };

    if template.layout == LayoutHint::LeftRight {
        prepend_header(&mut record.left, template.left_title);
        prepend_header(&mut record.right, template.right_title);
    }
    record
}

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns that make a line look like a list entry.
static LIST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"^\s*[•\-\*]", r"^\s*\d+\.", r"^\s*[a-z]\)", r"^\s*[A-Z]\."]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Markers stripped by [`clean`]. `A.` style markers are detected by
/// [`is_list`] but not stripped.
static MARKER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"^\s*[•\-\*]\s*", r"^\s*\d+\.\s*", r"^\s*[a-z]\)\s*"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

fn looks_like_list_item(line: &str) -> bool {
    LIST_PATTERNS.iter().any(|re| re.is_match(line))
}

/// True when at least half of the non-empty lines carry a list marker.
pub fn is_list<S: AsRef<str>>(lines: &[S]) -> bool {
    let non_empty: Vec<&str> = lines
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !l.trim().is_empty())
        .collect();
    if non_empty.is_empty() {
        return false;
    }
    let matching = non_empty.iter().filter(|l| looks_like_list_item(l)).count();
    matching * 2 >= non_empty.len()
}

/// Removes exactly one leading bullet or numbering marker.
pub fn clean(line: &str) -> String {
    for re in MARKER_PATTERNS.iter() {
        if let Some(m) = re.find(line) {
            return line[m.end()..].to_string();
        }
    }
    line.to_string()
}

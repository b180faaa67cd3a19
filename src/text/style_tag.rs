use once_cell::sync::Lazy;
use regex::Regex;

static STYLE_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?P<tag>\w+)\]\s*(?P<rest>.+)").unwrap());

/// Splits a leading `[tag]` off a line.
///
/// Returns the tag name without brackets and the remaining text. A line with
/// no leading tag, or a tag with nothing after it, comes back unchanged with
/// no tag. Whether the tag names a known style is the caller's concern.
pub fn resolve(line: &str) -> (Option<&str>, &str) {
    match STYLE_TAG_REGEX.captures(line) {
        Some(caps) => match (caps.name("tag"), caps.name("rest")) {
            (Some(tag), Some(rest)) => (Some(tag.as_str()), rest.as_str()),
            _ => (None, line),
        },
        None => (None, line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tagged_line() {
        assert_eq!(resolve("[vocabulary] apple"), (Some("vocabulary"), "apple"));
        assert_eq!(resolve("[question]What?"), (Some("question"), "What?"));
    }

    #[test]
    fn test_resolve_unknown_tag_is_still_split() {
        assert_eq!(resolve("[custom_1] text"), (Some("custom_1"), "text"));
    }

    #[test]
    fn test_resolve_untagged_line() {
        assert_eq!(resolve("plain text"), (None, "plain text"));
        assert_eq!(resolve(" [emphasis] indented"), (None, " [emphasis] indented"));
        assert_eq!(resolve("[two words] x"), (None, "[two words] x"));
    }

    #[test]
    fn test_resolve_tag_without_content() {
        assert_eq!(resolve("[emphasis]"), (None, "[emphasis]"));
        assert_eq!(resolve("[emphasis]   "), (Some("emphasis"), " "));
    }
}

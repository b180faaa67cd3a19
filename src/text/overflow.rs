/// Result of an overflow estimate for one text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowEstimate {
    pub will_overflow: bool,
    pub lines_needed: usize,
    pub lines_available: usize,
}

/// Estimates whether `text` fits a box of `width_in` × `height_in` inches.
///
/// This is a character-count heuristic for authoring feedback only and must
/// not drive layout decisions.
pub fn estimate(text: &str, font_size_pt: f64, width_in: f64, height_in: f64) -> OverflowEstimate {
    let chars_per_inch = 72.0 / font_size_pt * 2.5;
    let chars_per_line = (width_in * chars_per_inch).floor().max(0.0) as usize;

    let mut lines_needed = 1;
    let mut current_line_length = 0;
    for word in text.split_whitespace() {
        let word_length = word.chars().count() + 1;
        if current_line_length + word_length > chars_per_line {
            lines_needed += 1;
            current_line_length = word_length;
        } else {
            current_line_length += word_length;
        }
    }

    let line_height = font_size_pt / 72.0 * 1.3;
    let lines_available = (height_in / line_height).floor().max(0.0) as usize;

    OverflowEstimate {
        will_overflow: lines_needed > lines_available,
        lines_needed,
        lines_available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_short_text_fits() {
        let est = estimate("Hello world", 22.0, 10.5, 5.0);
        assert_eq!(est.lines_needed, 1);
        // 5.0 / (22/72*1.3) = 12.58...
        assert_eq!(est.lines_available, 12);
        assert!(!est.will_overflow);
    }

    #[test]
    fn test_estimate_wraps_words() {
        // 1 inch at 72pt -> 2 chars per line, every word spills
        let est = estimate("a b c", 72.0, 1.0, 10.0);
        assert_eq!(est.lines_needed, 3);
    }

    #[test]
    fn test_estimate_empty_text_needs_one_line() {
        assert_eq!(estimate("", 18.0, 4.0, 2.0).lines_needed, 1);
    }

    #[test]
    fn test_estimate_overflow() {
        let text = "word ".repeat(200);
        let est = estimate(&text, 22.0, 5.05, 1.0);
        assert!(est.will_overflow);
        assert!(est.lines_needed > est.lines_available);
    }

    #[test]
    fn test_estimate_monotonic_in_font_size() {
        let text = "The quick brown fox jumps over the lazy dog ".repeat(12);
        let mut previous = estimate(&text, 8.0, 5.0, 3.0);
        for size in [10.0, 12.0, 14.0, 18.0, 22.0, 28.0, 36.0] {
            let current = estimate(&text, size, 5.0, 3.0);
            assert!(current.lines_needed >= previous.lines_needed);
            assert!(current.lines_available <= previous.lines_available);
            previous = current;
        }
    }
}

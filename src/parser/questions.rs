use once_cell::sync::Lazy;
use regex::Regex;

static QUESTION_END_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?\s*").unwrap());
/// What must follow a question mark for it to end a question: a numbered
/// marker such as `2.` or an uppercase letter.
static NEXT_QUESTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+\.|[A-Z])").unwrap());

/// Splits a run-on block of questions into individual questions.
///
/// A question ends at a `?` followed by optional whitespace and then either a
/// numbered marker or an uppercase letter; the marker stays with the next
/// question. Each question is trimmed and gets a trailing `?` if it lost it.
/// Never returns an empty vector.
pub fn split(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for m in QUESTION_END_REGEX.find_iter(text) {
        if NEXT_QUESTION_REGEX.is_match(&text[m.end()..]) {
            pieces.push(&text[start..m.start()]);
            start = m.end();
        }
    }
    pieces.push(&text[start..]);

    let questions: Vec<String> = pieces
        .into_iter()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| {
            if q.ends_with('?') {
                q.to_string()
            } else {
                format!("{}?", q)
            }
        })
        .collect();

    if questions.is_empty() {
        vec![text.to_string()]
    } else {
        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_numbered_questions() {
        assert_eq!(
            split("1. What is X? 2. What is Y? 3. Why?"),
            vec!["1. What is X?", "2. What is Y?", "3. Why?"]
        );
    }

    #[test]
    fn test_split_reconstructs_input() {
        let input = "What is X? 2. What is Y?";
        let parts = split(input);
        assert_eq!(parts, vec!["What is X?", "2. What is Y?"]);
        assert_eq!(parts.join(" "), input);
    }

    #[test]
    fn test_split_on_capital_letter() {
        assert_eq!(
            split("Where is it?Who said so? why not"),
            vec!["Where is it?", "Who said so? why not?"]
        );
    }

    #[test]
    fn test_split_adds_missing_question_mark() {
        assert_eq!(split("1. Name three fruits"), vec!["1. Name three fruits?"]);
    }

    #[test]
    fn test_split_never_empty() {
        assert_eq!(split(""), vec![""]);
        assert_eq!(split("   "), vec!["   "]);
        assert_eq!(split("?"), vec!["?"]);
    }

    #[test]
    fn test_split_lowercase_continuation_is_not_split() {
        assert_eq!(split("Is it? maybe 2 things?"), vec!["Is it? maybe 2 things?"]);
    }
}

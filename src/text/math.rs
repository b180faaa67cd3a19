use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SUPERSCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^([0-9])").unwrap());
static SUBSCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([0-9])").unwrap());

const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Literal substring replacements, applied in this order.
///
/// Matching is not word-boundary aware: "pie" becomes "πe".
const SYMBOLS: &[(&str, &str)] = &[
    ("<=", "≤"),
    (">=", "≥"),
    ("!=", "≠"),
    ("~=", "≈"),
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("pi", "π"),
    ("theta", "θ"),
    ("sigma", "σ"),
];

fn digit_index(caps: &Captures) -> usize {
    // The capture group only ever matches a single ASCII digit.
    (caps[1].as_bytes()[0] - b'0') as usize
}

/// Rewrites simple math notation into Unicode.
///
/// `x^2` becomes `x²`, `H_2O` becomes `H₂O`, and operator/Greek names from
/// the symbol table are replaced literally.
pub fn normalize(text: &str) -> String {
    let text = SUPERSCRIPT_REGEX.replace_all(text, |caps: &Captures| {
        SUPERSCRIPTS[digit_index(caps)].to_string()
    });
    let text = SUBSCRIPT_REGEX.replace_all(&text, |caps: &Captures| {
        SUBSCRIPTS[digit_index(caps)].to_string()
    });

    SYMBOLS
        .iter()
        .fold(text.into_owned(), |acc, (from, to)| acc.replace(from, to))
}

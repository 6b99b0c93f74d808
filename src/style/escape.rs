//! Escaping of literal text for the tag syntax.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bracket sequences the output layer would read as a style tag.
pub(crate) static TAG_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"(\[[a-zA-Z0-9_,;: \-\."#]+\[*)\]"##).expect("valid regex"));

/// Escape `text` so none of it is interpreted as a style tag.
///
/// A tag-like sequence gets a `[` inserted before its closing bracket:
/// `[red]` becomes `[red[]`, which the output layer prints as `[red]`.
/// Brackets that could never form a tag are left alone.
pub fn escape(text: &str) -> String {
    TAG_LIKE.replace_all(text, "${1}[]").into_owned()
}

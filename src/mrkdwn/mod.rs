//! mrkdwn rendering.
//!
//! Turns a chat message written in mrkdwn into tagged text for a
//! character-cell display:
//! - Fenced code blocks are split out and syntax highlighted
//! - `<...>` mentions and links are resolved against the caller's directories
//! - Inline code, blockquotes, emphasis and emoji shortcodes are styled
//!
//! Rendering is total. Malformed markup degrades to literal text; nothing
//! here returns an error.

mod inline;
mod segment;
mod token;
mod work;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use crate::highlight;
use crate::style::{Styles, escape};

pub use segment::{Segment, segment};
pub use token::{Directories, Token};

use token::BRACKET;

/// Render `text` to tagged output.
///
/// `users` and `channels` map ids to display names. With `markdown_enabled`
/// off only bracket tokens are resolved (unstyled) and the result escaped.
/// An unknown `syntax_theme` falls back to [`highlight::DEFAULT_THEME`].
pub fn render(
    text: &str,
    users: &HashMap<String, String>,
    channels: &HashMap<String, String>,
    markdown_enabled: bool,
    syntax_theme: &str,
    styles: &Styles,
) -> String {
    let directories = Directories { users, channels };
    if !markdown_enabled {
        return render_plain(text, directories);
    }

    let segments = segment(text);
    tracing::trace!(segments = segments.len(), "rendering message");

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    for segment in segments {
        match segment {
            Segment::Code { language, code, .. } => {
                out.push_str(&render_code(language, code, syntax_theme, styles));
            }
            Segment::Text { text, .. } => {
                out.push_str(&inline::render_text(text, directories, styles));
            }
        }
    }
    out
}

/// Tokens become their display text; everything else is left literal.
fn render_plain(text: &str, directories: Directories<'_>) -> String {
    let resolved = BRACKET.replace_all(text, |caps: &regex::Captures<'_>| {
        Token::parse(caps.get(1).map_or("", |m| m.as_str())).display(directories)
    });
    escape(&resolved)
}

fn render_code(language: &str, code: &str, syntax_theme: &str, styles: &Styles) -> String {
    let mut out = styles.code_fence.wrap(&escape(&format!("```{language}")));
    out.push('\n');
    out.push_str(&highlight::highlight_code(language, code, syntax_theme));
    if !code.is_empty() && !code.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&styles.code_fence.wrap("```"));
    out
}

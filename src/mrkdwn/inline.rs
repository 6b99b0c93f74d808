//! Passes over a text segment, in the order they must run.

use once_cell::sync::Lazy;
use regex::Regex;

use super::token::{BRACKET, Directories, Token};
use super::work::{Node, Vault, WorkingText};
use crate::emoji;
use crate::style::{Styles, TAG_LIKE, escape};

/// `:name:` restricted to the shortcode alphabet.
static SHORTCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([a-z0-9_+\-]+):").expect("valid regex"));

/// Glyph drawn in place of a `>` quote marker.
const QUOTE_MARK: &str = "▌";

pub(super) fn render_text(text: &str, directories: Directories<'_>, styles: &Styles) -> String {
    let mut work = WorkingText::new(text);
    extract_tokens(&mut work, directories, styles);
    escape_raw(&mut work);
    extract_inline_code(&mut work, styles);
    transform_blockquotes(&mut work, styles);
    transform_emphasis(&mut work, styles);
    resolve_emoji(&mut work);
    tracing::trace!(nodes = work.nodes().len(), "restoring protected spans");
    work.restore()
}

/// Resolve every `<...>` construct into a protected, styled snippet.
fn extract_tokens(work: &mut WorkingText, directories: Directories<'_>, styles: &Styles) {
    work.replace_matches(&BRACKET, |caps, vault| {
        let token = Token::parse(caps.get(1).map_or("", |m| m.as_str()));
        let display = escape(&token.display(directories));
        vault.protect(token.style(styles).wrap(&display))
    });
}

/// Each tag-like run becomes a protected, escaped snippet so later passes
/// can't split the escape apart.
fn escape_raw(work: &mut WorkingText) {
    work.replace_matches(&TAG_LIKE, |caps, vault| vault.protect(escape(&caps[0])));
}

/// Backtick spans become one protected snippet each, backticks dropped.
fn extract_inline_code(work: &mut WorkingText, styles: &Styles) {
    work.replace_delimited('`', |inner, vault| {
        let content = vault.resolve(inner);
        vec![vault.protect(styles.inline_code.wrap(&content))]
    });
}

/// Lines starting with `> ` (or exactly `>`) get a quote mark and the quote
/// style; leading spaces and tabs before the marker are dropped.
fn transform_blockquotes(work: &mut WorkingText, styles: &Styles) {
    work.map_lines(|line, vault| quote_line(line, vault, styles));
}

fn quote_line(mut line: Vec<Node>, vault: &mut Vault, styles: &Styles) -> Vec<Node> {
    let Some(Node::Raw(first)) = line.first() else {
        return line;
    };
    let trimmed = first.trim_start_matches([' ', '\t']);
    let body = if let Some(rest) = trimmed.strip_prefix("> ") {
        rest.to_string()
    } else if trimmed == ">" && line.len() == 1 {
        String::new()
    } else {
        return line;
    };

    let mark = vault.protect(format!("{} ", styles.quote_mark.wrap(QUOTE_MARK)));
    if body.is_empty() && line.len() == 1 {
        return vec![mark];
    }

    line[0] = Node::Raw(body);
    let mut nodes = Vec::with_capacity(line.len() + 3);
    nodes.push(mark);
    nodes.push(vault.protect(styles.quote_text.open_tag()));
    nodes.append(&mut line);
    nodes.push(vault.protect(styles.quote_text.close_tag()));
    nodes
}

/// Bold, then italic, then strikethrough. Each pass only sees delimiters the
/// previous passes left as raw text. Delimiters inside a `:shortcode:` are
/// left for emoji resolution.
fn transform_emphasis(work: &mut WorkingText, styles: &Styles) {
    for (delim, style) in [
        ('*', &styles.bold),
        ('_', &styles.italic),
        ('~', &styles.strikethrough),
    ] {
        work.replace_delimited_outside(delim, &SHORTCODE, |inner, vault| {
            let mut nodes = Vec::with_capacity(inner.len() + 2);
            nodes.push(vault.protect(style.open_tag()));
            nodes.extend(inner);
            nodes.push(vault.protect(style.close_tag()));
            nodes
        });
    }
}

fn resolve_emoji(work: &mut WorkingText) {
    work.map_raw(|text, _| {
        let resolved = SHORTCODE.replace_all(text, |caps: &regex::Captures<'_>| {
            emoji::lookup(caps.get(1).map_or("", |m| m.as_str()))
        });
        vec![Node::Raw(resolved.into_owned())]
    });
}

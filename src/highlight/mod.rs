//! Syntax highlighting for code fences.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions and
//! themes. Lookups never fail: an unknown language falls back to plain text
//! and an unknown theme falls back to [`DEFAULT_THEME`].

use std::sync::OnceLock;

use ratatui::style::Color;
use syntect::easy::ScopeRegionIterator;
use syntect::highlighting::{FontStyle, Highlighter, StyleModifier, Theme, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::style::{StyleSpec, escape};

/// Palette used when the requested theme is unknown.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// A run of code text and the style its scope resolved to.
///
/// `style` is `None` when the theme defines no color for the scope; such
/// text is emitted unstyled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeToken {
    pub text: String,
    pub style: Option<StyleSpec>,
}

/// Highlight `code` and return it as escaped, tagged output.
pub fn highlight_code(language: &str, code: &str, theme_name: &str) -> String {
    let mut out = String::with_capacity(code.len() * 2);
    for token in tokenize(language, code, theme_name) {
        let text = escape(&token.text);
        match token.style {
            Some(style) => out.push_str(&style.wrap(&text)),
            None => out.push_str(&text),
        }
    }
    out
}

/// Split `code` into styled runs. Adjacent runs with the same style merge.
pub fn tokenize(language: &str, code: &str, theme_name: &str) -> Vec<CodeToken> {
    let syntax_set = syntax_set();
    let Some(syntax) = find_syntax(syntax_set, language) else {
        let mut tokens = Vec::new();
        push_token(&mut tokens, code, None);
        return tokens;
    };
    let highlighter = Highlighter::new(theme(theme_name));
    let mut state = ParseState::new(syntax);
    let mut stack = ScopeStack::new();
    let mut tokens: Vec<CodeToken> = Vec::new();
    let mut offset = 0;

    for line in LinesWithEndings::from(code) {
        let ops = match state.parse_line(line, syntax_set) {
            Ok(ops) => ops,
            Err(err) => {
                tracing::debug!(language, error = %err, "syntax parse failed, rest of block is plain");
                push_token(&mut tokens, &code[offset..], None);
                return tokens;
            }
        };
        for (text, op) in ScopeRegionIterator::new(&ops, line) {
            if let Err(err) = stack.apply(op) {
                tracing::trace!(error = ?err, "ignoring scope stack error");
            }
            if text.is_empty() {
                continue;
            }
            let modifier = highlighter.style_mod_for_stack(stack.as_slice());
            push_token(&mut tokens, text, style_from_modifier(modifier));
        }
        offset += line.len();
    }

    tokens
}

/// Names of every bundled syntax theme, sorted.
pub fn theme_names() -> Vec<&'static str> {
    theme_set().themes.keys().map(String::as_str).collect()
}

fn push_token(tokens: &mut Vec<CodeToken>, text: &str, style: Option<StyleSpec>) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = tokens.last_mut()
        && last.style == style
    {
        last.text.push_str(text);
        return;
    }
    tokens.push(CodeToken {
        text: text.to_string(),
        style,
    });
}

fn style_from_modifier(modifier: StyleModifier) -> Option<StyleSpec> {
    let fg = modifier.foreground?;
    let mut spec = StyleSpec::new().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if let Some(font) = modifier.font_style {
        if font.contains(FontStyle::BOLD) {
            spec = spec.bold();
        }
        if font.contains(FontStyle::ITALIC) {
            spec = spec.italic();
        }
        if font.contains(FontStyle::UNDERLINE) {
            spec = spec.underline();
        }
    }
    Some(spec)
}

/// `None` means plain text: no lexer, no colors.
fn find_syntax<'a>(syntax_set: &'a SyntaxSet, language: &str) -> Option<&'a SyntaxReference> {
    let language = language.trim();
    if language.is_empty() {
        return None;
    }
    let syntax = syntax_set
        .find_syntax_by_token(language)
        .or_else(|| syntax_set.find_syntax_by_name(language));
    if syntax.is_none() {
        tracing::debug!(language, "unknown code fence language, using plain text");
    }
    syntax
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.theme_set.load_defaults");
        ThemeSet::load_defaults()
    })
}

fn theme(name: &str) -> &'static Theme {
    let themes = &theme_set().themes;
    if let Some(theme) = themes.get(name) {
        return theme;
    }
    if let Some((_, theme)) = themes.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
        return theme;
    }
    if !name.is_empty() {
        tracing::debug!(theme = name, fallback = DEFAULT_THEME, "unknown syntax theme");
    }
    themes
        .get(DEFAULT_THEME)
        .or_else(|| themes.values().next())
        .unwrap_or_else(empty_theme)
}

fn empty_theme() -> &'static Theme {
    static EMPTY: OnceLock<Theme> = OnceLock::new();
    EMPTY.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_tokens() {
        let tokens = tokenize("rust", "fn main() {\n    let x = 1;\n}\n", DEFAULT_THEME);
        assert!(
            tokens.iter().any(|t| t.style.is_some_and(|s| s.foreground().is_some())),
            "Expected at least one colored token for Rust"
        );
    }

    #[test]
    fn test_tokens_reconstruct_source() {
        let code = "fn main() {\n    println!(\"[red]\");\n}";
        let tokens = tokenize("rust", code, DEFAULT_THEME);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, code);
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let tokens = tokenize("nope", "just text", DEFAULT_THEME);
        assert_eq!(
            tokens,
            vec![CodeToken {
                text: "just text".to_string(),
                style: None,
            }]
        );
    }

    #[test]
    fn test_empty_language_uses_plain_text() {
        let out = highlight_code("", "a *b* c", DEFAULT_THEME);
        assert_eq!(out, "a *b* c");
    }

    #[test]
    fn test_language_lookup_by_name_is_case_insensitive() {
        let syntax = find_syntax(syntax_set(), "RUST").unwrap();
        assert_eq!(syntax.name, "Rust");
        let syntax = find_syntax(syntax_set(), "go").unwrap();
        assert_eq!(syntax.name, "Go");
        assert!(find_syntax(syntax_set(), "  ").is_none());
    }

    #[test]
    fn test_unknown_theme_matches_default() {
        let code = "package main\n";
        let fallback = highlight_code("go", code, "no-such-theme");
        let default = highlight_code("go", code, DEFAULT_THEME);
        assert_eq!(fallback, default);
    }

    #[test]
    fn test_theme_lookup_is_case_insensitive() {
        let exact = theme("Solarized (dark)");
        let loose = theme("solarized (DARK)");
        assert!(std::ptr::eq(exact, loose));
    }

    #[test]
    fn test_highlight_escapes_code_text() {
        let out = highlight_code("", "x = [red]", DEFAULT_THEME);
        assert_eq!(out, "x = [red[]");
    }

    #[test]
    fn test_adjacent_tokens_with_same_style_merge() {
        let mut tokens = Vec::new();
        push_token(&mut tokens, "a", None);
        push_token(&mut tokens, "b", None);
        push_token(&mut tokens, "c", Some(StyleSpec::new().bold()));
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "ab");
    }

    #[test]
    fn test_theme_names_include_default() {
        assert!(theme_names().contains(&DEFAULT_THEME));
    }
}

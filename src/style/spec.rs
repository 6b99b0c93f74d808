//! A single style: foreground, background and attributes.

use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Modifier};
use serde::Deserialize;
use thiserror::Error;

/// Attributes the output layer understands, with their tag letters.
///
/// A lowercase letter switches the attribute on; the uppercase letter
/// switches it off again.
const ATTRIBUTES: [(Modifier, char); 7] = [
    (Modifier::BOLD, 'b'),
    (Modifier::ITALIC, 'i'),
    (Modifier::UNDERLINED, 'u'),
    (Modifier::DIM, 'd'),
    (Modifier::REVERSED, 'r'),
    (Modifier::SLOW_BLINK, 'l'),
    (Modifier::CROSSED_OUT, 's'),
];

/// Errors from parsing a `fg:bg:attrs` style string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleParseError {
    #[error("style `{0}` has more than three `fg:bg:attrs` fields")]
    TooManyFields(String),
    #[error("unknown color `{0}`")]
    UnknownColor(String),
    #[error("unknown attribute `{0}` (expected one of b, i, u, d, r, l, s)")]
    UnknownAttribute(char),
}

/// Foreground, background and attribute set for one semantic role.
///
/// A spec serializes to an open tag (`[yellow::b]`) and a close tag that
/// reverts exactly the components it set (`[-::B]`), so closing a span never
/// clobbers style state it didn't touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct StyleSpec {
    fg: Option<Color>,
    bg: Option<Color>,
    attrs: Modifier,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSpec {
    /// An empty spec. Its tags are empty strings.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Modifier::empty(),
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(self) -> Self {
        self.with(Modifier::BOLD)
    }

    pub const fn italic(self) -> Self {
        self.with(Modifier::ITALIC)
    }

    pub const fn underline(self) -> Self {
        self.with(Modifier::UNDERLINED)
    }

    pub const fn dim(self) -> Self {
        self.with(Modifier::DIM)
    }

    pub const fn reverse(self) -> Self {
        self.with(Modifier::REVERSED)
    }

    pub const fn blink(self) -> Self {
        self.with(Modifier::SLOW_BLINK)
    }

    pub const fn strikethrough(self) -> Self {
        self.with(Modifier::CROSSED_OUT)
    }

    const fn with(mut self, modifier: Modifier) -> Self {
        self.attrs = self.attrs.union(modifier);
        self
    }

    pub const fn foreground(&self) -> Option<Color> {
        self.fg
    }

    pub const fn background(&self) -> Option<Color> {
        self.bg
    }

    pub const fn attributes(&self) -> Modifier {
        self.attrs
    }

    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Tag that switches this style on.
    pub fn open_tag(&self) -> String {
        let attrs: String = self.attribute_letters().collect();
        compact_tag(
            self.fg.map(color_name).unwrap_or_default(),
            self.bg.map(color_name).unwrap_or_default(),
            attrs,
        )
    }

    /// Tag that reverts only what [`open_tag`](Self::open_tag) set.
    pub fn close_tag(&self) -> String {
        let attrs: String = self
            .attribute_letters()
            .map(|letter| letter.to_ascii_uppercase())
            .collect();
        compact_tag(
            reset_field(self.fg),
            reset_field(self.bg),
            attrs,
        )
    }

    /// Surround `text` with this style's open and close tags.
    pub fn wrap(&self, text: &str) -> String {
        format!("{}{text}{}", self.open_tag(), self.close_tag())
    }

    fn attribute_letters(&self) -> impl Iterator<Item = char> + '_ {
        ATTRIBUTES
            .iter()
            .filter(|(modifier, _)| self.attrs.contains(*modifier))
            .map(|(_, letter)| *letter)
    }
}

impl fmt::Display for StyleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.open_tag())
    }
}

impl FromStr for StyleSpec {
    type Err = StyleParseError;

    /// Parse `fg:bg:attrs`, with or without the surrounding brackets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim();
        let body = body
            .strip_prefix('[')
            .and_then(|b| b.strip_suffix(']'))
            .unwrap_or(body);

        let fields: Vec<&str> = body.split(':').collect();
        if fields.len() > 3 {
            return Err(StyleParseError::TooManyFields(s.to_string()));
        }

        let mut spec = Self::new();
        if let Some(fg) = fields.first().copied().and_then(parse_color) {
            spec.fg = Some(fg?);
        }
        if let Some(bg) = fields.get(1).copied().and_then(parse_color) {
            spec.bg = Some(bg?);
        }
        for letter in fields.get(2).copied().unwrap_or_default().chars() {
            let modifier = ATTRIBUTES
                .iter()
                .find(|(_, l)| *l == letter)
                .map(|(modifier, _)| *modifier)
                .ok_or(StyleParseError::UnknownAttribute(letter))?;
            spec.attrs = spec.attrs.union(modifier);
        }
        Ok(spec)
    }
}

impl TryFrom<String> for StyleSpec {
    type Error = StyleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `None` for an empty field.
fn parse_color(field: &str) -> Option<Result<Color, StyleParseError>> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    Some(
        field
            .parse::<Color>()
            .map_err(|_| StyleParseError::UnknownColor(field.to_string())),
    )
}

fn reset_field(color: Option<Color>) -> String {
    color.map(|_| "-".to_string()).unwrap_or_default()
}

fn compact_tag(fg: String, bg: String, attrs: String) -> String {
    let mut fields = vec![fg, bg, attrs];
    while fields.last().is_some_and(String::is_empty) {
        fields.pop();
    }
    if fields.is_empty() {
        return String::new();
    }
    format!("[{}]", fields.join(":"))
}

/// Tag spelling of a color. Round-trips through `Color::from_str`.
fn color_name(color: Color) -> String {
    let name = match color {
        Color::Reset => "-",
        Color::Black => "black",
        Color::Red => "red",
        Color::Green => "green",
        Color::Yellow => "yellow",
        Color::Blue => "blue",
        Color::Magenta => "magenta",
        Color::Cyan => "cyan",
        Color::Gray => "gray",
        Color::DarkGray => "darkgray",
        Color::LightRed => "lightred",
        Color::LightGreen => "lightgreen",
        Color::LightYellow => "lightyellow",
        Color::LightBlue => "lightblue",
        Color::LightMagenta => "lightmagenta",
        Color::LightCyan => "lightcyan",
        Color::White => "white",
        Color::Rgb(r, g, b) => return format!("#{r:02x}{g:02x}{b:02x}"),
        Color::Indexed(index) => return index.to_string(),
    };
    name.to_string()
}

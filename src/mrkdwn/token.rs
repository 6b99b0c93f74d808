//! Bracket tokens: `<@U123>`, `<#C123|general>`, `<!here>`, `<https://…|label>`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::style::{StyleSpec, Styles};

/// A bracket construct. The payload may not contain `<`, `>` or a newline,
/// so an unterminated bracket never matches.
pub(crate) static BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^<>\n]+)>").expect("valid regex"));

/// Broadcast mentions that read as `@name` when unlabeled.
const BROADCASTS: [&str; 3] = ["here", "channel", "everyone"];

/// Directory lookups supplied by the caller for one render.
#[derive(Debug, Clone, Copy)]
pub struct Directories<'a> {
    pub users: &'a HashMap<String, String>,
    pub channels: &'a HashMap<String, String>,
}

/// The decoded payload of a `<...>` construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    UserMention { id: &'a str, label: Option<&'a str> },
    ChannelMention { id: &'a str, label: Option<&'a str> },
    SpecialMention { id: &'a str, label: Option<&'a str> },
    Link { url: &'a str, label: Option<&'a str> },
}

impl<'a> Token<'a> {
    /// Classify the text between the angle brackets.
    ///
    /// The first character picks the kind; the first `|` separates the
    /// identifier from an explicit label. An empty label counts as none.
    pub fn parse(payload: &'a str) -> Self {
        let (head, label) = match payload.split_once('|') {
            Some((head, label)) => (head, Some(label).filter(|l| !l.is_empty())),
            None => (payload, None),
        };

        if let Some(id) = head.strip_prefix('@') {
            Self::UserMention { id, label }
        } else if let Some(id) = head.strip_prefix('#') {
            Self::ChannelMention { id, label }
        } else if let Some(id) = head.strip_prefix('!') {
            Self::SpecialMention { id, label }
        } else {
            Self::Link { url: head, label }
        }
    }

    /// Unstyled display text.
    ///
    /// Mentions prefer the directory entry, then the label, then the raw id.
    pub fn display(&self, directories: Directories<'_>) -> String {
        match *self {
            Self::UserMention { id, label } => directories
                .users
                .get(id)
                .map(String::as_str)
                .or(label)
                .unwrap_or(id)
                .to_string(),
            Self::ChannelMention { id, label } => {
                let name = directories
                    .channels
                    .get(id)
                    .map(String::as_str)
                    .or(label)
                    .unwrap_or(id);
                format!("#{name}")
            }
            Self::SpecialMention { id, label } => match label {
                Some(label) => label.to_string(),
                None if BROADCASTS.contains(&id) => format!("@{id}"),
                None => id.to_string(),
            },
            Self::Link { url, label } => label
                .or_else(|| url.strip_prefix("mailto:"))
                .unwrap_or(url)
                .to_string(),
        }
    }

    /// Palette entry for this kind of token.
    pub const fn style<'s>(&self, styles: &'s Styles) -> &'s StyleSpec {
        match self {
            Self::UserMention { .. } => &styles.user_mention,
            Self::ChannelMention { .. } => &styles.channel_mention,
            Self::SpecialMention { .. } => &styles.special_mention,
            Self::Link { .. } => &styles.link,
        }
    }
}

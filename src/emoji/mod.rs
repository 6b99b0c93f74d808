//! Emoji shortcode lookup.
//!
//! The table maps chat-style shortcodes (`smile`, `+1`, `white_check_mark`)
//! to glyphs. It is built from the gemoji shortcode set on first use and
//! shared read-only for the rest of the process.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

type Table = HashMap<&'static str, &'static str>;

/// Glyph for `name`, or `:name:` unchanged when the shortcode is unknown.
///
/// `name` is given without its surrounding colons.
///
/// ```
/// use mrkdwn_term::emoji;
///
/// assert_eq!(emoji::lookup("tada"), "🎉");
/// assert_eq!(emoji::lookup("no_such_emoji"), ":no_such_emoji:");
/// ```
pub fn lookup(name: &str) -> Cow<'static, str> {
    table()
        .get(name)
        .map_or_else(|| Cow::Owned(format!(":{name}:")), |glyph| Cow::Borrowed(*glyph))
}

/// Every `(shortcode, glyph)` pair, sorted by shortcode.
pub fn all() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<_> = table().iter().map(|(name, glyph)| (*name, *glyph)).collect();
    entries.sort_unstable_by_key(|(name, _)| *name);
    entries
}

/// True if `name` uses only the shortcode alphabet: `a-z`, `0-9`, `_`, `-`, `+`.
pub fn is_shortcode_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'-' | b'+'))
}

fn table() -> &'static Table {
    static TABLE: OnceLock<Table> = OnceLock::new();
    TABLE.get_or_init(|| {
        let _scope = crate::perf::scope("emoji.table.build");
        build_table(
            emojis::iter()
                .flat_map(|emoji| emoji.shortcodes().map(move |code| (code, emoji.as_str()))),
        )
    })
}

/// Keep only entries whose name the chat service could produce.
///
/// The first glyph seen for a name wins.
fn build_table<I>(entries: I) -> Table
where
    I: IntoIterator<Item = (&'static str, &'static str)>,
{
    let mut table = Table::new();
    for (name, glyph) in entries {
        if is_shortcode_name(name) {
            table.entry(name).or_insert(glyph);
        }
    }
    tracing::debug!(entries = table.len(), "emoji table built");
    table
}

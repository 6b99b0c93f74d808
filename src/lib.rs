// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. style::StyleSpec)
    clippy::module_name_repetitions
)]

//! # mrkdwn-term
//!
//! Renders chat mrkdwn into tagged text for character-cell terminals.
//!
//! The renderer handles:
//! - Fenced code blocks with syntect highlighting
//! - User, channel and broadcast mentions, and links
//! - Inline code, blockquotes, bold, italic and strikethrough
//! - Emoji shortcodes
//!
//! Output uses `[fg:bg:attrs]` style tags; see [`style`] for the syntax.
//!
//! ## Modules
//!
//! - [`mrkdwn`]: The rendering pipeline
//! - [`style`]: Style specs, tags, escaping and the role palette
//! - [`highlight`]: Syntax highlighting for code fences
//! - [`emoji`]: Shortcode lookup
//! - [`directory`]: User and channel directories
//! - [`config`]: Saved command-line defaults
//! - [`perf`]: Timing scopes

pub mod config;
pub mod directory;
pub mod emoji;
pub mod highlight;
pub mod mrkdwn;
pub mod perf;
pub mod style;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::directory::Directory;
    pub use crate::mrkdwn::render;
    pub use crate::style::{StyleSpec, Styles};
}

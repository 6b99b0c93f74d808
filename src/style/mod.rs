//! Output styling: style specs, their bracket tags, and escaping.
//!
//! The renderer emits tags of the form `[fg:bg:attrs]` for the terminal
//! layer to interpret:
//! - `fg`/`bg`: a color name, a 256-color index, or `#rrggbb`; empty leaves
//!   the component alone and `-` resets it
//! - `attrs`: letters from `biudrls`, lowercase on and uppercase off
//!
//! Trailing empty fields are dropped, so bold alone is `[::b]`.

mod escape;
mod palette;
mod spec;

pub use escape::escape;
pub(crate) use escape::TAG_LIKE;
pub use palette::Styles;
pub use spec::{StyleParseError, StyleSpec};

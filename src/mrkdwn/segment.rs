//! Splitting a message into fenced code blocks and inline text.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// A fence: three backticks, an optional language hint that only counts when
/// a newline follows it, the body (non-greedy), three closing backticks.
static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:([A-Za-z0-9_+#.\-]*)\n)?(.*?)```").expect("valid regex"));

/// One piece of a message. Segments tile the input in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Code {
        /// Language hint from the opening fence, possibly empty.
        language: &'a str,
        /// Body between the fences, exactly as written.
        code: &'a str,
        span: Range<usize>,
    },
    Text {
        text: &'a str,
        span: Range<usize>,
    },
}

impl Segment<'_> {
    /// Byte range of the original message this segment covers.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Code { span, .. } | Self::Text { span, .. } => span.clone(),
        }
    }

    pub const fn is_code(&self) -> bool {
        matches!(self, Self::Code { .. })
    }
}

/// Split `text` into code and text segments.
///
/// Without any fence the result is a single text segment equal to `text`
/// (including the empty string).
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in FENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            segments.push(Segment::Text {
                text: &text[last..whole.start()],
                span: last..whole.start(),
            });
        }
        segments.push(Segment::Code {
            language: caps.get(1).map_or("", |m| m.as_str()),
            code: caps.get(2).map_or("", |m| m.as_str()),
            span: whole.range(),
        });
        last = whole.end();
    }

    if last < text.len() || segments.is_empty() {
        segments.push(Segment::Text {
            text: &text[last..],
            span: last..text.len(),
        });
    }

    segments
}

//! Reply post-processing: hides reasoning blocks and adapts line breaks to
//! the surface the reply is rendered on.

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

/// Line-break marker for HTML surfaces.
pub const HTML_LINE_BREAK: &str = "<br>";
/// Line-break marker for the terminal transcript (lines are split on it).
pub const TERMINAL_LINE_BREAK: &str = "\n";

lazy_static! {
    static ref THINK_BLOCK: Regex =
        Regex::new(r"(?s)<think>.*?</think>\s*").expect("valid think-block regex");
}

/// Removes every `<think>...</think>` block along with the whitespace that
/// directly follows its closing tag.
pub fn strip_thinking(raw: &str) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(raw);
    // A removal can splice a new tag pair together, e.g. `<thi<think>x</think>nk>`.
    while THINK_BLOCK.is_match(&text) {
        text = Cow::Owned(THINK_BLOCK.replace_all(&text, "").into_owned());
    }
    text
}

/// Formats raw reply text for display.
pub fn format_reply(raw: &str, line_break: &str) -> String {
    strip_thinking(raw)
        .replace("\r\n", "\n")
        .replace('\n', line_break)
}

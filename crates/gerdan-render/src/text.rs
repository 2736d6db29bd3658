//! Fonts and text placement options.

use serde::{Deserialize, Serialize};

/// The two faces a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    /// Body text, numbers and labels.
    #[default]
    Regular,
    /// Titles.
    Medium,
}

/// Options attached to a single text draw.
///
/// Text is always anchored at its left edge; callers center text by
/// measuring it through the sink. A missing field, a missing `options` key
/// and [`TextOptions::default`] all mean wrapping plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Target URL when the text is a hyperlink.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub oblique: bool,
    /// Whether the backend may wrap the text onto further lines.
    #[serde(skip_serializing_if = "is_true")]
    pub line_break: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

fn is_true(flag: &bool) -> bool {
    *flag
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            link: None,
            underline: false,
            oblique: false,
            line_break: true,
        }
    }
}

impl TextOptions {
    /// Plain text that may wrap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text that must stay on one line, as used for bead numbers and labels.
    pub fn single_line() -> Self {
        Self {
            line_break: false,
            ..Self::default()
        }
    }

    /// Underlined, oblique hyperlink to `url`.
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            link: Some(url.into()),
            underline: true,
            oblique: true,
            ..Self::new()
        }
    }
}

//! Page setup, texts and options for rendering.
//!
//! Everything a document needs besides the pattern itself lives here and is
//! passed in explicitly at construction time. All types deserialize with
//! defaults for missing fields, so partial configuration files work.

use std::borrow::Cow;

use gerdan_core::DEFAULT_SCALE;
use gerdan_layout::PrintArea;
use serde::{Deserialize, Serialize};

use crate::types::Size;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
}

impl PageSetup {
    /// Portrait A4 with a wider binding margin on the left.
    pub const A4: Self = Self {
        width: 595.28,
        height: 841.89,
        margin_left: 75.6,
        margin_top: 37.8,
        margin_right: 37.8,
        margin_bottom: 37.8,
    };

    /// Page size.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Page size minus margins.
    #[inline]
    pub fn print_area(&self) -> PrintArea {
        PrintArea::new(
            self.width - self.margin_left - self.margin_right,
            self.height - self.margin_top - self.margin_bottom,
        )
    }

    /// Right edge of the printable area.
    #[inline]
    pub fn content_right(&self) -> f32 {
        self.width - self.margin_right
    }

    /// Bottom edge of the printable area.
    #[inline]
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::A4
    }
}

/// Font sizes, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub subtitle: f32,
    pub site_mark: f32,
    /// Legend entries on the statistics page.
    pub legend: f32,
    /// Bead numbers, rulers, page numbers and instruction text.
    pub schema_number: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 24.0,
            subtitle: 16.0,
            site_mark: 16.0,
            legend: 10.0,
            schema_number: 8.0,
        }
    }
}

/// Texts identifying the site a document was made on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    /// Short mark printed at the bottom of pages.
    pub mark: String,
    pub url: String,
    /// Donation link; the support block is left out when absent.
    pub support_url: Option<String>,
}

impl SiteInfo {
    /// The support URL, if set and non-empty.
    pub fn support_url(&self) -> Option<&str> {
        self.support_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            mark: "Gerdan".into(),
            url: String::new(),
            support_url: None,
        }
    }
}

/// User-visible words used in documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub author: String,
    pub made_with: String,
    pub support: String,
    pub part: String,
    pub page: String,
    pub row: String,
    pub pieces: String,
    pub columns: String,
    pub rows: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            author: "Author".into(),
            made_with: "Made with".into(),
            support: "Support the project:".into(),
            part: "Part".into(),
            page: "Page".into(),
            row: "row".into(),
            pieces: "pcs.".into(),
            columns: "Columns".into(),
            rows: "Rows".into(),
        }
    }
}

impl Labels {
    /// Ukrainian texts.
    pub fn ukrainian() -> Self {
        Self {
            author: "Автор".into(),
            made_with: "Зроблено на сайті".into(),
            support: "Підтримати проєкт:".into(),
            part: "Частина".into(),
            page: "Сторінка".into(),
            row: "ряд".into(),
            pieces: "шт.".into(),
            columns: "Стовпців".into(),
            rows: "Рядків".into(),
        }
    }

    /// `Author: @name`.
    pub fn author_line(&self, author: &str) -> String {
        format!("{}: @{author}", self.author)
    }

    /// `Made with <mark>`.
    pub fn made_with_line(&self, mark: &str) -> String {
        format!("{} {mark}", self.made_with)
    }

    /// `Part r/R, Page c/C`, both 1-based.
    pub fn slice_info(&self, part: usize, parts: usize, page: usize, pages: usize) -> String {
        format!("{} {part}/{parts}, {} {page}/{pages}", self.part, self.page)
    }

    /// `Columns: c. Rows: r.`
    pub fn summary(&self, columns: usize, rows: usize) -> String {
        format!("{}: {columns}. {}: {rows}.", self.columns, self.rows)
    }

    /// `12 pcs.`
    pub fn pieces(&self, count: usize) -> String {
        format!("{count} {}", self.pieces)
    }

    /// `3 row: `, 1-based; reversed rows carry an arrow.
    pub fn row_label(&self, number: usize, reversed: bool) -> String {
        if reversed {
            format!("{number} {} ←: ", self.row)
        } else {
            format!("{number} {}: ", self.row)
        }
    }
}

/// Everything fixed about a document except its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub page: PageSetup,
    pub fonts: FontSizes,
    pub site: SiteInfo,
    pub labels: Labels,
    /// Bead scale on schema pages.
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page: PageSetup::A4,
            fonts: FontSizes::default(),
            site: SiteInfo::default(),
            labels: Labels::default(),
            scale: DEFAULT_SCALE,
        }
    }
}

/// Replacement text printed instead of a bead number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberAlias {
    pub number: u32,
    #[serde(rename = "as")]
    pub label: String,
}

impl NumberAlias {
    /// Create a new alias.
    pub fn new(number: u32, label: impl Into<String>) -> Self {
        Self {
            number,
            label: label.into(),
        }
    }
}

/// Per-export drawing switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Print legend numbers inside beads.
    pub numbers: bool,
    /// Draw row and column rulers on schema pages.
    pub rulers: bool,
    #[serde(rename = "alias")]
    pub aliases: Vec<NumberAlias>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            numbers: true,
            rulers: false,
            aliases: Vec::new(),
        }
    }
}

impl RenderOptions {
    /// The text printed for bead `number`: its alias if one exists.
    pub fn label_for(&self, number: u32) -> Cow<'_, str> {
        self.aliases
            .iter()
            .find(|alias| alias.number == number)
            .map(|alias| Cow::Borrowed(alias.label.as_str()))
            .unwrap_or_else(|| Cow::Owned(number.to_string()))
    }
}

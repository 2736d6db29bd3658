//! Export configuration.
//!
//! Configuration is read from TOML. Every section is optional:
//!
//! ```toml
//! locale = "uk"
//! scale = 0.5
//! preview_scale = 1.0
//!
//! [site]
//! mark = "gerdan.example"
//! url = "https://gerdan.example"
//! support_url = "https://gerdan.example/support"
//!
//! [labels]
//! pieces = "beads"
//!
//! [options]
//! rulers = true
//! alias = [{ number = 3, as = "A" }]
//! ```
//!
//! `[labels]` only needs the texts that differ from the locale's.

use std::path::{Path, PathBuf};

use gerdan_core::logging::targets;
use gerdan_core::DEFAULT_SCALE;
use gerdan_render::{FontSizes, Labels, PageSetup, RenderConfig, RenderOptions, SiteInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has wrong field types.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Language of the built-in document texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Uk,
}

impl Locale {
    /// The built-in texts for this language.
    pub fn labels(self) -> Labels {
        match self {
            Self::En => Labels::default(),
            Self::Uk => Labels::ukrainian(),
        }
    }
}

/// Texts replacing individual entries of the locale's [`Labels`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub made_with: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<String>,
}

impl LabelOverrides {
    /// `base` with every overridden text replaced.
    pub fn apply(&self, mut base: Labels) -> Labels {
        for (target, text) in [
            (&mut base.author, &self.author),
            (&mut base.made_with, &self.made_with),
            (&mut base.support, &self.support),
            (&mut base.part, &self.part),
            (&mut base.page, &self.page),
            (&mut base.row, &self.row),
            (&mut base.pieces, &self.pieces),
            (&mut base.columns, &self.columns),
            (&mut base.rows, &self.rows),
        ] {
            if let Some(text) = text {
                target.clone_from(text);
            }
        }
        base
    }
}

/// Everything an [`Exporter`](crate::Exporter) needs besides the pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub locale: Locale,
    /// Texts replacing the locale's, key by key.
    pub labels: LabelOverrides,
    pub site: SiteInfo,
    pub page: PageSetup,
    pub fonts: FontSizes,
    /// Bead scale on printed schema pages.
    pub scale: f32,
    /// Bead scale of raster previews, in pixels per schema unit.
    pub preview_scale: f32,
    pub options: RenderOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            labels: LabelOverrides::default(),
            site: SiteInfo::default(),
            page: PageSetup::default(),
            fonts: FontSizes::default(),
            scale: DEFAULT_SCALE,
            preview_scale: 1.0,
            options: RenderOptions::default(),
        }
    }
}

impl ExportConfig {
    /// Parse and check a TOML configuration.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: targets::EXPORT, path = %path.display(), locale = ?config.locale, "config loaded");
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        check_positive("scale", self.scale)?;
        check_positive("preview_scale", self.preview_scale)?;

        let area = self.page.print_area();
        if !(area.width > 0.0 && area.height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "page",
                reason: format!("margins leave no printable area ({}x{})", area.width, area.height),
            });
        }
        for (field, size) in [
            ("fonts.title", self.fonts.title),
            ("fonts.subtitle", self.fonts.subtitle),
            ("fonts.site_mark", self.fonts.site_mark),
            ("fonts.legend", self.fonts.legend),
            ("fonts.schema_number", self.fonts.schema_number),
        ] {
            check_positive(field, size)?;
        }
        Ok(())
    }

    /// The texts documents are written with: the locale's, with the
    /// configured overrides applied.
    pub fn labels(&self) -> Labels {
        self.labels.apply(self.locale.labels())
    }

    /// Renderer configuration derived from this export configuration.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            page: self.page,
            fonts: self.fonts,
            site: self.site.clone(),
            labels: self.labels(),
            scale: self.scale,
        }
    }
}

fn check_positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

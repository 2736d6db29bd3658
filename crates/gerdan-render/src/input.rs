//! The pattern an export is made from.

use gerdan_core::{Color, Colormap, LatticeGeometry, LatticeType, LayoutResult, Schema};
use serde::{Deserialize, Serialize};

use crate::sink::DocumentInfo;

/// A complete pattern as stored by the editor.
///
/// Field names follow the editor's JSON: `type` and `backgroundColor` are
/// accepted as aliases for `lattice` and `background`, `name` for `title`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInput {
    pub schema: Schema,
    #[serde(default)]
    pub colormap: Colormap,
    #[serde(alias = "type", default)]
    pub lattice: LatticeType,
    #[serde(alias = "backgroundColor", default = "default_background")]
    pub background: Color,
    #[serde(alias = "name")]
    pub title: String,
    pub author: String,
}

fn default_background() -> Color {
    Color::WHITE
}

impl ExportInput {
    /// Parse an input from JSON.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json).map_err(|e| gerdan_core::LayoutError::Parse {
            what: "export input",
            message: e.to_string(),
        })
    }

    /// Check the schema against its colormap.
    ///
    /// Without a colormap only the schema's shape is checked.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.colormap.is_empty() {
            self.schema.validate_shape()
        } else {
            self.schema.validate(&self.colormap)
        }
    }

    /// Geometry of this input's lattice at `scale`.
    pub fn geometry(&self, scale: f32) -> LatticeGeometry {
        LatticeGeometry::new(self.lattice, scale)
    }

    /// Document metadata for this input.
    pub fn info(&self) -> DocumentInfo {
        DocumentInfo::new(&self.title, &self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITOR_JSON: &str = r##"{
        "name": "Sunflower",
        "author": "olena",
        "type": "brick",
        "backgroundColor": "#FFFFFF",
        "schema": [
            [{"x": 0, "y": 0, "filled": true, "color": "#ffcc00", "number": 1},
             {"x": 30, "y": 0, "filled": false}]
        ],
        "colormap": [{"color": "#ffcc00", "number": 1}]
    }"##;

    #[test]
    fn test_editor_json_aliases() {
        let input = ExportInput::from_json(EDITOR_JSON).unwrap();
        assert_eq!(input.title, "Sunflower");
        assert_eq!(input.lattice, LatticeType::Brick);
        assert_eq!(input.background, Color::WHITE);
        assert_eq!(input.info(), DocumentInfo::new("Sunflower", "olena"));
        input.validate().unwrap();
    }

    #[test]
    fn test_validate_without_colormap() {
        let mut input = ExportInput::from_json(EDITOR_JSON).unwrap();
        input.colormap = Colormap::default();
        input.validate().unwrap();
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let err = ExportInput::from_json(r#"{"schema": [], "author": "a"}"#).unwrap_err();
        assert!(matches!(err, gerdan_core::LayoutError::Parse { .. }));
    }
}

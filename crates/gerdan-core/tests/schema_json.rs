//! Integration tests for loading stored patterns.

use gerdan_core::{Colormap, LatticeType, LayoutError, Schema};

const STORED_SCHEMA: &str = r##"[
  [
    {"x": 0, "y": 0, "filled": true, "color": "#1E90FF", "number": 1},
    {"x": 30, "y": 0, "filled": true, "color": "#1E90FF", "number": 1},
    {"x": 60, "y": 0, "filled": false}
  ],
  [
    {"x": 0, "y": 20, "filled": false},
    {"x": 30, "y": 20, "filled": true, "color": "#FFD700", "number": 2}
  ]
]"##;

const STORED_COLORMAP: &str = r##"[
  {"color": "#1E90FF", "number": 1},
  {"color": "#FFD700", "number": 2}
]"##;

#[test]
fn test_stored_brick_pattern_is_valid() {
    let schema = Schema::from_json(STORED_SCHEMA).unwrap();
    let colormap = Colormap::from_json(STORED_COLORMAP).unwrap();

    assert_eq!(schema.validate(&colormap), Ok(()));
    assert_eq!(schema.len(), 2);
    assert_eq!(schema.effective_columns(), 3);
    assert_eq!(schema.filled_count(), 3);

    // Coordinates are multiples of the unscaled brick cell.
    let cell = LatticeType::Brick.source_cell();
    for (row, col, item) in schema.cells() {
        assert_eq!(item.x as f32, col as f32 * cell.width);
        assert_eq!(item.y as f32, row as f32 * cell.height);
    }
}

#[test]
fn test_round_trips_through_json() {
    let schema = Schema::from_json(STORED_SCHEMA).unwrap();
    let json = serde_json::to_string(&schema).unwrap();
    assert!(!json.contains("null"));
    assert_eq!(Schema::from_json(&json).unwrap(), schema);
}

#[test]
fn test_colormap_rejects_wrong_shape() {
    let err = Colormap::from_json(r##"{"color": "#000000"}"##).unwrap_err();
    assert!(matches!(err, LayoutError::Parse { what: "colormap", .. }));
}

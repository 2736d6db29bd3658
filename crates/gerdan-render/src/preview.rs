//! Single-canvas previews of a whole schema.
//!
//! Unlike documents, a preview is not paginated: every bead lands on one
//! canvas of `effective_columns * cell.width` by `rows * cell.height`, with
//! the same lattice offsets as the printed pages. Beads pushed past the
//! canvas edge by an offset are clipped.

use std::io::Cursor;

use gerdan_core::logging::{span_names, targets, PerfSpan};
use gerdan_core::{Color, LatticeGeometry, LayoutError, Schema};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};
use crate::types::{Rect, Size};

/// A raster backend for previews.
pub trait PreviewSink {
    /// What the finished preview turns into.
    type Output;

    /// Start a canvas of `size`, cleared to `background`.
    fn begin(&mut self, size: Size, background: Color) -> RenderResult<()>;

    /// Fill `rect`, already clipped to the canvas, with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> RenderResult<()>;

    /// Finish the canvas.
    fn finish(self) -> RenderResult<Self::Output>;
}

/// Canvas size of a preview of `schema`.
pub fn preview_size(schema: &Schema, geometry: &LatticeGeometry) -> Size {
    let cell = geometry.cell();
    Size::new(
        schema.effective_columns() as f32 * cell.width,
        schema.len() as f32 * cell.height,
    )
}

/// Draw every filled bead of `schema` onto `sink`.
///
/// Empty cells show the background.
pub fn draw_preview<P: PreviewSink>(
    schema: &Schema,
    geometry: &LatticeGeometry,
    background: Color,
    mut sink: P,
) -> RenderResult<P::Output> {
    let _span = PerfSpan::new(span_names::PREVIEW);
    if schema.is_empty() {
        return Err(LayoutError::EmptySchema.into());
    }

    let cell = geometry.cell();
    let size = preview_size(schema, geometry);
    let canvas = Rect::new(0.0, 0.0, size.width, size.height);
    sink.begin(size, background)?;

    let mut clipped = 0usize;
    for (row, col, item) in schema.cells() {
        let Some((hex, _)) = item.bead_data() else {
            continue;
        };
        let color: Color = hex.parse()?;
        let (x, y) = geometry.bead_origin(row, col);
        let bead = Rect::new(x, y, cell.width, cell.height);
        match bead.intersect(&canvas) {
            Some(visible) => {
                if visible != bead {
                    clipped += 1;
                }
                sink.fill_rect(visible, color)?;
            }
            None => clipped += 1,
        }
    }

    tracing::debug!(
        target: targets::PREVIEW,
        width = size.width,
        height = size.height,
        clipped,
        "preview drawn"
    );
    sink.finish()
}

/// An in-memory RGBA preview backed by the `image` crate.
#[derive(Debug, Default)]
pub struct RasterPreview {
    image: Option<RgbaImage>,
}

impl RasterPreview {
    /// Create an empty preview; the canvas is allocated by
    /// [`PreviewSink::begin`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewSink for RasterPreview {
    type Output = RgbaImage;

    fn begin(&mut self, size: Size, background: Color) -> RenderResult<()> {
        if !size.width.is_finite() || !size.height.is_finite() || size.is_empty() {
            return Err(RenderError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }

        let width = size.width.ceil() as u32;
        let height = size.height.ceil() as u32;
        self.image = Some(RgbaImage::from_pixel(width, height, Rgba(background.to_rgba8())));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> RenderResult<()> {
        let image = self
            .image
            .as_mut()
            .ok_or_else(|| RenderError::Sink("preview canvas not started".into()))?;

        let x0 = rect.left().max(0.0).round() as u32;
        let y0 = rect.top().max(0.0).round() as u32;
        let x1 = (rect.right().max(0.0).round() as u32).min(image.width());
        let y1 = (rect.bottom().max(0.0).round() as u32).min(image.height());

        let pixel = Rgba(color.to_rgba8());
        for y in y0..y1 {
            for x in x0..x1 {
                image.put_pixel(x, y, pixel);
            }
        }
        Ok(())
    }

    fn finish(self) -> RenderResult<RgbaImage> {
        self.image
            .ok_or_else(|| RenderError::Sink("preview canvas not started".into()))
    }
}

/// Encode a preview as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gerdan_core::{LatticeType, SchemaItem};

    const RED: Color = Color::new(1.0, 0.0, 0.0);

    fn full(lattice: LatticeType, rows: usize, cols: usize) -> (Schema, LatticeGeometry) {
        let geometry = LatticeGeometry::new(lattice, 1.0);
        let schema = Schema::from_fn(rows, cols, geometry.source_cell(), |_, _| {
            Some(("#ff0000".into(), 1))
        });
        (schema, geometry)
    }

    #[test]
    fn test_canvas_size() {
        let (schema, geometry) = full(LatticeType::Loom, 3, 4);
        let image = draw_preview(&schema, &geometry, Color::WHITE, RasterPreview::new()).unwrap();
        assert_eq!(image.dimensions(), (80, 90));
        assert_eq!(image.get_pixel(79, 89).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_brick_rows_shift_and_clip() {
        let (schema, geometry) = full(LatticeType::Brick, 2, 2);
        let image = draw_preview(&schema, &geometry, Color::WHITE, RasterPreview::new()).unwrap();
        assert_eq!(image.dimensions(), (60, 40));

        // Odd row starts half a bead (15px) in; the gap shows background.
        assert_eq!(image.get_pixel(5, 25).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(20, 25).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(59, 39).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_peyote_columns_shift() {
        let (schema, geometry) = full(LatticeType::Peyote, 2, 2);
        let image = draw_preview(&schema, &geometry, Color::WHITE, RasterPreview::new()).unwrap();
        assert_eq!(image.dimensions(), (40, 60));
        assert_eq!(image.get_pixel(25, 5).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(25, 20).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(5, 5).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_empty_cells_show_background() {
        let geometry = LatticeGeometry::new(LatticeType::Grid, 1.0);
        let schema = Schema::new(vec![vec![
            SchemaItem::bead(0, 0, "#ff0000", 1),
            SchemaItem::empty(25, 0),
        ]]);
        let background = Color::from_rgb8(0, 0, 255);
        let image = draw_preview(&schema, &geometry, background, RasterPreview::new()).unwrap();
        assert_eq!(image.get_pixel(10, 10).0, RED.to_rgba8());
        assert_eq!(image.get_pixel(35, 10).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_empty_schema_rejected() {
        let geometry = LatticeGeometry::from(LatticeType::Grid);
        let err = draw_preview(&Schema::default(), &geometry, Color::WHITE, RasterPreview::new())
            .unwrap_err();
        assert!(matches!(err, RenderError::Layout(LayoutError::EmptySchema)));
    }

    #[test]
    fn test_encode_png() {
        let (schema, geometry) = full(LatticeType::Grid, 1, 1);
        let image = draw_preview(&schema, &geometry, Color::WHITE, RasterPreview::new()).unwrap();
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_fill_before_begin() {
        let mut preview = RasterPreview::new();
        assert!(preview.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED).is_err());
    }
}

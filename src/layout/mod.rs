//! # Layout Module
//!
//! Surface-agnostic rendering of one label.
//!
//! ## Architecture
//!
//! ```text
//! LabelInstance ──► LabelLayout::compute ──► render_label ──► Surface
//!                   (cells, wrapped lines,     (stroke cells,    ├─ PdfSurface
//!                    positions in mm)           stamp text)      └─ RasterSurface
//! ```
//!
//! All geometry lives here; surfaces only know how to measure a string,
//! stroke a rectangle and place a line of text. The PDF exporter and the
//! PNG preview therefore cannot drift apart.

pub mod geometry;
pub mod surface;
pub mod wrap;

pub use geometry::{LabelGeometry, Rect};
pub use surface::{BoldStrategy, Surface};
pub use wrap::{is_wide, wrap_text};

use crate::labels::LabelInstance;

/// Options that affect drawing but not label content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    pub geometry: LabelGeometry,
    pub bold: BoldStrategy,
}

/// One line of text with its resolved position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    /// Left edge, mm
    pub x: f32,
    /// Vertical middle, mm
    pub y: f32,
    pub size_pt: f32,
    /// Table row the line belongs to
    pub row: usize,
}

/// Fully resolved drawing plan for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Caption and value cells of every row, in drawing order
    pub cells: Vec<Rect>,
    pub border_mm: f32,
    pub captions: Vec<TextPlacement>,
    pub values: Vec<TextPlacement>,
}

impl LabelLayout {
    /// Resolve cell rectangles, wrapping and text positions.
    ///
    /// `surface` is only used to measure text.
    pub fn compute<S: Surface + ?Sized>(
        surface: &S,
        instance: &LabelInstance,
        primary_font_size: f32,
        geometry: &LabelGeometry,
    ) -> Self {
        let mut cells = Vec::with_capacity(geometry.rows * 2);
        let mut captions = Vec::with_capacity(geometry.rows);
        let mut values = Vec::new();
        let default_size = geometry.default_font_size;

        for (index, row) in instance.rows().iter().enumerate().take(geometry.rows) {
            let caption_cell = geometry.caption_cell(index);
            let value_cell = geometry.value_cell(index);
            cells.push(caption_cell);
            cells.push(value_cell);

            let caption_width = surface.measure_text(row.caption, default_size);
            captions.push(TextPlacement {
                text: row.caption.to_string(),
                x: caption_cell.center_x() - caption_width / 2.0,
                y: caption_cell.center_y(),
                size_pt: default_size,
                row: index,
            });

            let size = if row.is_primary {
                primary_font_size
            } else {
                default_size
            };
            let lines = wrap_text(surface, row.value, size, geometry.wrap_width());
            if lines.is_empty() {
                continue;
            }

            let line_height = geometry.line_height(size);
            let block_height = lines.len() as f32 * line_height;
            let start_y = value_cell.center_y() - block_height / 2.0 + line_height / 2.0;

            for (k, line) in lines.into_iter().enumerate() {
                let width = surface.measure_text(&line, size);
                values.push(TextPlacement {
                    x: value_cell.center_x() - width / 2.0,
                    y: start_y + k as f32 * line_height,
                    text: line,
                    size_pt: size,
                    row: index,
                });
            }
        }

        Self {
            cells,
            border_mm: geometry.border_mm(),
            captions,
            values,
        }
    }

    /// Value lines of one row.
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = &TextPlacement> {
        self.values.iter().filter(move |t| t.row == row)
    }
}

/// Draw one label onto the current page of `surface`.
pub fn render_label<S: Surface + ?Sized>(
    surface: &mut S,
    instance: &LabelInstance,
    primary_font_size: f32,
    options: &RenderOptions,
) -> LabelLayout {
    let layout = LabelLayout::compute(&*surface, instance, primary_font_size, &options.geometry);
    let offsets = options.bold.offsets();

    for cell in &layout.cells {
        surface.draw_rect(*cell, layout.border_mm);
    }
    for text in layout.captions.iter().chain(layout.values.iter()) {
        for &(dx, dy) in &offsets {
            surface.draw_text(&text.text, text.x + dx, text.y + dy, text.size_pt);
        }
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelStyle;
    use crate::sheet::ProductRecord;
    use surface::testing::{Call, RecordingSurface};

    fn instance(name: &str, remarks: &str) -> LabelInstance {
        let product = ProductRecord {
            id: "product-1".into(),
            product_name: name.into(),
            order_number: "SO-100".into(),
            product_code: "TS01".into(),
            quantity: 300,
            remarks: remarks.into(),
        };
        LabelInstance::new(&product, LabelStyle::Chinese, 300, false)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_single_line_is_row_centered() {
        let surface = RecordingSurface::default();
        let geometry = LabelGeometry::STANDARD;
        let layout = LabelLayout::compute(&surface, &instance("Hat", ""), 10.0, &geometry);

        for row in 0..4 {
            let lines: Vec<_> = layout.row_values(row).collect();
            assert_eq!(lines.len(), 1, "row {}", row);
            assert!(close(lines[0].y, geometry.value_cell(row).center_y()));
        }
        // empty remarks draw nothing
        assert_eq!(layout.row_values(4).count(), 0);
    }

    #[test]
    fn test_lines_horizontally_centered() {
        let surface = RecordingSurface::default();
        let geometry = LabelGeometry::STANDARD;
        let layout = LabelLayout::compute(&surface, &instance("Hat", ""), 10.0, &geometry);
        let line = layout.row_values(1).next().unwrap();
        let width = surface.measure_text(&line.text, 10.0);
        assert!(close(line.x + width / 2.0, geometry.value_cell(1).center_x()));
    }

    #[test]
    fn test_multi_line_block_centered() {
        let surface = RecordingSurface::default();
        let geometry = LabelGeometry::STANDARD;
        let long = "超长的产品名称需要换行显示在标签上面不然放不下的内容";
        let layout = LabelLayout::compute(&surface, &instance(long, ""), 10.0, &geometry);

        let lines: Vec<_> = layout.row_values(0).collect();
        assert!(lines.len() >= 2);
        let lh = geometry.line_height(10.0);
        let first = lines.first().unwrap().y;
        let last = lines.last().unwrap().y;
        assert!(close(last - first, (lines.len() - 1) as f32 * lh));
        assert!(close((first + last) / 2.0, geometry.value_cell(0).center_y()));
    }

    #[test]
    fn test_primary_font_size_only_on_name_row() {
        let surface = RecordingSurface::default();
        let layout = LabelLayout::compute(
            &surface,
            &instance("Hat", "B1"),
            14.0,
            &LabelGeometry::STANDARD,
        );
        assert!(layout.row_values(0).all(|t| t.size_pt == 14.0));
        assert!(layout.values.iter().filter(|t| t.row > 0).all(|t| t.size_pt == 10.0));
        assert!(layout.captions.iter().all(|t| t.size_pt == 10.0));
    }

    #[test]
    fn test_render_draws_cells_and_stamps() {
        let mut surface = RecordingSurface::default();
        let layout = render_label(
            &mut surface,
            &instance("Hat", "B1"),
            10.0,
            &RenderOptions::default(),
        );

        let rects = surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Rect(..)))
            .count();
        assert_eq!(rects, 10);

        let runs = layout.captions.len() + layout.values.len();
        assert_eq!(surface.texts().len(), runs * 4);
        assert_eq!(surface.pages(), 1);
    }

    #[test]
    fn test_render_plain_text() {
        let mut surface = RecordingSurface::default();
        let options = RenderOptions {
            bold: BoldStrategy::Single,
            ..Default::default()
        };
        let layout = render_label(&mut surface, &instance("Hat", "B1"), 10.0, &options);
        assert_eq!(surface.texts().len(), layout.captions.len() + layout.values.len());
    }

    #[test]
    fn test_captions_centered_in_caption_column() {
        let surface = RecordingSurface::default();
        let geometry = LabelGeometry::STANDARD;
        let layout = LabelLayout::compute(&surface, &instance("Hat", ""), 10.0, &geometry);
        for caption in &layout.captions {
            let width = surface.measure_text(&caption.text, 10.0);
            let cell = geometry.caption_cell(caption.row);
            assert!(close(caption.x + width / 2.0, cell.center_x()));
            assert!(close(caption.y, cell.center_y()));
        }
    }
}

//! Fixed label geometry.
//!
//! ```text
//! ├5┼── 20 ──┼──────────── 60 ────────────┼5┤   (mm)
//! ┌──────────────────────────────────────────┐ ┬
//! │  ┌───────┬────────────────────────────┐  │ 5
//! │  │ 品 名 │ T-Shirt-中文吊牌           │  │ ┼ 8
//! │  ├───────┼────────────────────────────┤  │
//! │  │ 订单号│ SO-100                     │  │
//! │  ├───────┼────────────────────────────┤  │
//! │  │ 货 号 │ ...                        │  │   (5 rows)
//! │  └───────┴────────────────────────────┘  │
//! └──────────────────────────────────────────┘
//!                    90 × 50
//! ```

use crate::font::MM_PER_PT;

/// Axis-aligned rectangle in millimetres, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Physical layout of one label. All lengths in mm, font sizes in pt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub page_width: f32,
    pub page_height: f32,
    /// Blank border around the table on every side
    pub margin: f32,
    /// Width of the caption column
    pub caption_width: f32,
    pub rows: usize,
    /// Table stroke thickness in points
    pub border_pt: f32,
    /// Font size of captions and every value except the product name
    pub default_font_size: f32,
    /// Subtracted from the value column width before wrapping
    pub value_padding: f32,
    /// Approximate mm per pt used for line height
    pub line_height_mm_per_pt: f32,
    pub line_spacing: f32,
}

impl LabelGeometry {
    /// 90 × 50 mm landscape hang tag.
    pub const STANDARD: Self = Self {
        page_width: 90.0,
        page_height: 50.0,
        margin: 5.0,
        caption_width: 20.0,
        rows: 5,
        border_pt: 0.8,
        default_font_size: 10.0,
        value_padding: 2.0,
        line_height_mm_per_pt: 0.35,
        line_spacing: 1.2,
    };

    #[inline]
    pub fn table_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    #[inline]
    pub fn table_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    #[inline]
    pub fn value_width(&self) -> f32 {
        self.table_width() - self.caption_width
    }

    #[inline]
    pub fn row_height(&self) -> f32 {
        self.table_height() / self.rows as f32
    }

    /// Maximum width of a wrapped value line.
    #[inline]
    pub fn wrap_width(&self) -> f32 {
        self.value_width() - self.value_padding
    }

    /// Stroke thickness converted to mm.
    #[inline]
    pub fn border_mm(&self) -> f32 {
        self.border_pt * MM_PER_PT
    }

    /// Height of one wrapped line for a font size.
    #[inline]
    pub fn line_height(&self, size_pt: f32) -> f32 {
        size_pt * self.line_height_mm_per_pt * self.line_spacing
    }

    /// Caption cell of row `index`.
    pub fn caption_cell(&self, index: usize) -> Rect {
        let y = self.margin + index as f32 * self.row_height();
        Rect::new(self.margin, y, self.caption_width, self.row_height())
    }

    /// Value cell of row `index`.
    pub fn value_cell(&self, index: usize) -> Rect {
        let y = self.margin + index as f32 * self.row_height();
        Rect::new(
            self.margin + self.caption_width,
            y,
            self.value_width(),
            self.row_height(),
        )
    }
}

impl Default for LabelGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

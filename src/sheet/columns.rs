//! Header location and column extraction.
//!
//! Headers are found by keyword containment rather than exact match, so
//! "产品名称（中文）" still locates the product name column. Values are read
//! straight down from the header until the data block ends.

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Rows peeked after a blank cell before deciding the table has ended.
pub const BLANK_LOOKAHEAD: u32 = 5;

/// The five columns a product record is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    ProductName,
    OrderNumber,
    ProductCode,
    Quantity,
    Remarks,
}

impl Field {
    /// All fields, in record order.
    pub const ALL: [Field; 5] = [
        Field::ProductName,
        Field::OrderNumber,
        Field::ProductCode,
        Field::Quantity,
        Field::Remarks,
    ];
}

/// Position of a located header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderPosition {
    pub row: u32,
    pub col: u32,
}

/// Header synonyms per field, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldKeywords {
    pub product_name: Vec<String>,
    pub order_number: Vec<String>,
    pub product_code: Vec<String>,
    pub quantity: Vec<String>,
    pub remarks: Vec<String>,
}

impl FieldKeywords {
    pub fn for_field(&self, field: Field) -> &[String] {
        match field {
            Field::ProductName => &self.product_name,
            Field::OrderNumber => &self.order_number,
            Field::ProductCode => &self.product_code,
            Field::Quantity => &self.quantity,
            Field::Remarks => &self.remarks,
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for FieldKeywords {
    fn default() -> Self {
        Self {
            product_name: words(&["产品名称", "品名", "商品名称", "货品名称"]),
            order_number: words(&["订单编号", "订单号", "单号"]),
            product_code: words(&["产品编号", "货号", "商品编号", "款号"]),
            quantity: words(&["数量", "件数", "总数"]),
            remarks: words(&["批次", "备注", "说明", "批号"]),
        }
    }
}

/// Located header for every field (`None` when not found).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeaderMap {
    pub product_name: Option<HeaderPosition>,
    pub order_number: Option<HeaderPosition>,
    pub product_code: Option<HeaderPosition>,
    pub quantity: Option<HeaderPosition>,
    pub remarks: Option<HeaderPosition>,
}

impl HeaderMap {
    pub fn get(&self, field: Field) -> Option<HeaderPosition> {
        match field {
            Field::ProductName => self.product_name,
            Field::OrderNumber => self.order_number,
            Field::ProductCode => self.product_code,
            Field::Quantity => self.quantity,
            Field::Remarks => self.remarks,
        }
    }

    fn set(&mut self, field: Field, pos: Option<HeaderPosition>) {
        match field {
            Field::ProductName => self.product_name = pos,
            Field::OrderNumber => self.order_number = pos,
            Field::ProductCode => self.product_code = pos,
            Field::Quantity => self.quantity = pos,
            Field::Remarks => self.remarks = pos,
        }
    }
}

/// Find the first cell, in row-major order, containing any keyword.
///
/// Cell text is trimmed before matching; containment is case-sensitive.
pub fn locate_header<S: AsRef<str>>(grid: &Grid, keywords: &[S]) -> Option<HeaderPosition> {
    let b = grid.bounds();
    for row in b.first_row..=b.last_row {
        for col in b.first_col..=b.last_col {
            let text = grid.trimmed(row, col);
            if text.is_empty() {
                continue;
            }
            if keywords.iter().any(|k| text.contains(k.as_ref())) {
                return Some(HeaderPosition { row, col });
            }
        }
    }
    None
}

/// Locate the headers of all five fields.
pub fn locate_headers(grid: &Grid, keywords: &FieldKeywords) -> HeaderMap {
    let mut map = HeaderMap::default();
    for field in Field::ALL {
        map.set(field, locate_header(grid, keywords.for_field(field)));
    }
    map
}

/// Read the values below a header.
///
/// A blank cell is kept as an empty placeholder when more data follows
/// within [`BLANK_LOOKAHEAD`] rows; otherwise extraction stops before it.
/// Blanks before the first value are always kept.
pub fn extract_column(grid: &Grid, header: HeaderPosition) -> Vec<String> {
    let last_row = grid.bounds().last_row;
    let col = header.col;
    let mut values = Vec::new();

    let mut row = header.row.saturating_add(1);
    while row <= last_row {
        let value = grid.trimmed(row, col);

        if value.is_empty() && !values.is_empty() {
            let peek_end = row.saturating_add(BLANK_LOOKAHEAD).min(last_row);
            let more = (row + 1..=peek_end).any(|r| !grid.trimmed(r, col).is_empty());
            if !more {
                break;
            }
        }

        values.push(value.to_string());
        row += 1;
    }

    values
}

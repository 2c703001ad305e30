//! Assembling product records from extracted columns.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::columns::{Field, FieldKeywords, HeaderMap, extract_column, locate_headers};
use super::grid::Grid;
use crate::error::{HangtagError, Result};

/// One product row of the order sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// `product-{n}`, where `n` is the 1-based row index within the data block
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub product_code: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub remarks: String,
}

/// The five extracted columns. Unlocated fields stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    pub product_name: Vec<String>,
    pub order_number: Vec<String>,
    pub product_code: Vec<String>,
    pub quantity: Vec<String>,
    pub remarks: Vec<String>,
}

impl Columns {
    /// Extract every located column of `grid`.
    pub fn extract(grid: &Grid, headers: &HeaderMap) -> Self {
        let read = |field: Field| {
            headers
                .get(field)
                .map(|pos| extract_column(grid, pos))
                .unwrap_or_default()
        };
        Self {
            product_name: read(Field::ProductName),
            order_number: read(Field::OrderNumber),
            product_code: read(Field::ProductCode),
            quantity: read(Field::Quantity),
            remarks: read(Field::Remarks),
        }
    }

    /// Length of the longest column.
    pub fn max_len(&self) -> usize {
        [
            &self.product_name,
            &self.order_number,
            &self.product_code,
            &self.quantity,
            &self.remarks,
        ]
        .iter()
        .map(|c| c.len())
        .max()
        .unwrap_or(0)
    }
}

fn at(column: &[String], index: usize) -> &str {
    column.get(index).map(String::as_str).unwrap_or("")
}

/// Parse the leading integer of a quantity cell.
///
/// Accepts leading whitespace and an optional sign, then reads digits up
/// to the first non-digit: `"300张"` is 300 and `"12.5"` is 12. Anything
/// without leading digits, and negative values, give 0.
pub fn parse_quantity(text: &str) -> u32 {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }

    // Saturate rather than wrap on absurdly long digit runs.
    digits[..end].parse::<u64>().map_or(u32::MAX, |v| {
        u32::try_from(v).unwrap_or(u32::MAX)
    })
}

/// Zip extracted columns into records, skipping rows without a name.
///
/// The index keeps advancing over skipped rows, so fields of a dropped row
/// are discarded rather than shifted onto the next product.
pub fn build_records(columns: &Columns) -> Vec<ProductRecord> {
    (0..columns.max_len())
        .filter_map(|i| {
            let name = at(&columns.product_name, i);
            if name.is_empty() {
                return None;
            }
            Some(ProductRecord {
                id: format!("product-{}", i + 1),
                product_name: name.to_string(),
                order_number: at(&columns.order_number, i).to_string(),
                product_code: at(&columns.product_code, i).to_string(),
                quantity: parse_quantity(at(&columns.quantity, i)),
                remarks: at(&columns.remarks, i).to_string(),
            })
        })
        .collect()
}

/// Run header location, extraction and record assembly over a grid.
pub fn parse_products(grid: &Grid, keywords: &FieldKeywords) -> Result<Vec<ProductRecord>> {
    let headers = locate_headers(grid, keywords);
    debug!(?headers, "located headers");

    if headers.product_name.is_none() {
        return Err(HangtagError::Schema(format!(
            "no product name column located; the sheet needs a header containing one of: {}",
            keywords.product_name.join(", ")
        )));
    }

    let columns = Columns::extract(grid, &headers);
    let products = build_records(&columns);
    if products.is_empty() {
        return Err(HangtagError::EmptyResult(
            "no valid records found below the product name header".to_string(),
        ));
    }

    debug!(rows = columns.max_len(), products = products.len(), "built records");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn col(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("12000"), 12000);
        assert_eq!(parse_quantity(" 42"), 42);
        assert_eq!(parse_quantity("300张"), 300);
        assert_eq!(parse_quantity("12.5"), 12);
        assert_eq!(parse_quantity("+7"), 7);
        assert_eq!(parse_quantity("-5"), 0);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("99999999999999"), u32::MAX);
    }

    #[test]
    fn test_build_records_skips_empty_names_without_shifting() {
        let columns = Columns {
            product_name: col(&["A", "", "C"]),
            order_number: col(&["o1", "o2", "o3"]),
            product_code: col(&["c1", "c2", "c3"]),
            quantity: col(&["1", "2", "3"]),
            remarks: col(&["r1", "r2", "r3"]),
        };
        let records = build_records(&columns);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "product-1");
        assert_eq!(records[1].id, "product-3");
        assert_eq!(records[1].order_number, "o3");
        assert_eq!(records[1].quantity, 3);
        assert_eq!(records[1].remarks, "r3");
    }

    #[test]
    fn test_build_records_uneven_columns() {
        let columns = Columns {
            product_name: col(&["A", "B"]),
            quantity: col(&["10"]),
            remarks: col(&["", "", "orphan"]),
            ..Default::default()
        };
        let records = build_records(&columns);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].quantity, 0);
        assert_eq!(records[1].order_number, "");
    }

    #[test]
    fn test_parse_products_only_name_column() {
        let grid = Grid::from_rows(&[&["品名", "其他"], &["Hat", "x"], &["Cap", "y"]]);
        let products = parse_products(&grid, &FieldKeywords::default()).unwrap();
        assert_eq!(
            products,
            vec![
                ProductRecord {
                    id: "product-1".into(),
                    product_name: "Hat".into(),
                    order_number: String::new(),
                    product_code: String::new(),
                    quantity: 0,
                    remarks: String::new(),
                },
                ProductRecord {
                    id: "product-2".into(),
                    product_name: "Cap".into(),
                    order_number: String::new(),
                    product_code: String::new(),
                    quantity: 0,
                    remarks: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_products_missing_name_header() {
        let grid = Grid::from_rows(&[&["数量"], &["5"]]);
        let err = parse_products(&grid, &FieldKeywords::default()).unwrap_err();
        assert!(matches!(err, HangtagError::Schema(_)));
    }

    #[test]
    fn test_parse_products_no_rows() {
        let grid = Grid::from_rows(&[&["产品名称", "数量"], &["", "5"]]);
        let err = parse_products(&grid, &FieldKeywords::default()).unwrap_err();
        assert!(matches!(err, HangtagError::EmptyResult(_)));
    }

    #[test]
    fn test_product_record_json_is_camel_case() {
        let record = ProductRecord {
            id: "product-1".into(),
            product_name: "Hat".into(),
            order_number: "SO-1".into(),
            product_code: "H1".into(),
            quantity: 300,
            remarks: "B7".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["productName"], "Hat");
        assert_eq!(json["orderNumber"], "SO-1");
        assert_eq!(json["quantity"], 300);
    }
}

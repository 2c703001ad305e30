//! Reading spreadsheet bytes into a [`Grid`].
//!
//! Decoding uses calamine's format auto-detection, so `.xlsx`, `.xls` and
//! `.ods` containers all work. Only the first worksheet is read.

use std::future::Future;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto_from_rs};
use tracing::{debug, warn};

use super::grid::{Grid, GridBounds};
use crate::error::{HangtagError, Result};

/// File extensions accepted when the source has a name.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Reject file names that are not Excel workbooks.
pub fn check_extension(file_name: &str) -> Result<()> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(HangtagError::SourceRead(format!(
            "'{}' is not an Excel file (expected .xlsx or .xls)",
            file_name
        )))
    }
}

/// Decode an in-memory workbook into a grid of its first worksheet.
pub fn grid_from_bytes(bytes: Vec<u8>) -> Result<Grid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| HangtagError::SourceRead(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| HangtagError::SourceRead("Workbook has no worksheets".to_string()))?
        .map_err(|e| HangtagError::SourceRead(format!("Failed to read worksheet: {}", e)))?;

    let bounds = match (range.start(), range.end()) {
        (Some(start), Some(end)) => GridBounds::new(start, end),
        _ => {
            warn!("worksheet declares no range, scanning fallback window");
            GridBounds::FALLBACK
        }
    };

    let (row0, col0) = range.start().unwrap_or((0, 0));
    let mut grid = Grid::new(bounds);
    for (r, c, value) in range.used_cells() {
        if let Some(text) = cell_text(value) {
            grid.set(row0 + r as u32, col0 + c as u32, text);
        }
    }

    debug!(cells = grid.len(), ?bounds, "decoded worksheet");
    Ok(grid)
}

/// Display form of a cell, `None` for empty and error cells.
fn cell_text(value: &Data) -> Option<String> {
    match value {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        other if other.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Read and decode a spreadsheet file.
///
/// The read is asynchronous; decoding runs on the blocking pool.
pub async fn load_grid(path: &Path) -> Result<Grid> {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        check_extension(name)?;
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        HangtagError::SourceRead(format!("Failed to read {}: {}", path.display(), e))
    })?;

    tokio::task::spawn_blocking(move || grid_from_bytes(bytes))
        .await
        .map_err(|e| HangtagError::SourceRead(format!("Decode task failed: {}", e)))?
}

/// Like [`load_grid`], but gives up as soon as `cancel` resolves.
///
/// Returns `Ok(None)` when cancelled; the pending read is dropped and no
/// partial grid is kept.
pub async fn load_grid_until<C>(path: &Path, cancel: C) -> Result<Option<Grid>>
where
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        () = cancel => {
            debug!(path = %path.display(), "source read cancelled");
            Ok(None)
        }
        grid = load_grid(path) => grid.map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{FieldKeywords, parse_products};
    use pretty_assertions::assert_eq;

    /// Header row at B3, numeric quantities, a nameless row 5 and a blank F6.
    const ORDERS_XLSX: &[u8] = include_bytes!("../../tests/fixtures/orders.xlsx");

    #[test]
    fn test_check_extension() {
        assert!(check_extension("orders.xlsx").is_ok());
        assert!(check_extension("ORDERS.XLS").is_ok());
        assert!(matches!(
            check_extension("orders.csv"),
            Err(HangtagError::SourceRead(_))
        ));
        assert!(check_extension("orders").is_err());
    }

    #[test]
    fn test_garbage_bytes_are_source_errors() {
        let err = grid_from_bytes(b"definitely not a workbook".to_vec()).unwrap_err();
        assert!(matches!(err, HangtagError::SourceRead(_)));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("Hat".into())), Some("Hat".to_string()));
        assert_eq!(cell_text(&Data::Float(12000.0)), Some("12000".to_string()));
        assert_eq!(cell_text(&Data::Int(300)), Some("300".to_string()));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_grid(Path::new("/nonexistent/orders.xlsx"))
            .await
            .unwrap_err();
        assert!(matches!(err, HangtagError::SourceRead(_)));
    }

    #[tokio::test]
    async fn test_cancelled_read_returns_none() {
        let result = load_grid_until(Path::new("/nonexistent/orders.xlsx"), async {}).await;
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_workbook_grid_keeps_absolute_positions() {
        let grid = grid_from_bytes(ORDERS_XLSX.to_vec()).unwrap();
        let bounds = grid.bounds();

        assert!(bounds.first_row <= 2);
        assert!(bounds.first_col <= 1);
        assert_eq!((bounds.last_row, bounds.last_col), (6, 5));

        assert_eq!(grid.text(2, 1), "产品名称");
        assert_eq!(grid.text(2, 4), "数量");
        assert_eq!(grid.text(3, 4), "12000");
        assert_eq!(grid.text(4, 1), "");
        assert_eq!(grid.text(6, 4), "40件");
        assert_eq!(grid.text(0, 0), "");
    }

    #[test]
    fn test_workbook_parses_into_products() {
        let grid = grid_from_bytes(ORDERS_XLSX.to_vec()).unwrap();
        let products = parse_products(&grid, &FieldKeywords::default()).unwrap();

        let rows: Vec<(&str, &str, &str, &str, u32, &str)> = products
            .iter()
            .map(|p| {
                (
                    p.id.as_str(),
                    p.product_name.as_str(),
                    p.order_number.as_str(),
                    p.product_code.as_str(),
                    p.quantity,
                    p.remarks.as_str(),
                )
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                ("product-1", "T-Shirt", "PO-1001", "TS-01", 12000, "cotton"),
                ("product-3", "Hat", "PO-1002", "HT-07", 300, ""),
                ("product-4", "Scarf", "PO-1003", "SC-3", 40, "批次7"),
            ]
        );
    }
}

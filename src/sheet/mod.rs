//! # Sheet Module
//!
//! Extraction of product records from loosely structured order sheets.
//!
//! ## Pipeline
//!
//! ```text
//! bytes ──► Grid ──► locate_headers ──► extract_column ×5 ──► build_records
//!          (source)        (columns)          (columns)          (records)
//! ```
//!
//! Order sheets come from many customers and rarely share a layout. Instead
//! of expecting fixed column positions, each field is found by scanning for
//! a header keyword, and its values are read downwards from there.
//!
//! ## Example
//!
//! ```
//! use hangtag::sheet::{self, FieldKeywords, Grid};
//!
//! let grid = Grid::from_rows(&[
//!     &["产品名称", "", "", "数量"],
//!     &["T-Shirt", "", "", "12000"],
//!     &["Hat", "", "", "300"],
//! ]);
//! let products = sheet::parse_products(&grid, &FieldKeywords::default())?;
//! assert_eq!(products.len(), 2);
//! assert_eq!(products[0].quantity, 12000);
//! # Ok::<(), hangtag::HangtagError>(())
//! ```

pub mod columns;
pub mod grid;
pub mod records;
pub mod source;

pub use columns::{
    Field, FieldKeywords, HeaderMap, HeaderPosition, extract_column, locate_header, locate_headers,
};
pub use grid::{Grid, GridBounds};
pub use records::{Columns, ProductRecord, build_records, parse_products, parse_quantity};
pub use source::{grid_from_bytes, load_grid, load_grid_until};

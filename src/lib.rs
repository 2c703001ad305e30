//! # Hangtag - Garment Label Generator
//!
//! Hangtag turns customer order spreadsheets into printable hang-tag labels.
//! It provides:
//!
//! - **Sheet parsing**: keyword-driven header discovery on messy workbooks
//! - **Label expansion**: package splitting, spare labels and label styles
//! - **Layout**: a fixed 90×50mm two-column table with wrapped values
//! - **Output**: multi-page PDF documents and PNG previews
//! - **Server**: an HTTP API for upload, preview and download
//!
//! ## Quick Start
//!
//! ```no_run
//! use hangtag::{
//!     document,
//!     font::LabelFont,
//!     labels::{self, LabelJobConfig},
//!     layout::RenderOptions,
//!     sheet::{self, FieldKeywords},
//! };
//!
//! # async fn example() -> hangtag::Result<()> {
//! let grid = sheet::load_grid("orders.xlsx".as_ref()).await?;
//! let products = sheet::parse_products(&grid, &FieldKeywords::default())?;
//!
//! let config = LabelJobConfig::default();
//! config.validate()?;
//! let instances = labels::expand(&products, &config)?;
//!
//! let font = LabelFont::from_file("msyh.ttf".as_ref())?;
//! let today = chrono::Local::now().date_naive();
//! let pdf = document::generate_pdf(
//!     &instances,
//!     &config,
//!     &font,
//!     &RenderOptions::default(),
//!     today,
//!     document::DEFAULT_DOCUMENT_LABEL,
//! )?;
//! std::fs::write(&pdf.filename, &pdf.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`sheet`] | Workbook loading and product extraction |
//! | [`labels`] | Job settings, expansion into label instances, stats |
//! | [`layout`] | Label geometry, text wrapping, drawing surface trait |
//! | [`document`] | Page sequencing and file naming |
//! | [`pdf`] | PDF surface with an embedded TrueType font |
//! | [`preview`] | Bitmap surface and PNG encoding |
//! | [`font`] | Font loading and metrics |
//! | [`store`] | Product list hand-off between requests |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod font;
pub mod labels;
pub mod layout;
pub mod pdf;
pub mod preview;
pub mod server;
pub mod sheet;
pub mod store;

// Re-exports for convenience
pub use error::{HangtagError, Result};
pub use labels::{LabelInstance, LabelJobConfig, LabelStyle};
pub use sheet::ProductRecord;

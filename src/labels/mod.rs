//! # Labels Module
//!
//! Turns product records and a job configuration into the ordered list of
//! label instances that become document pages.
//!
//! ## Ordering
//!
//! ```text
//! product A: pkg1×style1, pkg1×style2, pkg2×style1, ..., spare×style1, spare×style2
//! product B: ...
//! ```
//!
//! Quantities above [`PACKAGE_CAP`] are split into several package labels.
//! Every product also gets one spare label per enabled style, even when
//! its quantity is zero.

pub mod config;
pub mod expand;
pub mod package;
pub mod select;
pub mod stats;

pub use config::{
    DEFAULT_PRIMARY_FONT_SIZE, DEFAULT_SPARE_QUANTITY, LabelJobConfig, LabelStyle, StyleSet,
};
pub use expand::{LabelInstance, LabelRow, ROW_CAPTIONS, expand, quantity_text};
pub use package::{PACKAGE_CAP, PackagePlan};
pub use select::{search, select};
pub use stats::LabelStats;

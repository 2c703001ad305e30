//! # Document Assembly
//!
//! Sequences label instances onto pages: the first label uses the first
//! page, every later label opens a new one. Layout is delegated entirely
//! to [`render_label`].

use chrono::NaiveDate;
use tracing::info;

use crate::error::{HangtagError, Result};
use crate::font::LabelFont;
use crate::labels::{LabelInstance, LabelJobConfig};
use crate::layout::{RenderOptions, Surface, render_label};
use crate::pdf::PdfSurface;

/// Label used in output file names unless the caller picks another.
pub const DEFAULT_DOCUMENT_LABEL: &str = "华旺标签";

/// `{YYYYMMDD}_{label}.pdf`
pub fn document_filename(date: NaiveDate, label: &str) -> String {
    format!("{}_{}.pdf", date.format("%Y%m%d"), label)
}

/// Draw every instance onto `surface`, one page each, in order.
///
/// Returns the number of pages drawn. An empty list is refused so a
/// document never ends up with a blank page.
pub fn assemble<S: Surface + ?Sized>(
    surface: &mut S,
    instances: &[LabelInstance],
    config: &LabelJobConfig,
    options: &RenderOptions,
) -> Result<usize> {
    if instances.is_empty() {
        return Err(HangtagError::Configuration(
            "nothing to print: no label instances".to_string(),
        ));
    }

    for (index, instance) in instances.iter().enumerate() {
        if index > 0 {
            surface.new_page();
        }
        render_label(surface, instance, config.primary_font_size, options);
    }

    Ok(instances.len())
}

/// A finished PDF ready to be saved or sent.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Render all instances into a PDF named after `date` and `label`.
pub fn generate_pdf(
    instances: &[LabelInstance],
    config: &LabelJobConfig,
    font: &LabelFont,
    options: &RenderOptions,
    date: NaiveDate,
    label: &str,
) -> Result<GeneratedDocument> {
    let geometry = &options.geometry;
    let mut surface = PdfSurface::new(font.clone(), geometry.page_width, geometry.page_height)?;
    let pages = assemble(&mut surface, instances, config, options)?;
    let bytes = surface.finish()?;
    let filename = document_filename(date, label);

    info!(%filename, pages, size = bytes.len(), "generated label document");
    Ok(GeneratedDocument {
        filename,
        bytes,
        pages,
    })
}

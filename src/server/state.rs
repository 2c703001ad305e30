//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::document::DEFAULT_DOCUMENT_LABEL;
use crate::font::LabelFont;
use crate::layout::RenderOptions;
use crate::preview::DEFAULT_DPI;
use crate::sheet::FieldKeywords;
use crate::store::{DEFAULT_LIST_TTL, ProductSource};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// TrueType font used for PDFs and previews
    pub font_path: Option<PathBuf>,
    /// Header keywords used when parsing uploads
    pub keywords: FieldKeywords,
    pub render: RenderOptions,
    /// Product label part of generated file names
    pub document_label: String,
    /// Default preview resolution
    pub preview_dpi: f32,
    /// Idle time after which an uploaded product list is dropped
    pub list_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            font_path: None,
            keywords: FieldKeywords::default(),
            render: RenderOptions::default(),
            document_label: DEFAULT_DOCUMENT_LABEL.to_string(),
            preview_dpi: DEFAULT_DPI,
            list_ttl: DEFAULT_LIST_TTL,
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// `None` when started without a font; PDF and preview are then refused.
    pub font: Option<LabelFont>,
    pub products: Arc<dyn ProductSource>,
}

impl AppState {
    pub fn new(config: ServerConfig, font: Option<LabelFont>, products: Arc<dyn ProductSource>) -> Self {
        Self {
            config,
            font,
            products,
        }
    }
}

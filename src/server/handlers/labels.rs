//! Label statistics, PDF generation and previews for an uploaded list.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResult};
use crate::document;
use crate::font::LabelFont;
use crate::labels::{self, LabelJobConfig, LabelStats};
use crate::preview;
use crate::server::state::AppState;
use crate::sheet::ProductRecord;

/// Request body shared by the label endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LabelRequest {
    #[serde(default)]
    pub config: LabelJobConfig,
    /// Product ids to include; every product when absent.
    #[serde(default)]
    pub selected: Option<Vec<String>>,
}

/// Query parameters for the preview endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub index: usize,
}

/// Look up the stored list, apply the selection and validate the config.
fn resolve(state: &AppState, id: &str, request: &LabelRequest) -> ApiResult<Vec<ProductRecord>> {
    let products = state
        .products
        .get(id)
        .ok_or_else(|| ApiError::not_found(id))?;
    request.config.validate()?;

    match &request.selected {
        Some(ids) => Ok(labels::select(&products, ids.as_slice())?),
        None => Ok(products),
    }
}

fn require_font(state: &AppState) -> ApiResult<LabelFont> {
    state.font.clone().ok_or_else(|| {
        ApiError::bad_request("Server was started without a font; pass --font to enable rendering")
    })
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 name.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' { c } else { '_' })
        .collect();
    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

/// POST /api/labels/:id/stats - Count labels for the given settings.
pub async fn stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<LabelRequest>,
) -> ApiResult<Json<LabelStats>> {
    let products = resolve(&state, &id, &request)?;
    Ok(Json(LabelStats::compute(&products, &request.config)))
}

/// POST /api/labels/:id/pdf - Generate the label document.
pub async fn pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<LabelRequest>,
) -> ApiResult<impl IntoResponse> {
    let products = resolve(&state, &id, &request)?;
    let font = require_font(&state)?;
    let options = state.config.render;
    let label = state.config.document_label.clone();
    let config = request.config;
    let date = chrono::Local::now().date_naive();

    let generated = tokio::task::spawn_blocking(move || {
        let instances = labels::expand(&products, &config)?;
        document::generate_pdf(&instances, &config, &font, &options, date, &label)
    })
    .await??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&generated.filename),
            ),
        ],
        generated.bytes,
    ))
}

/// POST /api/labels/:id/preview?index=N - Render one label as PNG.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
    Json(request): Json<LabelRequest>,
) -> ApiResult<impl IntoResponse> {
    let products = resolve(&state, &id, &request)?;
    let font = require_font(&state)?;
    let options = state.config.render;
    let dpi = state.config.preview_dpi;
    let config = request.config;
    let index = query.index;

    let png = tokio::task::spawn_blocking(move || {
        let instances = labels::expand(&products, &config)?;
        let count = instances.len();
        match instances.get(index) {
            Some(instance) => preview::render_preview(instance, &config, &font, &options, dpi)
                .map_err(ApiError::from),
            None => Err(ApiError::bad_request(format!(
                "Label index {} out of range ({} labels)",
                index, count
            ))),
        }
    })
    .await??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_encodes_utf8() {
        let value = content_disposition("20260307_华旺标签.pdf");
        assert!(value.starts_with("attachment; filename=\"20260307_____.pdf\""));
        assert!(value.ends_with("filename*=UTF-8''20260307_%E5%8D%8E%E6%97%BA%E6%A0%87%E7%AD%BE.pdf"));
    }
}

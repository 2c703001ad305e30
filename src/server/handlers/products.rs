//! Spreadsheet upload and product listing.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::{ApiError, ApiResult};
use crate::labels;
use crate::server::state::AppState;
use crate::sheet::{self, ProductRecord};

/// Multipart field carrying the workbook.
const UPLOAD_FIELD: &str = "file";

/// Response from the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: String,
    pub filename: String,
    pub products: Vec<ProductRecord>,
}

/// Query parameters for listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
}

/// POST /api/products - Upload a workbook and parse its products.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.xlsx").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::bad_request("No 'file' field found"))?;
    sheet::source::check_extension(&filename)?;

    let keywords = state.config.keywords.clone();
    let products = tokio::task::spawn_blocking(move || {
        let grid = sheet::grid_from_bytes(bytes)?;
        sheet::parse_products(&grid, &keywords)
    })
    .await??;

    let id = Uuid::new_v4().to_string();
    state.products.set(&id, products.clone());
    info!(%id, %filename, products = products.len(), "parsed upload");

    Ok(Json(UploadResponse {
        id,
        filename,
        products,
    }))
}

/// GET /api/products/:id?q= - List stored products, optionally filtered.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ProductRecord>>> {
    let products = state
        .products
        .get(&id)
        .ok_or_else(|| ApiError::not_found(&id))?;

    let matches = labels::search(&products, &query.q)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matches))
}

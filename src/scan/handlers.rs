use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::instrument;

use crate::{
    error::ApiError,
    scan::{dto::ScanResponse, services::scan_image},
    state::AppState,
};

pub fn scan_routes() -> Router<AppState> {
    Router::new().route("/scan", post(scan))
}

#[instrument(skip(state, multipart))]
async fn scan(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, ApiError> {
    let mut image: Option<Bytes> = None;
    let mut lang_hint: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("failed to read image file: {e}")))?;
                image = Some(bytes);
            }
            Some("lang") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(format!("failed to read lang field: {e}")))?;
                lang_hint = Some(value);
            }
            _ => {}
        }
    }

    let image = image.unwrap_or_default();
    let text = scan_image(state.extractor.as_ref(), &image, lang_hint.as_deref()).await?;
    Ok(Json(ScanResponse { text }))
}

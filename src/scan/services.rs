use tracing::info;

use crate::{
    error::ApiError,
    scan::{
        lang::{normalize_languages, DEFAULT_LANGUAGE},
        ocr::TextExtractor,
    },
};

/// Validate and run one OCR request: require image bytes, normalize the
/// language hint, delegate to the extractor. No retries and no fallback to a
/// different language set on extraction failure.
pub async fn scan_image(
    extractor: &dyn TextExtractor,
    image: &[u8],
    lang_hint: Option<&str>,
) -> Result<String, ApiError> {
    if image.is_empty() {
        return Err(ApiError::MissingInput("no image file provided".into()));
    }

    let languages = normalize_languages(lang_hint.unwrap_or(DEFAULT_LANGUAGE))?;
    info!(languages = %languages, "ocr languages finalized");

    let text = extractor
        .extract(image, &languages)
        .await
        .map_err(ApiError::Extraction)?;
    Ok(text)
}

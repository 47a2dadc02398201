use serde::Serialize;

/// Response body for a successful scan.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub text: String,
}

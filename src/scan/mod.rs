use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod lang;
pub mod ocr;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::scan_routes())
}

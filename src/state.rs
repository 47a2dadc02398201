use std::{sync::Arc, time::Instant};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    auth::{jwt::JwtKeys, repo::PgUserDirectory, services::IdentityService},
    config::AppConfig,
    scan::ocr::{TesseractOcr, TextExtractor},
};

#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Arc<AppConfig>,
    // Set once at startup; read-only afterwards.
    pub started_at: Instant,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let identity = IdentityService::new(
            Arc::new(PgUserDirectory::new(pool)),
            JwtKeys::new(&config.jwt),
        );
        let extractor =
            Arc::new(TesseractOcr::new(config.tesseract_cmd.clone())) as Arc<dyn TextExtractor>;

        Ok(Self {
            identity,
            extractor,
            config,
            started_at: Instant::now(),
        })
    }
}

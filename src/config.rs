use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub tesseract_cmd: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let secret = std::env::var("JWT_SECRET")?;
        anyhow::ensure!(!secret.is_empty(), "JWT_SECRET must not be empty");
        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "textlens".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "users".into()),
        };
        let tesseract_cmd = std::env::var("TESSERACT_CMD").unwrap_or_else(|_| "tesseract".into());
        Ok(Self {
            database_url,
            jwt,
            tesseract_cmd,
        })
    }
}

use anyhow::Result;

/// Environment-driven application settings.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Reads `CORS_ALLOWED_ORIGINS` (comma-separated). An empty list means
    /// any origin is allowed.
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|origin| {
                let trimmed = origin.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
        Ok(Self {
            cors_allowed_origins,
        })
    }
}

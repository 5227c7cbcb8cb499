pub mod domain;
pub mod ingest;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub fmp_base_url: Option<String>,
        pub fmp_api_key: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                fmp_base_url: std::env::var("FMP_BASE_URL").ok(),
                fmp_api_key: std::env::var("FMP_API_KEY").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_fmp_api_key(&self) -> anyhow::Result<&str> {
            self.fmp_api_key
                .as_deref()
                .context("FMP_API_KEY is required")
        }
    }
}

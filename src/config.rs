use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::i18n::DEFAULT_LANG;

/// Application-level constants
pub const APP_NAME: &str = "Safedose";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/Safedose/ on all platforms
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Safedose")
}

pub fn default_log_filter() -> &'static str {
    "safedose=info"
}

/// Initialize tracing for binaries/hosts embedding the engine.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .init();
}

/// Explanation service (local Ollama instance) settings.
#[derive(Debug, Clone)]
pub struct ExplainConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "medgemma:4b".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Everything the orchestrator needs, constructed explicitly at startup.
/// No ambient globals: hosts build one of these and pass it down.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub db_path: PathBuf,
    pub explain: ExplainConfig,
    pub default_lang: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: app_data_dir().join("safedose.db"),
            explain: ExplainConfig::default(),
            default_lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `SAFEDOSE_DB`, `SAFEDOSE_OLLAMA_URL`,
    /// `SAFEDOSE_MODEL` and `SAFEDOSE_LANG`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(db) = std::env::var("SAFEDOSE_DB") {
            config.db_path = PathBuf::from(db);
        }
        if let Ok(url) = std::env::var("SAFEDOSE_OLLAMA_URL") {
            config.explain.base_url = url;
        }
        if let Ok(model) = std::env::var("SAFEDOSE_MODEL") {
            config.explain.model = model;
        }
        if let Ok(lang) = std::env::var("SAFEDOSE_LANG") {
            config.default_lang = lang;
        }
        config
    }
}

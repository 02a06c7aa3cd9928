use crate::error::Result;
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CATALOG_PATH: &str = "data/tourism_data.json";
const DEFAULT_CREDENTIALS_PATH: &str = "config.json";
const DEFAULT_AI_BASE_URL: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";
const DEFAULT_AI_MODEL: &str = "qwen-turbo";
const DEFAULT_AI_TEMPERATURE: f64 = 0.1;
const DEFAULT_AI_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOP_N: usize = crate::services::recommendation::DEFAULT_TOP_N;

/// Runtime settings, layered as defaults < `recommend.toml` < `APP_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub catalog_path: PathBuf,
    /// JSON document holding `{"ali_api": {"api_key": "..."}}`
    pub credentials_path: PathBuf,
    pub ai_base_url: String,
    pub ai_model: String,
    pub ai_temperature: f64,
    pub ai_timeout_secs: u64,
    pub default_top_n: usize,
    /// Takes precedence over the credentials document when set
    #[serde(default)]
    pub ai_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_temperature: DEFAULT_AI_TEMPERATURE,
            ai_timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
            default_top_n: DEFAULT_TOP_N,
            ai_api_key: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("catalog_path", DEFAULT_CATALOG_PATH)?
            .set_default("credentials_path", DEFAULT_CREDENTIALS_PATH)?
            .set_default("ai_base_url", DEFAULT_AI_BASE_URL)?
            .set_default("ai_model", DEFAULT_AI_MODEL)?
            .set_default("ai_temperature", DEFAULT_AI_TEMPERATURE)?
            .set_default("ai_timeout_secs", DEFAULT_AI_TIMEOUT_SECS as i64)?
            .set_default("default_top_n", DEFAULT_TOP_N as i64)?
            .add_source(File::with_name("recommend").required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The bearer credential for the chat-completion service, if one is configured.
    ///
    /// A missing, unreadable or blank credential yields `None`; callers treat that
    /// as "AI extraction unavailable" rather than as an error.
    pub fn api_key(&self) -> Option<String> {
        if let Some(key) = non_blank(self.ai_api_key.as_deref()) {
            return Some(key);
        }
        read_credentials(&self.credentials_path)
    }
}

fn read_credentials(path: &Path) -> Option<String> {
    if !path.exists() {
        debug!("No credentials document at {}", path.display());
        return None;
    }

    let document = config::Config::builder()
        .add_source(File::from(path).format(FileFormat::Json))
        .build();

    match document {
        Ok(document) => non_blank(document.get_string("ali_api.api_key").ok().as_deref()),
        Err(e) => {
            warn!("Ignoring unreadable credentials document {}: {}", path.display(), e);
            None
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

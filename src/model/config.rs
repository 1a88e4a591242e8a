use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "BRIEF_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
const ENV_JSEARCH_API_KEY: &str = "JSEARCH_API_KEY";
const ENV_GROQ_API_KEY: &str = "GROQ_API_KEY";
const ENV_LLM_MODEL: &str = "BRIEF_LLM_MODEL";
const ENV_NEWS_BASE_URL: &str = "NEWS_API_BASE_URL";
const ENV_JSEARCH_BASE_URL: &str = "JSEARCH_BASE_URL";
const ENV_GROQ_BASE_URL: &str = "GROQ_BASE_URL";

pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsdata.io/api/1";
pub const DEFAULT_JSEARCH_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama3-70b-8192";

/// Non-secret provider settings that may come from the YAML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderFileConfig {
    pub news_base_url: Option<String>,
    pub jsearch_base_url: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub providers: ProviderFileConfig,
}

/// Upstream provider settings
///
/// Each API key is optional. A missing key switches the matching feature off
/// (no news, no jobs, or placeholder analysis) without failing requests.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub news_api_key: Option<String>,
    pub news_base_url: String,
    pub jsearch_api_key: Option<String>,
    pub jsearch_base_url: String,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            news_base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            jsearch_api_key: None,
            jsearch_base_url: DEFAULT_JSEARCH_BASE_URL.to_string(),
            llm_api_key: None,
            llm_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Resolve provider settings; `lookup` values win over the file, the file over defaults
    pub fn resolve(file: ProviderFileConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            news_api_key: var(ENV_NEWS_API_KEY),
            news_base_url: var(ENV_NEWS_BASE_URL)
                .or(file.news_base_url)
                .unwrap_or(defaults.news_base_url),
            jsearch_api_key: var(ENV_JSEARCH_API_KEY),
            jsearch_base_url: var(ENV_JSEARCH_BASE_URL)
                .or(file.jsearch_base_url)
                .unwrap_or(defaults.jsearch_base_url),
            llm_api_key: var(ENV_GROQ_API_KEY),
            llm_base_url: var(ENV_GROQ_BASE_URL)
                .or(file.llm_base_url)
                .unwrap_or(defaults.llm_base_url),
            llm_model: var(ENV_LLM_MODEL)
                .or(file.llm_model)
                .unwrap_or(defaults.llm_model),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub providers: ProviderConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: ProviderConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path)
            .map(|cf| cf.providers)
            .unwrap_or_default();

        let providers = ProviderConfig::resolve(file, |name| std::env::var(name).ok());

        tracing::info!(
            news = providers.news_api_key.is_some(),
            jobs = providers.jsearch_api_key.is_some(),
            synthesis = providers.llm_api_key.is_some(),
            model = %providers.llm_model,
            "Provider features resolved"
        );

        Self {
            providers,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                return None;
            }
        };

        parse_config_file(&contents).or_else(|| {
            tracing::warn!(path = %path.display(), "Failed to parse config file, using defaults");
            None
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_config_file(contents: &str) -> Option<ConfigFile> {
    let contents = contents.trim();
    if contents.is_empty() {
        return Some(ConfigFile::default());
    }
    serde_yaml::from_str(contents).ok()
}

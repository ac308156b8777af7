use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, Environment, File};

pub const ENV_PREFIX: &str = "SENTIMENT";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads; 0 lets actix pick one per core
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            workers: 0,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub vectorizer_path: String,
    pub classifier_path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: "models/tfidf_vectorizer.json".to_string(),
            classifier_path: "models/lr_model.json".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LexiconConfig {
    pub data_dir: String,
    /// Download source for a missing stop-word file; the bundled copy is used when unset
    pub stopwords_url: Option<String>,
    /// Download source for a missing lemma file; the bundled copy is used when unset
    pub lemmas_url: Option<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            data_dir: "nlp_data".to_string(),
            stopwords_url: None,
            lemmas_url: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Compact,
    Json,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info` or `sentiment_service=debug,actix_web=info`
    pub level: String,
    pub format: LogFormat,
    pub console: ConsoleTarget,
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            console: ConsoleTarget::Stdout,
            file_path: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub lexicon: LexiconConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Loads settings from `path`, then environment overrides such as `SENTIMENT_SERVER__PORT`.
    pub fn load(path: &str, required: bool) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

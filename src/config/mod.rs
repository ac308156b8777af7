pub mod application_settings;

pub use application_settings::{
    ConsoleTarget, LexiconConfig, LogFormat, LoggingConfig, ModelConfig, ServerConfig, Settings,
    DEFAULT_CONFIG_FILE, ENV_PREFIX,
};

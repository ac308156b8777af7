/*
CLI Module

Command line arguments for the two binaries: the prediction service and the terminal
client. Values given on the command line win over the configuration file and environment.
*/
use clap::Parser;

use crate::config::{Settings, DEFAULT_CONFIG_FILE};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Parser, Debug)]
#[command(name = "sentiment-service", version, about = "Serve sentiment predictions over HTTP")]
pub struct ServiceArgs {
    /// Configuration file; a missing file is only an error when passed explicitly
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Overrides `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServiceArgs {
    pub fn config_path(&self) -> (&str, bool) {
        match self.config.as_deref() {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_FILE, false),
        }
    }

    pub fn load_settings(&self) -> Result<Settings, config::ConfigError> {
        let (path, required) = self.config_path();
        let mut settings = Settings::load(path, required)?;
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sentiment-ui", version, about = "Analyze movie reviews from the terminal")]
pub struct UiArgs {
    /// Base URL of the prediction service
    #[arg(long, env = "SENTIMENT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Analyze this review once and exit instead of prompting
    #[arg(short, long)]
    pub review: Option<String>,
}

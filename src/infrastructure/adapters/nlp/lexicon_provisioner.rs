/*
Lexicon Provisioner

Makes sure the stop-word and lemma files exist in the configured data directory before the
service starts answering requests. Each missing file is fetched exactly once: downloaded from
its configured URL when there is one, otherwise written out from the bundled copy. Files that
already exist are never touched, so later starts read them straight from disk.
*/
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::application::ports::input::nlp_port::NlpPortError;
use crate::config::LexiconConfig;
use crate::infrastructure::adapters::nlp::lexicon::{Lexicon, BUNDLED_LEMMAS, BUNDLED_STOPWORDS};

pub const STOPWORDS_FILE: &str = "stopwords_english.txt";
pub const LEMMAS_FILE: &str = "lemmas_english.txt";

#[derive(Debug, Clone)]
pub struct LexiconProvisioner {
    data_dir: PathBuf,
    stopwords_url: Option<String>,
    lemmas_url: Option<String>,
    client: reqwest::Client,
}

impl LexiconProvisioner {
    pub fn new(config: &LexiconConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            stopwords_url: config.stopwords_url.clone(),
            lemmas_url: config.lemmas_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn stopwords_path(&self) -> PathBuf {
        self.data_dir.join(STOPWORDS_FILE)
    }

    pub fn lemmas_path(&self) -> PathBuf {
        self.data_dir.join(LEMMAS_FILE)
    }

    /// Fetches whichever resource files are missing.
    pub async fn ensure_resources(&self) -> Result<(), NlpPortError> {
        self.ensure_resource(&self.stopwords_path(), self.stopwords_url.as_deref(), BUNDLED_STOPWORDS)
            .await?;
        self.ensure_resource(&self.lemmas_path(), self.lemmas_url.as_deref(), BUNDLED_LEMMAS)
            .await?;
        Ok(())
    }

    /// Provisions and loads the lexicon, falling back to the bundled copy on any failure.
    pub async fn provision(&self) -> Lexicon {
        let loaded = match self.ensure_resources().await {
            Ok(()) => Lexicon::from_files(&self.stopwords_path(), &self.lemmas_path()),
            Err(e) => Err(e),
        };

        match loaded {
            Ok(lexicon) => {
                info!(
                    data_dir = %self.data_dir.display(),
                    stop_words = lexicon.stop_words.len(),
                    lemma_entries = lexicon.lemmatizer.len(),
                    "lexicon loaded"
                );
                lexicon
            }
            Err(e) => {
                warn!(error = %e, "lexicon provisioning failed, using bundled resources");
                Lexicon::bundled()
            }
        }
    }

    async fn ensure_resource(
        &self,
        path: &Path,
        url: Option<&str>,
        bundled: &str,
    ) -> Result<(), NlpPortError> {
        if tokio::fs::try_exists(path).await? {
            return Ok(());
        }

        let content = match url {
            Some(url) => {
                info!(%url, path = %path.display(), "downloading lexicon resource");
                self.download(url).await?
            }
            None => {
                info!(path = %path.display(), "writing bundled lexicon resource");
                bundled.to_string()
            }
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // write then rename so a half-written file is never picked up on the next start
        let partial = path.with_extension("part");
        tokio::fs::write(&partial, content).await?;
        tokio::fs::rename(&partial, path).await?;
        Ok(())
    }

    async fn download(&self, url: &str) -> Result<String, NlpPortError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NlpPortError::DownloadFailed(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(NlpPortError::DownloadFailed(format!(
                "{}: HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| NlpPortError::DownloadFailed(format!("{}: {}", url, e)))
    }
}

//! Export client: trigger export jobs and download the resulting files

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::ExporterConfig;
use crate::core::errors::{ExportError, Result};
use crate::core::models::{ExportParams, ExportRequest, ExportResult};

/// Client for the POEditor export endpoint
#[derive(Debug, Clone)]
pub struct Exporter {
    client: reqwest::Client,
    config: Arc<ExporterConfig>,
}

impl Exporter {
    /// Create a new exporter
    pub fn new(config: ExporterConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Self::new(ExporterConfig::from_env()?)
    }

    /// Submit an export job and classify the API answer
    pub async fn submit_export(&self, request: &ExportRequest) -> Result<ExportResult> {
        debug!(
            "Submitting export for project {} language {} as {}",
            request.project_id, request.language, request.file_format
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .form(&request.form_fields())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ExportError::InvalidResponseError {
                message: e.to_string(),
            })?;

        debug!("Export response: {}", json);

        Ok(ExportResult::from_response(&json))
    }

    /// Download `url` and write its bytes to `dest`, returning the byte count
    ///
    /// The content lands in a sibling `.part` file first and is renamed over
    /// `dest`, replacing any previous export.
    pub async fn download_and_save(&self, url: &str, dest: &Path) -> Result<u64> {
        debug!("Downloading {}", url);

        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let mut part = dest.as_os_str().to_owned();
        part.push(".part");
        let part = PathBuf::from(part);

        let file_error = |e: std::io::Error| ExportError::FileError {
            path: dest.display().to_string(),
            message: e.to_string(),
        };

        if let Err(e) = tokio::fs::write(&part, &bytes).await {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(file_error(e));
        }

        if let Err(e) = tokio::fs::rename(&part, dest).await {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(file_error(e));
        }

        Ok(bytes.len() as u64)
    }

    /// Export one language end to end
    pub async fn export_language(&self, params: &ExportParams, language: &str) -> Result<PathBuf> {
        info!("Retrieving translations for language: {}", language);

        let request = params.request_for(language);
        let url = self.submit_export(&request).await?.into_download_url()?;

        let path = params.output_path(language);
        let size = self.download_and_save(&url, &path).await?;

        info!("File {} created ({} bytes)", path.display(), size);
        Ok(path)
    }

    /// Export every language in order, stopping at the first failure
    ///
    /// `on_language` is called with the position and code of each language
    /// just before it is exported.
    pub async fn export_all<F>(
        &self,
        params: &ExportParams,
        languages: &[String],
        mut on_language: F,
    ) -> Result<Vec<PathBuf>>
    where
        F: FnMut(usize, &str),
    {
        info!("Retrieving translations for languages {:?}", languages);

        let mut written = Vec::with_capacity(languages.len());
        for (index, language) in languages.iter().enumerate() {
            on_language(index, language);
            written.push(self.export_language(params, language).await?);
        }

        Ok(written)
    }
}

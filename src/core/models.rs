//! Core data models for exports

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::core::errors::INVALID_REQUEST_MESSAGE;

/// File format of an export, also used as the output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum FileFormat {
    Po,
    Pot,
    Mo,
    Xls,
    Xlsx,
    Csv,
    Ini,
    Resw,
    Resx,
    AndroidStrings,
    AppleStrings,
    Xliff,
    Properties,
    KeyValueJson,
    Json,
    Yml,
    Xlf,
    Xmb,
    Xtb,
    Arb,
    #[serde(rename = "rise_360_xliff")]
    #[value(name = "rise_360_xliff")]
    Rise360Xliff,
}

impl FileFormat {
    /// Name expected by the API `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Po => "po",
            FileFormat::Pot => "pot",
            FileFormat::Mo => "mo",
            FileFormat::Xls => "xls",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Csv => "csv",
            FileFormat::Ini => "ini",
            FileFormat::Resw => "resw",
            FileFormat::Resx => "resx",
            FileFormat::AndroidStrings => "android_strings",
            FileFormat::AppleStrings => "apple_strings",
            FileFormat::Xliff => "xliff",
            FileFormat::Properties => "properties",
            FileFormat::KeyValueJson => "key_value_json",
            FileFormat::Json => "json",
            FileFormat::Yml => "yml",
            FileFormat::Xlf => "xlf",
            FileFormat::Xmb => "xmb",
            FileFormat::Xtb => "xtb",
            FileFormat::Arb => "arb",
            FileFormat::Rise360Xliff => "rise_360_xliff",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation-status predicate narrowing an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Filter {
    Translated,
    Untranslated,
    Fuzzy,
    NotFuzzy,
    Automatic,
    NotAutomatic,
    Proofread,
    NotProofread,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::Translated => "translated",
            Filter::Untranslated => "untranslated",
            Filter::Fuzzy => "fuzzy",
            Filter::NotFuzzy => "not_fuzzy",
            Filter::Automatic => "automatic",
            Filter::NotAutomatic => "not_automatic",
            Filter::Proofread => "proofread",
            Filter::NotProofread => "not_proofread",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters shared by every language of a run
///
/// Holds everything except the language list; each language gets its own
/// [`ExportRequest`] through [`ExportParams::request_for`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportParams {
    pub api_token: String,
    pub project_id: String,
    pub file_format: FileFormat,
    pub filters: Option<Vec<Filter>>,
    pub order: String,
    pub tags: Option<Vec<String>>,
    pub dest: PathBuf,
    pub filename: String,
}

impl ExportParams {
    pub fn new(
        api_token: impl Into<String>,
        project_id: impl Into<String>,
        file_format: FileFormat,
        dest: impl Into<PathBuf>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            project_id: project_id.into(),
            file_format,
            filters: None,
            order: "terms".to_string(),
            tags: None,
            dest: dest.into(),
            filename: filename.into(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Build the request for a single language
    pub fn request_for(&self, language: &str) -> ExportRequest {
        ExportRequest {
            api_token: self.api_token.clone(),
            project_id: self.project_id.clone(),
            language: language.to_string(),
            file_format: self.file_format,
            filters: self.filters.clone(),
            order: self.order.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Destination of the exported file: `{dest}{filename}_{language}.{format}`
    pub fn output_path(&self, language: &str) -> PathBuf {
        self.dest
            .join(format!("{}_{}.{}", self.filename, language, self.file_format))
    }
}

/// A single export job for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub api_token: String,
    pub project_id: String,
    pub language: String,
    pub file_format: FileFormat,
    pub filters: Option<Vec<Filter>>,
    pub order: String,
    pub tags: Option<Vec<String>>,
}

impl ExportRequest {
    /// Form fields sent to the export endpoint
    ///
    /// Filters and tags repeat their key once per value and are omitted
    /// entirely when not set.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("api_token", self.api_token.clone()),
            ("id", self.project_id.clone()),
            ("language", self.language.clone()),
            ("type", self.file_format.as_str().to_string()),
            ("order", self.order.clone()),
        ];

        if let Some(filters) = &self.filters {
            fields.extend(filters.iter().map(|f| ("filters", f.as_str().to_string())));
        }

        if let Some(tags) = &self.tags {
            fields.extend(tags.iter().map(|t| ("tags", t.clone())));
        }

        fields
    }
}

/// Outcome of an export request as reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResult {
    Success { download_url: String },
    Failure { message: String },
}

impl ExportResult {
    /// Classify a parsed export response body
    pub fn from_response(json: &serde_json::Value) -> Self {
        let status = json["response"]["status"].as_str();

        if let Some(url) = json["result"]["url"].as_str() {
            if !url.is_empty() && matches!(status, None | Some("success")) {
                return ExportResult::Success {
                    download_url: url.to_string(),
                };
            }
        }

        if status == Some("fail") {
            let message = json["response"]["message"]
                .as_str()
                .unwrap_or(INVALID_REQUEST_MESSAGE)
                .to_string();
            return ExportResult::Failure { message };
        }

        ExportResult::Failure {
            message: INVALID_REQUEST_MESSAGE.to_string(),
        }
    }

    /// Download URL, or the API failure as an error
    pub fn into_download_url(self) -> crate::core::errors::Result<String> {
        match self {
            ExportResult::Success { download_url } => Ok(download_url),
            ExportResult::Failure { message } => {
                Err(crate::core::errors::ExportError::ApiError { message })
            }
        }
    }
}

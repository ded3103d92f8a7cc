//! CLI argument definitions and handlers

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::errors::ExportError;
use crate::core::models::{ExportParams, FileFormat, Filter};

/// Comma separated list of language codes, e.g. `en,fr,es`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageList(pub Vec<String>);

impl FromStr for LanguageList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let languages: Vec<String> = s.split(',').map(|l| l.trim().to_string()).collect();
        if languages.iter().any(|l| l.is_empty()) {
            return Err(format!("invalid language list '{}': empty language code", s));
        }
        Ok(Self(languages))
    }
}

/// Parse one tag of the comma separated `--tags` list
fn parse_tag(s: &str) -> Result<String, String> {
    let tag = s.trim();
    if tag.is_empty() {
        return Err("empty tag".to_string());
    }
    Ok(tag.to_string())
}

/// POEditor Exporter - export translations for several languages at once
#[derive(Parser, Debug)]
#[command(name = "poeditor-exporter", version, about, long_about = None)]
pub struct Cli {
    /// Your POEditor API token
    pub api_token: String,

    /// The id of the project
    pub id: String,

    /// List of languages, comma separated
    pub languages: LanguageList,

    /// Destination directory to download files. Should end with '/'
    pub dest: PathBuf,

    /// The name to give to the file once downloaded. Suffixed by the language
    pub filename: String,

    /// The file format
    #[arg(value_name = "TYPE")]
    pub file_type: FileFormat,

    /// Filters results, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub filters: Option<Vec<Filter>>,

    /// Order of the export
    #[arg(short, long, default_value = "terms")]
    pub order: String,

    /// Filter results by tags, comma separated
    #[arg(short, long, value_delimiter = ',', value_parser = parse_tag)]
    pub tags: Option<Vec<String>>,

    /// JSON configuration file (API URL, timeout)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Shared export parameters; the language list stays out of them
    pub fn export_params(&self) -> ExportParams {
        let mut params = ExportParams::new(
            self.api_token.clone(),
            self.id.clone(),
            self.file_type,
            self.dest.clone(),
            self.filename.clone(),
        )
        .with_order(self.order.clone());

        if let Some(filters) = &self.filters {
            params = params.with_filters(filters.clone());
        }
        if let Some(tags) = &self.tags {
            params = params.with_tags(tags.clone());
        }

        params
    }

    pub fn language_codes(&self) -> &[String] {
        &self.languages.0
    }
}

/// Handle the export command
pub async fn handle_export(cli: Cli) -> anyhow::Result<()> {
    use crate::core::client::Exporter;
    use crate::core::config::ExporterConfig;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;
    use tracing::info;

    let start_time = Instant::now();

    let exporter = match &cli.config {
        Some(path) => Exporter::new(ExporterConfig::from_file(path)?)?,
        None => Exporter::from_env()?,
    };

    let params = cli.export_params();
    let languages = cli.language_codes();

    if !params.dest.is_dir() {
        return Err(ExportError::ArgumentError {
            message: format!("destination {} is not a directory", params.dest.display()),
        }
        .into());
    }

    info!("Destination: {}", params.dest.display());
    info!("Format: {}", params.file_format);

    let pb = ProgressBar::new(languages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let result = exporter
        .export_all(&params, languages, |index, language| {
            pb.set_position(index as u64);
            pb.set_message(format!("Exporting: {}", language));
        })
        .await;

    let written = match result {
        Ok(written) => {
            pb.finish_with_message("Completed");
            written
        }
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };

    let duration = start_time.elapsed();
    info!("Exported {} files in {:?}", written.len(), duration);

    println!("\n✅ Export completed!");
    for path in &written {
        println!("   {}", path.display());
    }
    println!("   Time: {:?}", duration);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg_list() -> Vec<&'static str> {
        vec![
            "poeditor-exporter",
            "key0102",
            "id123",
            "en,fr,es",
            "/home/user/download/",
            "translation",
            "po",
        ]
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(arg_list()).unwrap();

        assert_eq!(cli.api_token, "key0102");
        assert_eq!(cli.id, "id123");
        assert_eq!(cli.language_codes(), ["en", "fr", "es"]);
        assert_eq!(cli.dest, PathBuf::from("/home/user/download/"));
        assert_eq!(cli.filename, "translation");
        assert_eq!(cli.file_type, FileFormat::Po);
        assert_eq!(cli.order, "terms");
        assert!(cli.filters.is_none());
        assert!(cli.tags.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_optional_flags() {
        let mut args = arg_list();
        args.extend(["-f", "fuzzy,not_proofread", "-o", "reference", "--tags", "special_tags,v2"]);
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.filters, Some(vec![Filter::Fuzzy, Filter::NotProofread]));
        assert_eq!(cli.order, "reference");
        assert_eq!(cli.tags, Some(vec!["special_tags".to_string(), "v2".to_string()]));
    }

    #[test]
    fn test_missing_positionals_rejected() {
        let full = arg_list();
        for len in 1..full.len() {
            assert!(
                Cli::try_parse_from(&full[..len]).is_err(),
                "{} arguments should be rejected",
                len - 1
            );
        }
    }

    #[test]
    fn test_invalid_type_rejected() {
        let mut args = arg_list();
        args[6] = "random_type";
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let mut args = arg_list();
        args[6] = "properties";
        args.extend(["-f", "no_filter"]);
        assert!(Cli::try_parse_from(args).is_err());

        let mut args = arg_list();
        args.extend(["-f", "fuzzy,bogus"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_empty_tag_rejected() {
        let mut args = arg_list();
        args.extend(["--tags", "a,,b"]);
        assert!(Cli::try_parse_from(args).is_err());

        let mut args = arg_list();
        args.extend(["-t", " release , mobile"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.tags, Some(vec!["release".to_string(), "mobile".to_string()]));
    }

    #[test]
    fn test_empty_language_rejected() {
        let mut args = arg_list();
        args[3] = "en,,fr";
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_export_params_exclude_languages() {
        let mut args = arg_list();
        args.extend(["-f", "translated", "-t", "special_tags"]);
        let cli = Cli::try_parse_from(args).unwrap();
        let params = cli.export_params();

        assert_eq!(params.api_token, "key0102");
        assert_eq!(params.project_id, "id123");
        assert_eq!(params.dest, PathBuf::from("/home/user/download/"));
        assert_eq!(params.filename, "translation");
        assert_eq!(params.file_format, FileFormat::Po);
        assert_eq!(params.filters, Some(vec![Filter::Translated]));
        assert_eq!(params.tags, Some(vec!["special_tags".to_string()]));

        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("languages").is_none());
        assert!(json.get("language").is_none());
    }

    #[tokio::test]
    async fn test_handle_export_rejects_missing_destination() {
        let mut args = arg_list();
        args[4] = "/nonexistent/poeditor/exports/";
        let cli = Cli::try_parse_from(args).unwrap();

        let err = handle_export(cli).await.unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}

//! POEditor Exporter - export POEditor translations to local files
//!
//! For each requested language the exporter triggers an export job on the
//! POEditor API, follows the returned download URL and stores the file as
//! `{dest}{filename}_{language}.{format}`.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::Exporter,
    config::ExporterConfig,
    errors::ExportError,
    models::{ExportParams, ExportRequest, ExportResult, FileFormat, Filter},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

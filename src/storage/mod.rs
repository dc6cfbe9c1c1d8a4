//! Report persistence.
//!
//! The rendered report is the only durable artifact. It is overwritten on
//! every run under the configured output directory.

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

pub use local::LocalStorage;

/// Backend that stores rendered reports.
#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Replace `filename` with `contents`, returning the written path.
    async fn write_report(&self, filename: &str, contents: &str) -> Result<PathBuf>;
}

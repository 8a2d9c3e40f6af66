//! Snapshot ingestion: fetch the exported document and build the model.

pub mod document_source;

pub use document_source::{load_document, source_from_config, DocumentSource, FileSource, HttpSource};

use tracing::error;

use crate::config::ViewerConfig;
use crate::core::sheet::{LoadError, Normalizer, SheetData};

/// Load and normalize the configured snapshot.
///
/// All-or-nothing: on any failure the error is logged and returned, and no
/// partial model is produced.
pub async fn initialize(config: &ViewerConfig) -> Result<SheetData, LoadError> {
    let result = load_sheet(config).await;
    if let Err(e) = &result {
        error!(error = %e, "Error loading and processing sheet data");
    }
    result
}

async fn load_sheet(config: &ViewerConfig) -> Result<SheetData, LoadError> {
    let source = source_from_config(&config.source)?;
    let document = load_document(source.as_ref()).await?;
    let (sheet, _report) = Normalizer::new(config.classification).normalize(&document);
    Ok(sheet)
}

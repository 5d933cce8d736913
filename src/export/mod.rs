pub mod csv_export;
pub mod json_export;

use serde::Serialize;
use thiserror::Error;

use crate::core::record::{DocumentRecord, TabularRecord};

pub use csv_export::CsvExporter;
pub use json_export::JsonExporter;

/// What a failed document shows in the name column of the report.
pub(crate) fn error_marker(file_name: &str) -> String {
    format!("ERROR: {file_name}")
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(
        "cannot write {path}: {source}; close any application that holds the \
         file open, or choose another destination folder"
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Renders a finished result set as tabular output. Exporters only consume
/// raw rows; a failed export leaves the result set untouched so the caller
/// can retry against another destination.
pub trait Exporter {
    fn export<F>(&self, records: &[DocumentRecord<F>]) -> Result<(), ExportError>
    where
        F: TabularRecord + Serialize;
}

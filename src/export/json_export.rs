use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::record::{DocumentRecord, TabularRecord};
use crate::export::{ExportError, Exporter};

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_path: PathBuf,
}

impl JsonExporter {
    pub fn new(out_path: PathBuf) -> Self {
        Self { out_path }
    }
}

impl Exporter for JsonExporter {
    fn export<F>(&self, records: &[DocumentRecord<F>]) -> Result<(), ExportError>
    where
        F: TabularRecord + Serialize,
    {
        let write_err = |source: std::io::Error| ExportError::Write {
            path: self.out_path.display().to_string(),
            source,
        };

        let data = serde_json::to_string_pretty(records)
            .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

        if let Some(parent) = self.out_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(&self.out_path, data).map_err(write_err)?;
        Ok(())
    }
}

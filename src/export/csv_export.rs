use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::record::{DocumentRecord, Outcome, TabularRecord};
use crate::export::{error_marker, ExportError, Exporter};

#[derive(Debug, Clone)]
pub struct CsvExporter {
    out_path: PathBuf,
}

impl CsvExporter {
    pub fn new(out_path: PathBuf) -> Self {
        Self { out_path }
    }

    fn write_row(buffer: &mut String, cells: &[String]) {
        let escaped: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
        buffer.push_str(&escaped.join(","));
        buffer.push('\n');
    }
}

impl Exporter for CsvExporter {
    fn export<F>(&self, records: &[DocumentRecord<F>]) -> Result<(), ExportError>
    where
        F: TabularRecord + Serialize,
    {
        let write_err = |source: std::io::Error| ExportError::Write {
            path: self.out_path.display().to_string(),
            source,
        };

        let mut buffer = String::new();
        let mut header = vec!["N°".to_string()];
        header.extend(F::headers().iter().map(|h| h.to_string()));
        Self::write_row(&mut buffer, &header);

        for (idx, record) in records.iter().enumerate() {
            let mut cells = vec![(idx + 1).to_string()];
            match &record.outcome {
                Outcome::Extracted { fields } => cells.extend(fields.row()),
                Outcome::Failed { .. } => {
                    // Error marker in the name column, remaining cells blank.
                    cells.push(error_marker(&record.file_name));
                    cells.extend(vec![String::new(); F::headers().len() - 1]);
                }
            }
            Self::write_row(&mut buffer, &cells);
        }

        if let Some(parent) = self.out_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(&self.out_path, buffer).map_err(write_err)?;
        Ok(())
    }
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

use serde::{Deserialize, Serialize};

/// Fields recovered from a ficha social sheet. An empty string means the
/// rule did not match; that is an expected outcome, not a failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialFields {
    pub full_name: String,
    pub dni: String,
    pub risk_level: String,
}

/// Fields recovered from a Trans-Segen resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionFields {
    pub full_name: String,
    pub case_number: String,
}

/// Per-document outcome. A document either yields a (possibly empty) set of
/// fields or a failure reason, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum Outcome<F> {
    Extracted { fields: F },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentRecord<F> {
    pub file_name: String,
    pub outcome: Outcome<F>,
}

impl<F> DocumentRecord<F> {
    pub fn extracted(file_name: impl Into<String>, fields: F) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: Outcome::Extracted { fields },
        }
    }

    pub fn failed(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: Outcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }

    pub fn fields(&self) -> Option<&F> {
        match &self.outcome {
            Outcome::Extracted { fields } => Some(fields),
            Outcome::Failed { .. } => None,
        }
    }
}

/// Raw row view consumed by the report exporters. The row number column is
/// owned by the exporter, not the record.
pub trait TabularRecord {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

impl TabularRecord for SocialFields {
    fn headers() -> &'static [&'static str] {
        &["Nombres y Apellidos", "DNI", "Nivel de Riesgo Social"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.dni.clone(),
            self.risk_level.clone(),
        ]
    }
}

impl TabularRecord for ResolutionFields {
    fn headers() -> &'static [&'static str] {
        &["Nombres y Apellidos", "Nro Trans-Segen"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.full_name.clone(), self.case_number.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn failed_record_carries_no_fields() {
        let record: DocumentRecord<SocialFields> =
            DocumentRecord::failed("ficha.pdf", "failed to open ficha.pdf");
        assert!(record.is_failed());
        assert_eq!(record.fields(), None);
        assert_eq!(record.file_name, "ficha.pdf");
    }

    #[test]
    fn row_follows_header_order() {
        let fields = SocialFields {
            full_name: "Juan Perez".into(),
            dni: "12345678".into(),
            risk_level: "Medio".into(),
        };
        assert_eq!(SocialFields::headers().len(), fields.row().len());
        assert_eq!(fields.row()[1], "12345678");
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let record = DocumentRecord::extracted("r.pdf", ResolutionFields::default());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"extracted\""));
    }
}

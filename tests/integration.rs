use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use pretty_assertions::assert_eq;

use fichascan::export::{CsvExporter, Exporter, JsonExporter};
use fichascan::extract::{social, FieldRule};
use fichascan::pipeline::{acquire_plain_text, run_batch};
use fichascan::provider::{PageText, ProviderError, TesseractEngine, TextOrigin, LAST_PAGE_MARKER};
use fichascan::{DocumentTemplate, ResolutionTemplate, Session, SocialFields, SocialTemplate};

fn temp_output_dir(prefix: &str) -> PathBuf {
    let mut out = std::env::temp_dir();
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();
    let pid = std::process::id();
    out.push(format!("{prefix}-{pid}-{now}"));
    out
}

/// Canned-text template so the whole batch-and-export path runs without
/// real PDFs. The extractor is the production one.
struct CannedTemplate {
    texts: BTreeMap<String, String>,
}

impl CannedTemplate {
    fn new(entries: &[(&str, &str)]) -> Self {
        let texts = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { texts }
    }
}

impl DocumentTemplate for CannedTemplate {
    type Fields = SocialFields;

    fn name(&self) -> &'static str {
        "canned"
    }

    fn acquire_text(&self, path: &Path) -> Result<PageText, ProviderError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let body = self.texts.get(&name).ok_or_else(|| ProviderError::Open {
            file: name.clone(),
            reason: "cannot be opened".to_string(),
        })?;

        let mut text = PageText::new();
        text.push_leading(0, TextOrigin::Embedded, body.clone());
        text.push_last(1, TextOrigin::Embedded, "Nivel de Riesgo Social\nBajo\nX".to_string());
        Ok(text)
    }

    fn extract_fields(&self, text: &str) -> SocialFields {
        social::extract(text)
    }

    fn rules(&self) -> &'static [FieldRule] {
        social::RULES
    }
}

#[test]
fn batch_isolates_failures_and_exports_one_row_per_document() -> Result<()> {
    let mut session = Session::new(CannedTemplate::new(&[
        ("ana.pdf", "Nombres y apellidos: ANA SOTO RIOS\nDNI: 11223344"),
        ("luz.pdf", "Nombres y apellidos: LUZ PAUCAR\nDNI: 55667788"),
    ]));
    session.add_files([
        PathBuf::from("ana.pdf"),
        PathBuf::from("rota.pdf"),
        PathBuf::from("luz.pdf"),
    ]);

    let records = run_batch(&mut session).to_vec();
    assert_eq!(records.len(), session.files().len());
    assert!(!records[0].is_failed());
    assert!(records[1].is_failed());
    assert!(!records[2].is_failed());
    assert_eq!(records[2].fields().unwrap().risk_level, "Bajo");

    let out = temp_output_dir("fichascan-integration");
    let csv_path = out.join("report.csv");
    CsvExporter::new(csv_path.clone()).export(session.records())?;
    let json_path = out.join("report.json");
    JsonExporter::new(json_path.clone()).export(session.records())?;

    let csv = fs::read_to_string(&csv_path)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("1,ANA SOTO RIOS,11223344,Bajo"));
    assert!(lines[2].starts_with("2,ERROR: rota.pdf"));
    assert!(lines[3].starts_with("3,LUZ PAUCAR,55667788,Bajo"));

    let json = fs::read_to_string(&json_path)?;
    assert!(json.contains("\"status\": \"failed\""));
    assert!(json.contains("ana.pdf"));

    let _ = fs::remove_dir_all(&out);
    Ok(())
}

#[test]
fn rerun_without_changes_yields_identical_fields() -> Result<()> {
    let mut session = Session::new(CannedTemplate::new(&[(
        "ana.pdf",
        "Nombres y apellidos: ANA SOTO RIOS\nDNI: 11223344",
    )]));
    session.add_files([PathBuf::from("ana.pdf")]);

    let first = run_batch(&mut session).to_vec();
    let second = run_batch(&mut session).to_vec();
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn debug_text_carries_the_last_page_marker() -> Result<()> {
    let template = CannedTemplate::new(&[("ana.pdf", "portada")]);
    let text = acquire_plain_text(&template, Path::new("ana.pdf"))?;

    assert!(text.contains(LAST_PAGE_MARKER));
    assert_eq!(
        text,
        format!("portada\n\n\n\n{LAST_PAGE_MARKER}\n\nNivel de Riesgo Social\nBajo\nX")
    );

    // The extractor sees exactly this text, so the marked last page drives
    // the risk level.
    assert_eq!(template.extract_fields(&text).risk_level, "Bajo");
    Ok(())
}

/// Real-PDF smoke test for the embedded-text window. Fixture not shipped;
/// drop a two-page-or-longer ficha social at the given path to exercise it.
#[test]
fn social_window_on_real_pdf() -> Result<()> {
    let test_pdf = PathBuf::from("test/ficha_social.pdf");
    if !test_pdf.exists() {
        eprintln!("Skipping test: test/ficha_social.pdf not found");
        return Ok(());
    }

    let template = SocialTemplate::new();
    let text = acquire_plain_text(&template, &test_pdf)?;
    assert!(text.contains(LAST_PAGE_MARKER));
    Ok(())
}

/// Full OCR-track run against a scanned resolution. Requires poppler-utils
/// and tesseract, so it stays ignored by default.
#[test]
#[ignore]
fn resolution_window_on_scanned_pdf() -> Result<()> {
    let test_pdf = PathBuf::from("test/resolucion_transegen.pdf");
    if !test_pdf.exists() {
        eprintln!("Skipping test: test/resolucion_transegen.pdf not found");
        return Ok(());
    }
    if !TesseractEngine::is_available() {
        eprintln!("Skipping test: pdftoppm/tesseract not installed");
        return Ok(());
    }

    let template = ResolutionTemplate::default();
    let mut session = Session::new(template);
    session.add_files([test_pdf]);

    let records = run_batch(&mut session).to_vec();
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_failed());
    Ok(())
}

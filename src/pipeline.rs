use std::path::Path;

use crate::core::record::DocumentRecord;
use crate::provider::{embedded::file_name, ProviderError};
use crate::session::Session;
use crate::template::DocumentTemplate;

/// Runs the full pipeline for one document. Acquisition failures are folded
/// into the record; a missing field is not a failure and leaves its slot
/// empty.
pub fn process_document<T: DocumentTemplate>(template: &T, path: &Path) -> DocumentRecord<T::Fields> {
    let name = file_name(path);
    match template.acquire_text(path) {
        Ok(text) => {
            let fields = template.extract_fields(&text.to_plain());
            DocumentRecord::extracted(name, fields)
        }
        Err(err) => {
            log::warn!("{err}");
            DocumentRecord::failed(name, err.to_string())
        }
    }
}

/// Processes every loaded document in load order and stores the new result
/// set, discarding the previous one. Always yields one record per document;
/// a single unreadable file never aborts the batch.
pub fn run_batch<T: DocumentTemplate>(session: &mut Session<T>) -> &[DocumentRecord<T::Fields>] {
    let total = session.files().len();
    let mut records = Vec::with_capacity(total);

    for (idx, path) in session.files().iter().enumerate() {
        log::info!("[{}/{}] processing {}", idx + 1, total, path.display());
        records.push(process_document(session.template(), path));
    }

    session.replace_records(records);
    session.records()
}

/// Raw acquired text for one document, exactly as the field extractor would
/// receive it, marker and page order included. This is the only window into
/// intermediate extraction state.
pub fn acquire_plain_text<T: DocumentTemplate>(
    template: &T,
    path: &Path,
) -> Result<String, ProviderError> {
    Ok(template.acquire_text(path)?.to_plain())
}

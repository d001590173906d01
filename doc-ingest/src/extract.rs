use tracing::debug;

use crate::{
    combine::ExtractedFile,
    errors::{IngestError, Result},
    file_kind::FileKind,
    tabular::{read_csv_rows, read_excel_rows, render_table},
};

/// Extracts the text of one uploaded file.
///
/// Blocking and CPU-bound for PDFs and workbooks; async callers should run it
/// on a blocking thread.
pub fn extract_file(filename: &str, bytes: &[u8]) -> Result<ExtractedFile> {
    let kind = FileKind::from_filename(filename)
        .ok_or_else(|| IngestError::FileTypeNotAllowed(filename.to_string()))?;

    let (content, is_qna) = match kind {
        FileKind::Pdf => {
            let text = pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| IngestError::Pdf(e.to_string()))?;
            (text, false)
        }
        FileKind::Csv => render_table(&read_csv_rows(bytes)?),
        FileKind::Excel => render_table(&read_excel_rows(bytes)?),
        FileKind::Text => (String::from_utf8(bytes.to_vec())?, false),
    };

    debug!(
        file = filename,
        ?kind,
        is_qna,
        chars = content.chars().count(),
        "doc_ingest::extract: extracted"
    );

    Ok(ExtractedFile {
        filename: filename.to_string(),
        content,
        is_qna,
    })
}

//! Upload ingestion.
//!
//! Turns uploaded files into the text stored as a session's document:
//! - plain text is passed through;
//! - PDFs are reduced to their text;
//! - two-column spreadsheets/CSVs become a `Data:` block of `Q:`/`A:` lines.
//!
//! Several files from one upload are merged by [`combine_uploads`].

mod combine;
pub mod errors;
mod extract;
mod file_kind;
mod qna_text;
mod tabular;

pub use combine::{ExtractedFile, combine_uploads};
pub use errors::IngestError;
pub use extract::extract_file;
pub use file_kind::{ALLOWED_EXTENSIONS, FileKind, is_allowed};
pub use qna_text::{DATA_HEADER, is_structured_document, parse_qna_text};
pub use tabular::{Cell, read_csv_rows, read_excel_rows, render_table};

use crate::qna_text::DATA_HEADER;

/// Text extracted from one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub filename: String,
    pub content: String,
    /// `true` when `content` is a `Data:` block.
    pub is_qna: bool,
}

impl ExtractedFile {
    fn qna_body(&self) -> &str {
        self.content
            .strip_prefix(DATA_HEADER)
            .unwrap_or(&self.content)
            .trim()
    }
}

/// Merges the files of one upload into a single session document.
///
/// If every file is a Q&A table the result is one `Data:` block. Otherwise
/// each file gets a `--- name ---` header, free text first and Q&A tables
/// after.
pub fn combine_uploads(files: &[ExtractedFile]) -> String {
    let (qna, free): (Vec<&ExtractedFile>, Vec<&ExtractedFile>) =
        files.iter().partition(|f| f.is_qna);

    if !qna.is_empty() && free.is_empty() {
        let mut out = String::from(DATA_HEADER);
        for f in &qna {
            out.push_str(f.qna_body());
            out.push('\n');
        }
        return out.trim().to_string();
    }

    let parts: Vec<String> = free
        .iter()
        .map(|f| format!("--- {} ---\n{}", f.filename, f.content))
        .chain(
            qna.iter()
                .map(|f| format!("--- {} (Q&A) ---\n{}", f.filename, f.qna_body())),
        )
        .collect();

    parts.join("\n\n").trim().to_string()
}

/// Extensions accepted by the upload endpoint (lowercase, without dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "md", "py", "js", "html", "css", "json", "pdf", "xlsx", "xls", "csv",
];

/// How a file's bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
    Excel,
    Csv,
}

impl FileKind {
    /// Classifies by extension; `None` for disallowed or missing extensions.
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = extension(name)?;
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        Some(match ext.as_str() {
            "pdf" => FileKind::Pdf,
            "xlsx" | "xls" => FileKind::Excel,
            "csv" => FileKind::Csv,
            _ => FileKind::Text,
        })
    }

    pub fn is_tabular(self) -> bool {
        matches!(self, FileKind::Excel | FileKind::Csv)
    }
}

pub fn is_allowed(name: &str) -> bool {
    FileKind::from_filename(name).is_some()
}

fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension_case_insensitively() {
        assert_eq!(FileKind::from_filename("notes.TXT"), Some(FileKind::Text));
        assert_eq!(FileKind::from_filename("a.b.Pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("bank.xls"), Some(FileKind::Excel));
        assert_eq!(FileKind::from_filename("bank.csv"), Some(FileKind::Csv));
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        assert!(!is_allowed("run.exe"));
        assert!(!is_allowed("README"));
        assert!(is_allowed("script.py"));
    }
}

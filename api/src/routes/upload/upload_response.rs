use serde::Serialize;

pub const NO_FILE_PART: &str = "No file part";
pub const NO_SELECTED_FILE: &str = "No selected file";
pub const FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed";

/// Response payload for /upload. Failures are reported in-band with 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Loaded {
        content: String,
        #[serde(rename = "chatHistory")]
        chat_history: Vec<String>,
    },
    Failed {
        error: String,
    },
}

impl UploadResponse {
    pub fn failed(error: impl Into<String>) -> Self {
        UploadResponse::Failed {
            error: error.into(),
        }
    }
}

use serde::Serialize;

/// Number of most recent history entries kept per session by default.
///
/// One chat exchange produces two entries (`Human:` and `AI:`).
pub const DEFAULT_MAX_HISTORY_ITEMS: usize = 6;

/// Conversation and document state of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Ordered chat turns, oldest first (`"Human: ..."`, `"AI: ..."`).
    pub history: Vec<String>,
    /// Text extracted from the last upload.
    pub document_text: String,
}

impl SessionState {
    /// Appends a turn and drops the oldest entries beyond `max_items`.
    ///
    /// `max_items == 0` disables the cap.
    pub fn push_turn(&mut self, turn: impl Into<String>, max_items: usize) {
        self.history.push(turn.into());
        if max_items > 0 && self.history.len() > max_items {
            let excess = self.history.len() - max_items;
            self.history.drain(..excess);
        }
    }

    pub fn reset_history(&mut self) {
        self.history.clear();
    }

    pub fn replace_document(&mut self, text: impl Into<String>) {
        self.document_text = text.into();
    }
}

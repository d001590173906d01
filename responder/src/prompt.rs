//! Prompt builder for the free-text fallback.

/// System instructions for answers grounded in an uploaded document.
pub const FALLBACK_SYSTEM: &str = r#"
You are a helpful assistant answering questions about the user's uploaded notes.
Use the document as ground truth; if it does not contain the answer, say so briefly.
"#;

/// Builds the user prompt: document excerpt, recent conversation, question.
///
/// The document is clamped to `max_doc_chars` characters; only the last
/// `history_turns` history entries are included.
pub fn build_fallback_prompt(
    question: &str,
    document: &str,
    history: &[String],
    history_turns: usize,
    max_doc_chars: usize,
) -> String {
    let mut out = String::new();

    let doc = document.trim();
    if !doc.is_empty() {
        out.push_str("Document:\n");
        let clamped = safe_truncate(doc, max_doc_chars);
        out.push_str(clamped);
        if clamped.len() < doc.len() {
            out.push_str("\n…");
        }
        out.push_str("\n\n");
    }

    let start = history.len().saturating_sub(history_turns);
    let recent = &history[start..];
    if !recent.is_empty() {
        out.push_str("Conversation so far:\n");
        for turn in recent {
            out.push_str(turn.trim());
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("Question:\n");
    out.push_str(question.trim());
    out.push('\n');
    out
}

/// Prefix of `s` holding at most `max_chars` characters.
fn safe_truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

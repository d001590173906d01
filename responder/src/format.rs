//! Rendering of match results into chat text.

use semantic_matcher::MatchResult;

/// Reply when the bank was searched but nothing passed the threshold.
pub const NO_MATCH_MESSAGE: &str =
    "No relevant Q&A pairs found in the database. Try rephrasing your question.";

/// Reply when there is neither a usable bank nor a session document.
pub const QNA_ONLY_MESSAGE: &str = "This app currently only supports Q&A database queries. Please ensure your data is loaded in the PostgreSQL database.";

/// Renders ranked matches.
///
/// The first match is the best answer with its source question and
/// confidence; the rest follow as numbered related answers. An empty slice
/// renders [`NO_MATCH_MESSAGE`].
pub fn format_matches(matches: &[MatchResult]) -> String {
    let Some((best, related)) = matches.split_first() else {
        return NO_MATCH_MESSAGE.to_string();
    };

    let mut out = format!(
        "<span style=\"color: green;\">\n**🟢 BEST ANSWER:** {}\n\n**Source Q:** {}\n**Confidence:** {:.1}%\n</span>",
        best.answer,
        best.question,
        best.confidence_pct()
    );

    if !related.is_empty() {
        out.push_str("\n\n---\n\n**RELATED ANSWERS:**\n");
        for (i, m) in related.iter().enumerate() {
            out.push_str(&format!(
                "\n**Related {}** ({:.1}% match)\n**Q:** {}\n**A:** {}\n",
                i + 1,
                m.confidence_pct(),
                m.question,
                m.answer
            ));
        }
    }

    out
}

use serde::Deserialize;

use crate::core::app_state::DEFAULT_AUTOCOMPLETE_LIMIT;

/// Query string for /autocomplete.
#[derive(Debug, Default, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub q: Option<String>,
    /// Kept as text so a malformed value falls back to the default.
    #[serde(default)]
    pub limit: Option<String>,
}

impl AutocompleteQuery {
    /// Trimmed, lowercased needle; empty means "no suggestions".
    pub fn needle(&self) -> String {
        self.q.as_deref().unwrap_or("").trim().to_lowercase()
    }

    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_AUTOCOMPLETE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_limit_uses_default() {
        let q = AutocompleteQuery {
            q: Some("  Capital ".into()),
            limit: Some("lots".into()),
        };
        assert_eq!(q.needle(), "capital");
        assert_eq!(q.limit(), 10);
    }
}

use serde::{Deserialize, Serialize};

/// A single book suggestion as returned by `GET /catalog/suggest/?q=...`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SuggestionItem {
    pub slug: String,
    pub title: String,
    /// Comma separated author names, may be missing for anthologies.
    #[serde(default)]
    pub authors: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Option<Vec<SuggestionItem>>,
}

impl SuggestResponse {
    pub fn into_items(self) -> Vec<SuggestionItem> {
        self.suggestions.unwrap_or_default()
    }
}

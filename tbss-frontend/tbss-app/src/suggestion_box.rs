use leptos::prelude::*;
use tbss_api_types::SuggestionItem;

use crate::config::SuggestConfig;

/// One rendered dropdown entry. All text fields are untrusted and must only ever be written as text.
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionRow {
    /// `sg-<index>`, stable for the row's position.
    pub element_id: String,
    pub slug: String,
    pub title: String,
    pub authors: String,
    pub href: String,
}

impl SuggestionRow {
    pub fn from_items(items: Vec<SuggestionItem>, config: &SuggestConfig) -> Vec<SuggestionRow> {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| SuggestionRow {
                element_id: format!("sg-{index}"),
                href: config.detail_url(&item.slug),
                slug: item.slug,
                title: item.title,
                authors: item.authors.unwrap_or_default(),
            })
            .collect()
    }
}

/// The dropdown a widget owns. Only the owning widget writes to it.
pub trait SuggestionBox: 'static {
    /// Replaces the content with `rows` and makes the box visible. Never called with an empty list.
    fn show(&self, rows: Vec<SuggestionRow>);
    /// Drops every row and hides the box.
    fn clear(&self);
}

/// Backs the [`crate::components::book_search::BookSearch`] dropdown.
#[derive(Clone, Copy, Debug)]
pub struct SignalSuggestionBox {
    pub rows: RwSignal<Vec<SuggestionRow>>,
    pub visible: RwSignal<bool>,
}

impl SignalSuggestionBox {
    pub fn new() -> Self {
        Self {
            rows: RwSignal::new(Vec::new()),
            visible: RwSignal::new(false),
        }
    }
}

impl Default for SignalSuggestionBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionBox for SignalSuggestionBox {
    fn show(&self, rows: Vec<SuggestionRow>) {
        self.rows.set(rows);
        self.visible.set(true);
    }

    fn clear(&self) {
        self.rows.set(Vec::new());
        self.visible.set(false);
    }
}

//! Search enhancements for the catalog pages: debounced auto-submit of search forms and the
//! suggestion dropdown behind the header search box.

pub mod api;
pub mod autocomplete;
pub mod components;
pub mod config;
pub mod debounce;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod error;
pub mod form_submitter;
pub mod navigation;
pub mod pending_request;
pub mod scheduler;
pub mod suggestion_box;

#[cfg(test)]
pub(crate) mod test_support;

pub use autocomplete::{AutocompleteWidget, ClickTarget, SearchQueryState};
pub use components::{book_search::BookSearch, suggestion_rows::SuggestionRows};
pub use form_submitter::{DebouncedFormSubmitter, SubmitTarget};

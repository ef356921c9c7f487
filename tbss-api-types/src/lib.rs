pub mod suggest;

pub use suggest::{SuggestResponse, SuggestionItem};

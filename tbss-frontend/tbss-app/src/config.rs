use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const DEFAULT_SUGGEST_URL: &str = "/catalog/suggest/";
pub const BOOK_DETAIL_ROUTE: &str = "/catalog/book/";
pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(150);
pub const SUBMIT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Header search input and its dropdown, present on every storefront page.
pub const HEADER_INPUT_ID: &str = "tbss-search";
pub const HEADER_SUGGEST_ID: &str = "tbss-suggest";
/// Changelist search box on the admin pages.
pub const ADMIN_SEARCHBAR_ID: &str = "searchbar";

pub const SUGGEST_URL_ATTRIBUTE: &str = "data-suggest-url";
pub const SUGGEST_TARGET_ATTRIBUTE: &str = "data-suggest-target";
pub const DECLARED_INPUTS_SELECTOR: &str = "input[data-suggest-url][data-suggest-target]";

/// Same set `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Debug, PartialEq)]
pub struct SuggestConfig {
    pub endpoint_url: String,
    pub debounce: Duration,
    pub detail_route: String,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_SUGGEST_URL.to_string(),
            debounce: SUGGEST_DEBOUNCE,
            detail_route: BOOK_DETAIL_ROUTE.to_string(),
        }
    }
}

impl SuggestConfig {
    /// Builds the config from the input's `data-suggest-url`, an empty attribute counts as missing.
    pub fn from_endpoint_attribute(endpoint: Option<String>) -> Self {
        match endpoint.filter(|url| !url.trim().is_empty()) {
            Some(endpoint_url) => Self {
                endpoint_url,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn query_url(&self, query: &str) -> String {
        let separator = if self.endpoint_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{separator}q={}",
            self.endpoint_url,
            utf8_percent_encode(query, COMPONENT)
        )
    }

    pub fn detail_url(&self, slug: &str) -> String {
        format!(
            "{}{}/",
            self.detail_route,
            utf8_percent_encode(slug, COMPONENT)
        )
    }
}

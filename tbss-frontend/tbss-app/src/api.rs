use async_trait::async_trait;
use tbss_api_types::{SuggestResponse, SuggestionItem};

use crate::error::AppResult;

/// Fetches suggestions for a fully built query url, see [`crate::config::SuggestConfig::query_url`].
///
/// Dropping the returned future must stop the request, the widgets rely on that for cancellation.
#[async_trait(?Send)]
pub trait SuggestClient: 'static {
    async fn fetch_suggestions(&self, url: &str) -> AppResult<Vec<SuggestionItem>>;
}

/// Decodes a suggestion body. Anything without a usable `suggestions` list is an empty result.
pub fn parse_suggestions(body: &str) -> AppResult<Vec<SuggestionItem>> {
    let response: SuggestResponse = serde_json::from_str(body)?;
    Ok(response.into_items())
}

#[cfg(feature = "hydrate")]
pub use gloo_client::GlooSuggestClient;

#[cfg(feature = "hydrate")]
mod gloo_client {
    use super::{parse_suggestions, SuggestClient};
    use crate::error::{AppError, AppResult};
    use async_trait::async_trait;
    use tbss_api_types::SuggestionItem;

    /// Aborts the fetch when the request future is dropped before it completes.
    struct AbortOnDrop(Option<web_sys::AbortController>);

    impl AbortOnDrop {
        fn signal(&self) -> Option<web_sys::AbortSignal> {
            self.0.as_ref().map(|controller| controller.signal())
        }

        fn disarm(mut self) {
            self.0 = None;
        }
    }

    impl Drop for AbortOnDrop {
        fn drop(&mut self) {
            if let Some(controller) = self.0.take() {
                controller.abort();
            }
        }
    }

    #[derive(Clone, Copy, Debug, Default)]
    pub struct GlooSuggestClient;

    #[async_trait(?Send)]
    impl SuggestClient for GlooSuggestClient {
        async fn fetch_suggestions(&self, url: &str) -> AppResult<Vec<SuggestionItem>> {
            let abort = AbortOnDrop(web_sys::AbortController::new().ok());
            let signal = abort.signal();
            let response = gloo_net::http::Request::get(url)
                .abort_signal(signal.as_ref())
                .send()
                .await?;
            if !response.ok() {
                abort.disarm();
                return Err(AppError::Status(response.status()));
            }
            let body = response.text().await?;
            abort.disarm();
            parse_suggestions(&body)
        }
    }
}

#[cfg(feature = "ssr")]
pub use reqwest_client::ReqwestSuggestClient;

#[cfg(feature = "ssr")]
mod reqwest_client {
    use super::{parse_suggestions, SuggestClient};
    use crate::error::{AppError, AppResult};
    use async_trait::async_trait;
    use tbss_api_types::SuggestionItem;

    /// Native client, relative suggestion urls are resolved against `origin`.
    #[derive(Clone, Debug)]
    pub struct ReqwestSuggestClient {
        client: reqwest::Client,
        origin: String,
    }

    impl ReqwestSuggestClient {
        pub fn new(origin: impl Into<String>) -> Self {
            Self {
                client: reqwest::Client::new(),
                origin: origin.into().trim_end_matches('/').to_string(),
            }
        }

        pub fn absolute_url(&self, url: &str) -> String {
            if url.starts_with("http://") || url.starts_with("https://") {
                url.to_string()
            } else {
                format!("{}/{}", self.origin, url.trim_start_matches('/'))
            }
        }
    }

    #[async_trait(?Send)]
    impl SuggestClient for ReqwestSuggestClient {
        async fn fetch_suggestions(&self, url: &str) -> AppResult<Vec<SuggestionItem>> {
            let url = self.absolute_url(url);
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| {
                    log::warn!("Response {e}. {url}");
                    e
                })?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::Status(status.as_u16()));
            }
            let body = response.text().await?;
            parse_suggestions(&body)
        }
    }

    #[cfg(test)]
    mod test {
        use super::*;

        #[test]
        fn relative_urls_resolve_against_origin() {
            let client = ReqwestSuggestClient::new("http://localhost:8000/");
            assert_eq!(
                client.absolute_url("/catalog/suggest/?q=a"),
                "http://localhost:8000/catalog/suggest/?q=a"
            );
            assert_eq!(
                client.absolute_url("https://books.example/suggest/?q=a"),
                "https://books.example/suggest/?q=a"
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn parses_suggestion_bodies() {
        let items = parse_suggestions(
            r#"{"suggestions": [
                {"title": "A Tale of Two Cities", "slug": "a-tale", "authors": "Charles Dickens", "score": 100},
                {"title": "Beowulf", "slug": "beowulf", "score": 40.5}
            ]}"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].authors.as_deref(), Some("Charles Dickens"));
        assert_eq!(items[1].authors, None);

        let items = parse_suggestions(
            r#"{"suggestions": [{"title": "A Tale", "slug": "a-tale", "score": "high"}]}"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn unexpected_shapes_degrade_or_fail_cleanly() {
        assert!(parse_suggestions(r#"{"results": []}"#).unwrap().is_empty());
        assert!(parse_suggestions(r#"{"suggestions": null}"#).unwrap().is_empty());
        assert!(matches!(
            parse_suggestions("<html>502 Bad Gateway</html>"),
            Err(AppError::Json(_))
        ));
        assert!(parse_suggestions(r#"{"suggestions": "nope"}"#).is_err());
    }
}

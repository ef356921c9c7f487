use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use futures::future::Abortable;
use tbss_api_types::SuggestionItem;

use crate::{
    api::SuggestClient,
    config::SuggestConfig,
    debounce::Debouncer,
    pending_request::RequestSlot,
    scheduler::Scheduler,
    suggestion_box::{SuggestionBox, SuggestionRow},
};

/// Text of the input as the widget last saw it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchQueryState {
    pub current_text: String,
    pub last_query: String,
}

/// Where a page click landed relative to a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Input,
    InsideBox,
    Outside,
}

impl ClickTarget {
    /// `is_input` is checked first, the input may sit inside the box's container.
    pub fn classify(is_input: bool, inside_box: bool) -> Self {
        if is_input {
            ClickTarget::Input
        } else if inside_box {
            ClickTarget::InsideBox
        } else {
            ClickTarget::Outside
        }
    }
}

/// Turns keystrokes into debounced, cancellable suggestion queries and keeps its
/// [`SuggestionBox`] in sync with the latest accepted result.
///
/// Cloning gives another handle to the same widget. Once every handle is dropped the pending
/// debounce and the in-flight request are aborted.
pub struct AutocompleteWidget<C, B, S>
where
    C: SuggestClient,
    B: SuggestionBox,
    S: Scheduler,
{
    inner: Rc<WidgetInner<C, B, S>>,
}

impl<C, B, S> Clone for AutocompleteWidget<C, B, S>
where
    C: SuggestClient,
    B: SuggestionBox,
    S: Scheduler,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct WidgetInner<C, B, S>
where
    C: SuggestClient,
    B: SuggestionBox,
    S: Scheduler,
{
    config: SuggestConfig,
    client: Rc<C>,
    suggestion_box: B,
    scheduler: S,
    debouncer: Debouncer<S>,
    state: RefCell<SearchQueryState>,
    requests: RefCell<RequestSlot>,
}

impl<C, B, S> AutocompleteWidget<C, B, S>
where
    C: SuggestClient,
    B: SuggestionBox,
    S: Scheduler,
{
    pub fn new(config: SuggestConfig, client: Rc<C>, suggestion_box: B, scheduler: S) -> Self {
        let debouncer = Debouncer::new(scheduler.clone(), config.debounce);
        Self {
            inner: Rc::new(WidgetInner {
                config,
                client,
                suggestion_box,
                scheduler,
                debouncer,
                state: RefCell::new(SearchQueryState::default()),
                requests: RefCell::new(RequestSlot::default()),
            }),
        }
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.inner.config
    }

    pub fn suggestion_box(&self) -> &B {
        &self.inner.suggestion_box
    }

    pub fn query_state(&self) -> SearchQueryState {
        self.inner.state.borrow().clone()
    }

    /// Number of queries sent to the endpoint so far.
    pub fn queries_issued(&self) -> u64 {
        self.inner.requests.borrow().issued()
    }

    pub fn has_pending_request(&self) -> bool {
        self.inner.requests.borrow().is_pending()
    }

    /// Feeds the input's raw value after a text change.
    pub fn on_input(&self, raw: &str) {
        let query = raw.trim();
        {
            let mut state = self.inner.state.borrow_mut();
            state.current_text = raw.to_string();
            if query == state.last_query {
                return;
            }
            state.last_query = query.to_string();
        }
        if query.is_empty() {
            self.inner.debouncer.cancel();
            self.inner.requests.borrow_mut().cancel();
            self.inner.suggestion_box.clear();
            return;
        }
        let widget = Rc::downgrade(&self.inner);
        let query = query.to_string();
        self.inner.debouncer.schedule(move || {
            if let Some(widget) = widget.upgrade() {
                WidgetInner::issue_query(&widget, query);
            }
        });
    }

    /// Page level click handling, anything landing outside the input and the box dismisses it.
    pub fn on_page_click(&self, target: ClickTarget) {
        if target == ClickTarget::Outside {
            self.dismiss();
        }
    }

    /// Hides the suggestions without forgetting the query, retyping the same text stays a no-op.
    pub fn dismiss(&self) {
        self.inner.suggestion_box.clear();
    }

    /// Escape closes the dropdown.
    pub fn on_key(&self, key: &str) {
        if key == "Escape" {
            self.dismiss();
        }
    }

    /// Aborts the pending debounce and request. The box keeps whatever it currently shows.
    pub fn cancel_pending(&self) {
        self.inner.debouncer.cancel();
        self.inner.requests.borrow_mut().cancel();
    }
}

impl<C, B, S> WidgetInner<C, B, S>
where
    C: SuggestClient,
    B: SuggestionBox,
    S: Scheduler,
{
    fn issue_query(this: &Rc<Self>, query: String) {
        let (id, registration) = this.requests.borrow_mut().begin();
        let url = this.config.query_url(&query);
        log::debug!("suggest query {query:?} issued");
        let client = this.client.clone();
        let request = Abortable::new(
            async move { client.fetch_suggestions(&url).await },
            registration,
        );
        let widget: Weak<Self> = Rc::downgrade(this);
        this.scheduler.spawn_local(async move {
            let Ok(result) = request.await else {
                log::debug!("suggest query {query:?} superseded");
                return;
            };
            let Some(widget) = widget.upgrade() else {
                return;
            };
            if !widget.requests.borrow_mut().finish(id) {
                return;
            }
            let items = result.unwrap_or_else(|e| {
                log::warn!("suggestions for {query:?} unavailable: {e}");
                Vec::new()
            });
            widget.render(items);
        });
    }

    fn render(&self, items: Vec<SuggestionItem>) {
        if items.is_empty() {
            self.suggestion_box.clear();
        } else {
            self.suggestion_box
                .show(SuggestionRow::from_items(items, &self.config));
        }
    }
}

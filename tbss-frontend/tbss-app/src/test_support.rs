use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    future::Future,
    time::Duration,
};

use async_trait::async_trait;
use futures::channel::oneshot;
use tbss_api_types::SuggestionItem;

use crate::{
    api::SuggestClient,
    error::{AppResult, SystemError},
    scheduler::Scheduler,
    suggestion_box::{SuggestionBox, SuggestionRow},
};

/// Runs widget tasks on the current `LocalSet`, timers follow tokio's (usually paused) clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    type Sleep = tokio::time::Sleep;

    fn spawn_local<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        tokio::task::spawn_local(future);
    }

    fn sleep(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }
}

/// Lets every ready local task run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub fn item(slug: &str, title: &str, authors: Option<&str>) -> SuggestionItem {
    SuggestionItem {
        slug: slug.to_string(),
        title: title.to_string(),
        authors: authors.map(str::to_string),
    }
}

type Reply = AppResult<Vec<SuggestionItem>>;

/// Endpoint double, every request waits until the test resolves its url.
#[derive(Default)]
pub struct FakeSuggestClient {
    calls: RefCell<Vec<String>>,
    waiting: RefCell<HashMap<String, oneshot::Sender<Reply>>>,
}

impl FakeSuggestClient {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Returns false when the request was dropped before the reply got there.
    pub fn resolve(&self, url: &str, reply: Reply) -> bool {
        match self.waiting.borrow_mut().remove(url) {
            Some(sender) => sender.send(reply).is_ok(),
            None => false,
        }
    }
}

#[async_trait(?Send)]
impl SuggestClient for FakeSuggestClient {
    async fn fetch_suggestions(&self, url: &str) -> AppResult<Vec<SuggestionItem>> {
        let (sender, receiver) = oneshot::channel();
        self.calls.borrow_mut().push(url.to_string());
        self.waiting.borrow_mut().insert(url.to_string(), sender);
        receiver.await.unwrap_or_else(|_| {
            Err(SystemError::Message("test dropped the reply".to_string()).into())
        })
    }
}

#[derive(Default)]
pub struct RecordingBox {
    rows: RefCell<Vec<SuggestionRow>>,
    visible: Cell<bool>,
    shows: Cell<usize>,
}

impl RecordingBox {
    pub fn rows(&self) -> Vec<SuggestionRow> {
        self.rows.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn shows(&self) -> usize {
        self.shows.get()
    }
}

impl SuggestionBox for RecordingBox {
    fn show(&self, rows: Vec<SuggestionRow>) {
        *self.rows.borrow_mut() = rows;
        self.visible.set(true);
        self.shows.set(self.shows.get() + 1);
    }

    fn clear(&self) {
        self.rows.borrow_mut().clear();
        self.visible.set(false);
    }
}

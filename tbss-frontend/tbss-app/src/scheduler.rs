use std::{future::Future, time::Duration};

/// Where the widgets park their timers and network completions.
///
/// The browser runs everything on the UI thread, so nothing here needs to be `Send`.
pub trait Scheduler: Clone + 'static {
    type Sleep: Future<Output = ()> + 'static;

    fn spawn_local<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static;

    fn sleep(&self, duration: Duration) -> Self::Sleep;
}

#[cfg(feature = "hydrate")]
pub use browser::BrowserScheduler;

#[cfg(feature = "hydrate")]
mod browser {
    use super::Scheduler;
    use gloo_timers::future::TimeoutFuture;
    use std::{future::Future, time::Duration};

    /// Runs on the leptos executor, which the client initializes with wasm-bindgen-futures.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserScheduler;

    impl Scheduler for BrowserScheduler {
        type Sleep = TimeoutFuture;

        fn spawn_local<F>(&self, future: F)
        where
            F: Future<Output = ()> + 'static,
        {
            leptos::task::spawn_local(future);
        }

        fn sleep(&self, duration: Duration) -> Self::Sleep {
            TimeoutFuture::new(duration.as_millis().min(u32::MAX as u128) as u32)
        }
    }
}

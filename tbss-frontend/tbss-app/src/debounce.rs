use std::{cell::RefCell, time::Duration};

use futures::future::{AbortHandle, Abortable};

use crate::scheduler::Scheduler;

/// A cancellable scheduled task: every call to [`Debouncer::schedule`] replaces the previous one,
/// so only the action registered last runs, once the delay passes without another call.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    scheduled: RefCell<Option<AbortHandle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            scheduled: RefCell::new(None),
        }
    }

    pub fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.scheduled.replace(Some(handle)) {
            previous.abort();
        }
        let timer = Abortable::new(self.scheduler.sleep(self.delay), registration);
        self.scheduler.spawn_local(async move {
            if timer.await.is_ok() {
                action();
            }
        });
    }

    pub fn cancel(&self) {
        if let Some(scheduled) = self.scheduled.take() {
            scheduled.abort();
        }
    }
}

impl<S: Scheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

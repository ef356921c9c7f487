use std::rc::Rc;

use crate::{config::SUBMIT_DEBOUNCE, debounce::Debouncer, error::AppResult, scheduler::Scheduler};

/// The form a search input belongs to.
pub trait SubmitTarget: 'static {
    /// Submits the enclosing form. Having no form at all is not an error, there is nothing to submit.
    fn submit(&self) -> AppResult<()>;
}

/// Submits the input's form once the user stops typing for [`SUBMIT_DEBOUNCE`].
pub struct DebouncedFormSubmitter<T: SubmitTarget, S: Scheduler> {
    target: Rc<T>,
    debouncer: Debouncer<S>,
}

impl<T: SubmitTarget, S: Scheduler> DebouncedFormSubmitter<T, S> {
    pub fn new(target: T, scheduler: S) -> Self {
        Self {
            target: Rc::new(target),
            debouncer: Debouncer::new(scheduler, SUBMIT_DEBOUNCE),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn on_input(&self) {
        let target = self.target.clone();
        self.debouncer.schedule(move || {
            if let Err(e) = target.submit() {
                log::warn!("search form submission failed {e}");
            }
        });
    }
}

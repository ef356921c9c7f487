use futures::future::{AbortHandle, AbortRegistration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(u64);

#[derive(Debug)]
struct PendingRequest {
    id: RequestId,
    handle: AbortHandle,
}

/// Holds the single in-flight suggestion request of a widget.
///
/// Starting a request aborts whatever was pending, and only the request currently in the slot
/// may [`finish`](RequestSlot::finish). A superseded request can therefore never write its
/// results, no matter when its response arrives.
#[derive(Debug, Default)]
pub struct RequestSlot {
    issued: u64,
    pending: Option<PendingRequest>,
}

impl RequestSlot {
    /// Aborts the pending request, if any, and reserves the slot for a new one.
    /// The returned registration must wrap the new request's future.
    pub fn begin(&mut self) -> (RequestId, AbortRegistration) {
        self.cancel();
        self.issued += 1;
        let id = RequestId(self.issued);
        let (handle, registration) = AbortHandle::new_pair();
        self.pending = Some(PendingRequest { id, handle });
        (id, registration)
    }

    /// Frees the slot if `id` still owns it. Returns false for superseded requests.
    pub fn finish(&mut self, id: RequestId) -> bool {
        match &self.pending {
            Some(pending) if pending.id == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl Drop for RequestSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use futures::{
        executor::block_on,
        future::{pending, Abortable, Aborted},
    };

    #[test]
    fn begin_aborts_the_previous_request() {
        let mut slot = RequestSlot::default();
        let (first, first_registration) = slot.begin();
        let (second, _second_registration) = slot.begin();
        assert_ne!(first, second);
        assert_eq!(slot.issued(), 2);

        let first_request = Abortable::new(pending::<()>(), first_registration);
        assert_eq!(block_on(first_request), Err(Aborted));

        assert!(!slot.finish(first));
        assert!(slot.is_pending());
        assert!(slot.finish(second));
        assert!(!slot.is_pending());
        assert!(!slot.finish(second));
    }

    #[test]
    fn cancel_frees_the_slot() {
        let mut slot = RequestSlot::default();
        let (id, registration) = slot.begin();
        slot.cancel();
        assert!(!slot.is_pending());
        assert!(!slot.finish(id));
        assert_eq!(
            block_on(Abortable::new(pending::<()>(), registration)),
            Err(Aborted)
        );
    }
}

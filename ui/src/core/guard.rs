//! Latest-request-wins guard for overlapping submissions.
//!
//! Every submission takes a token from `issue()`. When its response lands,
//! `accept()` lets the outcome through only if no newer token was issued in
//! the meantime; stale outcomes are dropped instead of overwriting the
//! report of a later request.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::logger::tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Cheap to clone; clones share the same generation counter.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    latest: Rc<Cell<u64>>,
}

impl RequestGuard {
    pub fn issue(&self) -> RequestToken {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        RequestToken(next)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.get() == token.0
    }

    pub fn accept<T>(&self, token: RequestToken, outcome: T) -> Option<T> {
        if self.is_current(token) {
            Some(outcome)
        } else {
            debug!(
                generation = token.0,
                latest = self.latest.get(),
                "discarding stale response"
            );
            None
        }
    }
}

//! Re-fetch signalling between editor and grid
//!
//! The record editor and the grid controller share no mutable state; the
//! only channel between them is this signal, raised after a mutation round-
//! trip succeeds so the owner re-runs the grid fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

struct Inner {
    requests: AtomicU64,
    notify: Notify,
}

/// Shared "please re-fetch" trigger
#[derive(Clone)]
pub struct RefetchSignal {
    inner: Arc<Inner>,
}

impl Default for RefetchSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl RefetchSignal {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                requests: AtomicU64::new(0),
                notify: Notify::new(),
            }),
        }
    }

    /// Raise the signal. A single `notify_one` banks a permit when nobody
    /// is waiting yet, so a raise is never lost; it also avoids waking the
    /// owner twice for one mutation.
    pub fn request(&self) {
        self.inner.requests.fetch_add(1, Ordering::SeqCst);
        self.inner.notify.notify_one();
    }

    /// Total requests raised so far
    pub fn request_count(&self) -> u64 {
        self.inner.requests.load(Ordering::SeqCst)
    }

    /// Wait until the signal is next raised
    pub async fn wait(&self) {
        self.inner.notify.notified().await;
    }
}

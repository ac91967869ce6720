//! The poller facade over an object store.

use sp_error::{ErrorCategory, PollerError};
use sp_traits::ObjectStore;
use tracing::{error, warn};

/// Answers connection checks and revision queries against one object store.
///
/// Generic over the store so the same logic runs against S3 in production
/// and [`MemoryStore`](crate::MemoryStore) in tests. Holds no per-request
/// state: every call receives its configuration and returns a self-contained
/// result.
///
/// The operations are spread over the modules that implement them:
/// - [`check_bucket`](Poller::check_bucket) / [`check_prefix`](Poller::check_prefix)
///   in [`checker`](crate::checker)
/// - [`latest_revision`](Poller::latest_revision) in [`resolver`](crate::resolver)
/// - [`latest_revision_since`](Poller::latest_revision_since) in
///   [`comparator`](crate::comparator)
pub struct Poller<S: ObjectStore> {
    pub(crate) store: S,
}

impl<S: ObjectStore> Poller<S> {
    /// Create a poller backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Log a failure that is being converted into an outcome.
pub(crate) fn log_failure(operation: &str, error: &PollerError) {
    match error.category() {
        ErrorCategory::Transport => {
            error!(operation = operation, category = %error.category(), error = %error, "Object store call failed")
        }
        ErrorCategory::Configuration | ErrorCategory::Empty => {
            warn!(operation = operation, category = %error.category(), error = %error, "Operation did not resolve")
        }
    }
}

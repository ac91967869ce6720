//! Deciding whether the latest revision is new.

use sp_traits::ObjectStore;
use sp_types::{ConfigValueSet, Revision};
use tracing::{debug, info};

use crate::Poller;

impl<S: ObjectStore> Poller<S> {
    /// Resolve the latest revision and return it only if it is strictly
    /// newer than `previous`.
    ///
    /// # Returns
    ///
    /// - `Some(revision)` - The latest revision is newer than `previous`
    /// - `None` - Nothing new to report: the latest revision is unresolved,
    ///   there is no previous revision or it has no timestamp, or the
    ///   timestamps are equal or older
    pub async fn latest_revision_since(
        &self,
        package: &ConfigValueSet,
        repository: &ConfigValueSet,
        previous: Option<&Revision>,
    ) -> Option<Revision> {
        let latest = self.latest_revision(package, repository).await;

        if !latest.is_resolved() {
            info!("Latest revision is unresolved");
            return None;
        }

        let Some(previous) = previous else {
            info!("No previous revision supplied");
            return None;
        };

        if !previous.is_resolved() {
            info!(previous = %previous.identifier, "Previous revision has no timestamp");
            return None;
        }

        if latest.is_newer_than(previous) {
            debug!(
                revision = %latest.identifier,
                previous = %previous.identifier,
                "New revision found"
            );
            Some(latest)
        } else {
            debug!(previous = %previous.identifier, "No revision newer than previous");
            None
        }
    }
}

//! Scheduled Archival Task
//!
//! Background task that periodically runs the archival routine.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::store::BookStore;

/// Spawns a background task that archives old books every `interval_secs`.
///
/// The first run happens one interval after spawning. Failures are logged and
/// the loop continues with the next tick.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_archival_task(store.clone(), 10, 3600);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_archival_task(
    store: BookStore,
    threshold_years: i32,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting archival task every {} seconds (threshold {} years)",
            interval.as_secs(),
            threshold_years
        );

        loop {
            tokio::time::sleep(interval).await;

            match store.validate_and_archive_old_books(threshold_years).await {
                Ok(0) => debug!("Scheduled archival: nothing to archive"),
                Ok(updated) => info!("Scheduled archival: archived {} books", updated),
                Err(e) => error!(error = %e, "Scheduled archival failed"),
            }
        }
    })
}

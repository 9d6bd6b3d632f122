//! Caller-side deadlines
//!
//! Providers never time themselves out beyond the per-request HTTP timeout;
//! callers bound a whole operation (a batch of appends, a listing) with
//! [`with_deadline`]. Dropping the future is the other way to cancel.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// Run a provider operation, failing with [`Error::Cancelled`] once `deadline` elapses
///
/// The wrapped future is dropped at the deadline, so no further backend
/// calls are made. Calls already submitted are not rolled back.
pub async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Operation exceeded deadline of {:?}", deadline);
            Err(Error::cancelled(format!(
                "deadline of {:?} exceeded",
                deadline
            )))
        }
    }
}

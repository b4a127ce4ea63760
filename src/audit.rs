use std::future::Future;

use serde_json::Value;
use tracing::Instrument;

use crate::error::AppResult;

/// Run a service operation inside a span named after it.
///
/// Entry is logged with the request payload. A failure is logged once here
/// and returned unchanged, so individual operations carry no logging
/// boilerplate of their own.
pub async fn audited<T, F>(operation: &'static str, payload: Value, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    let span = tracing::info_span!("operation", name = operation);
    async move {
        tracing::info!(%payload, "operation started");
        let result = fut.await;
        match &result {
            Ok(_) => tracing::debug!("operation finished"),
            Err(err) if err.is_client_error() => {
                tracing::warn!(error = %err, kind = err.kind(), "operation rejected")
            }
            Err(err) => tracing::error!(error = ?err, kind = err.kind(), "operation failed"),
        }
        result
    }
    .instrument(span)
    .await
}

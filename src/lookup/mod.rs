use serde_json::Value;

use crate::trn::{FetchResponse, Fetcher};

mod error;
pub mod normalizer;
pub mod query;
pub mod router;
pub mod session;


pub use error::{LookupError, LookupErrorKind, GENERIC_UPSTREAM_MESSAGE, NETWORK_FAILURE_MESSAGE};
pub use normalizer::{get_metric, normalize, StatView, OVERVIEW_SEGMENT};
pub use query::{LookupParams, LookupQuery, PlayerId};
pub use router::{route, UpstreamDescriptor, DEFAULT_BASE_URL};
pub use session::{LookupSession, LookupState, Outcome, StalePolicy};

/// Fetch the raw profile for a validated query.
///
/// Returns the provider's `data` member untouched; callers normalize it or
/// relay it as-is.
#[tracing::instrument(skip(fetcher, query), fields(game = %query.game(), username = query.username()))]
pub async fn execute<F: Fetcher + ?Sized>(
    fetcher: &F,
    base_url: &str,
    query: &LookupQuery,
) -> Result<Value, LookupError> {
    let descriptor = route(base_url, query);

    let response = fetcher.fetch(&descriptor).await.map_err(|e| {
        tracing::error!(error = %e, "trn request failed");
        LookupError::network()
    })?;

    interpret(response)
}

/// Classify a provider response into a profile payload or a lookup error.
pub fn interpret(response: FetchResponse) -> Result<Value, LookupError> {
    if !response.is_success() {
        let message = upstream_message(&response.body)
            .unwrap_or_else(|| GENERIC_UPSTREAM_MESSAGE.to_string());
        tracing::warn!(status = response.status, reason = %message, "trn api error");
        return Err(LookupError::upstream(response.status, message));
    }

    let body = match serde_json::from_slice::<Value>(&response.body) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(status = response.status, error = %e, "unparsable trn response");
            return Err(LookupError::upstream(response.status, GENERIC_UPSTREAM_MESSAGE));
        }
    };

    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(LookupError::not_found(response.status, GENERIC_UPSTREAM_MESSAGE)),
        },
        _ => Err(LookupError::not_found(response.status, GENERIC_UPSTREAM_MESSAGE)),
    }
}

/// Best human-readable reason found in an error body.
///
/// TRN mostly sends `{message}`, sometimes `{errors: [{message}]}`; relays
/// send `{error}`.
fn upstream_message(body: &[u8]) -> Option<String> {
    let body: Value = serde_json::from_slice(body).ok()?;

    let non_empty = |v: &Value| v.as_str().filter(|s| !s.trim().is_empty()).map(str::to_string);

    body.get("message")
        .and_then(non_empty)
        .or_else(|| body.pointer("/errors/0/message").and_then(non_empty))
        .or_else(|| body.get("error").and_then(non_empty))
}

use serde_json::Value;

/// Everything that can go wrong between sending a request and handing
/// records back to the caller.
///
/// Nothing is retried or swallowed here; the caller decides whether to log,
/// retry, or abort.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never completed: DNS, connect, or timeout failure.
    #[error("transport failure, error({0})")]
    Network(#[from] reqwest::Error),

    /// The server answered, but the body is not JSON.
    #[error("response body is not valid JSON, error({0})")]
    MalformedResponse(#[from] serde_json::Error),

    /// Well-formed JSON without the expected results path, commonly a
    /// `BEAAPI.Results.Error` object. The raw payload is kept for diagnostics.
    #[error("BEA API error: {payload}")]
    Api { payload: Value },
}

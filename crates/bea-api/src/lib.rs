/// Error taxonomy shared by every call.
pub mod error;

/// [BEA API](https://apps.bea.gov/api/signup/) data retrieval.
pub mod fetch;

/// API key handling.
pub mod key;

/// Opt-in request budgeting.
pub mod throttle;

pub use error::FetchError;
pub use fetch::{DataFetcher, Dataset, QueryParams, Record, BASE_URL};
pub use key::ApiKey;
pub use throttle::Throttled;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use dotenv::var;
    pub(crate) use reqwest::Client as HttpClient;
}

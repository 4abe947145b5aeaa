use crate::error::FetchError;
use crate::http::*;
use crate::key::ApiKey;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, trace};

// RATE_LIMIT = 100 /60s (plus 100MB /60s and 30 errors /60s)
//
// data = `https://apps.bea.gov/api/data?UserID=<key>&method=GetData&datasetname=Regional&...`
//
// datasets = `https://apps.bea.gov/api/data?UserID=<key>&method=GetDataSetList`
//
// NOTE: exceeding the budget locks the key out for one hour. Nothing here
// tracks it; see [`crate::throttle`] for the opt-in wrapper.

/// Production endpoint of the BEA data API.
pub const BASE_URL: &str = "https://apps.bea.gov/api/data";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameters of one request, keyed uniquely; order irrelevant.
///
/// Which keys a dataset requires (`TableName`, `GeoFips`, `Year`, `LineCode`,
/// ...) is the server's business, not this client's.
pub type QueryParams = HashMap<String, String>;

/// One returned row, keyed by field name (`GeoName`, `DataValue`,
/// `TimePeriod`, ...). The server publishes no schema per table, so values
/// stay raw JSON.
pub type Record = serde_json::Map<String, Value>;

/////////////////////////////////////////////////////////////////////////////////
// core
/////////////////////////////////////////////////////////////////////////////////

/// Stateless client for the [BEA data API](https://apps.bea.gov/api/signup/).
///
/// Every call is one GET request, awaited to completion; no caching, no
/// retrying, no internal rate limiting.
#[derive(Debug, Clone)]
pub struct DataFetcher {
    http_client: HttpClient,
    base_url: String,
}

impl DataFetcher {
    /// Client against the production endpoint, with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Client against the production endpoint, with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            http_client: build_client(timeout),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Client against `base_url` instead of the production endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: build_client(DEFAULT_TIMEOUT),
            base_url: base_url.into(),
        }
    }

    /// Fetch rows with `method=GetData`.
    ///
    /// Returns the `BEAAPI.Results.Data` list (possibly empty) with each
    /// record's fields intact. Any response without that path surfaces as
    /// [`FetchError::Api`] carrying the server's raw JSON.
    pub async fn get_data(
        &self,
        key: &ApiKey,
        params: &QueryParams,
    ) -> Result<Vec<Record>, FetchError> {
        let envelope = self.request(key, "GetData", params).await?;

        match envelope.pointer("/BEAAPI/Results/Data") {
            Some(data) => {
                let records: Vec<Record> = serde_json::from_value(data.clone())?;
                debug!("{} records returned", records.len());
                Ok(records)
            }
            None => {
                error!("BEA response carries no Results.Data");
                Err(FetchError::Api { payload: envelope })
            }
        }
    }

    /// Fetch the dataset directory with `method=GetDataSetList`.
    pub async fn get_dataset_list(&self, key: &ApiKey) -> Result<Vec<Dataset>, FetchError> {
        let envelope = self
            .request(key, "GetDataSetList", &QueryParams::new())
            .await?;

        match envelope.pointer("/BEAAPI/Results/Dataset") {
            Some(datasets) => {
                let datasets: Vec<Dataset> = serde_json::from_value(datasets.clone())?;
                debug!("{} datasets listed", datasets.len());
                Ok(datasets)
            }
            None => {
                error!("BEA response carries no Results.Dataset");
                Err(FetchError::Api { payload: envelope })
            }
        }
    }

    // one GET, full body awaited, parsed to JSON
    async fn request(
        &self,
        key: &ApiKey,
        method: &str,
        params: &QueryParams,
    ) -> Result<Value, FetchError> {
        trace!("fetching {method} from {}", self.base_url);
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("UserID", key.as_str()), ("method", method)])
            .query(params)
            .send()
            .await
            .map_err(|err| {
                error!("failed to reach the BEA API, error({err})");
                err
            })?;

        let body = response.text().await.map_err(|err| {
            error!("failed to read the BEA response body, error({err})");
            err
        })?;

        serde_json::from_str(&body).map_err(|err| {
            error!("failed to parse the BEA response as JSON, error({err})");
            FetchError::MalformedResponse(err)
        })
    }
}

impl Default for DataFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn build_client(timeout: Duration) -> HttpClient {
    reqwest::ClientBuilder::new()
        .timeout(timeout)
        .build()
        .expect("BEA client to build")
}

/////////////////////////////////////////////////////////////////////////////////
// endpoints
/////////////////////////////////////////////////////////////////////////////////
//
// NOTE: All data values are returned as Strings
//
// data
// ----------------------------------------------------------------
//
//  {
//      "BEAAPI": {
//          "Request": { ... },
//          "Results": {
//              "Statistic": "GDP by State",
//              "Data": [
//                  {
//                      "Code": "SQGDP2-1",
//                      "GeoFips": "01000",
//                      "GeoName": "Alabama",
//                      "TimePeriod": "2023Q1",
//                      "DataValue": "123,456",
//                      ...
//                  },
//                  ...
//              ]
//          }
//      }
//  }
//
// datasets
// ----------------------------------------------------------------
//
//  {
//      "BEAAPI": {
//          "Request": { ... },
//          "Results": {
//              "Dataset": [
//                  {
//                      "DatasetName": "NIPA",
//                      "DatasetDescription": "Standard NIPA tables"
//                  },
//                  ...
//              ]
//          }
//      }
//  }
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    #[serde(rename = "DatasetName")]
    pub name: String,

    #[serde(rename = "DatasetDescription")]
    pub description: String,
}

use reqwest::StatusCode;

/// Why a single data source could not produce a value.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status {0}")]
    Status(StatusCode),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("address {0} is not a 20-byte hex account")]
    InvalidAddress(String),

    #[error("all {attempts} rpc endpoints failed")]
    AllEndpointsFailed { attempts: usize },

    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

use std::env;
use std::time::Duration;

use url::Url;

use crate::fees::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};

pub const DEFAULT_RPC_URLS: &[&str] = &[
    "https://mainnet.base.org",
    "https://base.llamarpc.com",
    "https://1rpc.io/base",
    "https://base-pokt.nodies.app",
];
pub const DEFAULT_EXPLORER_API_URL: &str = "https://base.blockscout.com/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_bind_addr: String,
    pub public_base_url: String,
    pub sources: SourcesConfig,
}

/// Where and how the aggregator fetches its data.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub rpc_urls: Vec<Url>,
    pub explorer_api_url: Url,
    pub request_timeout: Duration,
    pub fee_page_size: u32,
    pub fee_max_pages: u32,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{var} contains an invalid url {value:?}: {source}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("RPC_URLS must list at least one endpoint")]
    NoRpcUrls,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            rpc_urls: DEFAULT_RPC_URLS
                .iter()
                .filter_map(|u| Url::parse(u).ok())
                .collect(),
            explorer_api_url: Url::parse(DEFAULT_EXPLORER_API_URL)
                .expect("default explorer url is valid"),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            fee_page_size: DEFAULT_PAGE_SIZE,
            fee_max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_bind_addr = env::var("HTTP_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let rpc_urls = match env::var("RPC_URLS") {
            Ok(raw) => parse_rpc_urls(&raw)?,
            Err(_) => SourcesConfig::default().rpc_urls,
        };
        let explorer_api_url = match env::var("EXPLORER_API_URL") {
            Ok(raw) => parse_url("EXPLORER_API_URL", raw.trim())?,
            Err(_) => SourcesConfig::default().explorer_api_url,
        };

        let sources = SourcesConfig {
            rpc_urls,
            explorer_api_url,
            request_timeout: Duration::from_secs(positive_u64(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            fee_page_size: positive_u64("FEE_PAGE_SIZE", DEFAULT_PAGE_SIZE.into())? as u32,
            fee_max_pages: positive_u64("FEE_MAX_PAGES", DEFAULT_MAX_PAGES.into())? as u32,
        };

        Ok(Self {
            http_bind_addr,
            public_base_url,
            sources,
        })
    }
}

pub fn parse_rpc_urls(raw: &str) -> Result<Vec<Url>, ConfigError> {
    let urls = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_url("RPC_URLS", s))
        .collect::<Result<Vec<_>, _>>()?;
    if urls.is_empty() {
        return Err(ConfigError::NoRpcUrls);
    }
    Ok(urls)
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        var,
        value: value.to_string(),
        source,
    })
}

fn positive_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = env::var(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 && n <= u32::MAX as u64 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}

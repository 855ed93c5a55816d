use std::str::FromStr;

use anyhow::{anyhow, bail};
use ethers_core::types::{BlockNumber, H160, U256};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::{error::FetchError, lookup_stats::LOOKUP_STATS};

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Reads an address's nonce from a fixed, ordered list of RPC endpoints.
///
/// Every call starts again from the first endpoint; there is no memory of
/// which endpoint answered last time.
#[derive(Clone)]
pub struct NodeRotator {
    endpoints: Vec<Url>,
    client: Client,
}

impl NodeRotator {
    pub fn new(client: Client, endpoints: Vec<Url>) -> Self {
        Self { endpoints, client }
    }

    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    pub async fn transaction_count(&self, address: &str) -> Result<u64, FetchError> {
        let account = H160::from_str(address.trim())
            .map_err(|_| FetchError::InvalidAddress(address.to_string()))?;

        for url in &self.endpoints {
            match self.query_endpoint(url, account).await {
                Ok(count) => {
                    tracing::info!(endpoint = %url, tx_count = count, "tx count from rpc");
                    return Ok(count);
                }
                Err(err) => {
                    LOOKUP_STATS.inc_rpc_failovers(1);
                    tracing::warn!("rpc endpoint {} failed: {}", url, err);
                }
            }
        }

        tracing::error!("all rpc endpoints failed, tx count unknown");
        Err(FetchError::AllEndpointsFailed {
            attempts: self.endpoints.len(),
        })
    }

    async fn query_endpoint(&self, url: &Url, account: H160) -> anyhow::Result<u64> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getTransactionCount",
            "params": [account, BlockNumber::Latest],
        });
        let response = self.client.post(url.clone()).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            bail!("unexpected http status {}", status);
        }

        let body: RpcResponse = response.json().await?;
        if let Some(err) = body.error {
            bail!("rpc error {}: {}", err.code, err.message);
        }
        let raw = body
            .result
            .filter(|r| !r.is_empty())
            .ok_or_else(|| anyhow!("rpc response carried no result"))?;

        let count = parse_quantity(&raw)?;
        let count: u64 = count
            .try_into()
            .map_err(|_| anyhow!("tx count {} does not fit in u64", count))?;
        Ok(count)
    }
}

/// Parses a `0x`-prefixed hex quantity.
fn parse_quantity(raw: &str) -> anyhow::Result<U256> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    if digits.is_empty() {
        bail!("empty hex quantity {:?}", raw);
    }
    U256::from_str_radix(digits, 16).map_err(|_| anyhow!("invalid hex quantity {:?}", raw))
}

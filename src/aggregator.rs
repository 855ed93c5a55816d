use std::future::Future;

use anyhow::{Context, Result};
use futures_util::future::join3;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::{
    config::SourcesConfig,
    error::FetchError,
    explorer::ExplorerClient,
    fees::{FeeAccumulator, FeeTotal},
    first_activity::FirstActivityLookup,
    lookup_stats::LOOKUP_STATS,
    models::{WalletStats, ZERO_GAS_SPENT},
    rotator::NodeRotator,
};

/// Combines the three independent data sources into one [`WalletStats`].
#[derive(Clone)]
pub struct StatsAggregator {
    rotator: NodeRotator,
    first_activity: FirstActivityLookup,
    fees: FeeAccumulator,
}

impl StatsAggregator {
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        let client = Client::builder()
            .no_proxy()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build reqwest client")?;
        let explorer = ExplorerClient::new(client.clone(), config.explorer_api_url.clone());

        Ok(Self {
            rotator: NodeRotator::new(client, config.rpc_urls.clone()),
            first_activity: FirstActivityLookup::new(explorer.clone()),
            fees: FeeAccumulator::with_paging(explorer, config.fee_page_size, config.fee_max_pages),
        })
    }

    /// Never fails: any source that cannot answer contributes its zero
    /// default. An empty address short-circuits without network access.
    pub async fn wallet_stats(&self, address: &str) -> WalletStats {
        let address = address.trim();
        if address.is_empty() {
            return WalletStats::default();
        }
        LOOKUP_STATS.inc_lookups(1);

        let rotator = self.rotator.clone();
        let first_activity = self.first_activity.clone();
        let fees = self.fees.clone();
        let (a, b, c) = (address.to_string(), address.to_string(), address.to_string());

        let stats = join_branches(
            async move { rotator.transaction_count(&a).await },
            async move { first_activity.days_active(&b).await },
            async move { fees.gas_spent(&c).await },
        )
        .await;

        tracing::info!(
            tx_count = stats.tx_count,
            days_active = stats.days_active,
            gas_spent = %stats.gas_spent,
            "final stats for {}",
            address
        );
        stats
    }
}

/// Runs each branch as its own task and waits for all of them.
///
/// A branch that errors or panics is replaced by its default without
/// affecting the others.
pub async fn join_branches<T, D, G>(tx_count: T, days_active: D, gas_spent: G) -> WalletStats
where
    T: Future<Output = Result<u64, FetchError>> + Send + 'static,
    D: Future<Output = Result<u64, FetchError>> + Send + 'static,
    G: Future<Output = Result<FeeTotal, FetchError>> + Send + 'static,
{
    let (tx_count, days_active, gas_spent) = join3(
        settle("tx_count", tokio::spawn(tx_count)),
        settle("days_active", tokio::spawn(days_active)),
        settle("gas_spent", tokio::spawn(gas_spent)),
    )
    .await;

    WalletStats {
        days_active: days_active.unwrap_or(0),
        tx_count: tx_count.unwrap_or(0),
        gas_spent: gas_spent
            .map(|total| total.to_eth_string())
            .unwrap_or_else(|| ZERO_GAS_SPENT.to_string()),
    }
}

async fn settle<V>(field: &'static str, handle: JoinHandle<Result<V, FetchError>>) -> Option<V> {
    let outcome = handle
        .await
        .unwrap_or_else(|join_err| Err(FetchError::Aborted(join_err.to_string())));
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            LOOKUP_STATS.inc_degraded_fields(1);
            tracing::warn!(field, "falling back to default: {}", err);
            None
        }
    }
}

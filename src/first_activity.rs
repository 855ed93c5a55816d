use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    error::FetchError,
    explorer::{ExplorerClient, SortOrder},
    lookup_stats::LOOKUP_STATS,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Days since an address's oldest recorded transaction.
#[derive(Debug, Clone)]
pub struct FirstActivityLookup {
    explorer: ExplorerClient,
}

impl FirstActivityLookup {
    pub fn new(explorer: ExplorerClient) -> Self {
        Self { explorer }
    }

    /// `Ok(0)` when the explorer knows no history for the address.
    pub async fn days_active(&self, address: &str) -> Result<u64, FetchError> {
        let response = self.explorer.txlist(address, SortOrder::Asc, 1, 1).await?;
        LOOKUP_STATS.inc_explorer_pages(1);

        let first_ts = response
            .into_transactions()
            .and_then(|txs| txs.into_iter().next())
            .and_then(|tx| tx.timestamp)
            .and_then(|ts| ts.trim().parse::<i64>().ok());

        let Some(first_ts) = first_ts else {
            tracing::debug!("no first transaction found for {}", address);
            return Ok(0);
        };

        let days = days_since(first_ts, unix_now());
        tracing::info!(days_active = days, first_tx = first_ts, "days active from explorer");
        Ok(days)
    }
}

/// Whole days from `first_ts` to `now`, floored, clamped at zero.
pub fn days_since(first_ts: i64, now: i64) -> u64 {
    let days = now.saturating_sub(first_ts).div_euclid(SECONDS_PER_DAY);
    days.max(0) as u64
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

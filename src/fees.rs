use ethers_core::types::U256;

use crate::{
    address::normalize_address,
    error::FetchError,
    explorer::{ExplorerClient, SortOrder},
    lookup_stats::LOOKUP_STATS,
    models::ExplorerTx,
};

pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_MAX_PAGES: u32 = 10;
/// Decimals of the native currency (wei per ether).
pub const NATIVE_DECIMALS: usize = 18;
/// Fractional digits in a rendered amount.
pub const DISPLAY_DECIMALS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeTotal {
    pub wei: U256,
    /// Pages that were fetched and accumulated.
    pub pages: u32,
    /// True when a later page failed and the scan stopped early.
    pub partial: bool,
}

impl FeeTotal {
    /// Whole-coin amount with exactly five fractional digits.
    pub fn to_eth_string(&self) -> String {
        format_native_amount(self.wei)
    }
}

/// Sums fees paid by an address over its newest transactions.
#[derive(Debug, Clone)]
pub struct FeeAccumulator {
    explorer: ExplorerClient,
    page_size: u32,
    max_pages: u32,
}

impl FeeAccumulator {
    pub fn new(explorer: ExplorerClient) -> Self {
        Self::with_paging(explorer, DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGES)
    }

    pub fn with_paging(explorer: ExplorerClient, page_size: u32, max_pages: u32) -> Self {
        Self {
            explorer,
            page_size,
            max_pages,
        }
    }

    /// Fails only when the first page cannot be fetched; a failure on any
    /// later page yields what was accumulated so far.
    pub async fn gas_spent(&self, address: &str) -> Result<FeeTotal, FetchError> {
        let sender = normalize_address(address);
        let mut total = FeeTotal::default();

        for page in 1..=self.max_pages {
            let response = match self
                .explorer
                .txlist(&sender, SortOrder::Desc, page, self.page_size)
                .await
            {
                Ok(response) => response,
                Err(err) if page == 1 => {
                    tracing::error!("fee scan failed on first page: {}", err);
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!("fee scan stopped at page {}: {}", page, err);
                    total.partial = true;
                    break;
                }
            };
            LOOKUP_STATS.inc_explorer_pages(1);

            let txs = match response.into_transactions() {
                Some(txs) if !txs.is_empty() => txs,
                _ => break,
            };

            total.wei = total.wei.saturating_add(sum_sender_fees(&sender, &txs));
            total.pages = page;

            if txs.len() < self.page_size as usize {
                break;
            }
        }

        tracing::info!(
            gas_spent = %total.to_eth_string(),
            pages = total.pages,
            partial = total.partial,
            "gas spent from explorer"
        );
        Ok(total)
    }
}

/// Sum of `gasUsed * gasPrice` over the transactions sent by `sender`.
///
/// `sender` must already be lowercase. Records with unparseable amounts
/// contribute nothing.
pub fn sum_sender_fees(sender: &str, txs: &[ExplorerTx]) -> U256 {
    txs.iter()
        .filter(|tx| {
            tx.from
                .as_deref()
                .map(|from| from.to_lowercase() == sender)
                .unwrap_or(false)
        })
        .filter_map(|tx| match tx_fee(tx) {
            Some(fee) => Some(fee),
            None => {
                tracing::warn!(
                    gas_used = ?tx.gas_used,
                    gas_price = ?tx.gas_price,
                    "unable to parse gas values"
                );
                None
            }
        })
        .fold(U256::zero(), |acc, fee| acc.saturating_add(fee))
}

fn tx_fee(tx: &ExplorerTx) -> Option<U256> {
    let gas_used = parse_amount(tx.gas_used.as_deref())?;
    let gas_price = parse_amount(tx.gas_price.as_deref())?;
    gas_used.checked_mul(gas_price)
}

/// Missing or empty amounts count as zero; `0x`-prefixed amounts are hex.
fn parse_amount(raw: Option<&str>) -> Option<U256> {
    match raw.map(str::trim) {
        None | Some("") => Some(U256::zero()),
        Some(s) => match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some("") => None,
            Some(hex) => U256::from_str_radix(hex, 16).ok(),
            None => U256::from_dec_str(s).ok(),
        },
    }
}

/// Renders wei as whole coins with [`DISPLAY_DECIMALS`] digits, rounding
/// half up.
pub fn format_native_amount(wei: U256) -> String {
    let step = U256::exp10(NATIVE_DECIMALS - DISPLAY_DECIMALS);
    let scaled = wei.saturating_add(step / 2) / step;
    let unit = U256::exp10(DISPLAY_DECIMALS);
    format!(
        "{}.{:0>width$}",
        scaled / unit,
        (scaled % unit).to_string(),
        width = DISPLAY_DECIMALS
    )
}

//! Share links and link-preview metadata built from a stats result.

use serde::{Deserialize, Serialize};

use crate::models::WalletStats;

pub const PREVIEW_WIDTH: u32 = 1200;
pub const PREVIEW_HEIGHT: u32 = 630;

const SITE_TITLE: &str = "BASE WRAPPED - Base Network Wallet Statistics";
const SITE_DESCRIPTION: &str = "Get detailed statistics about your Base network wallet: days active, transactions count, and ETH burned on gas.";
const SHARED_TITLE: &str = "My Base Wrapped Stats";

/// Raw query string of a shared link. Values are untrusted.
///
/// The long names (`daysActive`, `gasSpent`) win over the short ones when
/// both are sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareQuery {
    pub days: Option<String>,
    #[serde(rename = "daysActive")]
    pub days_active: Option<String>,
    #[serde(rename = "txCount")]
    pub tx_count: Option<String>,
    pub gas: Option<String>,
    #[serde(rename = "gasSpent")]
    pub gas_spent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMetadata {
    pub title: String,
    pub description: String,
    pub image: Option<PreviewImage>,
}

impl ShareQuery {
    /// Sanitized stats, or `None` unless all three values were supplied
    /// and non-empty.
    pub fn stats(&self) -> Option<WalletStats> {
        let days = present(&self.days_active).or_else(|| present(&self.days))?;
        let tx_count = present(&self.tx_count)?;
        let gas = present(&self.gas_spent).or_else(|| present(&self.gas))?;
        Some(WalletStats {
            days_active: parse_count(days),
            tx_count: parse_count(tx_count),
            gas_spent: format!("{:.5}", parse_gas(gas)),
        })
    }

    pub fn metadata(&self, base_url: &str) -> PreviewMetadata {
        match self.stats() {
            Some(stats) if stats.days_active > 0 && stats.tx_count > 0 => {
                PreviewMetadata {
                    title: SHARED_TITLE.to_string(),
                    description: format!(
                        "Check out my onchain activity on Base! {} Transactions.",
                        group_thousands(stats.tx_count)
                    ),
                    image: Some(PreviewImage {
                        url: image_url(base_url, &stats),
                        width: PREVIEW_WIDTH,
                        height: PREVIEW_HEIGHT,
                    }),
                }
            }
            _ => PreviewMetadata {
                title: SITE_TITLE.to_string(),
                description: SITE_DESCRIPTION.to_string(),
                image: None,
            },
        }
    }
}

pub fn share_url(base_url: &str, stats: &WalletStats) -> String {
    format!("{}?{}", base_url, stats_query(stats))
}

pub fn image_url(base_url: &str, stats: &WalletStats) -> String {
    format!("{}/api/og?{}", base_url, stats_query(stats))
}

fn stats_query(stats: &WalletStats) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("days", &stats.days_active.to_string())
        .append_pair("txCount", &stats.tx_count.to_string())
        .append_pair("gas", &stats.gas_spent)
        .finish()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Reads the leading integer (`"12abc"` is 12, `"1.5"` is 1). Garbage and
/// negative values read as zero.
fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('-') {
        return 0;
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match &digits[..end] {
        "" => 0,
        prefix => prefix.parse::<u64>().unwrap_or(u64::MAX),
    }
}

fn parse_gas(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

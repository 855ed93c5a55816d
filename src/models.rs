use serde::{Deserialize, Serialize};

pub const ZERO_GAS_SPENT: &str = "0.00000";

/// Public activity summary for one address, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStats {
    pub days_active: u64,
    pub tx_count: u64,
    pub gas_spent: String,
}

impl Default for WalletStats {
    fn default() -> Self {
        Self {
            days_active: 0,
            tx_count: 0,
            gas_spent: ZERO_GAS_SPENT.to_string(),
        }
    }
}

/// Etherscan-style `{status, message, result}` envelope.
///
/// `result` stays untyped because the explorer puts an error string there
/// when `status` is not `"1"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorerTx {
    #[serde(rename = "timeStamp", default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(rename = "gasUsed", default)]
    pub gas_used: Option<String>,
    #[serde(rename = "gasPrice", default)]
    pub gas_price: Option<String>,
}

impl ExplorerResponse {
    /// Records of a successful response; `None` means the explorer reported
    /// no matching records (or an error in place of the list).
    pub fn into_transactions(self) -> Option<Vec<ExplorerTx>> {
        if self.status != "1" {
            return None;
        }
        serde_json::from_value(self.result).ok()
    }
}

use reqwest::Client;
use url::Url;

use crate::{error::FetchError, models::ExplorerResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Client for the explorer's Etherscan-compatible `account/txlist` endpoint.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    client: Client,
    base_url: Url,
}

impl ExplorerClient {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn txlist_url(&self, address: &str, sort: SortOrder, page: u32, offset: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("module", "account")
            .append_pair("action", "txlist")
            .append_pair("address", address)
            .append_pair("sort", sort.as_str())
            .append_pair("page", &page.to_string())
            .append_pair("offset", &offset.to_string());
        url
    }

    /// Fetches one page of an address's transaction history.
    pub async fn txlist(
        &self,
        address: &str,
        sort: SortOrder,
        page: u32,
        offset: u32,
    ) -> Result<ExplorerResponse, FetchError> {
        let url = self.txlist_url(address, sort, page, offset);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

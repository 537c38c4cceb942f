//! Client for the explorer's `getsourcecode` contract endpoint.

use log::debug;
use serde::Deserialize;

use crate::error::{Result, ScoutError};
use crate::types::ContractDetails;

pub const DEFAULT_EXPLORER_URL: &str = "https://api.polygonscan.com";

/// The ABI field the explorer returns for contracts it knows about but has
/// no published source for.
const UNVERIFIED_ABI: &str = "Contract source code not verified";

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SourceCodeRecord {
    #[serde(rename = "SourceCode")]
    source_code: String,
    #[serde(rename = "ABI")]
    abi: String,
}

/// Decodes one `getsourcecode` response body. Status `"1"` carries the
/// details in the first result record; anything else is an explorer-level
/// failure whose message lives in `result`.
pub fn parse_details_response(body: &str) -> Result<ContractDetails> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| ScoutError::Parse(format!("explorer response: {e}")))?;

    if envelope.status != "1" {
        let message = match envelope.result.as_str() {
            Some(s) => s.to_string(),
            None => envelope.result.to_string(),
        };
        return Err(ScoutError::NotVerified(message));
    }

    let first = envelope
        .result
        .as_array()
        .and_then(|records| records.first())
        .cloned()
        .ok_or_else(|| ScoutError::Parse("explorer result has no records".into()))?;
    let record: SourceCodeRecord = serde_json::from_value(first)
        .map_err(|e| ScoutError::Parse(format!("explorer record: {e}")))?;

    let verified = record.abi != UNVERIFIED_ABI;
    Ok(ContractDetails {
        source_code: record.source_code,
        abi: record.abi,
        verified,
    })
}

/// One request per lookup, no retries; transient failures propagate to the
/// caller. Rate limiting is the caller's job (see `throttle`).
pub struct ExplorerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ExplorerClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Published source, ABI and verification status for `address`.
    pub async fn get_details(&self, address: &str) -> Result<ContractDetails> {
        let url = format!(
            "{}/api?module=contract&action=getsourcecode&address={}&apikey={}",
            self.base_url, address, self.api_key
        );
        debug!("querying explorer for {}", address);
        let body = self.http.get(&url).send().await?.text().await?;
        parse_details_response(&body)
    }

    pub async fn get_abi(&self, address: &str) -> Result<String> {
        Ok(self.get_details(address).await?.abi)
    }

    pub async fn get_source_code(&self, address: &str) -> Result<String> {
        Ok(self.get_details(address).await?.source_code)
    }
}

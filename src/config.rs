use anyhow::{anyhow, bail, Result};
use std::env;

use crate::explorer::DEFAULT_EXPLORER_URL;

pub const DEFAULT_NODE_ENDPOINT: &str = "https://polygon-mainnet.g.alchemy.com/v2/";

/// Credentials and endpoints, resolved from the CLI and environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// PolygonScan-style explorer API key
    pub explorer_api_key: String,
    pub explorer_url: String,
    /// Node provider API key, appended to the endpoint URL
    pub node_api_key: String,
    pub node_endpoint: String,
}

impl Config {
    /// CLI flag wins over environment; endpoints fall back to the Polygon
    /// mainnet defaults.
    pub fn resolve(cli_key: Option<&str>) -> Result<Self> {
        let explorer_api_key = cli_key
            .map(str::to_string)
            .or_else(|| env::var("POLYGON_API_KEY").ok())
            .ok_or_else(|| {
                anyhow!("missing PolygonScan API key, set POLYGON_API_KEY or pass --key")
            })?;

        let node_api_key = env::var("NODE_API_KEY")
            .map_err(|_| anyhow!("missing node API key, set NODE_API_KEY"))?;

        let node_endpoint =
            env::var("NODE_ENDPOINT").unwrap_or_else(|_| DEFAULT_NODE_ENDPOINT.to_string());
        let explorer_url =
            env::var("EXPLORER_URL").unwrap_or_else(|_| DEFAULT_EXPLORER_URL.to_string());

        let config = Self {
            explorer_api_key,
            explorer_url,
            node_api_key,
            node_endpoint,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for url in [&self.explorer_url, &self.node_endpoint] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("invalid endpoint URL: {}", url);
            }
        }
        if self.explorer_api_key.is_empty() {
            bail!("explorer API key is empty");
        }
        Ok(())
    }
}

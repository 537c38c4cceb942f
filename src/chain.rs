//! Read-only binding of a contract ABI to a live RPC endpoint.

use async_trait::async_trait;
use ethers::{
    types::{Address, U256},
    utils::to_checksum,
};
use ethers_contract::Contract;
use ethers_core::abi::Abi;
use ethers_providers::{Http, Provider};
use log::debug;
use std::{str::FromStr, sync::Arc};

use crate::error::{Result, ScoutError};

/// Zero-argument view calls by symbolic function name. Trait seam so the
/// classifier can be exercised without a live node.
#[async_trait]
pub trait SupplyProbe: Send + Sync {
    async fn call_read_fn(&self, name: &str) -> Result<U256>;
}

/// Builds probes bound to a contract. Kept separate from the probe itself so
/// tests can assert that no binding happens for gated contracts.
#[async_trait]
pub trait ProxyFactory: Send + Sync {
    async fn bind(&self, address: &str, abi: &str) -> Result<Box<dyn SupplyProbe>>;
}

/// Parses `raw` and returns the address together with its checksummed form.
/// Listings sometimes carry all-lowercase addresses; those are normalized
/// here rather than rejected.
pub fn normalize_address(raw: &str) -> Result<(Address, String)> {
    let trimmed = raw.trim();
    let parsed = Address::from_str(trimmed)
        .map_err(|_| ScoutError::InvalidAddress(trimmed.to_string()))?;
    let checksummed = to_checksum(&parsed, None);
    if checksummed != trimmed {
        debug!("normalized address {} to {}", trimmed, checksummed);
    }
    Ok((parsed, checksummed))
}

/// A contract interface bound once, at construction, to an HTTP provider.
/// Function lookup goes through the parsed ABI, so a missing probe is a
/// checked outcome rather than a reverted call.
pub struct ChainContractProxy {
    checksummed: String,
    abi: Abi,
    contract: Contract<Provider<Http>>,
}

impl ChainContractProxy {
    pub fn new(address: &str, abi_json: &str, endpoint: &str, api_key: &str) -> Result<Self> {
        let (address, checksummed) = normalize_address(address)?;
        let abi: Abi = serde_json::from_str(abi_json)
            .map_err(|e| ScoutError::Parse(format!("contract ABI: {e}")))?;

        let url = format!("{endpoint}{api_key}");
        let provider = Provider::<Http>::try_from(url.as_str())
            .map_err(|e| ScoutError::Rpc(e.to_string()))?;
        let contract = Contract::new(address, abi.clone(), Arc::new(provider));

        Ok(Self {
            checksummed,
            abi,
            contract,
        })
    }

    pub fn address(&self) -> &str {
        &self.checksummed
    }

    /// Invokes a zero-argument view function by name and decodes a single
    /// numeric return value.
    pub async fn call_read_fn(&self, name: &str) -> Result<U256> {
        if self.abi.functions().next().is_none() {
            return Err(ScoutError::NoAbiFunctions);
        }
        if self.abi.function(name).is_err() {
            return Err(ScoutError::AbiFunctionNotFound(name.to_string()));
        }

        let call = self
            .contract
            .method::<_, U256>(name, ())
            .map_err(|e| ScoutError::Rpc(e.to_string()))?;
        call.call()
            .await
            .map_err(|e| ScoutError::Rpc(e.to_string()))
    }
}

#[async_trait]
impl SupplyProbe for ChainContractProxy {
    async fn call_read_fn(&self, name: &str) -> Result<U256> {
        ChainContractProxy::call_read_fn(self, name).await
    }
}

/// Factory producing `ChainContractProxy` instances against one node.
pub struct NodeProxyFactory {
    endpoint: String,
    api_key: String,
}

impl NodeProxyFactory {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ProxyFactory for NodeProxyFactory {
    async fn bind(&self, address: &str, abi: &str) -> Result<Box<dyn SupplyProbe>> {
        let proxy = ChainContractProxy::new(address, abi, &self.endpoint, &self.api_key)?;
        debug!("bound contract object for {}", proxy.address());
        Ok(Box::new(proxy))
    }
}

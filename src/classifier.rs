//! Usability classification: combines source heuristics with live supply
//! probes and scores each contract.

use async_trait::async_trait;
use ethers::types::U256;
use log::{debug, info, warn};

use crate::analyzer;
use crate::chain::ProxyFactory;
use crate::error::{Result, ScoutError};
use crate::throttle::{Clock, RequestPacer, SystemClock, EXPLORER_MIN_INTERVAL};
use crate::types::{
    ClassificationResult, ContractDetails, ContractRef, SkipReason, BASE_CONFIDENCE,
    SUPPLY_PROBES, TOKEN_SUPPLY_FLOOR,
};

/// Source of per-address contract details; implemented by `ExplorerClient`.
#[async_trait]
pub trait DetailsSource: Send + Sync {
    async fn details(&self, address: &str) -> Result<ContractDetails>;
}

#[async_trait]
impl DetailsSource for crate::explorer::ExplorerClient {
    async fn details(&self, address: &str) -> Result<ContractDetails> {
        self.get_details(address).await
    }
}

/// Terminal outcome for one contract. Skips carry the reason so the caller
/// can report it; fetch and probing failures come back as errors instead.
#[derive(Debug)]
pub enum Outcome {
    Usable(ClassificationResult),
    Skipped(SkipReason),
}

/// Runs the per-contract state machine:
/// fetch -> filter -> gating check -> supply probes -> decision.
pub struct UsabilityClassifier<S, F, C: Clock = SystemClock> {
    source: S,
    factory: F,
    pacer: RequestPacer<C>,
    query: Option<String>,
    exclude_gated: bool,
}

impl<S, F> UsabilityClassifier<S, F, SystemClock> {
    pub fn new(source: S, factory: F) -> Self {
        Self::with_pacer(source, factory, RequestPacer::new(EXPLORER_MIN_INTERVAL))
    }
}

impl<S, F, C: Clock> UsabilityClassifier<S, F, C> {
    pub fn with_pacer(source: S, factory: F, pacer: RequestPacer<C>) -> Self {
        Self {
            source,
            factory,
            pacer,
            query: None,
            exclude_gated: true,
        }
    }

    /// Only contracts whose source contains `query` are considered.
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    /// Gating exclusion is on by default; turn it off to score gated
    /// contracts anyway.
    pub fn exclude_gated(mut self, exclude: bool) -> Self {
        self.exclude_gated = exclude;
        self
    }
}

impl<S, F, C> UsabilityClassifier<S, F, C>
where
    S: DetailsSource,
    F: ProxyFactory,
    C: Clock,
{
    /// Classifies one contract. Errors are scoped to this contract; the
    /// caller logs them and continues with the next reference.
    pub async fn classify(&mut self, contract: &ContractRef) -> Result<Outcome> {
        self.pacer.pace().await;
        let details = self.source.details(&contract.address).await?;

        if let Some(query) = &self.query {
            if !analyzer::contains_string(&details.source_code, query) {
                return Ok(Outcome::Skipped(SkipReason::QueryMiss));
            }
            info!("FOUND: string '{}' in {}", query, contract.address);
        }

        if self.exclude_gated && analyzer::contains_gating_term(&details.source_code) {
            info!("whitelist term found in {}, skipping", contract.address);
            return Ok(Outcome::Skipped(SkipReason::Gated));
        }

        let probe = self.factory.bind(&contract.address, &details.abi).await?;

        let mut confidence = BASE_CONFIDENCE;
        let mut supply: Vec<U256> = Vec::new();
        for name in SUPPLY_PROBES {
            match probe.call_read_fn(name).await {
                Ok(value) => {
                    debug!("{}.{} = {}", contract.address, name, value);
                    if value >= U256::from(TOKEN_SUPPLY_FLOOR) {
                        // very large supply smells like a fungible token
                        confidence = confidence.saturating_sub(1);
                    }
                    supply.push(value);
                }
                Err(ScoutError::AbiFunctionNotFound(_)) => {
                    debug!("function {} not present in {}", name, contract.address);
                }
                Err(ScoutError::NoAbiFunctions) => {
                    warn!("ABI of {} contains no function definitions", contract.address);
                    break;
                }
                Err(e) => {
                    warn!("couldn't invoke {} on {}: {}", name, contract.address, e);
                    break;
                }
            }
        }

        match supply.as_slice() {
            [] => Err(ScoutError::AmbiguousSupplyData(contract.address.clone())),
            [only] => {
                info!(
                    "{} exposes a single supply value, emitting for manual review",
                    contract.address
                );
                Ok(Outcome::Usable(ClassificationResult {
                    address: contract.address.clone(),
                    name: contract.display_name().to_string(),
                    total_supply: *only,
                    max_supply: None,
                    confidence: confidence.saturating_sub(1),
                }))
            }
            [first, second, ..] if first == second => {
                info!(
                    "supply values of {} are equal, assuming no supply remaining",
                    contract.address
                );
                Ok(Outcome::Skipped(SkipReason::SupplyExhausted))
            }
            [first, second, ..] => Ok(Outcome::Usable(ClassificationResult {
                address: contract.address.clone(),
                name: contract.display_name().to_string(),
                total_supply: *first,
                max_supply: Some(*second),
                confidence,
            })),
        }
    }
}

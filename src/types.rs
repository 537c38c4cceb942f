use ethers::types::U256;
use std::fmt;

/// Read-only functions probed for supply data, in the order they are tried.
pub const SUPPLY_PROBES: [&str; 3] = ["totalSupply", "maxSupply", "supply"];

/// Every contract starts out at this confidence; rules only ever subtract.
pub const BASE_CONFIDENCE: u8 = 3;

/// Supply values at or above this look like a fungible token rather than a
/// mintable collection, which lowers confidence.
pub const TOKEN_SUPPLY_FLOOR: u64 = 1_000_000;

/// A contract address pulled from the verified-contracts listing or supplied
/// directly on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRef {
    pub address: String,
    pub name: Option<String>,
}

impl ContractRef {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
        }
    }

    /// A reference with no listing name, e.g. from an explicit address list.
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("?")
    }
}

/// What the explorer published for a verified contract. Fetched once per
/// address and discarded after the classification decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDetails {
    /// Raw source text, treated as opaque; may be flattened or minified
    pub source_code: String,
    /// ABI as the raw JSON string the explorer returns
    pub abi: String,
    pub verified: bool,
}

/// Emitted at most once per address per run, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub address: String,
    pub name: String,
    /// First collected supply observation
    pub total_supply: U256,
    /// Second collected supply observation; `None` means only one probe
    /// answered and the contract needs a manual look.
    pub max_supply: Option<U256>,
    pub confidence: u8,
}

/// Terminal skip states of the per-contract classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Free-text query filter did not match the source
    QueryMiss,
    /// Source contains an access-gating term
    Gated,
    /// Both supply observations are equal, no mintable supply remains
    SupplyExhausted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::QueryMiss => write!(f, "query string not found in source"),
            SkipReason::Gated => write!(f, "whitelist term found in source"),
            SkipReason::SupplyExhausted => write!(f, "max supply has been reached"),
        }
    }
}

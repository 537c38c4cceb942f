use thiserror::Error;

/// Errors raised while scouting a single contract. All of these are
/// contract-scoped: the pipeline logs them and moves on to the next address.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Transport-level failure talking to the explorer or listing service
    #[error("network error: {0}")]
    Network(String),

    /// Explorer answered with a non-success status for this address
    #[error("contract not verified: {0}")]
    NotVerified(String),

    /// Address could not be parsed into the chain's address format
    #[error("invalid address `{0}`")]
    InvalidAddress(String),

    /// The probed function is not declared in the bound ABI
    #[error("function `{0}` not present in contract ABI")]
    AbiFunctionNotFound(String),

    /// The bound ABI declares no callable functions at all
    #[error("ABI contains no function definitions")]
    NoAbiFunctions,

    /// No supply observation could be collected for this contract
    #[error("no supply parameters found for {0}")]
    AmbiguousSupplyData(String),

    /// Chain RPC invocation failed (reverted call, malformed ABI, node fault)
    #[error("RPC call failed: {0}")]
    Rpc(String),

    /// A remote payload did not have the expected structure
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ScoutError {
    fn from(err: reqwest::Error) -> Self {
        ScoutError::Network(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScoutError>;

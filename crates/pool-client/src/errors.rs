//! Possible errors thrown by the pool client

use alloy::sol_types::Error as SolError;
use pool_types::{Chain, PoolKind};

/// The error type returned by the pool client interface
#[derive(Clone, Debug, thiserror::Error)]
pub enum PoolClientError {
    /// Error thrown when the pool client configuration fails
    #[error("pool client configuration error: {0}")]
    Config(#[from] PoolClientConfigError),
    /// Error thrown when a contract call fails before reaching the chain
    #[error("contract interaction error: {0}")]
    ContractInteraction(String),
    /// The connected RPC endpoint or domain serves a different chain than
    /// the session expects
    #[error("chain mismatch: expected chain id {expected}, got {actual}")]
    ChainMismatch {
        /// The chain id the session is on
        expected: u64,
        /// The chain id that was observed
        actual: u64,
    },
    /// An error interacting with the stETH token
    #[error("stETH error: {0}")]
    Erc20(String),
    /// No address is configured for the requested pool
    #[error("no {0} pool is configured for this chain")]
    PoolNotConfigured(PoolKind),
    /// No donation factory is configured
    #[error("no donation factory is configured for this chain")]
    DonationFactoryNotConfigured,
    /// The contract reverted; the decoded reason is kept verbatim
    #[error("execution reverted: {0}")]
    Reverted(String),
    /// The user declined the request in their wallet
    #[error("request rejected: {0}")]
    Rejected(String),
    /// An error interacting with the lower level rpc client
    #[error("RPC error: {0}")]
    Rpc(String),
    /// A signing error
    #[error("signing error: {0}")]
    Signing(String),
    /// Error thrown when a transaction was mined but failed
    #[error("transaction failed: {0}")]
    TxFailed(String),
    /// Error thrown when a transaction's receipt does not arrive in time
    #[error("timed out awaiting receipt for {0}")]
    TxTimeout(String),
    /// No wallet is connected to the session
    #[error("wallet disconnected")]
    WalletDisconnected,
}

impl PoolClientError {
    /// Create a new contract interaction error
    #[allow(clippy::needless_pass_by_value)]
    pub fn contract_interaction<T: ToString>(msg: T) -> Self {
        Self::ContractInteraction(msg.to_string())
    }

    /// Create a new erc20 error
    #[allow(clippy::needless_pass_by_value)]
    pub fn erc20<T: ToString>(msg: T) -> Self {
        Self::Erc20(msg.to_string())
    }

    /// Create a new RPC error
    #[allow(clippy::needless_pass_by_value)]
    pub fn rpc<T: ToString>(msg: T) -> Self {
        Self::Rpc(msg.to_string())
    }

    /// Create a new signing error
    #[allow(clippy::needless_pass_by_value)]
    pub fn signing<T: ToString>(msg: T) -> Self {
        Self::Signing(msg.to_string())
    }

    /// Create a chain mismatch error against the given session chain
    pub fn chain_mismatch(expected: Chain, actual: u64) -> Self {
        Self::ChainMismatch { expected: expected.chain_id(), actual }
    }
}

/// The error type returned by the pool client configuration interface
#[derive(Clone, Debug, thiserror::Error)]
pub enum PoolClientConfigError {
    /// Error thrown when the RPC client fails to initialize
    #[error("RPC client initialization error: {0}")]
    RpcClientInitialization(String),
}

impl From<SolError> for PoolClientError {
    fn from(e: SolError) -> Self {
        Self::ContractInteraction(e.to_string())
    }
}

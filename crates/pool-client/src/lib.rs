//! Provides a client for interacting with the stETH token and the raffle,
//! stake and donation pool contracts, along with the permit deposit flow
//! that drives a deposit from a typed-data signature to an included
//! transaction.
//!
//! This contains abstractions for handling configuration details like RPC
//! endpoint and contract addresses, executing transactions and reading
//! contract state.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod abis;
pub mod client;
pub mod errors;
pub mod flow;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod session;
pub mod traits;

pub use client::{PoolClient, PoolClientConfig};
pub use flow::{FlowError, PermitDepositFlow};
pub use session::WalletSession;

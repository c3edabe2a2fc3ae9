//! Domain types shared by the stETH pool client
//!
//! Everything in this crate is pure: chain metadata, amount normalization,
//! EIP-712 permit construction, signature decomposition and the projections
//! used to display pool state. Contract I/O lives in `pool-client`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod amount;
pub mod chain;
pub mod display;
pub mod error;
pub mod interaction;
pub mod permit;
pub mod pool;
pub mod raffle;
pub mod signature;

pub use amount::AmountInput;
pub use chain::Chain;
pub use error::PoolTypesError;
pub use interaction::InteractionState;
pub use permit::{Permit, TokenDomain, TypedPermit};
pub use pool::{PoolAddresses, PoolKind};
pub use signature::PermitSignature;

/// The number of decimals of the stETH token
pub const STETH_DECIMALS: u8 = 18;

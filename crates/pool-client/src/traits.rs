//! The boundaries between the permit deposit flow and the outside world
//!
//! The flow only ever talks to a wallet through [`TypedDataSigner`] and to
//! the chain through [`PermitDepositor`], so both may be swapped for test
//! doubles.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use pool_types::{PermitSignature, PoolKind, TokenDomain, TypedPermit};

use crate::{client::PoolClient, errors::PoolClientError};

/// A wallet capable of answering typed-data signing requests
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
    /// The connected account, or `None` if no wallet is connected
    fn account(&self) -> Option<Address>;

    /// Ask the wallet to sign a permit
    ///
    /// Resolves to the hex encoded 65-byte signature, or
    /// [`PoolClientError::Rejected`] if the user declines
    async fn sign_typed_data(&self, permit: &TypedPermit) -> Result<String, PoolClientError>;
}

/// The on-chain side of a permit deposit
#[async_trait]
pub trait PermitDepositor: Send + Sync {
    /// The domain permits for the staked token are signed under
    fn token_domain(&self) -> TokenDomain;

    /// The address of the given pool, which is the permit's spender
    fn pool_address(&self, pool: PoolKind) -> Result<Address, PoolClientError>;

    /// Read the permit nonce of `owner`
    async fn permit_nonce(&self, owner: Address) -> Result<U256, PoolClientError>;

    /// Submit a permit deposit, resolving once the transaction is broadcast
    async fn deposit_with_permit(
        &self,
        pool: PoolKind,
        amount: U256,
        deadline: U256,
        signature: &PermitSignature,
    ) -> Result<TxHash, PoolClientError>;

    /// Wait for a submitted deposit to be included successfully
    async fn await_confirmation(&self, tx_hash: TxHash) -> Result<(), PoolClientError>;
}

#[async_trait]
impl PermitDepositor for PoolClient {
    fn token_domain(&self) -> TokenDomain {
        PoolClient::token_domain(self)
    }

    fn pool_address(&self, pool: PoolKind) -> Result<Address, PoolClientError> {
        PoolClient::pool_address(self, pool)
    }

    async fn permit_nonce(&self, owner: Address) -> Result<U256, PoolClientError> {
        self.get_permit_nonce(owner).await
    }

    async fn deposit_with_permit(
        &self,
        pool: PoolKind,
        amount: U256,
        deadline: U256,
        signature: &PermitSignature,
    ) -> Result<TxHash, PoolClientError> {
        self.deposit_steth_with_permit(pool, amount, deadline, signature).await
    }

    async fn await_confirmation(&self, tx_hash: TxHash) -> Result<(), PoolClientError> {
        self.await_receipt(tx_hash).await.map(|_| ())
    }
}

//! stETH token interactions on the pool client

use alloy::primitives::{Address, B256, TxHash, U256};
use pool_types::TokenDomain;
use tracing::info;

use crate::{
    abis::IERC20Permit::IERC20PermitInstance,
    client::{PoolClient, PoolProvider},
    errors::PoolClientError,
};

impl PoolClient {
    /// Get the stETH balance of an account
    pub async fn get_steth_balance(&self, owner: Address) -> Result<U256, PoolClientError> {
        let steth = self.steth_client();
        steth.balanceOf(owner).call().await.map_err(PoolClientError::erc20)
    }

    /// Get the current permit nonce of an account
    ///
    /// The nonce changes after every consumed permit, so callers should read
    /// it immediately before building a permit
    pub async fn get_permit_nonce(&self, owner: Address) -> Result<U256, PoolClientError> {
        let steth = self.steth_client();
        steth.nonces(owner).call().await.map_err(PoolClientError::erc20)
    }

    /// Get the stETH allowance `owner` has granted `spender`
    pub async fn get_allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<U256, PoolClientError> {
        let steth = self.steth_client();
        steth.allowance(owner, spender).call().await.map_err(PoolClientError::erc20)
    }

    /// Approve `spender` to pull `amount` stETH from the client's account
    pub async fn approve(&self, spender: Address, amount: U256) -> Result<TxHash, PoolClientError> {
        info!("approving {spender:#x} for {amount} stETH base units");
        let steth = self.steth_client();
        let call = steth.approve(spender, amount);
        self.send_tx(call).await
    }

    /// The EIP-712 domain stETH permits are signed under on this chain
    pub fn token_domain(&self) -> TokenDomain {
        TokenDomain::steth(self.chain, self.addresses.steth)
    }

    /// Get the domain separator stored in the token contract
    pub async fn get_domain_separator(&self) -> Result<B256, PoolClientError> {
        let steth = self.steth_client();
        steth.DOMAIN_SEPARATOR().call().await.map_err(PoolClientError::erc20)
    }

    /// Check that the locally derived permit domain matches the token's
    ///
    /// A mismatch means signatures built here would be rejected on-chain
    pub async fn verify_token_domain(&self) -> Result<(), PoolClientError> {
        let onchain = self.get_domain_separator().await?;
        let local = self.token_domain().separator();
        if onchain != local {
            let msg = format!("domain separator mismatch: token has {onchain:#x}, derived {local:#x}");
            return Err(PoolClientError::erc20(msg));
        }

        Ok(())
    }

    /// Get an instance of the stETH contract client
    pub(crate) fn steth_client(&self) -> IERC20PermitInstance<PoolProvider> {
        IERC20PermitInstance::new(self.addresses.steth, self.provider().clone())
    }
}

//! Donation pool factory interactions on the pool client

use alloy::primitives::{Address, TxHash, U256};
use tracing::{info, warn};

use crate::{
    abis::IDonationFactory::IDonationFactoryInstance,
    client::{PoolClient, PoolProvider},
    errors::PoolClientError,
};

/// The most donation pools listed in one call
pub const MAX_LISTED_DONATION_POOLS: u64 = 1024;

impl PoolClient {
    /// Create a donation pool (a campaign) managed by the client's account
    pub async fn create_donation_pool(
        &self,
        beneficiary: Address,
        title: &str,
    ) -> Result<TxHash, PoolClientError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PoolClientError::contract_interaction("campaign title must not be empty"));
        }

        info!("creating donation pool \"{title}\" for beneficiary {beneficiary:#x}");
        let factory = self.donation_factory()?;
        let call = factory.createDonationPool(self.account()?, beneficiary, title.to_string());
        self.send_tx(call).await
    }

    /// Get the number of donation pools the factory has created
    pub async fn get_donation_pools_count(&self) -> Result<U256, PoolClientError> {
        let factory = self.donation_factory()?;
        factory.getDonationPoolsCount().call().await.map_err(PoolClientError::contract_interaction)
    }

    /// List the addresses of the donation pools, oldest first
    ///
    /// At most [`MAX_LISTED_DONATION_POOLS`] pools are listed
    pub async fn get_donation_pools(&self) -> Result<Vec<Address>, PoolClientError> {
        let factory = self.donation_factory()?;
        let count = listed_pool_count(self.get_donation_pools_count().await?);

        let mut pools = Vec::new();
        for i in 0..count {
            let addr = factory
                .getDonationPoolAddress(U256::from(i))
                .call()
                .await
                .map_err(PoolClientError::contract_interaction)?;
            pools.push(addr);
        }

        Ok(pools)
    }

    /// Get an instance of the donation factory client
    fn donation_factory(&self) -> Result<IDonationFactoryInstance<PoolProvider>, PoolClientError> {
        let addr = self
            .addresses
            .donation_factory
            .ok_or(PoolClientError::DonationFactoryNotConfigured)?;
        Ok(IDonationFactoryInstance::new(addr, self.provider().clone()))
    }
}

/// The number of pools to list for a factory reporting `count`
fn listed_pool_count(count: U256) -> u64 {
    let capped = count.min(U256::from(MAX_LISTED_DONATION_POOLS)).saturating_to::<u64>();
    if U256::from(capped) < count {
        warn!("factory reports {count} donation pools, listing the first {capped}");
    }
    capped
}

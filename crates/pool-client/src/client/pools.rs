//! Raffle and stake pool interactions on the pool client
//!
//! Both pools accept the same deposit paths (plain ETH, approved stETH and
//! permit-authorized stETH) under slightly different function names, so each
//! operation dispatches on [`PoolKind`].

use std::fmt::Display;

use alloy::primitives::{Address, TxHash, U256};
use pool_types::{PermitSignature, PoolKind, display::compute_rewards, raffle::RaffleDetails};
use tracing::{info, warn};

use crate::{
    abis::{IRafflePool::IRafflePoolInstance, IStakePool::IStakePoolInstance},
    client::{PoolClient, PoolProvider},
    errors::PoolClientError,
};

impl PoolClient {
    /// The address of the given pool, if one is configured on this chain
    pub fn pool_address(&self, pool: PoolKind) -> Result<Address, PoolClientError> {
        self.addresses.pool(pool).ok_or(PoolClientError::PoolNotConfigured(pool))
    }

    // ------------
    // | Deposits |
    // ------------

    /// Deposit native ETH, which the pool stakes on the depositor's behalf
    pub async fn deposit_eth(&self, pool: PoolKind, amount: U256) -> Result<TxHash, PoolClientError> {
        info!("depositing {amount} wei of ETH into the {pool} pool");
        match pool {
            PoolKind::Raffle => {
                let raffle = self.raffle_client()?;
                self.send_tx(raffle.depositEth().value(amount)).await
            },
            PoolKind::Stake => {
                let stake = self.stake_client()?;
                self.send_tx(stake.depositETH().value(amount)).await
            },
        }
    }

    /// Deposit stETH the pool has already been approved to pull
    pub async fn deposit_steth(
        &self,
        pool: PoolKind,
        amount: U256,
    ) -> Result<TxHash, PoolClientError> {
        info!("depositing {amount} stETH base units into the {pool} pool");
        match pool {
            PoolKind::Raffle => {
                let raffle = self.raffle_client()?;
                self.send_tx(raffle.depositStEth(amount)).await
            },
            PoolKind::Stake => {
                let stake = self.stake_client()?;
                self.send_tx(stake.depositStEth(amount)).await
            },
        }
    }

    /// Deposit stETH authorized by an off-chain permit signature
    ///
    /// `amount` and `deadline` must be the exact values that were signed
    pub async fn deposit_steth_with_permit(
        &self,
        pool: PoolKind,
        amount: U256,
        deadline: U256,
        signature: &PermitSignature,
    ) -> Result<TxHash, PoolClientError> {
        info!("depositing {amount} stETH base units into the {pool} pool with a permit");
        let PermitSignature { v, r, s } = *signature;
        match pool {
            PoolKind::Raffle => {
                let raffle = self.raffle_client()?;
                self.send_tx(raffle.depositStEthWithPermit(amount, deadline, v, r, s)).await
            },
            PoolKind::Stake => {
                let stake = self.stake_client()?;
                self.send_tx(stake.depositStEthWithPermit(amount, deadline, v, r, s)).await
            },
        }
    }

    /// Deposit stETH through the two-transaction approval path
    ///
    /// An approval is only sent when the current allowance is short, and the
    /// deposit is only sent once the approval is included
    pub async fn approve_and_deposit(
        &self,
        pool: PoolKind,
        amount: U256,
    ) -> Result<TxHash, PoolClientError> {
        let spender = self.pool_address(pool)?;
        let allowance = self.get_allowance(self.account()?, spender).await?;
        if allowance < amount {
            let approval = self.approve(spender, amount).await?;
            self.await_receipt(approval).await?;
        }

        self.deposit_steth(pool, amount).await
    }

    /// Withdraw stETH from a pool
    pub async fn withdraw_steth(
        &self,
        pool: PoolKind,
        amount: U256,
    ) -> Result<TxHash, PoolClientError> {
        info!("withdrawing {amount} stETH base units from the {pool} pool");
        match pool {
            PoolKind::Raffle => {
                let raffle = self.raffle_client()?;
                self.send_tx(raffle.withdrawStEth(amount)).await
            },
            PoolKind::Stake => {
                let stake = self.stake_client()?;
                self.send_tx(stake.withdrawStETH(amount)).await
            },
        }
    }

    // ---------
    // | Reads |
    // ---------

    /// Get the amount `user` has deposited into a pool
    pub async fn get_user_deposit(
        &self,
        pool: PoolKind,
        user: Address,
    ) -> Result<U256, PoolClientError> {
        let res = match pool {
            PoolKind::Raffle => self.raffle_client()?.getUserDeposit(user).call().await,
            PoolKind::Stake => self.stake_client()?.balanceOf(user).call().await,
        };
        res.map_err(PoolClientError::contract_interaction)
    }

    /// Get the total stETH a pool holds, deposits and accrued rewards included
    pub async fn get_pool_total_balance(&self, pool: PoolKind) -> Result<U256, PoolClientError> {
        let res = match pool {
            PoolKind::Raffle => self.raffle_client()?.getTotalBalance().call().await,
            PoolKind::Stake => self.stake_client()?.totalBalance().call().await,
        };
        res.map_err(PoolClientError::contract_interaction)
    }

    /// Get the sum of every user's deposits into a pool
    pub async fn get_total_user_deposits(&self, pool: PoolKind) -> Result<U256, PoolClientError> {
        let res = match pool {
            PoolKind::Raffle => self.raffle_client()?.getTotalUserDeposits().call().await,
            PoolKind::Stake => self.stake_client()?.userDepositsTotal().call().await,
        };
        res.map_err(PoolClientError::contract_interaction)
    }

    /// Get the rewards a pool has accrued beyond its users' deposits
    ///
    /// Returns `None` when either balance read fails or the deposits exceed
    /// the balance, which the UI renders as not available
    pub async fn get_pool_rewards(&self, pool: PoolKind) -> Result<Option<U256>, PoolClientError> {
        self.pool_address(pool)?;
        let deposits = available(self.get_total_user_deposits(pool).await, "total user deposits");
        Ok(self.rewards_against(pool, deposits).await)
    }

    /// Read a snapshot of the raffle pool
    ///
    /// A failed read leaves its field unavailable rather than failing the
    /// snapshot
    pub async fn get_raffle_details(&self) -> Result<RaffleDetails, PoolClientError> {
        let raffle = self.raffle_client()?;
        let total_user_deposits =
            available(self.get_total_user_deposits(PoolKind::Raffle).await, "total user deposits");
        let rewards = self.rewards_against(PoolKind::Raffle, total_user_deposits).await;
        let player_count =
            available(raffle.getActiveDepositorsCount().call().await, "active depositors count");
        let last_timestamp: Option<U256> =
            available(raffle.getLastTimestamp().call().await, "last raffle timestamp");

        Ok(RaffleDetails {
            rewards,
            total_user_deposits,
            player_count,
            last_timestamp: last_timestamp.map(|t| t.saturating_to()),
        })
    }

    /// Compute a pool's rewards against an already read deposit total
    async fn rewards_against(&self, pool: PoolKind, deposits: Option<U256>) -> Option<U256> {
        let deposits = deposits?;
        let total = available(self.get_pool_total_balance(pool).await, "pool total balance")?;
        compute_rewards(total, deposits)
    }

    /// Get an instance of the raffle pool client
    fn raffle_client(&self) -> Result<IRafflePoolInstance<PoolProvider>, PoolClientError> {
        let addr = self.pool_address(PoolKind::Raffle)?;
        Ok(IRafflePoolInstance::new(addr, self.provider().clone()))
    }

    /// Get an instance of the stake pool client
    fn stake_client(&self) -> Result<IStakePoolInstance<PoolProvider>, PoolClientError> {
        let addr = self.pool_address(PoolKind::Stake)?;
        Ok(IStakePoolInstance::new(addr, self.provider().clone()))
    }
}

/// Turn a failed read into an unavailable value
fn available<T, E: Display>(res: Result<T, E>, what: &str) -> Option<T> {
    match res {
        Ok(val) => Some(val),
        Err(e) => {
            warn!("{what} not available: {e}");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy::primitives::Address;
    use pool_types::{Chain, PoolAddresses};

    use super::*;
    use crate::client::PoolClientConfig;

    /// A read-only client pointed at an endpoint nothing listens on
    fn unreachable_client(raffle_pool: Option<Address>) -> PoolClient {
        PoolClient::new(PoolClientConfig {
            chain: Chain::Devnet,
            rpc_url: "http://127.0.0.1:1".to_string(),
            private_key: None,
            addresses: PoolAddresses {
                steth: Address::repeat_byte(0xae),
                raffle_pool,
                ..Default::default()
            },
            block_polling_interval: Duration::from_millis(10),
            tx_receipt_timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_failed_reads_leave_rewards_unavailable() {
        let client = unreachable_client(Some(Address::repeat_byte(0x11)));
        assert_eq!(client.get_pool_rewards(PoolKind::Raffle).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_reads_leave_raffle_details_unavailable() {
        let client = unreachable_client(Some(Address::repeat_byte(0x11)));
        let details = client.get_raffle_details().await.unwrap();
        assert_eq!(details, RaffleDetails::default());
    }

    #[tokio::test]
    async fn test_unconfigured_pool_still_errors() {
        let client = unreachable_client(None);
        let res = client.get_pool_rewards(PoolKind::Raffle).await;
        assert!(matches!(res, Err(PoolClientError::PoolNotConfigured(PoolKind::Raffle))));
        assert!(client.get_raffle_details().await.is_err());
    }
}

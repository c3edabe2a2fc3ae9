//! Identifies the deposit pools and the contracts backing them

use std::{fmt::Display, str::FromStr};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// The pool contracts a user may deposit into
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PoolKind {
    /// The no-loss raffle pool; accrued staking rewards form a periodic jackpot
    Raffle,
    /// The staking pool; accrued staking rewards are tracked pool-wide
    Stake,
}

impl Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolKind::Raffle => write!(f, "raffle"),
            PoolKind::Stake => write!(f, "stake"),
        }
    }
}

impl FromStr for PoolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raffle" => Ok(PoolKind::Raffle),
            "stake" => Ok(PoolKind::Stake),
            _ => Err(format!("Invalid pool: {s}")),
        }
    }
}

/// The contract addresses the client talks to
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolAddresses {
    /// The stETH token, which is also the permit verifier
    pub steth: Address,
    /// The raffle pool, if deployed on this chain
    pub raffle_pool: Option<Address>,
    /// The staking pool, if deployed on this chain
    pub stake_pool: Option<Address>,
    /// The donation pool factory, if deployed on this chain
    pub donation_factory: Option<Address>,
}

impl PoolAddresses {
    /// Get the address of the given pool
    pub fn pool(&self, kind: PoolKind) -> Option<Address> {
        match kind {
            PoolKind::Raffle => self.raffle_pool,
            PoolKind::Stake => self.stake_pool,
        }
    }
}

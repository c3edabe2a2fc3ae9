//! Represents a chain environment

use std::{fmt::Display, str::FromStr};

use alloy::primitives::{Address, address};
use serde::{Deserialize, Serialize};

/// The chain environment
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Chain {
    /// The Ethereum Mainnet chain
    EthereumMainnet,
    /// The Goerli testnet, where the pools were first deployed
    Goerli,
    /// Any local devnet chain, e.g. anvil
    Devnet,
}

impl Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::EthereumMainnet => write!(f, "ethereum-mainnet"),
            Chain::Goerli => write!(f, "goerli"),
            Chain::Devnet => write!(f, "devnet"),
        }
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ethereum-mainnet" | "mainnet" => Ok(Chain::EthereumMainnet),
            "goerli" => Ok(Chain::Goerli),
            "devnet" | "foundry" => Ok(Chain::Devnet),
            _ => Err(format!("Invalid chain: {s}")),
        }
    }
}

impl Chain {
    /// All chains the client may switch between
    pub fn all() -> [Chain; 3] {
        [Chain::EthereumMainnet, Chain::Goerli, Chain::Devnet]
    }

    /// Get the chain ID for this chain
    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::EthereumMainnet => 1,
            Chain::Goerli => 5,
            Chain::Devnet => 31337,
        }
    }

    /// Look up a chain by its ID
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::all().into_iter().find(|c| c.chain_id() == chain_id)
    }

    /// Get the canonical stETH token address for this chain
    ///
    /// Devnets deploy their own token, so no default is known
    pub fn steth_addr(&self) -> Option<Address> {
        match self {
            Chain::EthereumMainnet => Some(address!("0xae7ab96520DE3A18E5e111B5EaAb095312D7fE84")),
            Chain::Goerli => Some(address!("0x1643E812aE58766192Cf7D2Cf9567dF2C37e9B7F")),
            Chain::Devnet => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_string_round_trip() {
        for chain in Chain::all() {
            assert_eq!(Chain::from_str(&chain.to_string()).unwrap(), chain);
        }
        assert!(Chain::from_str("arbitrum-one").is_err());
    }

    #[test]
    fn test_chain_id_lookup() {
        assert_eq!(Chain::from_chain_id(5), Some(Chain::Goerli));
        assert_eq!(Chain::from_chain_id(31337), Some(Chain::Devnet));
        assert_eq!(Chain::from_chain_id(42161), None);
    }
}

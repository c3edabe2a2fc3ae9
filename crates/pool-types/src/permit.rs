//! EIP-712 permit messages for gas-less stETH approvals
//!
//! The `Permit` struct and the domain below must match the token's on-chain
//! verifier bit for bit; the field order of `Permit` is part of its type hash.

#![allow(missing_docs)]

use std::borrow::Cow;

use alloy::{
    primitives::{Address, B256, U256},
    sol,
    sol_types::{Eip712Domain, SolStruct},
};
use serde_json::{Value, json};
use util::hex::address_to_hex_string;

use crate::{chain::Chain, error::PoolTypesError};

/// The EIP-712 domain name of the stETH token
pub const STETH_DOMAIN_NAME: &str = "Liquid staked Ether 2.0";
/// The EIP-712 domain version of the stETH token
pub const STETH_DOMAIN_VERSION: &str = "2";
/// The primary type name of a permit message
pub const PERMIT_PRIMARY_TYPE: &str = "Permit";

sol! {
    /// An ERC-2612 permit authorizing `spender` to move `value` of `owner`'s tokens
    #[derive(Debug, PartialEq, Eq)]
    struct Permit {
        address owner;
        address spender;
        uint256 value;
        uint256 nonce;
        uint256 deadline;
    }
}

/// The domain parameters of a permit-capable token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenDomain {
    /// The token's EIP-712 name
    pub name: String,
    /// The token's EIP-712 version
    pub version: String,
    /// The chain on which the token verifies signatures
    pub chain_id: u64,
    /// The token contract, which verifies the permit
    pub verifying_contract: Address,
    /// An optional domain salt
    pub salt: Option<B256>,
}

impl TokenDomain {
    /// The stETH domain on the given chain
    pub fn steth(chain: Chain, verifying_contract: Address) -> Self {
        Self {
            name: STETH_DOMAIN_NAME.to_string(),
            version: STETH_DOMAIN_VERSION.to_string(),
            chain_id: chain.chain_id(),
            verifying_contract,
            salt: None,
        }
    }

    /// Convert into an alloy EIP-712 domain
    pub fn to_eip712_domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            self.salt,
        )
    }

    /// The domain separator the token computes for this domain
    pub fn separator(&self) -> B256 {
        self.to_eip712_domain().separator()
    }
}

/// The message fields of a permit, before validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermitParams {
    /// The connected account granting the allowance
    pub owner: Address,
    /// The pool contract receiving the allowance
    pub spender: Address,
    /// The amount, in the token's base units
    pub value: U256,
    /// The owner's current permit nonce on the token
    pub nonce: U256,
    /// The unix timestamp after which the permit is void
    pub deadline: u64,
}

/// A permit message bound to its domain, ready for a typed-data signing
/// request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedPermit {
    /// The token domain
    pub domain: TokenDomain,
    /// The permit message
    pub message: Permit,
}

impl TypedPermit {
    /// Construct a typed permit, checking the deadline against `now`
    pub fn new(domain: TokenDomain, params: PermitParams, now: u64) -> Result<Self, PoolTypesError> {
        if params.deadline <= now {
            return Err(PoolTypesError::ExpiredDeadline { deadline: params.deadline, now });
        }

        let message = Permit {
            owner: params.owner,
            spender: params.spender,
            value: params.value,
            nonce: params.nonce,
            deadline: U256::from(params.deadline),
        };
        Ok(Self { domain, message })
    }

    /// The EIP-712 digest a wallet signs for this permit
    pub fn signing_hash(&self) -> B256 {
        self.message.eip712_signing_hash(&self.domain.to_eip712_domain())
    }

    /// The permit deadline as a unix timestamp
    pub fn deadline(&self) -> u64 {
        self.message.deadline.saturating_to()
    }

    /// Render the `eth_signTypedData_v4` payload for this permit
    ///
    /// Domain fields appear in canonical EIP-712 order; `salt` is included
    /// only when the domain carries one
    pub fn to_typed_data(&self) -> Value {
        let mut domain_types = vec![
            json!({ "name": "name", "type": "string" }),
            json!({ "name": "version", "type": "string" }),
            json!({ "name": "chainId", "type": "uint256" }),
            json!({ "name": "verifyingContract", "type": "address" }),
        ];
        let mut domain = json!({
            "name": self.domain.name,
            "version": self.domain.version,
            "chainId": self.domain.chain_id,
            "verifyingContract": address_to_hex_string(&self.domain.verifying_contract),
        });
        if let Some(salt) = self.domain.salt {
            domain_types.push(json!({ "name": "salt", "type": "bytes32" }));
            domain["salt"] = json!(salt.to_string());
        }

        json!({
            "types": {
                "EIP712Domain": domain_types,
                "Permit": [
                    { "name": "owner", "type": "address" },
                    { "name": "spender", "type": "address" },
                    { "name": "value", "type": "uint256" },
                    { "name": "nonce", "type": "uint256" },
                    { "name": "deadline", "type": "uint256" },
                ],
            },
            "primaryType": PERMIT_PRIMARY_TYPE,
            "domain": domain,
            "message": {
                "owner": address_to_hex_string(&self.message.owner),
                "spender": address_to_hex_string(&self.message.spender),
                "value": self.message.value.to_string(),
                "nonce": self.message.nonce.to_string(),
                "deadline": self.message.deadline.to_string(),
            },
        })
    }
}

//! The wallet session: which account is connected and on which chain

use alloy::{
    primitives::Address,
    signers::{Signer, local::PrivateKeySigner},
};
use async_trait::async_trait;
use pool_types::{Chain, TypedPermit};
use tracing::{debug, info};
use util::hex::bytes_to_hex_string;

use crate::{errors::PoolClientError, traits::TypedDataSigner};

/// A local-key wallet session
///
/// The session starts disconnected. Signing requests fail with
/// [`PoolClientError::WalletDisconnected`] until a key is connected, and with
/// [`PoolClientError::ChainMismatch`] if the permit targets another chain.
#[derive(Clone, Debug)]
pub struct WalletSession {
    /// The chain the wallet is switched to
    chain: Chain,
    /// The connected key, if any
    signer: Option<PrivateKeySigner>,
}

impl WalletSession {
    /// Create a disconnected session on the given chain
    pub fn new(chain: Chain) -> Self {
        Self { chain, signer: None }
    }

    /// Connect a key, replacing any previously connected one
    pub fn connect(&mut self, signer: PrivateKeySigner) -> Address {
        let address = signer.address();
        info!("wallet connected: {address:#x}");
        self.signer = Some(signer);
        address
    }

    /// Drop the connected key
    pub fn disconnect(&mut self) {
        if let Some(signer) = self.signer.take() {
            info!("wallet disconnected: {:#x}", signer.address());
        }
    }

    /// Whether a key is connected
    pub fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    /// The chain the session is on
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Switch the session to another chain
    pub fn switch_chain(&mut self, chain: Chain) {
        if chain != self.chain {
            info!("switching network from {} to {chain}", self.chain);
            self.chain = chain;
        }
    }
}

#[async_trait]
impl TypedDataSigner for WalletSession {
    fn account(&self) -> Option<Address> {
        self.signer.as_ref().map(PrivateKeySigner::address)
    }

    async fn sign_typed_data(&self, permit: &TypedPermit) -> Result<String, PoolClientError> {
        let signer = self.signer.as_ref().ok_or(PoolClientError::WalletDisconnected)?;
        if permit.domain.chain_id != self.chain.chain_id() {
            return Err(PoolClientError::chain_mismatch(self.chain, permit.domain.chain_id));
        }
        if permit.message.owner != signer.address() {
            let msg = format!(
                "permit owner {:#x} is not the connected account {:#x}",
                permit.message.owner,
                signer.address()
            );
            return Err(PoolClientError::signing(msg));
        }

        let hash = permit.signing_hash();
        debug!("signing permit digest {hash:#x}");
        let sig = signer.sign_hash(&hash).await.map_err(PoolClientError::signing)?;
        let bytes: Vec<u8> = sig.into();
        Ok(bytes_to_hex_string(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, Signature, U256};
    use pool_types::{PermitSignature, TokenDomain, permit::PermitParams};

    use super::*;

    /// The timestamp tests build permits at
    const NOW: u64 = 1_700_000_000;

    /// Build a permit owned by `owner` on `chain`
    fn permit_for(owner: Address, chain: Chain) -> TypedPermit {
        let domain = TokenDomain::steth(chain, Address::repeat_byte(0xae));
        let params = PermitParams {
            owner,
            spender: Address::repeat_byte(0x11),
            value: U256::from(1_500_000_000_000_000_000u128),
            nonce: U256::from(3u64),
            deadline: NOW + 3600,
        };
        TypedPermit::new(domain, params, NOW).unwrap()
    }

    #[tokio::test]
    async fn test_signature_recovers_owner() {
        let key = PrivateKeySigner::random();
        let owner = key.address();
        let mut session = WalletSession::new(Chain::Goerli);
        session.connect(key);

        let permit = permit_for(owner, Chain::Goerli);
        let hex = session.sign_typed_data(&permit).await.unwrap();
        let decomposed = PermitSignature::from_hex(&hex).unwrap();
        assert!(decomposed.v == 27 || decomposed.v == 28);

        let sig = Signature::from_raw(&decomposed.to_bytes()).unwrap();
        let recovered = sig.recover_address_from_prehash(&permit.signing_hash()).unwrap();
        assert_eq!(recovered, owner);
    }

    #[tokio::test]
    async fn test_disconnected_session_refuses() {
        let key = PrivateKeySigner::random();
        let owner = key.address();
        let mut session = WalletSession::new(Chain::Goerli);
        session.connect(key);
        assert!(session.is_connected());
        session.disconnect();

        assert!(!session.is_connected());
        assert!(session.account().is_none());
        let res = session.sign_typed_data(&permit_for(owner, Chain::Goerli)).await;
        assert!(matches!(res, Err(PoolClientError::WalletDisconnected)));
    }

    #[tokio::test]
    async fn test_wrong_chain_refuses() {
        let key = PrivateKeySigner::random();
        let owner = key.address();
        let mut session = WalletSession::new(Chain::EthereumMainnet);
        session.connect(key);

        let res = session.sign_typed_data(&permit_for(owner, Chain::Goerli)).await;
        assert!(matches!(res, Err(PoolClientError::ChainMismatch { expected: 1, actual: 5 })));

        session.switch_chain(Chain::Goerli);
        assert!(session.sign_typed_data(&permit_for(owner, Chain::Goerli)).await.is_ok());
    }
}

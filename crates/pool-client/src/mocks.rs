//! Test doubles for the wallet and chain boundaries of the deposit flow

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use alloy::{
    primitives::{Address, B256, TxHash, U256},
    signers::{Signer, local::PrivateKeySigner},
};
use async_trait::async_trait;
use pool_types::{Chain, PermitSignature, PoolKind, TokenDomain, TypedPermit};
use util::hex::bytes_to_hex_string;

use crate::{
    errors::PoolClientError,
    flow::DepositRequest,
    traits::{PermitDepositor, TypedDataSigner},
};

/// How a mock wallet answers signing requests
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WalletMode {
    /// Sign every request
    Approve,
    /// Decline every request
    Reject,
    /// Report no connected account
    Disconnected,
}

/// A wallet that signs with a random local key, or declines on demand
pub struct MockWallet {
    /// The signing key
    key: PrivateKeySigner,
    /// How requests are answered
    mode: WalletMode,
    /// The number of signing requests received
    requests: AtomicUsize,
}

impl MockWallet {
    /// Create a wallet with the given answer mode
    fn with_mode(mode: WalletMode) -> Self {
        Self { key: PrivateKeySigner::random(), mode, requests: AtomicUsize::new(0) }
    }

    /// A wallet that signs every request
    pub fn approving() -> Self {
        Self::with_mode(WalletMode::Approve)
    }

    /// A wallet whose user declines every request
    pub fn rejecting() -> Self {
        Self::with_mode(WalletMode::Reject)
    }

    /// A wallet with no connected account
    pub fn disconnected() -> Self {
        Self::with_mode(WalletMode::Disconnected)
    }

    /// The address of the wallet's key
    pub fn address(&self) -> Address {
        self.key.address()
    }

    /// The number of signing requests the wallet has received
    pub fn sign_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TypedDataSigner for MockWallet {
    fn account(&self) -> Option<Address> {
        match self.mode {
            WalletMode::Disconnected => None,
            _ => Some(self.key.address()),
        }
    }

    async fn sign_typed_data(&self, permit: &TypedPermit) -> Result<String, PoolClientError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            WalletMode::Approve => {
                let sig = self
                    .key
                    .sign_hash(&permit.signing_hash())
                    .await
                    .map_err(PoolClientError::signing)?;
                let bytes: Vec<u8> = sig.into();
                Ok(bytes_to_hex_string(&bytes))
            },
            WalletMode::Reject => {
                Err(PoolClientError::Rejected("User rejected the request.".to_string()))
            },
            WalletMode::Disconnected => Err(PoolClientError::WalletDisconnected),
        }
    }
}

/// A chain stand-in that records permit deposits instead of sending them
pub struct MockDepositor {
    /// The chain the token domain is bound to
    chain: Chain,
    /// The stETH token address
    token: Address,
    /// The pool address returned for every pool
    spender: Address,
    /// The nonce returned for every owner
    nonce: U256,
    /// The error returned instead of broadcasting, if any
    deposit_error: Option<PoolClientError>,
    /// The error returned instead of confirming, if any
    confirmation_error: Option<PoolClientError>,
    /// The deposits broadcast so far
    deposits: Mutex<Vec<DepositRequest>>,
}

impl MockDepositor {
    /// Create a depositor on `chain` that reports `nonce` for every owner
    pub fn new(chain: Chain, nonce: U256) -> Self {
        Self {
            chain,
            token: Address::repeat_byte(0xae),
            spender: Address::repeat_byte(0x22),
            nonce,
            deposit_error: None,
            confirmation_error: None,
            deposits: Mutex::new(Vec::new()),
        }
    }

    /// Fail every deposit with the given error
    pub fn failing_deposit(mut self, err: PoolClientError) -> Self {
        self.deposit_error = Some(err);
        self
    }

    /// Fail every confirmation with the given error
    pub fn failing_confirmation(mut self, err: PoolClientError) -> Self {
        self.confirmation_error = Some(err);
        self
    }

    /// The stETH token address
    pub fn token(&self) -> Address {
        self.token
    }

    /// The pool address permits are granted to
    pub fn spender(&self) -> Address {
        self.spender
    }

    /// The deposits broadcast so far
    pub fn deposits(&self) -> Vec<DepositRequest> {
        self.deposits.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PermitDepositor for MockDepositor {
    fn token_domain(&self) -> TokenDomain {
        TokenDomain::steth(self.chain, self.token)
    }

    fn pool_address(&self, _pool: PoolKind) -> Result<Address, PoolClientError> {
        Ok(self.spender)
    }

    async fn permit_nonce(&self, _owner: Address) -> Result<U256, PoolClientError> {
        Ok(self.nonce)
    }

    async fn deposit_with_permit(
        &self,
        pool: PoolKind,
        amount: U256,
        deadline: U256,
        signature: &PermitSignature,
    ) -> Result<TxHash, PoolClientError> {
        if let Some(err) = &self.deposit_error {
            return Err(err.clone());
        }

        let mut deposits = self.deposits.lock().map_err(PoolClientError::rpc)?;
        deposits.push(DepositRequest { pool, amount, deadline, signature: *signature });
        Ok(B256::repeat_byte(deposits.len() as u8))
    }

    async fn await_confirmation(&self, _tx_hash: TxHash) -> Result<(), PoolClientError> {
        match &self.confirmation_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

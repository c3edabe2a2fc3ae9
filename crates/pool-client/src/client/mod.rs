//! The definition of the pool client, which holds the configuration details
//! along with a signing RPC handle for the stETH token and pool contracts

use std::time::Duration;

use alloy::{
    contract::{CallBuilder, CallDecoder, Error as ContractError},
    primitives::{Address, ChainId, TxHash, U256},
    providers::{
        DynProvider, Provider, ProviderBuilder,
        fillers::{BlobGasFiller, ChainIdFiller, GasFiller},
    },
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    sol_types::decode_revert_reason,
    transports::{TransportError, http::reqwest::Url},
};
use pool_types::{Chain, PoolAddresses};
use tracing::{info, warn};
use util::err_str;

use crate::errors::{PoolClientConfigError, PoolClientError};

pub mod donation;
pub mod erc20;
pub mod pools;

// -------------
// | Constants |
// -------------

/// The JSON-RPC error code a wallet returns when the user declines a request
const USER_REJECTED_CODE: i64 = 4001;

/// A type alias for the RPC client, which is an alloy middleware stack that
/// includes a signer derived from a raw private key, and a provider that
/// connects to the RPC endpoint over HTTP.
pub type PoolProvider = DynProvider;
/// A pool call builder type
pub type PoolCallBuilder<'a, C> = CallBuilder<&'a DynProvider, C>;

/// A configuration struct for the pool client, consists of the contract
/// addresses for the selected chain, an endpoint for setting up an RPC client,
/// and a private key for signing transactions
pub struct PoolClientConfig {
    /// Which chain the client should interact with
    pub chain: Chain,
    /// HTTP-addressable RPC endpoint for the client to connect to
    pub rpc_url: String,
    /// The private key of the account to use for signing transactions
    ///
    /// Without a key the client is read-only
    pub private_key: Option<PrivateKeySigner>,
    /// The stETH token and pool addresses on `chain`
    pub addresses: PoolAddresses,
    /// The interval at which to poll for pending transactions
    pub block_polling_interval: Duration,
    /// How long to wait for a submitted transaction to be included
    pub tx_receipt_timeout: Duration,
}

impl PoolClientConfig {
    /// Constructs RPC clients capable of signing transactions from the
    /// configuration
    fn get_provider(&self) -> Result<PoolProvider, PoolClientConfigError> {
        let url = Url::parse(&self.rpc_url)
            .map_err(err_str!(PoolClientConfigError::RpcClientInitialization))?;
        let builder = ProviderBuilder::new()
            .disable_recommended_fillers()
            .with_simple_nonce_management()
            .filler(ChainIdFiller::default())
            .filler(GasFiller)
            .filler(BlobGasFiller::default());
        let provider = match self.private_key.clone() {
            Some(key) => DynProvider::new(builder.wallet(key).connect_http(url)),
            None => DynProvider::new(builder.connect_http(url)),
        };
        provider.client().set_poll_interval(self.block_polling_interval);

        Ok(provider)
    }
}

/// The pool client, which provides a higher-level interface to the stETH
/// token and the pool contracts deployed on one chain
#[derive(Clone)]
pub struct PoolClient {
    /// The signing RPC handle
    provider: PoolProvider,
    /// The chain the client is configured for
    chain: Chain,
    /// The contract addresses on `chain`
    addresses: PoolAddresses,
    /// The address transactions are sent from, if a key is configured
    account: Option<Address>,
    /// The interval at which to poll for receipts
    block_polling_interval: Duration,
    /// How long to wait for a receipt before giving up
    tx_receipt_timeout: Duration,
}

impl PoolClient {
    /// Constructs a new pool client from the given configuration
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(config: PoolClientConfig) -> Result<Self, PoolClientError> {
        let provider = config.get_provider()?;
        Ok(Self {
            provider,
            chain: config.chain,
            addresses: config.addresses,
            account: config.private_key.as_ref().map(PrivateKeySigner::address),
            block_polling_interval: config.block_polling_interval,
            tx_receipt_timeout: config.tx_receipt_timeout,
        })
    }

    /// Get a reference to the underlying RPC client
    pub fn provider(&self) -> &PoolProvider {
        &self.provider
    }

    /// The chain the client is configured for
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// The contract addresses the client talks to
    pub fn addresses(&self) -> &PoolAddresses {
        &self.addresses
    }

    /// The address transactions are sent from
    pub fn account(&self) -> Result<Address, PoolClientError> {
        self.account.ok_or(PoolClientError::WalletDisconnected)
    }

    /// Get the chain ID reported by the RPC endpoint
    pub async fn chain_id(&self) -> Result<ChainId, PoolClientError> {
        self.provider().get_chain_id().await.map_err(err_str!(PoolClientError::Rpc))
    }

    /// Check that the RPC endpoint serves the configured chain
    pub async fn check_chain(&self) -> Result<(), PoolClientError> {
        let actual = self.chain_id().await?;
        if actual != self.chain.chain_id() {
            return Err(PoolClientError::chain_mismatch(self.chain, actual));
        }

        Ok(())
    }

    /// Get the native ETH balance of an account
    pub async fn get_eth_balance(&self, owner: Address) -> Result<U256, PoolClientError> {
        self.provider().get_balance(owner).await.map_err(PoolClientError::rpc)
    }

    // ----------------
    // | Transactions |
    // ----------------

    /// Send a transaction and return its hash without waiting for inclusion
    ///
    /// Wallet rejections and reverts surfaced by the node are mapped to
    /// [`PoolClientError::Rejected`] and [`PoolClientError::Reverted`]
    pub(crate) async fn send_tx<'a, C>(
        &self,
        tx: PoolCallBuilder<'a, C>,
    ) -> Result<TxHash, PoolClientError>
    where
        C: CallDecoder + Send + Sync,
    {
        self.account()?;
        let pending_tx = match tx.send().await {
            Ok(tx) => tx,
            Err(ContractError::TransportError(TransportError::ErrorResp(err_payload))) => {
                if err_payload.code == USER_REJECTED_CODE {
                    return Err(PoolClientError::Rejected(err_payload.message.to_string()));
                }

                // Decode the revert reason if the node returned revert data
                let reason = err_payload
                    .as_revert_data()
                    .and_then(|data| decode_revert_reason(&data))
                    .unwrap_or_else(|| err_payload.message.to_string());
                warn!("transaction reverted: {reason}");
                return Err(PoolClientError::Reverted(reason));
            },
            Err(e) => return Err(PoolClientError::contract_interaction(e)),
        };

        let tx_hash = *pending_tx.tx_hash();
        info!("Pending tx hash: {tx_hash:#x}");
        Ok(tx_hash)
    }

    /// Poll for the receipt of a transaction until it is included or the
    /// receipt timeout elapses
    ///
    /// A receipt with a failed status is an error
    pub async fn await_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<TransactionReceipt, PoolClientError> {
        let poll = async {
            loop {
                let receipt = self
                    .provider()
                    .get_transaction_receipt(tx_hash)
                    .await
                    .map_err(PoolClientError::rpc)?;
                if let Some(receipt) = receipt {
                    return Ok::<_, PoolClientError>(receipt);
                }

                tokio::time::sleep(self.block_polling_interval).await;
            }
        };

        let receipt = tokio::time::timeout(self.tx_receipt_timeout, poll)
            .await
            .map_err(|_| PoolClientError::TxTimeout(format!("{tx_hash:#x}")))??;

        // Check for failure
        if !receipt.status() {
            let error_msg = format!("tx ({:#x}) failed with status 0", receipt.transaction_hash);
            return Err(PoolClientError::TxFailed(error_msg));
        }

        info!("tx {tx_hash:#x} included in block {:?}", receipt.block_number);
        Ok(receipt)
    }
}

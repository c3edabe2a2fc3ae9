//! The pool CLI and config definitions

use std::time::Duration;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use clap::{Parser, Subcommand};
use pool_client::PoolClientConfig;
use pool_types::{Chain, PoolAddresses, PoolKind};
use util::telemetry::{LevelFilter, configure_telemetry};

use crate::parsing::parse_config_from_args;

// -------
// | CLI |
// -------

/// Defines the pool client command line interface
#[derive(Debug, Parser)]
#[clap(author, about, long_about = None, args_override_self = true)]
#[rustfmt::skip]
pub struct Cli {
    // ---------------
    // | Config File |
    // ---------------
    /// A TOML config file to read options from; command line options take
    /// precedence over the file
    #[clap(long, value_parser)]
    pub config_file: Option<String>,

    // -----------------------
    // | Environment Configs |
    // -----------------------

    /// The chain to interact with
    #[clap(long, value_parser, default_value = "ethereum-mainnet", env = "CHAIN")]
    pub chain: Chain,
    /// The HTTP RPC endpoint of the chain
    #[clap(long, value_parser, default_value = "http://localhost:8545", env = "RPC_URL")]
    pub rpc_url: String,
    /// The hex encoded private key of the wallet to connect
    ///
    /// If omitted the wallet is disconnected and only reads are available
    #[clap(long, value_parser, env = "PRIVATE_KEY")]
    pub private_key: Option<String>,
    /// The account to read balances for when no wallet is connected
    #[clap(long, value_parser)]
    pub account: Option<String>,

    // ----------------------
    // | Contract Addresses |
    // ----------------------

    /// The stETH token address, defaults to the canonical deployment on the
    /// selected chain
    #[clap(long, value_parser, env = "STETH_ADDRESS")]
    pub steth_address: Option<String>,
    /// The raffle pool address
    #[clap(long, value_parser, env = "RAFFLE_POOL_ADDRESS")]
    pub raffle_pool_address: Option<String>,
    /// The stake pool address
    #[clap(long, value_parser, env = "STAKE_POOL_ADDRESS")]
    pub stake_pool_address: Option<String>,
    /// The donation pool factory address
    #[clap(long, value_parser, env = "DONATION_FACTORY_ADDRESS")]
    pub donation_factory_address: Option<String>,

    // -----------------------------
    // | Application Level Configs |
    // -----------------------------

    /// How long a signed permit stays valid, in seconds
    #[clap(long, value_parser, default_value = "3600")]
    pub permit_validity_secs: u64,
    /// The number of fractional digits balances are displayed with
    #[clap(long, value_parser, default_value = "4")]
    pub display_decimals: usize,
    /// The length of a raffle round, in seconds
    ///
    /// Defaults to one week
    #[clap(long, value_parser, default_value = "604800")]
    pub raffle_interval_secs: u64,
    /// The interval at which to poll for transaction receipts, in milliseconds
    #[clap(long, value_parser, default_value = "1000")]
    pub block_polling_interval_ms: u64,
    /// How long to wait for a transaction to be included, in seconds
    #[clap(long, value_parser, default_value = "60")]
    pub tx_receipt_timeout_secs: u64,

    // -------------
    // | Telemetry |
    // -------------

    /// Emit logs as structured json lines
    #[clap(long, value_parser, default_value = "false")]
    pub json_logs: bool,
    /// The default log level, overridden by `RUST_LOG`
    #[clap(long, value_parser, default_value = "info")]
    pub log_level: LevelFilter,

    // ------------
    // | Commands |
    // ------------

    /// The action to perform
    #[clap(subcommand)]
    pub command: Command,
}

/// The actions the pool client can perform
#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the supported networks and check the RPC endpoint's chain
    Networks,
    /// Show the account's ETH and stETH balances
    Balance,
    /// Show the account's deposit in a pool along with the pool's totals
    PoolBalance {
        /// The pool to inspect
        #[clap(long, value_parser, default_value = "raffle")]
        pool: PoolKind,
    },
    /// Show the rewards a pool has accrued
    Rewards {
        /// The pool to inspect
        #[clap(long, value_parser, default_value = "raffle")]
        pool: PoolKind,
    },
    /// Show the raffle jackpot, players and countdown to the next draw
    Raffle,
    /// Deposit native ETH into a pool
    DepositEth {
        /// The pool to deposit into
        #[clap(long, value_parser, default_value = "raffle")]
        pool: PoolKind,
        /// The amount of ETH, e.g. "1.5"
        amount: String,
    },
    /// Deposit stETH by signing a permit, then submitting it with the deposit
    DepositPermit {
        /// The pool to deposit into
        #[clap(long, value_parser, default_value = "raffle")]
        pool: PoolKind,
        /// The amount of stETH, e.g. "1.5"
        amount: String,
    },
    /// Deposit stETH by approving the pool, then depositing
    DepositApprove {
        /// The pool to deposit into
        #[clap(long, value_parser, default_value = "raffle")]
        pool: PoolKind,
        /// The amount of stETH, e.g. "1.5"
        amount: String,
    },
    /// Print the typed-data payload a permit deposit would ask a wallet to
    /// sign, without signing it
    PermitData {
        /// The pool the permit is granted to
        #[clap(long, value_parser, default_value = "raffle")]
        pool: PoolKind,
        /// The amount of stETH, e.g. "1.5"
        amount: String,
    },
    /// Withdraw stETH from a pool
    Withdraw {
        /// The pool to withdraw from
        #[clap(long, value_parser, default_value = "raffle")]
        pool: PoolKind,
        /// The amount of stETH
        #[clap(required_unless_present = "max")]
        amount: Option<String>,
        /// Withdraw the account's entire deposit
        #[clap(long, conflicts_with = "amount")]
        max: bool,
    },
    /// List the donation pools created by the factory
    DonationPools,
    /// Create a donation campaign managed by the connected account
    CreateCampaign {
        /// The address that receives the donations
        #[clap(long, value_parser)]
        beneficiary: String,
        /// The campaign title
        #[clap(long, value_parser)]
        title: String,
    },
}

impl Command {
    /// The pool this command reads from or writes to, if any
    pub fn pool(&self) -> Option<PoolKind> {
        match self {
            Command::PoolBalance { pool }
            | Command::Rewards { pool }
            | Command::DepositEth { pool, .. }
            | Command::DepositPermit { pool, .. }
            | Command::DepositApprove { pool, .. }
            | Command::PermitData { pool, .. }
            | Command::Withdraw { pool, .. } => Some(*pool),
            Command::Raffle => Some(PoolKind::Raffle),
            _ => None,
        }
    }

    /// Whether this command sends a transaction or signs a message
    pub fn needs_wallet(&self) -> bool {
        matches!(
            self,
            Command::DepositEth { .. }
                | Command::DepositPermit { .. }
                | Command::DepositApprove { .. }
                | Command::Withdraw { .. }
                | Command::CreateCampaign { .. }
        )
    }

    /// Whether this command talks to the donation factory
    pub fn needs_donation_factory(&self) -> bool {
        matches!(self, Command::DonationPools | Command::CreateCampaign { .. })
    }
}

// ----------
// | Config |
// ----------

/// Defines the parsed and validated config for the pool client
#[derive(Clone, Debug)]
pub struct PoolCliConfig {
    // -----------------------
    // | Environment Configs |
    // -----------------------
    /// The chain to interact with
    pub chain: Chain,
    /// The HTTP RPC endpoint of the chain
    pub rpc_url: String,
    /// The wallet key, if a wallet is connected
    pub private_key: Option<PrivateKeySigner>,
    /// The account to read balances for when no wallet is connected
    pub account: Option<Address>,
    /// The stETH token and pool addresses
    pub addresses: PoolAddresses,

    // -----------------------------
    // | Application Level Configs |
    // -----------------------------
    /// How long a signed permit stays valid, in seconds
    pub permit_validity_secs: u64,
    /// The number of fractional digits balances are displayed with
    pub display_decimals: usize,
    /// The length of a raffle round, in seconds
    pub raffle_interval_secs: u64,
    /// The interval at which to poll for transaction receipts
    pub block_polling_interval: Duration,
    /// How long to wait for a transaction to be included
    pub tx_receipt_timeout: Duration,

    // -------------
    // | Telemetry |
    // -------------
    /// Emit logs as structured json lines
    pub json_logs: bool,
    /// The default log level
    pub log_level: LevelFilter,

    /// The action to perform
    pub command: Command,
}

impl PoolCliConfig {
    /// The account balances are read for: the connected wallet, falling back
    /// to the configured read-only account
    pub fn account(&self) -> Option<Address> {
        self.private_key.as_ref().map(PrivateKeySigner::address).or(self.account)
    }

    /// Build the pool client config for the selected chain
    pub fn pool_client_config(&self) -> PoolClientConfig {
        PoolClientConfig {
            chain: self.chain,
            rpc_url: self.rpc_url.clone(),
            private_key: self.private_key.clone(),
            addresses: self.addresses.clone(),
            block_polling_interval: self.block_polling_interval,
            tx_receipt_timeout: self.tx_receipt_timeout,
        }
    }

    /// Configure the logging stack from the config
    pub fn configure_telemetry(&self) {
        configure_telemetry(self.json_logs, self.log_level);
    }
}

impl TryFrom<Cli> for PoolCliConfig {
    type Error = String;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        parse_config_from_args(cli)
    }
}

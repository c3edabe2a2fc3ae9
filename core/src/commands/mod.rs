//! Dispatches the parsed command to its handler

mod deposits;
mod donations;
mod reads;

use alloy::primitives::{Address, U256};
use config::{Command, PoolCliConfig};
use eyre::{Error, eyre};
use pool_client::PoolClient;
use pool_types::{AmountInput, STETH_DECIMALS};

/// Run the configured command against the client
pub async fn run(config: &PoolCliConfig, client: &PoolClient) -> Result<(), Error> {
    match &config.command {
        Command::Networks => reads::networks(config, client).await,
        Command::Balance => reads::balance(config, client).await,
        Command::PoolBalance { pool } => reads::pool_balance(config, client, *pool).await,
        Command::Rewards { pool } => reads::rewards(config, client, *pool).await,
        Command::Raffle => reads::raffle(config, client).await,
        Command::DepositEth { pool, amount } => {
            deposits::deposit_eth(config, client, *pool, amount).await
        },
        Command::DepositPermit { pool, amount } => {
            deposits::deposit_permit(config, client, *pool, amount).await
        },
        Command::DepositApprove { pool, amount } => {
            deposits::deposit_approve(config, client, *pool, amount).await
        },
        Command::PermitData { pool, amount } => {
            deposits::permit_data(config, client, *pool, amount).await
        },
        Command::Withdraw { pool, amount, max } => {
            deposits::withdraw(config, client, *pool, amount.as_deref(), *max).await
        },
        Command::DonationPools => donations::list(client).await,
        Command::CreateCampaign { beneficiary, title } => {
            donations::create(client, beneficiary, title).await
        },
    }
}

// -----------
// | Helpers |
// -----------

/// The account to act for, from the connected wallet or `--account`
fn resolve_account(config: &PoolCliConfig) -> Result<Address, Error> {
    config
        .account()
        .ok_or_else(|| eyre!("no account: connect a wallet with --private-key or pass --account"))
}

/// Parse a user-entered amount into non-zero stETH base units
fn parse_amount(raw: &str) -> Result<U256, Error> {
    let amount = AmountInput::new(raw).to_base_units(STETH_DECIMALS)?;
    if amount.is_zero() {
        return Err(eyre!("amount must be greater than zero"));
    }

    Ok(amount)
}

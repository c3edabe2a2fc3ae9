//! Read-only commands

use config::PoolCliConfig;
use eyre::Error;
use pool_client::PoolClient;
use pool_types::{
    Chain, PoolKind,
    display::{format_decimals, format_or_unavailable},
};
use util::get_current_time_seconds;

use super::resolve_account;

/// List the supported networks, marking the selected one, and report which
/// chain the RPC endpoint serves
pub async fn networks(config: &PoolCliConfig, client: &PoolClient) -> Result<(), Error> {
    for chain in Chain::all() {
        let marker = if chain == config.chain { "*" } else { " " };
        println!("{marker} {chain} (chain id {})", chain.chain_id());
    }

    let rpc_chain = client.chain_id().await?;
    match Chain::from_chain_id(rpc_chain) {
        Some(chain) if chain == config.chain => println!("RPC endpoint serves {chain}"),
        Some(chain) => println!("RPC endpoint serves {chain}, switch with --chain {chain}"),
        None => println!("RPC endpoint serves unsupported chain id {rpc_chain}"),
    }

    Ok(())
}

/// Show the account's ETH and stETH balances
pub async fn balance(config: &PoolCliConfig, client: &PoolClient) -> Result<(), Error> {
    let account = resolve_account(config)?;
    let places = config.display_decimals;

    let eth = client.get_eth_balance(account).await?;
    let steth = client.get_steth_balance(account).await?;
    println!("Account: {account:#x}");
    println!("ETH: {}", format_decimals(eth, places));
    println!("stETH: {}", format_decimals(steth, places));
    Ok(())
}

/// Show the account's deposit in a pool and the pool's totals
pub async fn pool_balance(
    config: &PoolCliConfig,
    client: &PoolClient,
    pool: PoolKind,
) -> Result<(), Error> {
    let account = resolve_account(config)?;
    let places = config.display_decimals;

    let deposit = client.get_user_deposit(pool, account).await?;
    let total = client.get_pool_total_balance(pool).await?;
    let deposits = client.get_total_user_deposits(pool).await?;
    println!("Your {pool} pool deposit: {} stETH", format_decimals(deposit, places));
    println!("Total deposits: {} stETH", format_decimals(deposits, places));
    println!("Pool balance: {} stETH", format_decimals(total, places));
    Ok(())
}

/// Show the rewards a pool has accrued
pub async fn rewards(
    config: &PoolCliConfig,
    client: &PoolClient,
    pool: PoolKind,
) -> Result<(), Error> {
    let rewards = client.get_pool_rewards(pool).await?;
    println!("{pool} pool rewards: {}", format_or_unavailable(rewards, config.display_decimals));
    Ok(())
}

/// Show the raffle summary
pub async fn raffle(config: &PoolCliConfig, client: &PoolClient) -> Result<(), Error> {
    let details = client.get_raffle_details().await?;
    let now = get_current_time_seconds();
    println!("{}", details.summary(config.raffle_interval_secs, now, config.display_decimals));
    Ok(())
}

//! Deposit and withdrawal commands

use config::PoolCliConfig;
use eyre::{Error, eyre};
use pool_client::{PermitDepositFlow, PoolClient, WalletSession};
use pool_types::{
    PoolKind, STETH_DECIMALS, TypedPermit,
    display::{format_balance, format_decimals},
    permit::PermitParams,
};
use tracing::warn;
use util::get_current_time_seconds;

use super::{parse_amount, resolve_account};

/// Deposit native ETH
pub async fn deposit_eth(
    config: &PoolCliConfig,
    client: &PoolClient,
    pool: PoolKind,
    raw_amount: &str,
) -> Result<(), Error> {
    let account = resolve_account(config)?;
    let amount = parse_amount(raw_amount)?;
    let balance = client.get_eth_balance(account).await?;
    if amount > balance {
        return Err(eyre!(
            "insufficient ETH: have {}",
            format_decimals(balance, config.display_decimals)
        ));
    }

    let tx_hash = client.deposit_eth(pool, amount).await?;
    println!("Deposit submitted: {tx_hash:#x}");
    client.await_receipt(tx_hash).await?;
    println!("Deposit confirmed");
    Ok(())
}

/// Deposit stETH with a signed permit
pub async fn deposit_permit(
    config: &PoolCliConfig,
    client: &PoolClient,
    pool: PoolKind,
    raw_amount: &str,
) -> Result<(), Error> {
    let key = config.private_key.clone().ok_or_else(|| eyre!("no wallet connected"))?;
    let mut session = WalletSession::new(config.chain);
    let account = session.connect(key);

    let amount = parse_amount(raw_amount)?;
    let balance = client.get_steth_balance(account).await?;
    if amount > balance {
        return Err(eyre!(
            "insufficient stETH: have {}",
            format_decimals(balance, config.display_decimals)
        ));
    }
    if let Err(e) = client.verify_token_domain().await {
        warn!("{e}");
    }

    let mut flow = PermitDepositFlow::new(pool, config.permit_validity_secs);
    flow.set_amount(raw_amount)?;

    flow.sign(&session, client).await?;
    if let Some(signed) = flow.signed_permit() {
        let value = format_balance(signed.permit.message.value, STETH_DECIMALS as usize);
        println!("Permit signed for {value} stETH, valid until {}", signed.permit.deadline());
    }
    let tx_hash = flow.submit(&session, client).await?;
    println!("Deposit submitted: {tx_hash:#x}");
    flow.confirm(client).await?;
    println!("Deposit confirmed");
    Ok(())
}

/// Deposit stETH through an approval followed by a deposit
pub async fn deposit_approve(
    config: &PoolCliConfig,
    client: &PoolClient,
    pool: PoolKind,
    raw_amount: &str,
) -> Result<(), Error> {
    let account = resolve_account(config)?;
    let amount = parse_amount(raw_amount)?;
    let balance = client.get_steth_balance(account).await?;
    if amount > balance {
        return Err(eyre!(
            "insufficient stETH: have {}",
            format_decimals(balance, config.display_decimals)
        ));
    }

    let tx_hash = client.approve_and_deposit(pool, amount).await?;
    println!("Deposit submitted: {tx_hash:#x}");
    client.await_receipt(tx_hash).await?;
    println!("Deposit confirmed");
    Ok(())
}

/// Print the typed-data payload of a permit deposit without signing it
pub async fn permit_data(
    config: &PoolCliConfig,
    client: &PoolClient,
    pool: PoolKind,
    raw_amount: &str,
) -> Result<(), Error> {
    let owner = resolve_account(config)?;
    let value = parse_amount(raw_amount)?;
    let spender = client.pool_address(pool)?;
    let nonce = client.get_permit_nonce(owner).await?;

    let now = get_current_time_seconds();
    let deadline = now.saturating_add(config.permit_validity_secs);
    let params = PermitParams { owner, spender, value, nonce, deadline };
    let permit = TypedPermit::new(client.token_domain(), params, now)?;

    println!("{}", serde_json::to_string_pretty(&permit.to_typed_data())?);
    Ok(())
}

/// Withdraw stETH, either a given amount or the whole deposit
pub async fn withdraw(
    config: &PoolCliConfig,
    client: &PoolClient,
    pool: PoolKind,
    raw_amount: Option<&str>,
    max: bool,
) -> Result<(), Error> {
    let account = resolve_account(config)?;
    let deposit = client.get_user_deposit(pool, account).await?;
    let amount = match raw_amount {
        _ if max => deposit,
        Some(raw) => parse_amount(raw)?,
        None => return Err(eyre!("pass an amount or --max")),
    };

    if amount.is_zero() {
        return Err(eyre!("nothing to withdraw"));
    }
    if amount > deposit {
        return Err(eyre!(
            "amount exceeds your deposit of {} stETH",
            format_decimals(deposit, config.display_decimals)
        ));
    }

    let tx_hash = client.withdraw_steth(pool, amount).await?;
    println!("Withdrawal submitted: {tx_hash:#x}");
    client.await_receipt(tx_hash).await?;
    println!("Withdrawal confirmed");
    Ok(())
}

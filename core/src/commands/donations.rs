//! Donation campaign commands

use eyre::{Error, eyre};
use pool_client::PoolClient;
use util::hex::address_from_hex_string;

/// List the donation pools the factory has created
pub async fn list(client: &PoolClient) -> Result<(), Error> {
    let pools = client.get_donation_pools().await?;
    if pools.is_empty() {
        println!("No donation pools yet");
        return Ok(());
    }

    for (i, pool) in pools.iter().enumerate() {
        println!("{i}: {pool:#x}");
    }
    Ok(())
}

/// Create a campaign and wait for it to be included
pub async fn create(client: &PoolClient, beneficiary: &str, title: &str) -> Result<(), Error> {
    let beneficiary = address_from_hex_string(beneficiary)
        .map_err(|e| eyre!("invalid beneficiary address: {e}"))?;

    let tx_hash = client.create_donation_pool(beneficiary, title).await?;
    println!("Campaign submitted: {tx_hash:#x}");
    client.await_receipt(tx_hash).await?;
    println!("Campaign created");
    Ok(())
}

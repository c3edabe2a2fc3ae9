//! Parsing logic for the pool client config

use std::{env, str::FromStr, time::Duration};

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use clap::Parser;
use pool_types::{Chain, PoolAddresses};
use util::{hex::address_from_hex_string, raw_err_str};

use crate::{
    Cli, PoolCliConfig, parsing::config_file::config_file_args, validation::validate_config,
};

pub mod config_file;

/// Parses command line args into the pool client config
///
/// We allow for configurations to come from both a config file and overrides
/// on the command line directly. To support this, we first read configuration
/// options from the config file, prepend them to the cli args string, and parse
/// using the `args_override_self` option so that cli args (which come after
/// config file args) take precedence.
pub fn parse_command_line_args() -> Result<PoolCliConfig, String> {
    let command_line_args: Vec<String> = env::args().collect();
    let full_args = splice_config_file_args(command_line_args)?;
    let cli = Cli::parse_from(full_args);
    parse_config_from_args(cli)
}

/// Splice config file args into a raw argument list
///
/// The first argument is the executable name, so the file args are placed
/// after it but before everything else
pub fn splice_config_file_args(mut args: Vec<String>) -> Result<Vec<String>, String> {
    let config_file_args = config_file_args(&args)?;
    if args.is_empty() {
        return Err("missing executable name".to_string());
    }

    let mut full_args = vec![args.remove(0)];
    full_args.extend(config_file_args);
    full_args.extend(args);
    Ok(full_args)
}

/// Splice config file args into a raw argument list and parse it, returning
/// clap errors instead of exiting
pub fn parse_cli_with_config_file(args: Vec<String>) -> Result<Cli, String> {
    let full_args = splice_config_file_args(args)?;
    Cli::try_parse_from(full_args).map_err(|e| e.to_string())
}

/// Parse the config from a set of command line arguments
///
/// Separating out this functionality allows us to easily inject custom args
/// apart from what is specified on the command line
pub(crate) fn parse_config_from_args(cli_args: Cli) -> Result<PoolCliConfig, String> {
    let private_key = cli_args
        .private_key
        .as_deref()
        .map(|k| PrivateKeySigner::from_str(k).map_err(raw_err_str!("invalid private key: {}")))
        .transpose()?;
    let account = parse_optional_address("account", cli_args.account.as_deref())?;
    let addresses = parse_addresses(&cli_args)?;

    let config = PoolCliConfig {
        chain: cli_args.chain,
        rpc_url: cli_args.rpc_url,
        private_key,
        account,
        addresses,
        permit_validity_secs: cli_args.permit_validity_secs,
        display_decimals: cli_args.display_decimals,
        raffle_interval_secs: cli_args.raffle_interval_secs,
        block_polling_interval: Duration::from_millis(cli_args.block_polling_interval_ms),
        tx_receipt_timeout: Duration::from_secs(cli_args.tx_receipt_timeout_secs),
        json_logs: cli_args.json_logs,
        log_level: cli_args.log_level,
        command: cli_args.command,
    };

    validate_config(&config)?;
    Ok(config)
}

// -------------------
// | Address Parsing |
// -------------------

/// Parse the contract addresses, defaulting stETH to the chain's canonical
/// deployment
fn parse_addresses(cli: &Cli) -> Result<PoolAddresses, String> {
    let steth = match parse_optional_address("steth-address", cli.steth_address.as_deref())? {
        Some(addr) => addr,
        None => default_steth_address(cli.chain)?,
    };

    Ok(PoolAddresses {
        steth,
        raffle_pool: parse_optional_address(
            "raffle-pool-address",
            cli.raffle_pool_address.as_deref(),
        )?,
        stake_pool: parse_optional_address("stake-pool-address", cli.stake_pool_address.as_deref())?,
        donation_factory: parse_optional_address(
            "donation-factory-address",
            cli.donation_factory_address.as_deref(),
        )?,
    })
}

/// The canonical stETH address on a chain
fn default_steth_address(chain: Chain) -> Result<Address, String> {
    chain
        .steth_addr()
        .ok_or_else(|| format!("`steth-address` must be set on {chain}, it has no default"))
}

/// Parse an optional hex address, naming the option in the error
fn parse_optional_address(name: &str, value: Option<&str>) -> Result<Option<Address>, String> {
    value
        .map(|v| address_from_hex_string(v).map_err(raw_err_str!("invalid `{}`: {}", name)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::Command;

    /// A well known test key (the first anvil account)
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    /// Parse a config from the given args, prefixed with a program name
    fn parse(args: &[&str]) -> Result<PoolCliConfig, String> {
        let mut full = vec!["pool-cli".to_string()];
        full.extend(args.iter().map(|a| a.to_string()));
        let cli = parse_cli_with_config_file(full)?;
        parse_config_from_args(cli)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["balance"]).unwrap();
        assert_eq!(config.chain, Chain::EthereumMainnet);
        assert_eq!(config.addresses.steth, Chain::EthereumMainnet.steth_addr().unwrap());
        assert_eq!(config.permit_validity_secs, 3600);
        assert_eq!(config.display_decimals, 4);
        assert_eq!(config.tx_receipt_timeout, Duration::from_secs(60));
        assert!(config.private_key.is_none());
        assert_eq!(config.command, Command::Balance);
    }

    #[test]
    fn test_private_key_sets_account() {
        let config = parse(&["--private-key", TEST_KEY, "balance"]).unwrap();
        assert_eq!(config.account(), Some(address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")));
    }

    #[test]
    fn test_invalid_private_key() {
        let err = parse(&["--private-key", "0x1234", "balance"]).unwrap_err();
        assert!(err.contains("invalid private key"));
    }

    #[test]
    fn test_invalid_address_names_option() {
        let err = parse(&["--account", "0xnotanaddress", "balance"]).unwrap_err();
        assert!(err.starts_with("invalid `account`: "));
    }

    #[test]
    fn test_devnet_requires_steth() {
        let err = parse(&["--chain", "devnet", "balance"]).unwrap_err();
        assert!(err.contains("steth-address"));

        let config = parse(&[
            "--chain",
            "devnet",
            "--steth-address",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "balance",
        ])
        .unwrap();
        assert_eq!(config.addresses.steth, address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
    }

    #[test]
    fn test_withdraw_max() {
        let config = parse(&[
            "--raffle-pool-address",
            "0x1111111111111111111111111111111111111111",
            "--private-key",
            TEST_KEY,
            "withdraw",
            "--max",
        ])
        .unwrap();
        assert!(matches!(config.command, Command::Withdraw { amount: None, max: true, .. }));
    }
}

//! Config validation

use pool_types::STETH_DECIMALS;

use crate::PoolCliConfig;

/// Validate a parsed config
pub fn validate_config(config: &PoolCliConfig) -> Result<(), String> {
    if config.permit_validity_secs == 0 {
        return Err("`permit-validity-secs` must be greater than zero".to_string());
    }

    if config.display_decimals > STETH_DECIMALS as usize {
        return Err(format!("`display-decimals` must be at most {STETH_DECIMALS}"));
    }

    if config.tx_receipt_timeout.is_zero() {
        return Err("`tx-receipt-timeout-secs` must be greater than zero".to_string());
    }

    // The selected command's contracts must be configured
    if let Some(pool) = config.command.pool() {
        if config.addresses.pool(pool).is_none() {
            return Err(format!("`{pool}-pool-address` must be set to use the {pool} pool"));
        }
    }

    if config.command.needs_donation_factory() && config.addresses.donation_factory.is_none() {
        return Err("`donation-factory-address` must be set to use donation pools".to_string());
    }

    if config.command.needs_wallet() && config.private_key.is_none() {
        return Err("`private-key` must be set to connect a wallet for this command".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy::primitives::Address;
    use pool_types::{Chain, PoolAddresses, PoolKind};
    use util::telemetry::LevelFilter;

    use super::*;
    use crate::Command;

    /// A config that passes validation for the given command
    fn config_for(command: Command) -> PoolCliConfig {
        PoolCliConfig {
            chain: Chain::Goerli,
            rpc_url: "http://localhost:8545".to_string(),
            private_key: None,
            account: None,
            addresses: PoolAddresses {
                steth: Chain::Goerli.steth_addr().unwrap(),
                raffle_pool: Some(Address::repeat_byte(1)),
                stake_pool: None,
                donation_factory: None,
            },
            permit_validity_secs: 3600,
            display_decimals: 4,
            raffle_interval_secs: 604_800,
            block_polling_interval: Duration::from_secs(1),
            tx_receipt_timeout: Duration::from_secs(60),
            json_logs: false,
            log_level: LevelFilter::INFO,
            command,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&config_for(Command::Raffle)).is_ok());
    }

    #[test]
    fn test_zero_validity_rejected() {
        let mut config = config_for(Command::Balance);
        config.permit_validity_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_display_decimals_bounded() {
        let mut config = config_for(Command::Balance);
        config.display_decimals = 18;
        assert!(validate_config(&config).is_ok());
        config.display_decimals = 19;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_pool_rejected() {
        let config = config_for(Command::Rewards { pool: PoolKind::Stake });
        let err = validate_config(&config).unwrap_err();
        assert!(err.contains("stake-pool-address"));
    }

    #[test]
    fn test_write_commands_need_wallet() {
        let command = Command::DepositPermit { pool: PoolKind::Raffle, amount: "1".to_string() };
        let err = validate_config(&config_for(command)).unwrap_err();
        assert!(err.contains("private-key"));

        let err = validate_config(&config_for(Command::DonationPools)).unwrap_err();
        assert!(err.contains("donation-factory-address"));
    }
}

//! The pool client CLI: reads stETH pool state and drives deposits,
//! withdrawals and donation campaigns from the command line

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::needless_pass_by_ref_mut)]

mod commands;

use config::{Command, parse_command_line_args};
use eyre::{Error, eyre};
use pool_client::PoolClient;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Parse CLI & config
    let config = parse_command_line_args().map_err(|e| eyre!(e))?;
    config.configure_telemetry();
    info!("pool client running on {} via {}", config.chain, config.rpc_url);

    let client = PoolClient::new(config.pool_client_config())?;
    if let Err(e) = client.check_chain().await {
        // The network listing reports the mismatch itself
        if !matches!(config.command, Command::Networks) {
            return Err(e.into());
        }
        warn!("{e}");
    }

    commands::run(&config, &client).await
}

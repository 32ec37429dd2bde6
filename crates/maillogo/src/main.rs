//! `maillogo` - serves logos for email sender domains.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use maillogo::Config;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    maillogo::init_tracing();

    let config = Config::from_env()?;
    info!(
        addr = %config.bind_addr,
        fetch_timeout = ?config.fetch_timeout,
        "Starting maillogo"
    );

    maillogo::serve(config).await?;
    Ok(())
}

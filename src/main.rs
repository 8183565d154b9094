use clap::Parser;
use govly::server::{CliArgs, ServerConfig, init_logging, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_args(CliArgs::parse())?;
    init_logging(config.log_format)?;

    tracing::info!(
        ireland = %config.endpoints.ireland,
        sdi = %config.endpoints.sdi,
        hmrc = %config.endpoints.hmrc_base,
        "starting govly"
    );

    run_server(config).await
}

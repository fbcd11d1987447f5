//! advisor-server binary

use advisor_server::ServerConfig;
use advisor_utils::LogFormat;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "advisor-server")]
#[command(about = "Shopping recommendations and stock dashboard", long_about = None)]
struct Args {
    /// Address to bind, overrides HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    advisor_utils::init_tracing_with(config.environment.default_log_filter(), format);

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    tracing::info!(environment = %config.environment, "Starting advisor-server");
    advisor_server::serve(config).await
}

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cloudflare_lib::{ApiClient, CancellationToken, ClientConfig};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "cfctl")]
#[command(about = "Query zones, DNS records and R2 buckets through the Cloudflare API")]
struct Cli {
    /// Output format: table, json or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides CLOUDFLARE_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or show zones
    Zones(commands::zones::ZonesArgs),
    /// List or export DNS records
    Dns(commands::dns::DnsArgs),
    /// List R2 buckets
    Buckets(commands::buckets::BucketsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cfctl=info,cloudflare_lib=warn,cloudflare_api=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("Interrupted, cancelling outstanding requests");
                token.cancel();
            }
        });
    }
    let client = ApiClient::new(config)?.with_cancellation(token);

    match &cli.command {
        Commands::Zones(args) => commands::zones::run(args, &client, &format).await?,
        Commands::Dns(args) => commands::dns::run(args, &client, &format).await?,
        Commands::Buckets(args) => commands::buckets::run(args, &client, &format).await?,
    }

    Ok(())
}

use anyhow::Result;
use clap::{Args, Subcommand};
use cloudflare_lib::ApiClient;

use crate::commands::drain;
use crate::output::{print_buckets, OutputFormat};

#[derive(Args)]
pub struct BucketsArgs {
    #[command(subcommand)]
    pub action: BucketsAction,
}

#[derive(Subcommand)]
pub enum BucketsAction {
    /// List R2 buckets in an account
    List {
        /// Account ID
        account_id: String,

        /// Results per page
        #[arg(long, default_value = "100")]
        per_page: u32,

        /// Stop after this many buckets
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub async fn run(args: &BucketsArgs, client: &ApiClient, format: &OutputFormat) -> Result<()> {
    match &args.action {
        BucketsAction::List {
            account_id,
            per_page,
            limit,
        } => {
            let stream = client.list_buckets(account_id, Some(*per_page));
            drain(stream, *limit, |buckets| print_buckets(buckets, format)).await
        }
    }
}

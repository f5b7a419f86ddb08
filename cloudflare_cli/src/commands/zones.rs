use anyhow::Result;
use clap::{Args, Subcommand};
use cloudflare_lib::types::ZoneStatus;
use cloudflare_lib::{ApiClient, PageQuery, SortDirection, ZoneOrder, ZoneQuery};

use crate::commands::drain;
use crate::output::{print_json, print_zones, OutputFormat};

#[derive(Args)]
pub struct ZonesArgs {
    #[command(subcommand)]
    pub action: ZonesAction,
}

#[derive(Subcommand)]
pub enum ZonesAction {
    /// List zones
    List(ZonesListArgs),
    /// Show a single zone
    Get {
        /// Zone ID
        id: String,
    },
}

#[derive(Args)]
pub struct ZonesListArgs {
    /// Filter by exact zone name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by status: initializing, pending, active, moved
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by account ID
    #[arg(long)]
    pub account_id: Option<String>,

    /// Sort field: name, status, account.id, account.name
    #[arg(long)]
    pub order: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Fetch only this page instead of the whole listing
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long, default_value = "50")]
    pub per_page: u32,

    /// Stop after this many zones
    #[arg(long)]
    pub limit: Option<usize>,
}

pub async fn run(args: &ZonesArgs, client: &ApiClient, format: &OutputFormat) -> Result<()> {
    match &args.action {
        ZonesAction::Get { id } => {
            let zone = client.get_zone(id).await?;
            match format {
                OutputFormat::Json => print_json(&zone),
                _ => print_zones(std::slice::from_ref(&zone), format),
            }
            Ok(())
        }
        ZonesAction::List(list) => run_list(list, client, format).await,
    }
}

async fn run_list(args: &ZonesListArgs, client: &ApiClient, format: &OutputFormat) -> Result<()> {
    let mut query = ZoneQuery::default();
    if let Some(name) = &args.name {
        query = query.with_name(name);
    }
    if let Some(status) = &args.status {
        query = query.with_status(ZoneStatus::new(status.as_str()));
    }
    if let Some(account_id) = &args.account_id {
        query = query.with_account_id(account_id);
    }
    if let Some(order) = &args.order {
        query = query.with_order(ZoneOrder::new(order.as_str()));
    }
    if args.desc {
        query = query.with_direction(SortDirection::Desc);
    }

    if let Some(page) = args.page {
        let resp = client
            .zones_page(&query, PageQuery::new(page, Some(args.per_page)))
            .await?;
        if let Some(info) = &resp.info {
            eprintln!(
                "Page {}/{} ({} total zones)",
                info.page, info.total_pages, info.total_count
            );
        }
        print_zones(&resp.items, format);
        return Ok(());
    }

    let stream = client.list_zones(&query, Some(args.per_page));
    drain(stream, args.limit, |zones| print_zones(zones, format)).await
}

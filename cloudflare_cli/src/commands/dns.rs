use anyhow::Result;
use clap::{Args, Subcommand};
use cloudflare_lib::types::DnsRecordType;
use cloudflare_lib::{ApiClient, DnsRecordQuery};

use crate::commands::drain;
use crate::output::{print_dns_records, OutputFormat};

#[derive(Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub action: DnsAction,
}

#[derive(Subcommand)]
pub enum DnsAction {
    /// List DNS records in a zone
    List(DnsListArgs),
    /// Export a zone's records as a BIND zone file
    Export {
        /// Zone ID
        zone_id: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

#[derive(Args)]
pub struct DnsListArgs {
    /// Zone ID
    pub zone_id: String,

    /// Filter by record type (A, AAAA, CNAME, MX, TXT, ...)
    #[arg(long = "type")]
    pub record_type: Option<String>,

    /// Filter by record name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by record content
    #[arg(long)]
    pub content: Option<String>,

    /// Results per page
    #[arg(long, default_value = "100")]
    pub per_page: u32,

    /// Stop after this many records
    #[arg(long)]
    pub limit: Option<usize>,
}

pub async fn run(args: &DnsArgs, client: &ApiClient, format: &OutputFormat) -> Result<()> {
    match &args.action {
        DnsAction::List(list) => {
            let mut query = DnsRecordQuery::default();
            if let Some(record_type) = &list.record_type {
                query = query.with_type(DnsRecordType::new(record_type.as_str()));
            }
            if let Some(name) = &list.name {
                query = query.with_name(name);
            }
            if let Some(content) = &list.content {
                query = query.with_content(content);
            }
            let stream = client.list_dns_records(&list.zone_id, &query, Some(list.per_page));
            drain(stream, list.limit, |records| {
                print_dns_records(records, format)
            })
            .await
        }
        DnsAction::Export { zone_id, out } => {
            let zone_file = client.export_dns_records(zone_id).await?;
            match out {
                Some(path) => {
                    std::fs::write(path, &zone_file)?;
                    eprintln!("Wrote {} bytes to {}", zone_file.len(), path.display());
                }
                None => print!("{}", zone_file),
            }
            Ok(())
        }
    }
}

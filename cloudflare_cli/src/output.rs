use cloudflare_lib::types::{Bucket, DnsRecord, Zone};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ZoneRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    zone_type: String,
    #[tabled(rename = "Paused")]
    #[serde(rename = "Paused")]
    paused: bool,
    #[tabled(rename = "Account")]
    #[serde(rename = "Account")]
    account: String,
}

#[derive(Tabled, Serialize)]
struct DnsRecordRow {
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Content")]
    #[serde(rename = "Content")]
    content: String,
    #[tabled(rename = "TTL")]
    #[serde(rename = "TTL")]
    ttl: String,
    #[tabled(rename = "Proxied")]
    #[serde(rename = "Proxied")]
    proxied: String,
}

#[derive(Tabled, Serialize)]
struct BucketRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
    #[tabled(rename = "Storage Class")]
    #[serde(rename = "Storage Class")]
    storage_class: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

// -- Row builders --

fn build_zone_rows(zones: &[Zone]) -> Vec<ZoneRow> {
    zones
        .iter()
        .map(|z| ZoneRow {
            id: z.id.clone(),
            name: z.name.clone(),
            status: z.status.to_string(),
            zone_type: z
                .zone_type
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            paused: z.paused,
            account: z
                .account
                .as_ref()
                .map(|a| a.name.clone().unwrap_or_else(|| a.id.clone()))
                .unwrap_or_default(),
        })
        .collect()
}

fn build_dns_record_rows(records: &[DnsRecord]) -> Vec<DnsRecordRow> {
    records
        .iter()
        .map(|r| DnsRecordRow {
            record_type: r.record_type.to_string(),
            name: r.name.clone(),
            content: match r.priority {
                Some(priority) => format!("{} {}", priority, r.content),
                None => r.content.clone(),
            },
            ttl: format_ttl(r.ttl),
            proxied: match r.proxied {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
        })
        .collect()
}

fn build_bucket_rows(buckets: &[Bucket]) -> Vec<BucketRow> {
    buckets
        .iter()
        .map(|b| BucketRow {
            name: b.name.clone(),
            location: b.location.clone().unwrap_or_default(),
            storage_class: b
                .storage_class
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            created: b
                .creation_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn render<R: Tabled>(rows: Vec<R>, format: &OutputFormat) -> String {
    let mut table = Table::new(rows);
    if *format == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

pub fn print_zones(zones: &[Zone], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&zones),
        _ => println!("{}", render(build_zone_rows(zones), format)),
    }
}

pub fn print_dns_records(records: &[DnsRecord], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&records),
        _ => println!("{}", render(build_dns_record_rows(records), format)),
    }
}

pub fn print_buckets(buckets: &[Bucket], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&buckets),
        _ => println!("{}", render(build_bucket_rows(buckets), format)),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_ttl(ttl: u32) -> String {
    match ttl {
        1 => "auto".to_string(),
        t if t >= 3600 && t % 3600 == 0 => format!("{}h", t / 3600),
        t if t >= 60 && t % 60 == 0 => format!("{}m", t / 60),
        t => format!("{}s", t),
    }
}

//! DNS record types.

use serde::{Deserialize, Serialize};

use crate::extensible_enum;

extensible_enum! {
    /// DNS record type. Record types are case-insensitive on the wire.
    pub struct DnsRecordType: IgnoreAsciiCase {
        A = "A",
        AAAA = "AAAA",
        CAA = "CAA",
        CNAME = "CNAME",
        HTTPS = "HTTPS",
        MX = "MX",
        NS = "NS",
        PTR = "PTR",
        SRV = "SRV",
        SVCB = "SVCB",
        TXT = "TXT",
    }
}

/// A DNS record in a zone.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DnsRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub record_type: DnsRecordType,

    pub name: String,

    #[serde(default)]
    pub content: String,

    /// TTL in seconds; 1 means automatic.
    #[serde(default)]
    pub ttl: u32,

    #[serde(default)]
    pub proxied: Option<bool>,

    #[serde(default)]
    pub priority: Option<u16>,

    #[serde(default)]
    pub comment: Option<String>,

    /// Structured data for SRV/CAA style records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Result of deleting a record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeletedRecord {
    pub id: String,
}

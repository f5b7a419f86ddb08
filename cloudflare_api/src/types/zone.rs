//! Zone types returned by the `/zones` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extensible_enum;

/// Zone identifier (32 hex characters).
pub type ZoneID = String;

extensible_enum! {
    /// Lifecycle status of a zone.
    pub struct ZoneStatus: Ordinal {
        INITIALIZING = "initializing",
        PENDING = "pending",
        ACTIVE = "active",
        MOVED = "moved",
    }
}

extensible_enum! {
    /// How DNS for the zone is hosted.
    pub struct ZoneType: Ordinal {
        FULL = "full",
        PARTIAL = "partial",
        SECONDARY = "secondary",
        INTERNAL = "internal",
    }
}

/// Reference to the owning account, embedded in zone responses.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccountRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A zone as returned by `GET /zones` and `GET /zones/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Zone {
    pub id: ZoneID,

    /// Apex domain name.
    pub name: String,

    pub status: ZoneStatus,

    #[serde(rename = "type", default)]
    pub zone_type: Option<ZoneType>,

    #[serde(default)]
    pub paused: bool,

    #[serde(default)]
    pub name_servers: Vec<String>,

    #[serde(default)]
    pub account: Option<AccountRef>,

    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified_on: Option<DateTime<Utc>>,
}

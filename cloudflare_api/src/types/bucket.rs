//! R2 bucket types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extensible_enum;

extensible_enum! {
    /// Default storage class for new objects in a bucket.
    pub struct StorageClass: Ordinal {
        STANDARD = "Standard",
        INFREQUENT_ACCESS = "InfrequentAccess",
    }
}

/// An R2 bucket.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Bucket {
    pub name: String,

    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub storage_class: Option<StorageClass>,
}

/// The bucket listing nests its items under a named field instead of
/// returning them as the top-level result.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BucketList {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

impl From<BucketList> for Vec<Bucket> {
    fn from(list: BucketList) -> Self {
        list.buckets
    }
}

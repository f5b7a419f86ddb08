use crate::extensible_enum;
use crate::types::ZoneStatus;

use super::common::{Query, SortDirection};

extensible_enum! {
    /// Field used to order zone listings.
    pub struct ZoneOrder: Ordinal {
        NAME = "name",
        STATUS = "status",
        ACCOUNT_ID = "account.id",
        ACCOUNT_NAME = "account.name",
    }
}

/// Filters for `GET /zones`. Pagination parameters are added separately.
#[derive(Clone, Debug, Default)]
pub struct ZoneQuery {
    pub name: Option<String>,
    pub status: Option<ZoneStatus>,
    pub account_id: Option<String>,
    pub order: Option<ZoneOrder>,
    pub direction: Option<SortDirection>,
}

impl Query for ZoneQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.name {
            pairs.push(("name".to_string(), name.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.to_string()));
        }
        if let Some(account_id) = &self.account_id {
            pairs.push(("account.id".to_string(), account_id.clone()));
        }
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.to_string()));
        }
        if let Some(direction) = self.direction {
            pairs.push(("direction".to_string(), direction.to_string()));
        }
        pairs
    }
}

impl ZoneQuery {
    /// Filters by exact zone name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_status(mut self, status: ZoneStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_account_id(mut self, account_id: &str) -> Self {
        self.account_id = Some(account_id.to_string());
        self
    }

    pub fn with_order(mut self, order: ZoneOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

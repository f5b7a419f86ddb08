use crate::types::DnsRecordType;

use super::common::Query;

/// Filters for `GET /zones/{zone_id}/dns_records`.
#[derive(Clone, Debug, Default)]
pub struct DnsRecordQuery {
    pub record_type: Option<DnsRecordType>,
    pub name: Option<String>,
    pub content: Option<String>,
}

impl Query for DnsRecordQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(record_type) = &self.record_type {
            pairs.push(("type".to_string(), record_type.to_string()));
        }
        if let Some(name) = &self.name {
            pairs.push(("name".to_string(), name.clone()));
        }
        if let Some(content) = &self.content {
            pairs.push(("content".to_string(), content.clone()));
        }
        pairs
    }
}

impl DnsRecordQuery {
    pub fn with_type(mut self, record_type: DnsRecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }
}

use cloudflare_api::types::{DeletedRecord, DnsRecord};
use cloudflare_api::{DnsRecordQuery, Error, PageQuery, RequestSpec};
use futures::Stream;

use crate::client::ApiClient;
use crate::pagination::Page;

fn records_path(zone_id: &str) -> String {
    format!("/zones/{}/dns_records", zone_id)
}

impl ApiClient {
    /// Streams every DNS record in a zone matching `query`.
    pub fn list_dns_records(
        &self,
        zone_id: &str,
        query: &DnsRecordQuery,
        per_page: Option<u32>,
    ) -> impl Stream<Item = Result<DnsRecord, Error>> + Send + 'static {
        self.paginate(
            RequestSpec::get(records_path(zone_id)).with_query(query),
            per_page,
        )
    }

    pub async fn dns_records_page(
        &self,
        zone_id: &str,
        query: &DnsRecordQuery,
        page: PageQuery,
    ) -> Result<Page<DnsRecord>, Error> {
        self.get_page(&RequestSpec::get(records_path(zone_id)).with_query(query), page)
            .await
    }

    /// The zone's records as a BIND zone file. The body is not enveloped.
    pub async fn export_dns_records(&self, zone_id: &str) -> Result<String, Error> {
        self.get_raw(&format!("{}/export", records_path(zone_id)), &())
            .await
    }

    pub async fn delete_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> Result<Option<DeletedRecord>, Error> {
        self.delete(&format!("{}/{}", records_path(zone_id), record_id))
            .await
    }
}

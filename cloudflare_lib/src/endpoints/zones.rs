use cloudflare_api::types::Zone;
use cloudflare_api::{Error, PageQuery, RequestSpec, ZoneQuery};
use futures::Stream;

use crate::client::ApiClient;
use crate::pagination::Page;

impl ApiClient {
    /// Streams every zone matching `query`.
    pub fn list_zones(
        &self,
        query: &ZoneQuery,
        per_page: Option<u32>,
    ) -> impl Stream<Item = Result<Zone, Error>> + Send + 'static {
        self.paginate(RequestSpec::get("/zones").with_query(query), per_page)
    }

    /// One page of zones.
    pub async fn zones_page(&self, query: &ZoneQuery, page: PageQuery) -> Result<Page<Zone>, Error> {
        self.get_page(&RequestSpec::get("/zones").with_query(query), page)
            .await
    }

    pub async fn get_zone(&self, zone_id: &str) -> Result<Zone, Error> {
        self.get(&format!("/zones/{}", zone_id), &()).await
    }
}

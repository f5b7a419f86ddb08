use cloudflare_api::types::{Bucket, BucketList};
use cloudflare_api::{CursorQuery, Error, RequestSpec};
use futures::Stream;

use crate::client::ApiClient;
use crate::pagination::CursorPage;

fn buckets_path(account_id: &str) -> String {
    format!("/accounts/{}/r2/buckets", account_id)
}

impl ApiClient {
    /// Streams every R2 bucket in an account.
    pub fn list_buckets(
        &self,
        account_id: &str,
        per_page: Option<u32>,
    ) -> impl Stream<Item = Result<Bucket, Error>> + Send + 'static {
        self.cursor_paginate_with::<BucketList, Bucket, _>(
            RequestSpec::get(buckets_path(account_id)),
            per_page,
            |list: BucketList| list.buckets,
        )
    }

    pub async fn buckets_page(
        &self,
        account_id: &str,
        query: &CursorQuery,
    ) -> Result<CursorPage<Bucket>, Error> {
        self.get_cursor_page_with::<BucketList, Bucket, _>(
            &RequestSpec::get(buckets_path(account_id)),
            query,
            |list: BucketList| list.buckets,
        )
        .await
    }
}

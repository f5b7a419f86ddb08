//! Auto-pagination over the page-number and cursor protocols.
//!
//! Both listings are lazy [`Stream`]s. A page is only requested once every
//! item of the previous page has been handed out, so pages arrive in order
//! and dropping the stream early issues no further requests. Each call
//! starts a fresh listing.
//!
//! An error on the first page is returned as is. An error on a later page
//! is wrapped in [`Error::Pagination`] and ends the stream;
//! [`try_collect_partial`] turns that into a [`PartialResult`] holding the
//! items already received.

use std::collections::{HashSet, VecDeque};

use cloudflare_api::types::{CursorInfo, Envelope, PageInfo};
use cloudflare_api::{CursorQuery, Error, PageQuery, RequestSpec};
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::client::ApiClient;
use crate::error::PartialResult;

/// One page of a page-number listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: Option<PageInfo>,
}

impl<T> Page<T> {
    /// The page to request after `requested`, if any.
    ///
    /// Continues only when metadata is present, the page was non-empty and
    /// `requested < total_pages`. Progress follows the requested number, not
    /// the one echoed back, so a server repeating itself cannot loop us.
    pub fn next_page(&self, requested: u32) -> Option<u32> {
        let info = self.info.as_ref()?;
        if info.page != 0 && info.page != requested {
            tracing::warn!(
                "Requested page {} but server reported page {}",
                requested,
                info.page
            );
        }
        (info.count > 0 && requested < info.total_pages).then(|| requested + 1)
    }
}

/// One page of a cursor listing.
#[derive(Debug, Clone)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    /// Continuation cursor; `None` when there are no further pages.
    pub cursor: Option<String>,
    pub cursor_info: Option<CursorInfo>,
    pub page_info: Option<PageInfo>,
}

/// Cursor from `cursor_result_info`, falling back to `result_info`. Empty
/// strings count as absent.
fn resolve_cursor<T>(envelope: &Envelope<T>) -> Option<String> {
    envelope
        .cursor_info
        .as_ref()
        .and_then(|info| info.cursor.as_deref())
        .filter(|c| !c.is_empty())
        .or_else(|| {
            envelope
                .page_info
                .as_ref()
                .and_then(|info| info.cursor.as_deref())
                .filter(|c| !c.is_empty())
        })
        .map(str::to_string)
}

fn wrap_error(source: Error, items_yielded: usize, pages_completed: u32) -> Error {
    if pages_completed == 0 {
        return source;
    }
    tracing::error!(
        "Listing failed after {} items over {} pages: {}",
        items_yielded,
        pages_completed,
        source
    );
    Error::Pagination {
        items_yielded,
        pages_completed,
        source: Box::new(source),
    }
}

impl ApiClient {
    /// Fetches exactly one page of a page-number listing.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
        query: PageQuery,
    ) -> Result<Page<T>, Error> {
        let envelope = self
            .send_envelope::<Vec<T>>(&spec.clone().with_query(&query))
            .await?;
        Ok(Page {
            items: envelope.result.unwrap_or_default(),
            info: envelope.page_info,
        })
    }

    /// Fetches exactly one page of a cursor listing whose result is a list.
    pub async fn get_cursor_page<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
        query: &CursorQuery,
    ) -> Result<CursorPage<T>, Error> {
        self.get_cursor_page_with::<Vec<T>, T, _>(spec, query, |items| items)
            .await
    }

    /// Fetches one page of a cursor listing whose items sit inside a
    /// wrapper object; `extract` pulls them out.
    pub async fn get_cursor_page_with<W, T, F>(
        &self,
        spec: &RequestSpec,
        query: &CursorQuery,
        extract: F,
    ) -> Result<CursorPage<T>, Error>
    where
        W: DeserializeOwned,
        F: FnOnce(W) -> Vec<T>,
    {
        let envelope = self
            .send_envelope::<W>(&spec.clone().with_query(query))
            .await?;
        let cursor = resolve_cursor(&envelope);
        Ok(CursorPage {
            items: envelope.result.map(extract).unwrap_or_default(),
            cursor,
            cursor_info: envelope.cursor_info,
            page_info: envelope.page_info,
        })
    }

    /// Streams every item of a page-number listing, starting at page 1.
    pub fn paginate<T>(
        &self,
        spec: RequestSpec,
        per_page: Option<u32>,
    ) -> impl Stream<Item = Result<T, Error>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let state = PageState {
            client: self.clone(),
            spec,
            per_page,
            next_page: Some(1),
            buffer: VecDeque::new(),
            items_yielded: 0,
            pages_completed: 0,
        };

        futures::stream::unfold(state, |mut st| async move {
            loop {
                if let Some(item) = st.buffer.pop_front() {
                    st.items_yielded += 1;
                    return Some((Ok(item), st));
                }
                let Some(page) = st.next_page else {
                    return None;
                };
                match st
                    .client
                    .get_page::<T>(&st.spec, PageQuery::new(page, st.per_page))
                    .await
                {
                    Ok(fetched) => {
                        st.pages_completed += 1;
                        st.next_page = fetched.next_page(page);
                        tracing::debug!(
                            "{} page {}: {} items",
                            st.spec.path(),
                            page,
                            fetched.items.len()
                        );
                        st.buffer.extend(fetched.items);
                    }
                    Err(e) => {
                        st.next_page = None;
                        let err = wrap_error(e, st.items_yielded, st.pages_completed);
                        return Some((Err(err), st));
                    }
                }
            }
        })
    }

    /// Streams every item of a cursor listing whose result is a list.
    pub fn cursor_paginate<T>(
        &self,
        spec: RequestSpec,
        per_page: Option<u32>,
    ) -> impl Stream<Item = Result<T, Error>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.cursor_paginate_with::<Vec<T>, T, _>(spec, per_page, |items| items)
    }

    /// Streams every item of a cursor listing, applying `extract` to each
    /// page's result.
    ///
    /// Stops when the resolved cursor is absent or empty, or when the
    /// server hands back any cursor this listing has already sent.
    pub fn cursor_paginate_with<W, T, F>(
        &self,
        spec: RequestSpec,
        per_page: Option<u32>,
        extract: F,
    ) -> impl Stream<Item = Result<T, Error>> + Send + 'static
    where
        W: DeserializeOwned + Send + 'static,
        T: Send + 'static,
        F: Fn(W) -> Vec<T> + Send + Sync + 'static,
    {
        let state = CursorState {
            client: self.clone(),
            spec,
            per_page,
            cursor: None,
            sent: HashSet::new(),
            done: false,
            buffer: VecDeque::new(),
            items_yielded: 0,
            pages_completed: 0,
            extract,
        };

        futures::stream::unfold(state, |mut st| async move {
            loop {
                if let Some(item) = st.buffer.pop_front() {
                    st.items_yielded += 1;
                    return Some((Ok(item), st));
                }
                if st.done {
                    return None;
                }
                let query = CursorQuery::new(st.cursor.clone(), st.per_page);
                match st
                    .client
                    .get_cursor_page_with::<W, T, _>(&st.spec, &query, &st.extract)
                    .await
                {
                    Ok(fetched) => {
                        st.pages_completed += 1;
                        if let Some(sent) = st.cursor.take() {
                            st.sent.insert(sent);
                        }
                        match fetched.cursor {
                            Some(next) if st.sent.contains(&next) => {
                                tracing::warn!(
                                    "{} returned a cursor it was already given ({}); stopping",
                                    st.spec.path(),
                                    next
                                );
                                st.done = true;
                            }
                            Some(next) => st.cursor = Some(next),
                            None => st.done = true,
                        }
                        st.buffer.extend(fetched.items);
                    }
                    Err(e) => {
                        st.done = true;
                        let err = wrap_error(e, st.items_yielded, st.pages_completed);
                        return Some((Err(err), st));
                    }
                }
            }
        })
    }
}

struct PageState<T> {
    client: ApiClient,
    spec: RequestSpec,
    per_page: Option<u32>,
    next_page: Option<u32>,
    buffer: VecDeque<T>,
    items_yielded: usize,
    pages_completed: u32,
}

struct CursorState<T, F> {
    client: ApiClient,
    spec: RequestSpec,
    per_page: Option<u32>,
    cursor: Option<String>,
    sent: HashSet<String>,
    done: bool,
    buffer: VecDeque<T>,
    items_yielded: usize,
    pages_completed: u32,
    extract: F,
}

/// Drains a listing. On failure the items received before it are kept in
/// the returned [`PartialResult`].
pub async fn try_collect_partial<T, S>(stream: S) -> Result<Vec<T>, PartialResult<T>>
where
    S: Stream<Item = Result<T, Error>>,
{
    futures::pin_mut!(stream);
    let mut items = Vec::new();
    while let Some(next) = stream.next().await {
        match next {
            Ok(item) => items.push(item),
            Err(source) => return Err(PartialResult { items, source }),
        }
    }
    Ok(items)
}

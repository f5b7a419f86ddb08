//! CLI subcommand implementations.

pub mod buckets;
pub mod dns;
pub mod zones;

use anyhow::Result;
use cloudflare_lib::{try_collect_partial, Error};
use futures::{Stream, StreamExt};

/// Drains a listing, stopping after `limit` items if given.
///
/// When the listing fails part-way, the items received so far are handed
/// to `print` before the error is returned.
pub async fn drain<T, S>(stream: S, limit: Option<usize>, print: impl Fn(&[T])) -> Result<()>
where
    S: Stream<Item = Result<T, Error>>,
{
    let limited = stream.take(limit.unwrap_or(usize::MAX));
    match try_collect_partial(limited).await {
        Ok(items) => {
            print(&items);
            eprintln!("{} items", items.len());
            Ok(())
        }
        Err(partial) => {
            if !partial.items.is_empty() {
                print(&partial.items);
            }
            eprintln!(
                "Listing stopped early; showing {} items received before the failure",
                partial.items.len()
            );
            Err(partial.source.into())
        }
    }
}

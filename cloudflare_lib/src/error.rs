//! Error types for the library layer.

use std::fmt;

pub use cloudflare_api::Error;

/// A listing that failed part-way, with the items fetched before the failure.
///
/// `source` is the [`Error::Pagination`] raised by the stream, so the item
/// and page counts are available on it as well.
#[derive(Debug)]
pub struct PartialResult<T> {
    pub items: Vec<T>,
    pub source: Error,
}

impl<T> PartialResult<T> {
    /// The failure beneath the pagination wrapper.
    pub fn root(&self) -> &Error {
        self.source.root()
    }

    pub fn into_parts(self) -> (Vec<T>, Error) {
        (self.items, self.source)
    }
}

impl<T> fmt::Display for PartialResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Listing incomplete ({} items recovered): {}",
            self.items.len(),
            self.source
        )
    }
}

impl<T: fmt::Debug> std::error::Error for PartialResult<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

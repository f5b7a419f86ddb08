//! Typed access to the Cloudflare v4 API: bearer authentication, the
//! response envelope, pagination metadata, open enums and the shared error
//! taxonomy.
//!
//! This crate sends single attempts. Retries, admission control and
//! auto-pagination are layered on top by `cloudflare_lib`.

pub mod auth;
mod client;
pub mod envelope;
mod errors;
pub mod extensible_enum;
mod query;
mod request;
mod response;
pub mod types;

pub use self::auth::Credential;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{
    CursorQuery, DnsRecordQuery, PageQuery, Query, SortDirection, ZoneOrder, ZoneQuery,
};
pub use self::request::{is_idempotent, RequestSpec};
pub use self::response::{RawResponse, ResponseDiagnostics, RAY_ID_HEADER};

pub use reqwest::{Method, StatusCode};
pub use tokio_util::sync::CancellationToken;

#[doc(hidden)]
pub use serde as __serde;

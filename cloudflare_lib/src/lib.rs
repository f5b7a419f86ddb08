//! Library layer for the Cloudflare API: admission control, 429 retries,
//! a circuit breaker, auto-pagination and resource endpoints.
//!
//! Wraps the transport-level `cloudflare_api` crate. Build an [`ApiClient`]
//! from a [`ClientConfig`] and use the endpoint methods or the generic
//! verbs and pagination streams.

pub mod admission;
pub mod client;
pub mod config;
mod endpoints;
pub mod error;
pub mod pagination;
pub mod resilience;

pub use cloudflare_api;
pub use cloudflare_api::types;
pub use cloudflare_api::{
    CancellationToken, CursorQuery, DnsRecordQuery, Error, PageQuery, Query, RequestSpec,
    SortDirection, ZoneOrder, ZoneQuery,
};

pub use admission::{AdmissionLimiter, Permit};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::PartialResult;
pub use pagination::{try_collect_partial, CursorPage, Page};
pub use resilience::{CircuitState, Sleeper, TokioSleeper, TrackerSummary, TrackingSleeper};

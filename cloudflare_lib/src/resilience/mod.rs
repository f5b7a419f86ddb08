//! Resilience around a single logical request.
//!
//! ```text
//! ApiClient::execute
//!     -> circuit_breaker.rs (fail fast while open)
//!     -> per-attempt timeout
//!     -> retry.rs (429 on idempotent verbs only, server-directed delay first)
//!     -> sleeper.rs (injectable wait between attempts)
//! ```

pub mod circuit_breaker;
pub mod pipeline;
pub mod retry;
pub mod sleeper;

pub use circuit_breaker::{CircuitBreaker, CircuitState};
pub use pipeline::{RequestTracker, ResiliencePipeline, TrackerSummary};
pub use retry::{RateLimitPolicy, RetryAfter, RetryContext};
pub use sleeper::{Sleeper, TokioSleeper, TrackingSleeper};

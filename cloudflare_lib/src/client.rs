//! The orchestrated API client.

use std::sync::Arc;

use cloudflare_api::types::Envelope;
use cloudflare_api::{
    envelope, CancellationToken, Client, Credential, Error, Query, RawResponse, RequestSpec,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::admission::AdmissionLimiter;
use crate::config::ClientConfig;
use crate::resilience::{
    CircuitBreaker, CircuitState, RateLimitPolicy, ResiliencePipeline, Sleeper, TokioSleeper,
    TrackerSummary,
};

/// API client with admission control, 429 retries, a circuit breaker and
/// envelope processing.
///
/// Cloning is cheap and clones share one limiter and one breaker. Two
/// clients built with [`ApiClient::new`] share nothing.
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<Inner>,
    cancel: Option<CancellationToken>,
}

#[derive(Debug)]
struct Inner {
    limiter: AdmissionLimiter,
    pipeline: ResiliencePipeline,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Like [`new`](Self::new) with a custom [`Sleeper`] for retry delays.
    pub fn with_sleeper(config: ClientConfig, sleeper: Arc<dyn Sleeper>) -> Result<Self, Error> {
        let credential = Credential::bearer(&config.api_token)?;
        let transport = Client::with_base_url(&config.base_url, credential)?;
        let policy = RateLimitPolicy::new(
            config.max_retries,
            config.retry_base_delay,
            config.retry_max_delay,
        );
        let breaker =
            CircuitBreaker::new(config.breaker_failure_threshold, config.breaker_cooldown);
        tracing::debug!(
            "Created API client for {} ({} in flight, {} queued, {} retries)",
            transport.base_url(),
            config.max_in_flight,
            config.max_queued,
            config.max_retries
        );
        Ok(Self {
            inner: Arc::new(Inner {
                limiter: AdmissionLimiter::new(config.max_in_flight, config.max_queued),
                pipeline: ResiliencePipeline::new(
                    transport,
                    policy,
                    breaker,
                    sleeper,
                    config.request_timeout,
                ),
            }),
            cancel: None,
        })
    }

    /// A handle whose requests are all cancelled by `token`, unless a
    /// request carries its own.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    pub fn base_url(&self) -> &str {
        self.inner.pipeline.transport().base_url()
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.inner.pipeline.breaker().state()
    }

    pub fn stats(&self) -> TrackerSummary {
        self.inner.pipeline.tracker().summary()
    }

    pub fn limiter(&self) -> &AdmissionLimiter {
        &self.inner.limiter
    }

    pub(crate) fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Runs one logical request and returns the final response unprocessed.
    ///
    /// The permit is held for every attempt and retry delay and is released
    /// on any exit, including cancellation.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<RawResponse, Error> {
        let work = async {
            let _permit = self.inner.limiter.acquire().await?;
            self.inner.pipeline.execute(spec).await
        };

        match spec.cancellation().or(self.cancel.as_ref()) {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!("{} {} cancelled", spec.method(), spec.path());
                        Err(Error::Cancelled)
                    }
                    outcome = work => outcome,
                }
            }
            None => work.await,
        }
    }

    /// Runs `spec` and returns its `result`, which may be absent.
    pub async fn send<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<Option<T>, Error> {
        envelope::process(&self.execute(spec).await?)
    }

    /// Runs `spec` and returns the whole envelope, pagination metadata included.
    pub async fn send_envelope<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
    ) -> Result<Envelope<T>, Error> {
        envelope::process_envelope(&self.execute(spec).await?)
    }

    /// Runs `spec` against a non-enveloped endpoint and returns the body text.
    pub async fn send_raw(&self, spec: &RequestSpec) -> Result<String, Error> {
        envelope::process_raw(&self.execute(spec).await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &impl Query) -> Result<T, Error> {
        let raw = self.execute(&RequestSpec::get(path).with_query(query)).await?;
        require_result(&raw, envelope::process(&raw)?)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self.execute(&RequestSpec::post(path).with_json(body)?).await?;
        require_result(&raw, envelope::process(&raw)?)
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self.execute(&RequestSpec::put(path).with_json(body)?).await?;
        require_result(&raw, envelope::process(&raw)?)
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self.execute(&RequestSpec::patch(path).with_json(body)?).await?;
        require_result(&raw, envelope::process(&raw)?)
    }

    /// Deletes return a result on some endpoints and nothing on others.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        self.send(&RequestSpec::delete(path)).await
    }

    pub async fn get_raw(&self, path: &str, query: &impl Query) -> Result<String, Error> {
        self.send_raw(&RequestSpec::get(path).with_query(query)).await
    }
}

fn require_result<T>(raw: &RawResponse, result: Option<T>) -> Result<T, Error> {
    result.ok_or_else(|| {
        tracing::error!("{} {} returned no result", raw.method, raw.url);
        Error::Deserialization {
            source: <serde_json::Error as serde::de::Error>::custom("envelope has no result"),
            body: raw.body.clone(),
        }
    })
}

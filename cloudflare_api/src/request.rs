//! Description of one logical API request.

use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::query::Query;
use crate::Error;

/// Method, path, query and optional JSON body of a request, plus an
/// optional cancellation signal.
///
/// A spec is reusable: the retry policy resends the same spec, and the
/// pagination engine clones it once per page with the page parameters added.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    cancel: Option<CancellationToken>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            cancel: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends every parameter produced by `query`.
    pub fn with_query(mut self, query: &impl Query) -> Self {
        self.query.extend(query.query_pairs());
        self
    }

    /// Appends a single query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Sets a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body).map_err(Error::Encode)?);
        Ok(self)
    }

    /// Attaches a cancellation signal honoured by the orchestrating client.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// True for read-only verbs that can be resent without side effects.
    pub fn is_idempotent(&self) -> bool {
        is_idempotent(&self.method)
    }
}

/// GET, HEAD and OPTIONS are the only verbs eligible for automatic retry.
pub fn is_idempotent(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
}

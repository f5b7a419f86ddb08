//! Bearer-token authentication.

use std::fmt;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

use crate::Error;

/// A static API token, validated once when the client is built.
///
/// The rendered `Authorization` header is marked sensitive so it is
/// skipped by header debug output, and `Debug` never prints the token.
#[derive(Clone)]
pub struct Credential {
    header: HeaderValue,
}

impl Credential {
    /// Builds a bearer credential. Empty tokens and tokens that cannot be
    /// sent as a header value are rejected here rather than at request time.
    pub fn bearer(token: &str) -> Result<Self, Error> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::Config("API token must not be empty".to_string()));
        }
        let mut header = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::Config("API token contains invalid characters".to_string()))?;
        header.set_sensitive(true);
        Ok(Self { header })
    }

    /// Attaches the `Authorization` header and leaves the rest of the request untouched.
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header.clone())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(Bearer ***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_token() {
        assert!(matches!(Credential::bearer("   "), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_token_with_newline() {
        assert!(matches!(
            Credential::bearer("abc\ndef"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn debug_output_is_redacted() {
        let cred = Credential::bearer("super-secret").unwrap();
        assert!(!format!("{cred:?}").contains("super-secret"));
    }

    #[test]
    fn authorize_sets_bearer_header() {
        let cred = Credential::bearer("tok-123").unwrap();
        let request = cred
            .authorize(reqwest::Client::new().get("https://api.example.com/zones"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer tok-123"
        );
    }
}

//! Action client — one cookie-authenticated GET per game action.

use async_trait::async_trait;
use okpets_core::types::SessionCredentials;

/// Result of a single action call, reported as data — the client never
/// lets an error cross the scheduler boundary.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub success: bool,
    /// HTTP status on success, status or transport error text on failure.
    pub detail: String,
}

impl Outcome {
    pub fn ok(status: reqwest::StatusCode) -> Self {
        Self {
            success: true,
            detail: status.to_string(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

/// A single outbound game action, scoped to the caller's credential set.
#[async_trait]
pub trait ActionClient: Send + Sync {
    async fn visit(&self, endpoint: &str, creds: &SessionCredentials) -> Outcome;
}

/// Production client for mpets.mobi.
pub struct MpetsClient {
    base_url: String,
    http: reqwest::Client,
}

impl MpetsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }
}

#[async_trait]
impl ActionClient for MpetsClient {
    async fn visit(&self, endpoint: &str, creds: &SessionCredentials) -> Outcome {
        let mut request = self.http.get(self.url(endpoint));
        // Credentials travel per-request; no shared cookie jar.
        if let Some(header) = creds.cookie_header() {
            request = request.header(reqwest::header::COOKIE, header);
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => Outcome::ok(resp.status()),
            Ok(resp) => {
                tracing::warn!("⚠️ mpets returned {} for '{}'", resp.status(), endpoint);
                Outcome::failed(format!("HTTP {}", resp.status()))
            }
            Err(e) => {
                tracing::warn!("⚠️ mpets request '{}' failed: {e}", endpoint);
                Outcome::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = MpetsClient::new("https://mpets.mobi/");
        assert_eq!(client.url("show"), "https://mpets.mobi/show");
        assert_eq!(client.url("?action=food"), "https://mpets.mobi/?action=food");
    }

    #[test]
    fn test_outcome_constructors() {
        assert!(Outcome::ok(reqwest::StatusCode::OK).success);
        let failed = Outcome::failed("connection refused");
        assert!(!failed.success);
        assert_eq!(failed.detail, "connection refused");
    }
}

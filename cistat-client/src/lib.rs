//! Cistat HTTP Clients
//!
//! Typed clients for the two remote services the exporters read from:
//! the GitHub commit-status API and the Travis-CI build-history API.
//!
//! The pipeline does not use the clients directly; it depends on the
//! [`StatusApi`] and [`BuildHistoryApi`] traits, which both clients implement
//! and which tests replace with in-memory fakes.
//!
//! # Example
//!
//! ```no_run
//! use cistat_client::GitHubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cistat_client::ClientError> {
//!     let client = GitHubClient::new("https://api.github.com", "ghp_token");
//!
//!     let limit = client.rate_limit().await?;
//!     println!("{} calls left", limit.remaining);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod github;
mod travis;

// Re-export commonly used types
pub use api::{BuildHistoryApi, StatusApi, StatusLookup};
pub use error::{ClientError, Result};
pub use github::GitHubClient;
pub use travis::TravisClient;

use serde::de::DeserializeOwned;

/// User agent sent with every request; GitHub rejects requests without one
pub const USER_AGENT: &str = concat!("cistat/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Response Handlers
// =============================================================================

/// Check the status code and deserialize the JSON body
///
/// Non-success statuses are classified by [`ClientError::from_status`]:
/// a 404 names `resource`, 401/403 report rejected credentials.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    resource: &str,
) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::from_status(status.as_u16(), resource, error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Strip a trailing slash so paths can be appended with `format!`
fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

/// Split an `owner/name` slug, rejecting anything else
fn split_slug(slug: &str) -> Result<(&str, &str)> {
    match slug.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(ClientError::InvalidRequest(format!(
            "'{}' is not an owner/name repository slug",
            slug
        ))),
    }
}

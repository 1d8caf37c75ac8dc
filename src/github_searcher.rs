use chrono::{DateTime, Local, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::source::CountSource;

/// GitHub code search client that only asks for total counts.
#[derive(Debug, Clone)]
pub struct GitHubSearcher {
    client: Client,
    token: String,
    api_url: String,
}

impl GitHubSearcher {
    /// Create a new GitHubSearcher instance
    pub fn new(config: &SearchConfig, token: impl Into<String>) -> Result<Self, SearchError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SearchError::MissingToken);
        }

        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(GitHubSearcher {
            client,
            token,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Ask the code search endpoint for the total count of one query
    async fn search_total(&self, query: &str) -> Result<u64, SearchError> {
        let url = format!("{}/search/code", self.api_url);

        debug!("Requesting {} q={}", url, query);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("per_page", "1")])
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reset = rate_limit_reset(status, response.headers());
            let mut body = response.text().await.unwrap_or_default();
            if let Some(reset) = reset {
                body.push_str(&format!(
                    "\nrate limit resets at {}",
                    reset.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
                ));
            }
            return Err(SearchError::Api { status, body });
        }

        let json: Value = response.json().await?;
        parse_total(query, &json)
    }
}

impl CountSource for GitHubSearcher {
    async fn total_count(&self, query: &str) -> Result<u64, SearchError> {
        self.search_total(query).await
    }
}

/// Pull `total_count` out of a code search response.
fn parse_total(query: &str, json: &Value) -> Result<u64, SearchError> {
    if json["incomplete_results"].as_bool() == Some(true) {
        warn!("Results for '{}' are incomplete; the total may be low", query);
    }

    json["total_count"].as_u64().ok_or_else(|| {
        SearchError::Parse(format!("no 'total_count' in response for '{}'", query))
    })
}

/// When the response says the rate limit is exhausted, the instant it resets.
fn rate_limit_reset(status: StatusCode, headers: &HeaderMap) -> Option<DateTime<Utc>> {
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }

    let remaining = headers
        .get("X-RateLimit-Remaining")?
        .to_str()
        .ok()?
        .parse::<u32>()
        .ok()?;
    if remaining != 0 {
        return None;
    }

    let reset = headers
        .get("X-RateLimit-Reset")?
        .to_str()
        .ok()?
        .parse::<i64>()
        .ok()?;
    DateTime::from_timestamp(reset, 0)
}

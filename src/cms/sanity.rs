//! HTTP client for the Sanity query API.
//!
//! ```text
//! GET {host}/v{apiVersion}/data/query/{dataset}?query=<GROQ>&$name=<json>
//! → {"ms": 12, "query": "...", "result": <value>}
//! ```
//!
//! `host` is `https://{project}.api.sanity.io`, or `apicdn` instead of `api`
//! when `use_cdn` is set. Parameters are JSON-encoded as the API expects, so
//! a string parameter is sent with its quotes.

use super::{CmsError, ContentSource, Params};
use crate::config::CmsConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Longest error body kept in a [`CmsError::Status`].
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Value,
}

impl SanityClient {
    pub fn new(project_id: &str, config: &CmsConfig) -> Result<Self, CmsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("lar-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: query_endpoint(project_id, config),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// The query URL without parameters.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// `{host}/v{version}/data/query/{dataset}`.
pub fn query_endpoint(project_id: &str, config: &CmsConfig) -> String {
    let host = match &config.api_host {
        Some(host) => host.trim_end_matches('/').to_string(),
        None => {
            let api = if config.use_cdn { "apicdn" } else { "api" };
            format!("https://{project_id}.{api}.sanity.io")
        }
    };
    let version = config.api_version.trim_start_matches('v');
    format!("{host}/v{version}/data/query/{}", config.dataset)
}

/// Query-string pairs: the query itself plus one `$name` per parameter.
fn query_pairs(query: &str, params: &Params) -> Vec<(String, String)> {
    let mut pairs = vec![("query".to_string(), query.to_string())];
    for (name, value) in params {
        pairs.push((format!("${name}"), value.to_string()));
    }
    pairs
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn query(&self, query: &str, params: &Params) -> Result<Value, CmsError> {
        let mut request = self
            .http
            .get(&self.endpoint)
            .query(&query_pairs(query, params));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let body = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(CmsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = serde_json::from_slice(&body)?;
        tracing::debug!(endpoint = %self.endpoint, "CMS query ok");
        Ok(envelope.result)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> CmsConfig {
        CmsConfig {
            project_id: Some("abc123".into()),
            ..CmsConfig::default()
        }
    }

    #[test]
    fn endpoint_uses_live_api_by_default() {
        assert_eq!(
            query_endpoint("abc123", &config()),
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn endpoint_uses_cdn_when_enabled() {
        let cfg = CmsConfig {
            use_cdn: true,
            dataset: "staging".into(),
            ..config()
        };
        assert_eq!(
            query_endpoint("abc123", &cfg),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/staging"
        );
    }

    #[test]
    fn endpoint_honours_host_override_and_prefixed_version() {
        let cfg = CmsConfig {
            api_host: Some("http://127.0.0.1:9999/".into()),
            api_version: "v2021-10-21".into(),
            ..config()
        };
        assert_eq!(
            query_endpoint("abc123", &cfg),
            "http://127.0.0.1:9999/v2021-10-21/data/query/production"
        );
    }

    #[test]
    fn params_are_json_encoded() {
        let params = super::super::params([("slug", json!("rye-seeds")), ("limit", json!(3))]);
        let pairs = query_pairs("*[slug.current == $slug]", &params);
        assert_eq!(pairs[0].0, "query");
        assert!(pairs.contains(&("$slug".to_string(), "\"rye-seeds\"".to_string())));
        assert!(pairs.contains(&("$limit".to_string(), "3".to_string())));
    }

    #[test]
    fn empty_token_is_ignored() {
        let cfg = CmsConfig {
            token: Some(String::new()),
            ..config()
        };
        let client = SanityClient::new("abc123", &cfg).unwrap();
        assert!(client.token.is_none());
    }
}

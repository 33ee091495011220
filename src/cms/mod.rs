//! Read-only access to the headless CMS.
//!
//! The [`ContentSource`] trait is the seam between page rendering and the
//! CMS. It returns raw JSON so the trait stays object-safe; typed decoding
//! happens in [`fetch`], which is also where every failure is absorbed:
//!
//! | Outcome | `fetch` returns |
//! |---------|-----------------|
//! | transport error, timeout, non-2xx status | `None` (logged at `warn`) |
//! | result does not decode as `T` | `None` (logged at `warn`) |
//! | result is JSON `null` | `None` |
//! | anything else | `Some(T)` |
//!
//! Implementations:
//! - [`SanityClient`](sanity::SanityClient): HTTP query API.
//! - [`Unconfigured`]: used when no project id is set; always `null`.

pub mod queries;
pub mod sanity;

use crate::config::CmsConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

pub use sanity::SanityClient;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CMS returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("CMS response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Named query parameters, bound as `$name` in the query.
pub type Params = Map<String, Value>;

/// Build a [`Params`] map from name/value pairs.
pub fn params<const N: usize>(pairs: [(&str, Value); N]) -> Params {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Something that can answer CMS queries.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run `query` with `params` and return the `result` value.
    async fn query(&self, query: &str, params: &Params) -> Result<Value, CmsError>;

    /// Short description for logs and the `check` command.
    fn describe(&self) -> String;

    /// Whether this source can ever return content.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Query `source` and decode the result, absorbing every failure into `None`.
pub async fn fetch<T: DeserializeOwned>(
    source: &dyn ContentSource,
    query: &str,
    params: &Params,
) -> Option<T> {
    let value = match source.query(query, params).await {
        Ok(Value::Null) => return None,
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, source = %source.describe(), "CMS query failed");
            return None;
        }
    };

    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::warn!(error = %e, "CMS result did not match the expected shape");
            None
        }
    }
}

/// Stand-in used when no CMS project is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

#[async_trait]
impl ContentSource for Unconfigured {
    async fn query(&self, _query: &str, _params: &Params) -> Result<Value, CmsError> {
        Ok(Value::Null)
    }

    fn describe(&self) -> String {
        "unconfigured (fallback content only)".to_string()
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Pick the content source for `config`.
pub fn source_from_config(config: &CmsConfig) -> Result<Arc<dyn ContentSource>, CmsError> {
    match config.project() {
        Some(project) => Ok(Arc::new(SanityClient::new(project, config)?)),
        None => Ok(Arc::new(Unconfigured)),
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Mutex;

    /// Mock source that answers from canned responses and records every query.
    ///
    /// A response is chosen by the first `(needle, value)` pair whose needle
    /// occurs in the query text; unmatched queries return `null`.
    #[derive(Default)]
    pub struct MockSource {
        pub responses: Vec<(String, Value)>,
        pub fail: bool,
        pub queries: Mutex<Vec<(String, Params)>>,
    }

    impl MockSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn respond(mut self, needle: &str, value: Value) -> Self {
            self.responses.push((needle.to_string(), value));
            self
        }

        pub fn recorded(&self) -> Vec<(String, Params)> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentSource for MockSource {
        async fn query(&self, query: &str, params: &Params) -> Result<Value, CmsError> {
            self.queries
                .lock()
                .unwrap()
                .push((query.to_string(), params.clone()));
            if self.fail {
                return Err(CmsError::Status {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            Ok(self
                .responses
                .iter()
                .find(|(needle, _)| query.contains(needle.as_str()))
                .map(|(_, value)| value.clone())
                .unwrap_or(Value::Null))
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        title: String,
    }

    #[tokio::test]
    async fn fetch_decodes_result() {
        let source = MockSource::new().respond("doc", json!({"title": "Hello"}));
        let doc: Option<Doc> = fetch(&source, "*[_type == \"doc\"][0]", &Params::new()).await;
        assert_eq!(doc, Some(Doc { title: "Hello".into() }));
    }

    #[tokio::test]
    async fn fetch_null_is_none() {
        let source = MockSource::new();
        let doc: Option<Doc> = fetch(&source, "anything", &Params::new()).await;
        assert_eq!(doc, None);
    }

    #[tokio::test]
    async fn fetch_swallows_errors() {
        let source = MockSource::failing();
        let doc: Option<Doc> = fetch(&source, "anything", &Params::new()).await;
        assert_eq!(doc, None);
    }

    #[tokio::test]
    async fn fetch_shape_mismatch_is_none() {
        let source = MockSource::new().respond("doc", json!([1, 2, 3]));
        let doc: Option<Doc> = fetch(&source, "doc", &Params::new()).await;
        assert_eq!(doc, None);
    }

    #[tokio::test]
    async fn unconfigured_always_null() {
        let value = Unconfigured.query("*", &Params::new()).await.unwrap();
        assert_eq!(value, Value::Null);
        assert!(!Unconfigured.is_configured());
    }

    #[test]
    fn params_builds_map() {
        let p = params([("slug", json!("flax-seeds")), ("locale", json!("nl"))]);
        assert_eq!(p["slug"], json!("flax-seeds"));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn source_from_config_without_project_is_unconfigured() {
        let source = source_from_config(&CmsConfig::default()).unwrap();
        assert!(!source.is_configured());
    }
}

//! The Sanity client against a fake query API served by axum.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use lar_site::cms::{self, SanityClient, queries};
use lar_site::config::{CmsConfig, CompanyConfig};
use lar_site::content::Content;
use lar_site::image_url::ImageUrlBuilder;
use lar_site::locale::Locale;
use lar_site::types::Provenance;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

struct FakeCms {
    host: String,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeCms {
    async fn spawn(router: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let host = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self { host, handle }
    }

    fn config(&self) -> CmsConfig {
        CmsConfig {
            project_id: Some("test123".into()),
            dataset: "production".into(),
            api_host: Some(self.host.clone()),
            timeout_secs: 5,
            ..CmsConfig::default()
        }
    }
}

impl Drop for FakeCms {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Answers product list queries with one product and everything else with
/// `null`, echoing the locale parameter back in the title.
async fn query_api(
    Path((version, dataset)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    assert_eq!(version, "v2024-01-01");
    assert_eq!(dataset, "production");
    let query = params.get("query").cloned().unwrap_or_default();
    let locale: String = params
        .get("$locale")
        .and_then(|v| serde_json::from_str(v).ok())
        .unwrap_or_default();
    let result = if query.contains("\"product\"") && !query.contains("slug.current") {
        json!([{
            "_id": "p1",
            "title": format!("Spelt ({locale})"),
            "slug": {"current": "spelt"},
            "description": "Ancient grain",
            "category": "grains",
            "featured": true
        }])
    } else {
        Value::Null
    };
    Json(json!({"ms": 1, "query": query, "result": result}))
}

fn fake_router() -> Router {
    Router::new().route("/{version}/data/query/{dataset}", get(query_api))
}

#[tokio::test]
async fn decodes_result_envelope() {
    let cms = FakeCms::spawn(fake_router()).await;
    let client = SanityClient::new("test123", &cms.config()).unwrap();

    let products: Option<Vec<Value>> = cms::fetch(
        &client,
        &queries::all_products(),
        &queries::locale_params(Locale::Nl),
    )
    .await;
    let products = products.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["title"], "Spelt (nl)");
}

#[tokio::test]
async fn content_resolves_from_live_endpoint() {
    let cms = FakeCms::spawn(fake_router()).await;
    let client = SanityClient::new("test123", &cms.config()).unwrap();
    let content = Content::new(
        Arc::new(client),
        Some(ImageUrlBuilder::new("test123", "production")),
        CompanyConfig::default(),
    );

    let products = content.products(Locale::En).await;
    assert_eq!(products.provenance, Provenance::Cms);
    assert_eq!(products.items[0].title, "Spelt (en)");

    // Null answers fall back.
    let faqs = content.faqs(Locale::En).await;
    assert_eq!(faqs.provenance, Provenance::Fallback);
}

#[tokio::test]
async fn http_error_is_none() {
    let router = Router::new().route(
        "/{version}/data/query/{dataset}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let cms = FakeCms::spawn(router).await;
    let client = SanityClient::new("test123", &cms.config()).unwrap();

    let result: Option<Value> =
        cms::fetch(&client, &queries::all_faqs(), &queries::locale_params(Locale::En)).await;
    assert!(result.is_none());
}

#[tokio::test]
async fn unreachable_host_is_none() {
    let config = CmsConfig {
        project_id: Some("test123".into()),
        api_host: Some("http://127.0.0.1:9".into()),
        timeout_secs: 2,
        ..CmsConfig::default()
    };
    let client = SanityClient::new("test123", &config).unwrap();
    let result: Option<Value> =
        cms::fetch(&client, &queries::all_products(), &queries::locale_params(Locale::En)).await;
    assert!(result.is_none());
}

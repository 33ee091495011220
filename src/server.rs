//! HTTP server.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | redirect to the negotiated locale |
//! | `GET /{locale}/...` | server-rendered page, 404 page when unknown |
//! | `POST /{locale}/contact`, `POST /{locale}/quote` | page form posts |
//! | `POST /api/contact`, `POST /api/quote` | JSON lead endpoints |
//! | `GET /sitemap.xml`, `GET /robots.txt` | crawler files |
//! | `GET /static/{file}` | embedded stylesheet and placeholder image |
//!
//! Nothing here fails a request because of the CMS: content falls back to the
//! built-in catalog inside [`Site::render`].

use crate::forms::{self, ContactSubmission, QuoteSubmission};
use crate::locale::{Locale, localized_path, negotiate, split_locale};
use crate::routes::Route;
use crate::site::{PageRequest, Site};
use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

type SharedSite = Arc<Site>;

/// The full application router.
pub fn router(site: SharedSite) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/contact", post(api_contact))
        .route("/api/quote", post(api_quote))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .route("/static/{file}", get(static_asset))
        .route("/{locale}/contact", get(page).post(contact_post))
        .route("/{locale}/quote", get(page).post(quote_post))
        .fallback(page)
        .layer(middleware::from_fn(log_request))
        .with_state(site)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(site: SharedSite, addr: &str) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    tracing::info!(
        addr = %listener.local_addr()?,
        content = %site.content().describe(),
        "listening"
    );
    axum::serve(listener, router(site))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(req).await;
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

/// `{"error": message}` with `status`.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

// ============================================================================
// Pages
// ============================================================================

fn accept_language(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
}

async fn root(headers: HeaderMap) -> Redirect {
    let locale = negotiate(accept_language(&headers));
    Redirect::temporary(&localized_path("", locale))
}

async fn not_found(site: &Site, locale: Locale, path: &str) -> Response {
    let html = site.render_not_found(locale, path).await;
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}

/// Any `GET /{locale}/...` page.
async fn page(
    State(site): State<SharedSite>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let path = uri.path();
    let Some((locale, rest)) = split_locale(path) else {
        return not_found(&site, negotiate(accept_language(&headers)), path).await;
    };
    let Some(route) = Route::parse(rest) else {
        return not_found(&site, locale, path).await;
    };
    let request = PageRequest {
        query,
        raw_query: uri.query().map(str::to_string),
        ..PageRequest::default()
    };
    match site.render(locale, &route, &request).await {
        Some(html) => Html(html).into_response(),
        None => not_found(&site, locale, path).await,
    }
}

async fn contact_post(
    State(site): State<SharedSite>,
    Path(segment): Path<String>,
    Form(submission): Form<ContactSubmission>,
) -> Response {
    let Some(locale) = Locale::from_segment(&segment) else {
        return not_found(&site, Locale::default(), &format!("/{segment}/contact")).await;
    };
    let request = PageRequest {
        contact: Some(site.submit_contact(submission).await),
        ..PageRequest::default()
    };
    match site.render(locale, &Route::Contact, &request).await {
        Some(html) => Html(html).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn quote_post(
    State(site): State<SharedSite>,
    Path(segment): Path<String>,
    Form(submission): Form<QuoteSubmission>,
) -> Response {
    let Some(locale) = Locale::from_segment(&segment) else {
        return not_found(&site, Locale::default(), &format!("/{segment}/quote")).await;
    };
    let request = PageRequest {
        quote: Some(site.submit_quote(locale, submission).await),
        ..PageRequest::default()
    };
    match site.render(locale, &Route::Quote, &request).await {
        Some(html) => Html(html).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

// ============================================================================
// Lead API
// ============================================================================

/// Decode a JSON object body. Anything else is answered with a 500.
fn decode_submission<T: DeserializeOwned>(body: &[u8]) -> Result<T, Response> {
    let internal = |err: &dyn std::fmt::Display| {
        tracing::warn!(error = %err, "unreadable lead submission");
        json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };
    let value: Value = serde_json::from_slice(body).map_err(|e| internal(&e))?;
    if !value.is_object() {
        return Err(internal(&"body is not a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| internal(&e))
}

async fn api_contact(body: Bytes) -> Response {
    let submission: ContactSubmission = match decode_submission(&body) {
        Ok(s) => s,
        Err(response) => return response,
    };
    if !submission.missing_fields().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Missing required fields");
    }
    forms::acknowledge_contact(&submission, Utc::now());
    Json(json!({
        "success": true,
        "message": "Contact form submitted successfully",
    }))
    .into_response()
}

async fn api_quote(body: Bytes) -> Response {
    let submission: QuoteSubmission = match decode_submission(&body) {
        Ok(s) => s,
        Err(response) => return response,
    };
    if !submission.missing_fields().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Missing required fields");
    }
    let quote_number = forms::acknowledge_quote(&submission, Utc::now());
    Json(json!({
        "success": true,
        "message": "Quote request submitted successfully",
        "quoteNumber": quote_number,
    }))
    .into_response()
}

// ============================================================================
// Crawler files and assets
// ============================================================================

async fn sitemap_xml(State(site): State<SharedSite>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        site.sitemap_xml(Utc::now()),
    )
        .into_response()
}

async fn robots_txt(State(site): State<SharedSite>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        site.robots_txt(),
    )
        .into_response()
}

async fn static_asset(State(site): State<SharedSite>, Path(file): Path<String>) -> Response {
    match site.asset(&file) {
        Some((asset, body)) => (
            [
                (header::CONTENT_TYPE, asset.content_type),
                (header::CACHE_CONTROL, "public, max-age=86400"),
            ],
            body.to_string(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

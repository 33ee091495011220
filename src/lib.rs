//! # LAR Site
//!
//! The bilingual (English/Dutch) marketing and lead-generation website of
//! LAR Group B.V., a trader in seeds and grains. Pages are rendered on the
//! server from Sanity CMS content; when the CMS is unconfigured, empty or
//! unreachable, a built-in catalog stands in so every page always renders.
//!
//! # Architecture: Resolve, Render, Respond
//!
//! Every page request passes through three layers:
//!
//! ```text
//! 1. Resolve   locale + route  →  view models   (CMS first, fallback catalog second)
//! 2. Render    view models     →  HTML          (Maud, pure functions)
//! 3. Respond   HTML            →  HTTP / dist/  (axum server or static export)
//! ```
//!
//! Resolution never fails: a CMS error is logged and swallowed into the
//! fallback. Rendering never touches the network, so page renderers are unit
//! tested with catalog data. The server and the static exporter share
//! [`site::Site::render`], which keeps served and exported pages identical.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locale`] | The `en`/`nl` locale set, path prefixing, language switching, `Accept-Language` negotiation |
//! | [`routes`] | The closed set of logical pages and their paths |
//! | [`config`] | `config.toml` loading, environment overrides, validation, theme CSS |
//! | [`cms`] | `ContentSource` trait, Sanity HTTP client, GROQ queries |
//! | [`model`] | CMS document types |
//! | [`image_url`] | Sanity image CDN URL builder (crop, hotspot, sizing) |
//! | [`catalog`] | Fallback catalog: products, blog posts, FAQs, certifications |
//! | [`content`] | CMS-then-fallback resolution into view models |
//! | [`types`] | View models shared by resolution, rendering and export |
//! | [`portable_text`] | Portable-text blocks to HTML, plain text and reading time |
//! | [`filter`] | Product catalog search, category filter and sorting |
//! | [`i18n`] | Embedded translation tables |
//! | [`seo`] | Page metadata: OpenGraph, Twitter card, canonical and alternates |
//! | [`structured_data`] | JSON-LD documents |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` |
//! | [`analytics`] | GA4 and GTM snippets and conversion events |
//! | [`forms`] | Lead submission validation, relay and acknowledgement |
//! | [`render`] | Maud page, layout and form renderers |
//! | [`site`] | The assembled site shared by server and export |
//! | [`server`] | axum router and HTTP handlers |
//! | [`export`] | Static export to `dist/` |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | tracing subscriber setup |
//!
//! # Design Decisions
//!
//! ## Fallback Over Failure
//!
//! A marketing site that shows an error page because the CMS is slow loses
//! leads. Every content accessor returns either CMS content or the catalog
//! entry for the same locale. Callers cannot tell the difference;
//! [`types::Provenance`] records it for logs and `lar-site check` only.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), so templates are
//! Rust expressions checked at compile time and all interpolation is escaped.
//! The only pre-escaped inserts are JSON-LD (with `</` escaped) and article
//! bodies produced by our own renderers.
//!
//! ## Locale in the Path
//!
//! Every page lives under `/{locale}`. The locale is part of the URL rather
//! than a cookie so that pages are cacheable, shareable and indexable per
//! language. The bare `/` redirects by `Accept-Language`; an unknown locale
//! segment is a 404.
//!
//! ## Forms Without JavaScript
//!
//! The contact and quote forms are plain HTML forms posting back to their own
//! page. The server validates, relays to the external form service (or logs
//! the lead when none is configured) and re-renders the page with a status
//! banner. The JSON endpoints under `/api/` accept the same submissions.

pub mod analytics;
pub mod catalog;
pub mod cms;
pub mod config;
pub mod content;
pub mod export;
pub mod filter;
pub mod forms;
pub mod i18n;
pub mod image_url;
pub mod locale;
pub mod logging;
pub mod model;
pub mod output;
pub mod portable_text;
pub mod render;
pub mod routes;
pub mod seo;
pub mod server;
pub mod site;
pub mod sitemap;
pub mod structured_data;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

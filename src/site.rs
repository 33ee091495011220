//! The assembled site: configuration, content, form relay and the embedded
//! static assets, shared read-only by every request.
//!
//! [`Site::render`] is the one entry point for page HTML. The HTTP server
//! and the static exporter both go through it, so a page looks the same
//! whether it was served or written to disk.

use crate::analytics::{Analytics, Event};
use crate::cms::CmsError;
use crate::config::{SiteConfig, generate_theme_css};
use crate::content::Content;
use crate::filter::ProductQuery;
use crate::forms::{ContactSubmission, FormError, FormRelay, QuoteSubmission, Receipt};
use crate::locale::{Locale, localized_path};
use crate::render::forms::FormView;
use crate::render::layout::{self, Chrome};
use crate::render::{RenderContext, View, pages};
use crate::routes::Route;
use crate::seo::generate_metadata;
use crate::sitemap;
use crate::structured_data::Schema;
use crate::types::CompanyDetails;
use chrono::{DateTime, Datelike, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;

const CSS_STATIC: &str = include_str!("../static/style.css");
const PLACEHOLDER_SVG: &str = include_str!("../static/placeholder-product.svg");

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("CMS setup failed: {0}")]
    Cms(#[from] CmsError),
    #[error("form relay setup failed: {0}")]
    Forms(#[from] FormError),
}

/// A file served under `/static/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAsset {
    pub name: &'static str,
    pub content_type: &'static str,
}

pub const STYLESHEET: StaticAsset = StaticAsset {
    name: "style.css",
    content_type: "text/css; charset=utf-8",
};

pub const PLACEHOLDER: StaticAsset = StaticAsset {
    name: "placeholder-product.svg",
    content_type: "image/svg+xml",
};

pub const STATIC_ASSETS: [StaticAsset; 2] = [STYLESHEET, PLACEHOLDER];

/// Per-request inputs beyond locale and route.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Decoded query parameters.
    pub query: HashMap<String, String>,
    /// Raw query string, kept on language-switcher links.
    pub raw_query: Option<String>,
    /// Outcome of a contact form post to this page.
    pub contact: Option<FormView<ContactSubmission>>,
    pub quote: Option<FormView<QuoteSubmission>>,
    /// Rendering for `export`: forms post to the external form service.
    pub static_export: bool,
}

pub struct Site {
    pub config: SiteConfig,
    content: Content,
    relay: FormRelay,
    analytics: Analytics,
    stylesheet: String,
    stylesheet_url: String,
}

impl Site {
    pub fn new(config: SiteConfig) -> Result<Self, SiteError> {
        let content = Content::from_config(&config)?;
        Self::with_content(config, content)
    }

    /// A site over an explicit content resolver. Tests use this with a mock
    /// content source.
    pub fn with_content(config: SiteConfig, content: Content) -> Result<Self, SiteError> {
        let relay = FormRelay::new(&config.forms)?;
        let analytics = Analytics::new(&config.analytics);
        let stylesheet = format!("{}\n\n{}", generate_theme_css(&config.theme), CSS_STATIC);
        let stylesheet_url = format!(
            "/static/{}?v={}",
            STYLESHEET.name,
            &fingerprint(&stylesheet)[..12]
        );
        Ok(Self {
            config,
            content,
            relay,
            analytics,
            stylesheet,
            stylesheet_url,
        })
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn relay(&self) -> &FormRelay {
        &self.relay
    }

    pub fn stylesheet_url(&self) -> &str {
        &self.stylesheet_url
    }

    /// Body of a static asset by file name.
    pub fn asset(&self, name: &str) -> Option<(StaticAsset, &str)> {
        match name {
            n if n == STYLESHEET.name => Some((STYLESHEET, self.stylesheet.as_str())),
            n if n == PLACEHOLDER.name => Some((PLACEHOLDER, PLACEHOLDER_SVG)),
            _ => None,
        }
    }

    pub fn sitemap_xml(&self, now: DateTime<Utc>) -> String {
        sitemap::to_xml(&sitemap::entries(self.config.site.origin(), now))
    }

    pub fn robots_txt(&self) -> String {
        sitemap::robots_txt(self.config.site.origin())
    }

    fn schema(&self, locale: Locale) -> Schema<'_> {
        Schema {
            site: &self.config.site,
            company: &self.config.company,
            locale,
        }
    }

    /// Where a page form posts to.
    fn form_action(&self, locale: Locale, route: &Route, static_export: bool) -> String {
        let relay_url = match route {
            Route::Contact => self.relay.contact_url(),
            Route::Quote => self.relay.quote_url(),
            _ => None,
        };
        match relay_url {
            Some(url) if static_export => url.to_string(),
            _ => localized_path(&route.path(), locale),
        }
    }

    /// Full HTML for `route`, or `None` when a slug matches no content.
    pub async fn render(&self, locale: Locale, route: &Route, request: &PageRequest) -> Option<String> {
        let now = Utc::now();
        let ctx = RenderContext {
            locale,
            schema: self.schema(locale),
            now,
        };
        let company = self.content.company(locale).await;

        let view = match route {
            Route::Home => pages::home(&ctx, &self.content.products(locale).await.items),
            Route::About => pages::about(&ctx),
            Route::Products => {
                let query = ProductQuery::from_params(&request.query);
                pages::products(&ctx, &self.content.products(locale).await.items, &query)
            }
            Route::Product(slug) => pages::product(&ctx, &self.content.product(slug, locale).await?),
            Route::Blog => pages::blog(&ctx, &self.content.blog_posts(locale).await.items),
            Route::BlogPost(slug) => {
                pages::blog_post(&ctx, &self.content.blog_post(slug, locale).await?)
            }
            Route::Faq => pages::faq(&ctx, &self.content.faqs(locale).await.items),
            Route::Quality => pages::quality(&ctx, &self.content.certifications(locale).await.items),
            Route::Contact => {
                let form = request.contact.clone().unwrap_or_default();
                let action = self.form_action(locale, route, request.static_export);
                pages::contact(&ctx, &company, &form, &action)
            }
            Route::Quote => {
                let form = match &request.quote {
                    Some(form) => form.clone(),
                    None => FormView::with_values(self.quote_prefill(locale, &request.query).await),
                };
                let action = self.form_action(locale, route, request.static_export);
                pages::quote(&ctx, &form, &action)
            }
        };

        let mut current_path = localized_path(&route.path(), locale);
        if let Some(query) = request.raw_query.as_deref().filter(|q| !q.is_empty()) {
            current_path.push('?');
            current_path.push_str(query);
        }
        Some(self.document(&ctx, Some(route.clone()), &current_path, &company, view))
    }

    /// The not-found page in `locale`.
    pub async fn render_not_found(&self, locale: Locale, current_path: &str) -> String {
        let ctx = RenderContext {
            locale,
            schema: self.schema(locale),
            now: Utc::now(),
        };
        let company = self.content.company(locale).await;
        let view = pages::not_found(&ctx);
        self.document(&ctx, None, current_path, &company, view)
    }

    fn document(
        &self,
        ctx: &RenderContext,
        section: Option<Route>,
        current_path: &str,
        company: &CompanyDetails,
        view: View,
    ) -> String {
        let meta = generate_metadata(
            &view.meta,
            ctx.locale,
            &self.config.site,
            &self.config.company,
        );
        let same_as: Vec<String> = company.social.iter().map(|(_, url)| url.clone()).collect();
        let mut schemas = vec![ctx.schema.organization(&same_as)];
        schemas.extend(view.schemas);

        let chrome = Chrome {
            locale: ctx.locale,
            current_path,
            section,
            company,
            analytics: &self.analytics,
            stylesheet: &self.stylesheet_url,
            year: ctx.now.year(),
        };
        layout::document(
            &chrome,
            &meta,
            &schemas,
            &view.events,
            view.body_class,
            view.body,
        )
        .into_string()
    }

    /// Initial quote form values. `?product=<slug>` pre-fills the product
    /// name; an unknown value is taken as the name itself.
    async fn quote_prefill(&self, locale: Locale, query: &HashMap<String, String>) -> QuoteSubmission {
        let mut values = QuoteSubmission {
            locale: locale.as_str().to_string(),
            ..QuoteSubmission::default()
        };
        if let Some(requested) = query.get("product").map(|p| p.trim()).filter(|p| !p.is_empty()) {
            values.product_name = match self.content.product(requested, locale).await {
                Some(detail) => detail.summary.title,
                None => requested.to_string(),
            };
        }
        values
    }

    // ------------------------------------------------------------------------
    // Page form posts
    // ------------------------------------------------------------------------

    /// Validate and submit a contact form post.
    pub async fn submit_contact(&self, submission: ContactSubmission) -> FormView<ContactSubmission> {
        match self.relay.submit_contact(&submission, Utc::now()).await {
            Ok(_) => FormView::success(
                Event::ContactForm {
                    subject: submission.subject_or_default().to_string(),
                    company: submission.company.trim().to_string(),
                },
                None,
            ),
            Err(FormError::Missing(missing)) => FormView::invalid(submission, missing),
            Err(err) => {
                tracing::warn!(error = %err, "contact form submission failed");
                FormView::failed(submission)
            }
        }
    }

    /// Validate and submit a quote form post.
    pub async fn submit_quote(&self, locale: Locale, mut submission: QuoteSubmission) -> FormView<QuoteSubmission> {
        if submission.locale.trim().is_empty() {
            submission.locale = locale.as_str().to_string();
        }
        match self.relay.submit_quote(&submission, Utc::now()).await {
            Ok(receipt) => {
                let quote_number = match receipt {
                    Receipt::Acknowledged { quote_number } => quote_number,
                    Receipt::Relayed => None,
                };
                FormView::success(
                    Event::QuoteRequest {
                        product: submission.product_name.trim().to_string(),
                        company: submission.company_name.trim().to_string(),
                    },
                    quote_number,
                )
            }
            Err(FormError::Missing(missing)) => FormView::invalid(submission, missing),
            Err(err) => {
                tracing::warn!(error = %err, "quote form submission failed");
                FormView::failed(submission)
            }
        }
    }
}

/// SHA-256 of `content` as lowercase hex.
fn fingerprint(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::cms::tests::MockSource;
    use crate::forms::SubmitStatus;
    use crate::test_helpers::{sample_product, site_with};
    use serde_json::json;

    fn count(html: &str, needle: &str) -> usize {
        html.matches(needle).count()
    }

    #[tokio::test]
    async fn every_route_renders_in_every_locale() {
        let site = site_with(MockSource::new());
        for locale in Locale::ALL {
            for route in Route::STATIC {
                let html = site.render(locale, &route, &PageRequest::default()).await;
                let html = html.unwrap_or_else(|| panic!("{locale} {route:?}"));
                assert!(html.contains(&format!(r#"<html lang="{locale}">"#)));
                assert!(html.contains("application/ld+json"));
            }
        }
    }

    #[tokio::test]
    async fn failing_cms_falls_back_to_catalog() {
        let site = site_with(MockSource::failing());
        let html = site
            .render(Locale::Nl, &Route::Products, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(
            count(&html, r#"class="product-card""#),
            catalog::products(Locale::Nl).len()
        );
    }

    #[tokio::test]
    async fn cms_products_replace_catalog() {
        let site = site_with(
            MockSource::new().respond("\"product\"", json!([sample_product("spelt")])),
        );
        let html = site
            .render(Locale::En, &Route::Products, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(count(&html, r#"class="product-card""#), 1);
        assert!(html.contains("/en/products/spelt"));
    }

    #[tokio::test]
    async fn listing_links_resolve_for_non_ascii_slugs() {
        let slug = "spelt_oekraïne";
        let site = site_with(
            MockSource::new()
                .respond("order(_createdAt desc)", json!([sample_product(slug)]))
                .respond("slug.current", sample_product(slug)),
        );
        let listing = site
            .render(Locale::Nl, &Route::Products, &PageRequest::default())
            .await
            .unwrap();
        let href = "/nl/products/spelt_oekra%C3%AFne";
        assert!(listing.contains(&format!(r#"href="{href}""#)));

        let (locale, rest) = crate::locale::split_locale(href).unwrap();
        let route = Route::parse(rest).unwrap();
        assert_eq!(route, Route::Product(slug.into()));
        let detail = site.render(locale, &route, &PageRequest::default()).await.unwrap();
        assert!(detail.contains("product-detail"));
        assert!(detail.contains("/nl/quote?product=spelt_oekra%C3%AFne"));
    }

    #[tokio::test]
    async fn unknown_slug_is_none() {
        let site = site_with(MockSource::new());
        let route = Route::Product("no-such-product".into());
        assert!(site.render(Locale::En, &route, &PageRequest::default()).await.is_none());
    }

    #[tokio::test]
    async fn every_page_carries_organization_schema() {
        let site = site_with(MockSource::new());
        let html = site.render(Locale::En, &Route::Faq, &PageRequest::default()).await.unwrap();
        assert!(html.contains(r#""@type":"Organization""#));
        assert!(html.contains(r#""@type":"FAQPage""#));
    }

    #[tokio::test]
    async fn quote_page_prefills_product_from_slug() {
        let site = site_with(MockSource::new());
        let request = PageRequest {
            query: HashMap::from([("product".to_string(), "rye-seeds".to_string())]),
            ..PageRequest::default()
        };
        let html = site.render(Locale::En, &Route::Quote, &request).await.unwrap();
        let title = catalog::product("rye-seeds", Locale::En).unwrap().summary.title;
        assert!(html.contains(&format!(r#"value="{title}""#)));
    }

    #[tokio::test]
    async fn language_switcher_keeps_query() {
        let site = site_with(MockSource::new());
        let request = PageRequest {
            query: HashMap::from([("category".to_string(), "seeds".to_string())]),
            raw_query: Some("category=seeds".into()),
            ..PageRequest::default()
        };
        let html = site.render(Locale::En, &Route::Products, &request).await.unwrap();
        assert!(html.contains(r#"href="/nl/products?category=seeds""#));
    }

    #[tokio::test]
    async fn not_found_page_is_noindex() {
        let site = site_with(MockSource::new());
        let html = site.render_not_found(Locale::Nl, "/nl/nope").await;
        assert!(html.contains(r#"content="noindex, follow""#));
        assert!(html.contains(r#"href="/en/nope""#));
    }

    #[tokio::test]
    async fn contact_post_without_relay_succeeds() {
        let site = site_with(MockSource::new());
        let view = site
            .submit_contact(ContactSubmission {
                first_name: "Jan".into(),
                last_name: "Jansen".into(),
                email: "jan@example.nl".into(),
                company: "Akker BV".into(),
                message: "Hallo".into(),
                ..ContactSubmission::default()
            })
            .await;
        assert_eq!(view.status, SubmitStatus::Success);
        assert_eq!(
            view.event,
            Some(Event::ContactForm {
                subject: "General Inquiry".into(),
                company: "Akker BV".into()
            })
        );
    }

    #[tokio::test]
    async fn invalid_quote_post_lists_missing_fields() {
        let site = site_with(MockSource::new());
        let view = site
            .submit_quote(
                Locale::Nl,
                QuoteSubmission {
                    company_name: "Akker BV".into(),
                    ..QuoteSubmission::default()
                },
            )
            .await;
        assert_eq!(view.status, SubmitStatus::Error);
        assert!(view.missing.contains(&"contactName"));
        assert_eq!(view.values.company_name, "Akker BV");
        assert_eq!(view.values.locale, "nl");
    }

    #[tokio::test]
    async fn valid_quote_post_gets_number() {
        let site = site_with(MockSource::new());
        let view = site
            .submit_quote(
                Locale::En,
                QuoteSubmission {
                    company_name: "Akker BV".into(),
                    contact_name: "Jan Jansen".into(),
                    email: "jan@example.nl".into(),
                    product_name: "Rye Seeds".into(),
                    quantity: "20 t".into(),
                    ..QuoteSubmission::default()
                },
            )
            .await;
        assert_eq!(view.status, SubmitStatus::Success);
        assert!(view.quote_number.unwrap().starts_with("QR-"));
    }

    #[test]
    fn stylesheet_is_fingerprinted() {
        let site = site_with(MockSource::new());
        let url = site.stylesheet_url();
        assert!(url.starts_with("/static/style.css?v="));
        assert_eq!(url.len(), "/static/style.css?v=".len() + 12);
        let (asset, body) = site.asset("style.css").unwrap();
        assert_eq!(asset, STYLESHEET);
        assert!(body.starts_with(":root {"));
        assert!(site.asset("../Cargo.toml").is_none());
    }

    #[test]
    fn exported_forms_post_to_relay() {
        let mut config = SiteConfig::default();
        config.forms.contact_url = Some("https://forms.example.com/contact".into());
        let site = crate::test_helpers::site_from_config(config, MockSource::new());
        assert_eq!(
            site.form_action(Locale::En, &Route::Contact, true),
            "https://forms.example.com/contact"
        );
        assert_eq!(site.form_action(Locale::En, &Route::Contact, false), "/en/contact");
        assert_eq!(site.form_action(Locale::Nl, &Route::Quote, true), "/nl/quote");
    }
}

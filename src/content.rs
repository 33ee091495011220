//! Content resolution: CMS first, fallback catalog second.
//!
//! Every accessor asks the [`ContentSource`] and converts the documents into
//! view models. A null, empty or failed CMS answer is replaced by the
//! [`catalog`] entry for the same locale. Callers cannot tell the two apart
//! except through [`Provenance`], which only feeds logs and the CLI.

use crate::catalog;
use crate::cms::{self, CmsError, ContentSource, queries};
use crate::config::{CompanyConfig, SiteConfig};
use crate::i18n::messages;
use crate::image_url::{Fit, ImageUrlBuilder};
use crate::locale::Locale;
use crate::model::{
    self, BlogPost, Certification, CompanyInfo, FaqItem, Product, ProductRef, SanityImage,
};
use crate::portable_text;
use crate::routes;
use crate::types::{
    BlogArticle, BlogSummary, CertificationEntry, CompanyDetails, FaqEntry, Inventory, Listing,
    ListingReport, ProductDetail, ProductSummary, Provenance, RelatedLink,
};
use std::sync::Arc;

/// Resolves page content for every locale.
pub struct Content {
    source: Arc<dyn ContentSource>,
    images: Option<ImageUrlBuilder>,
    company: CompanyConfig,
}

impl Content {
    pub fn new(
        source: Arc<dyn ContentSource>,
        images: Option<ImageUrlBuilder>,
        company: CompanyConfig,
    ) -> Self {
        Self {
            source,
            images,
            company,
        }
    }

    /// Content backed by the CMS named in `config`, or fallback-only when no
    /// project is configured.
    pub fn from_config(config: &SiteConfig) -> Result<Self, CmsError> {
        let source = cms::source_from_config(&config.cms)?;
        let images = config
            .cms
            .project()
            .map(|project| ImageUrlBuilder::new(project, config.cms.dataset.clone()));
        Ok(Self::new(source, images, config.company.clone()))
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_configured()
    }

    fn image_url(&self, image: Option<&SanityImage>, width: u32, height: u32) -> Option<String> {
        let builder = self.images.as_ref()?;
        builder
            .image(image?)
            .width(width)
            .height(height)
            .fit(Fit::Crop)
            .auto_format()
            .url()
    }

    // ------------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------------

    pub async fn products(&self, locale: Locale) -> Listing<ProductSummary> {
        let docs: Vec<Product> = cms::fetch(
            self.source.as_ref(),
            &queries::all_products(),
            &queries::locale_params(locale),
        )
        .await
        .unwrap_or_default();
        let docs: Vec<Product> = docs
            .into_iter()
            .filter(|p| has_page(&p.slug.current, &p.id))
            .collect();

        if docs.is_empty() {
            tracing::debug!(%locale, "products from fallback catalog");
            return Listing {
                items: catalog::products(locale),
                provenance: Provenance::Fallback,
            };
        }
        Listing {
            items: docs.iter().map(|p| self.product_summary(p, locale)).collect(),
            provenance: Provenance::Cms,
        }
    }

    pub async fn product(&self, slug: &str, locale: Locale) -> Option<ProductDetail> {
        let doc: Option<Product> = cms::fetch(
            self.source.as_ref(),
            &queries::product_by_slug(),
            &queries::slug_params(locale, slug),
        )
        .await;

        match doc {
            Some(doc) => Some(self.product_detail(&doc, locale)),
            None => {
                tracing::debug!(%locale, slug, "product from fallback catalog");
                catalog::product(slug, locale)
            }
        }
    }

    fn product_summary(&self, doc: &Product, locale: Locale) -> ProductSummary {
        ProductSummary {
            slug: doc.slug.current.clone(),
            title: doc.title.clone(),
            description: doc.description.clone(),
            category: doc.category,
            category_label: doc
                .category
                .map(|c| messages(locale).product_category(c).to_string())
                .unwrap_or_default(),
            origin: doc.origin.clone().unwrap_or_default(),
            kind: doc.kind.clone().unwrap_or_default(),
            image_url: self.image_url(doc.image.as_ref(), 400, 300),
            featured: doc.featured,
            created_at: doc.created_at.as_deref().and_then(model::parse_timestamp),
        }
    }

    fn product_detail(&self, doc: &Product, locale: Locale) -> ProductDetail {
        let summary = self.product_summary(doc, locale);
        let m = messages(locale);
        let percent = |v: Option<f64>| v.map(|v| format!("{v}%"));
        let spec = &doc.specifications;

        let mut specs = Vec::new();
        let mut push = |label: &str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                specs.push((label.to_string(), value));
            }
        };
        push(m.common.kind.as_str(), doc.kind.clone());
        push(m.common.origin.as_str(), doc.origin.clone());
        push(
            m.product.purity.as_str(),
            percent(doc.purity).or_else(|| spec.purity.clone()),
        );
        push(
            m.product.germination.as_str(),
            percent(doc.germination).or_else(|| spec.germination.clone()),
        );
        push(
            m.product.moisture.as_str(),
            percent(doc.moisture_content).or_else(|| spec.moisture.clone()),
        );
        push(m.product.weight.as_str(), spec.weight.clone());

        let packaging = if doc.packaging_options.is_empty() {
            spec.packaging.iter().cloned().collect()
        } else {
            doc.packaging_options.clone()
        };

        let gallery = doc
            .gallery
            .iter()
            .filter_map(|image| self.image_url(Some(image), 200, 200))
            .collect();

        ProductDetail {
            body: doc.description.clone(),
            organic: doc
                .organic
                .unwrap_or(doc.category == Some(model::ProductCategory::Organic)),
            in_stock: doc.in_stock,
            price: doc.price,
            specs,
            packaging,
            harvest_year: doc.harvest_year,
            features: doc.features.clone(),
            certifications: doc.certification.clone(),
            image_url: self.image_url(doc.image.as_ref(), 800, 600),
            share_image_url: self.image_url(doc.image.as_ref(), 1200, 630),
            gallery,
            related: doc
                .related_products
                .iter()
                .filter(|r| routes::is_slug(&r.slug.current))
                .map(|r| self.related_product(r))
                .collect(),
            updated_at: doc.updated_at.as_deref().and_then(model::parse_timestamp),
            provenance: Provenance::Cms,
            summary,
        }
    }

    fn related_product(&self, doc: &ProductRef) -> RelatedLink {
        RelatedLink {
            slug: doc.slug.current.clone(),
            title: doc.title.clone(),
            excerpt: String::new(),
            image_url: self.image_url(doc.image.as_ref(), 400, 300),
        }
    }

    // ------------------------------------------------------------------------
    // Blog
    // ------------------------------------------------------------------------

    pub async fn blog_posts(&self, locale: Locale) -> Listing<BlogSummary> {
        let docs: Vec<BlogPost> = cms::fetch(
            self.source.as_ref(),
            &queries::all_blog_posts(),
            &queries::locale_params(locale),
        )
        .await
        .unwrap_or_default();
        let docs: Vec<BlogPost> = docs
            .into_iter()
            .filter(|p| has_page(&p.slug.current, &p.id))
            .collect();

        if docs.is_empty() {
            tracing::debug!(%locale, "blog posts from fallback catalog");
            return Listing {
                items: catalog::blog_posts(locale),
                provenance: Provenance::Fallback,
            };
        }
        Listing {
            items: docs.iter().map(|p| self.blog_summary(p)).collect(),
            provenance: Provenance::Cms,
        }
    }

    pub async fn blog_post(&self, slug: &str, locale: Locale) -> Option<BlogArticle> {
        let doc: Option<BlogPost> = cms::fetch(
            self.source.as_ref(),
            &queries::blog_post_by_slug(),
            &queries::slug_params(locale, slug),
        )
        .await;

        let Some(doc) = doc else {
            tracing::debug!(%locale, slug, "blog post from fallback catalog");
            return catalog::blog_post(slug, locale);
        };

        Some(BlogArticle {
            summary: self.blog_summary(&doc),
            body_html: portable_text::render(&doc.content, self.images.as_ref()).into_string(),
            author_bio: doc.author.as_ref().and_then(|a| a.bio.clone()),
            tags: doc.tags.clone(),
            related: doc
                .related_posts
                .iter()
                .filter(|r| routes::is_slug(&r.slug.current))
                .map(|r| RelatedLink {
                    slug: r.slug.current.clone(),
                    title: r.title.clone(),
                    excerpt: r.excerpt.clone(),
                    image_url: None,
                })
                .collect(),
            updated_at: doc.updated_at.as_deref().and_then(model::parse_timestamp),
            provenance: Provenance::Cms,
        })
    }

    fn blog_summary(&self, doc: &BlogPost) -> BlogSummary {
        BlogSummary {
            slug: doc.slug.current.clone(),
            title: doc.title.clone(),
            excerpt: doc.excerpt.clone(),
            published: doc.published_at.as_deref().and_then(model::parse_date),
            author: doc
                .author
                .as_ref()
                .map(|a| a.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.company.name.clone()),
            category: doc.category,
            image_url: self.image_url(doc.image.as_ref(), 800, 450),
            featured: doc.featured,
            reading_time: reading_time(doc),
        }
    }

    // ------------------------------------------------------------------------
    // FAQ, certifications, company
    // ------------------------------------------------------------------------

    pub async fn faqs(&self, locale: Locale) -> Listing<FaqEntry> {
        let docs: Vec<FaqItem> = cms::fetch(
            self.source.as_ref(),
            &queries::all_faqs(),
            &queries::locale_params(locale),
        )
        .await
        .unwrap_or_default();

        let items: Vec<FaqEntry> = docs
            .into_iter()
            .filter(|f| f.active != Some(false))
            .map(|f| FaqEntry {
                question: f.question,
                answer: f.answer,
                category: f.category.unwrap_or_else(|| "general".to_string()),
            })
            .collect();

        if items.is_empty() {
            tracing::debug!(%locale, "FAQs from fallback catalog");
            return Listing {
                items: catalog::faqs(locale),
                provenance: Provenance::Fallback,
            };
        }
        Listing {
            items,
            provenance: Provenance::Cms,
        }
    }

    pub async fn certifications(&self, locale: Locale) -> Listing<CertificationEntry> {
        let docs: Vec<Certification> = cms::fetch(
            self.source.as_ref(),
            &queries::all_certifications(),
            &queries::locale_params(locale),
        )
        .await
        .unwrap_or_default();

        let items: Vec<CertificationEntry> = docs
            .iter()
            .filter(|c| c.active != Some(false))
            .map(|c| CertificationEntry {
                title: c.title.clone(),
                description: c.description.clone(),
                issuer: c.issuer.clone(),
                issued: c.issued_date.as_deref().and_then(model::parse_date),
                valid_until: c.expiry_date.as_deref().and_then(model::parse_date),
                image_url: self.image_url(c.image.as_ref(), 200, 200),
            })
            .collect();

        if items.is_empty() {
            tracing::debug!(%locale, "certifications from fallback catalog");
            return Listing {
                items: catalog::certifications(locale),
                provenance: Provenance::Fallback,
            };
        }
        Listing {
            items,
            provenance: Provenance::Cms,
        }
    }

    /// Company details, with CMS fields overriding configuration.
    pub async fn company(&self, locale: Locale) -> CompanyDetails {
        let fallback = catalog::company(&self.company, locale);
        let doc: Option<CompanyInfo> = cms::fetch(
            self.source.as_ref(),
            &queries::company_info(),
            &queries::locale_params(locale),
        )
        .await;
        match doc {
            Some(doc) => merge_company(doc, fallback),
            None => fallback,
        }
    }

    /// Resolve every listing in `locale` and report where each came from.
    pub async fn inventory(&self, locale: Locale) -> Inventory {
        fn report<T>(name: &'static str, listing: &Listing<T>) -> ListingReport {
            ListingReport {
                name,
                count: listing.items.len(),
                provenance: listing.provenance,
            }
        }
        let listings = vec![
            report("products", &self.products(locale).await),
            report("blog posts", &self.blog_posts(locale).await),
            report("faqs", &self.faqs(locale).await),
            report("certifications", &self.certifications(locale).await),
        ];
        Inventory {
            locale,
            listings,
            company: self.company(locale).await.provenance,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn merge_company(doc: CompanyInfo, fallback: CompanyDetails) -> CompanyDetails {
    let address = doc.address.and_then(|a| {
        let locality = [a.postal_code, a.city]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let parts: Vec<String> = [a.street, non_blank(Some(locality)), a.country]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    });

    let hours = doc.business_hours.unwrap_or_default();
    let social = doc
        .social_media
        .map(|s| {
            [
                ("LinkedIn", s.linkedin),
                ("Twitter", s.twitter),
                ("Facebook", s.facebook),
                ("Instagram", s.instagram),
            ]
            .into_iter()
            .filter_map(|(network, url)| non_blank(url).map(|url| (network.to_string(), url)))
            .collect()
        })
        .unwrap_or_default();

    CompanyDetails {
        name: non_blank(doc.company_name).unwrap_or(fallback.name),
        tagline: non_blank(doc.tagline).unwrap_or(fallback.tagline),
        description: non_blank(doc.description).unwrap_or(fallback.description),
        address: address.unwrap_or(fallback.address),
        phone: non_blank(doc.phone).unwrap_or(fallback.phone),
        email: non_blank(doc.email).unwrap_or(fallback.email),
        hours_weekdays: non_blank(hours.weekdays).unwrap_or(fallback.hours_weekdays),
        hours_weekend: non_blank(hours.weekend).unwrap_or(fallback.hours_weekend),
        social,
        provenance: Provenance::Cms,
    }
}

/// CMS documents whose slug cannot name a page are left out of listings.
fn has_page(slug: &str, id: &str) -> bool {
    let ok = routes::is_slug(slug);
    if !ok {
        tracing::warn!(id, slug, "skipping CMS document without a usable slug");
    }
    ok
}

/// Minutes to read: the CMS value, else an estimate from the body text the
/// listing query projects, else from the full body.
fn reading_time(doc: &BlogPost) -> u32 {
    match (doc.reading_time.filter(|m| *m > 0), &doc.body_text) {
        (Some(minutes), _) => minutes,
        (None, Some(text)) => portable_text::reading_time_of(text),
        (None, None) => portable_text::reading_time(&doc.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::tests::MockSource;
    use crate::test_helpers::{sample_blog_post, sample_product};
    use serde_json::json;

    fn content(source: MockSource) -> Content {
        Content::new(
            Arc::new(source),
            Some(ImageUrlBuilder::new("proj", "production")),
            CompanyConfig::default(),
        )
    }

    #[tokio::test]
    async fn products_fall_back_when_cms_is_empty() {
        let c = content(MockSource::new().respond("\"product\"", json!([])));
        let listing = c.products(Locale::Nl).await;
        assert_eq!(listing.provenance, Provenance::Fallback);
        assert_eq!(listing.items, catalog::products(Locale::Nl));
    }

    #[tokio::test]
    async fn products_fall_back_when_cms_fails() {
        let c = content(MockSource::failing());
        let listing = c.products(Locale::En).await;
        assert_eq!(listing.provenance, Provenance::Fallback);
        assert_eq!(listing.items.len(), 9);
    }

    #[tokio::test]
    async fn products_from_cms() {
        let c = content(MockSource::new().respond("\"product\"", json!([sample_product("spelt")])));
        let listing = c.products(Locale::En).await;
        assert_eq!(listing.provenance, Provenance::Cms);
        assert_eq!(listing.items.len(), 1);
        let spelt = &listing.items[0];
        assert_eq!(spelt.slug, "spelt");
        assert_eq!(spelt.category_label, "Grains");
        assert!(spelt.image_url.as_deref().unwrap().contains("w=400&h=300"));
        assert!(spelt.created_at.is_some());
    }

    #[tokio::test]
    async fn product_queries_pass_locale_and_slug() {
        let source = Arc::new(MockSource::new());
        let c = Content::new(source.clone(), None, CompanyConfig::default());
        c.product("rye-seeds", Locale::Nl).await;
        let recorded = source.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].1["slug"], "rye-seeds");
        assert_eq!(recorded[0].1["locale"], "nl");
    }

    #[tokio::test]
    async fn product_detail_from_cms_builds_spec_rows() {
        let c = content(MockSource::new().respond("slug.current", sample_product("spelt")));
        let detail = c.product("spelt", Locale::En).await.unwrap();
        assert_eq!(detail.provenance, Provenance::Cms);
        let labels: Vec<&str> = detail.specs.iter().map(|(l, _)| l.as_str()).collect();
        assert!(labels.contains(&"Purity"), "{labels:?}");
        assert!(detail.specs.contains(&("Purity".to_string(), "99.5%".to_string())));
        assert_eq!(detail.packaging, vec!["25 kg bags", "Big bags"]);
        assert!(detail.share_image_url.unwrap().contains("w=1200&h=630"));
        assert_eq!(detail.related.len(), 1);
    }

    #[tokio::test]
    async fn unknown_slug_without_fallback_is_none() {
        let c = content(MockSource::new());
        assert!(c.product("no-such-thing", Locale::En).await.is_none());
        assert!(c.product("flax-seeds", Locale::En).await.is_some());
    }

    #[tokio::test]
    async fn blog_post_from_cms_renders_body_and_estimates_reading_time() {
        let c = content(MockSource::new().respond("slug.current", sample_blog_post("harvest")));
        let post = c.blog_post("harvest", Locale::En).await.unwrap();
        assert!(post.body_html.contains("<h2>Harvest outlook</h2>"));
        assert_eq!(post.summary.reading_time, 1);
        assert_eq!(post.summary.author, "Anna de Vries");
        assert_eq!(post.author_bio.as_deref(), Some("Grain analyst"));
    }

    #[tokio::test]
    async fn blog_listing_estimates_reading_time_from_body_text() {
        let mut long = sample_blog_post("long-read");
        long["bodyText"] = json!("grain ".repeat(900));
        let mut rated = sample_blog_post("rated");
        rated["readingTime"] = json!(7);
        let c = content(MockSource::new().respond("\"blogPost\"", json!([long, rated])));

        let listing = c.blog_posts(Locale::En).await;
        assert_eq!(listing.provenance, Provenance::Cms);
        assert_eq!(listing.items[0].reading_time, 4);
        assert_eq!(listing.items[1].reading_time, 7);
    }

    #[tokio::test]
    async fn listing_and_article_agree_on_reading_time() {
        let mut post = sample_blog_post("harvest");
        let words = "wheat ".repeat(650);
        post["content"][1]["children"][0]["text"] = json!(words.clone());
        let mut listed = post.clone();
        listed["bodyText"] = json!(words);

        let c = content(MockSource::new().respond("slug.current", post));
        let article = c.blog_post("harvest", Locale::En).await.unwrap();
        let c = content(MockSource::new().respond("\"blogPost\"", json!([listed])));
        let listing = c.blog_posts(Locale::En).await;

        assert_eq!(article.summary.reading_time, 3);
        assert_eq!(listing.items[0].reading_time, article.summary.reading_time);
    }

    #[tokio::test]
    async fn documents_without_usable_slugs_are_skipped() {
        let c = content(MockSource::new().respond(
            "\"product\"",
            json!([
                sample_product("../../../escaped"),
                sample_product(""),
                sample_product("spelt_oekraïne")
            ]),
        ));
        let listing = c.products(Locale::En).await;
        assert_eq!(listing.provenance, Provenance::Cms);
        let slugs: Vec<&str> = listing.items.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["spelt_oekraïne"]);

        let c = content(MockSource::new().respond("\"product\"", json!([sample_product("..")])));
        assert_eq!(c.products(Locale::En).await.provenance, Provenance::Fallback);
    }

    #[tokio::test]
    async fn inactive_faqs_are_dropped() {
        let c = content(MockSource::new().respond(
            "faqItem",
            json!([
                {"_id": "f1", "question": "Q1", "answer": "A1", "active": true},
                {"_id": "f2", "question": "Q2", "answer": "A2", "active": false}
            ]),
        ));
        let listing = c.faqs(Locale::En).await;
        assert_eq!(listing.provenance, Provenance::Cms);
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].category, "general");
    }

    #[tokio::test]
    async fn inventory_reports_provenance() {
        let c = content(MockSource::new().respond("\"product\"", json!([sample_product("spelt")])));
        let inventory = c.inventory(Locale::En).await;
        assert_eq!(inventory.listings.len(), 4);
        assert_eq!(inventory.listings[0].count, 1);
        assert_eq!(inventory.listings[0].provenance, Provenance::Cms);
        assert_eq!(inventory.listings[1].provenance, Provenance::Fallback);
        assert_eq!(inventory.company, Provenance::Fallback);
    }

    #[tokio::test]
    async fn certifications_fall_back() {
        let c = content(MockSource::new());
        let listing = c.certifications(Locale::Nl).await;
        assert_eq!(listing.provenance, Provenance::Fallback);
        assert_eq!(listing.items[0].title, "IFS Broker");
    }

    #[tokio::test]
    async fn company_merges_cms_over_config() {
        let c = content(MockSource::new().respond(
            "companyInfo",
            json!({
                "_id": "c1",
                "companyName": null,
                "phone": "+31 20 000 0000",
                "address": {"street": "Kade 1", "city": "Rotterdam", "postalCode": "3011 AA", "country": "Netherlands"},
                "socialMedia": {"linkedin": "https://linkedin.com/company/lar", "twitter": ""}
            }),
        ));
        let company = c.company(Locale::En).await;
        assert_eq!(company.name, "LAR Group B.V.");
        assert_eq!(company.phone, "+31 20 000 0000");
        assert_eq!(company.address, "Kade 1, 3011 AA Rotterdam, Netherlands");
        assert_eq!(company.social.len(), 1);
        assert_eq!(company.provenance, Provenance::Cms);
    }
}

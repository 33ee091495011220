//! View models shared by content resolution, rendering and export.
//!
//! Both CMS documents ([`crate::model`]) and the fallback catalog
//! ([`crate::catalog`]) are converted into these types, so renderers never
//! know which one a page came from. [`Provenance`] records it anyway for logs
//! and CLI output.

use crate::model::{BlogCategory, ProductCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Where a piece of content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Cms,
    Fallback,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Cms => "cms",
            Provenance::Fallback => "fallback",
        }
    }
}

/// A resolved list of items plus where they came from.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub provenance: Provenance,
}

/// Product card data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: Option<ProductCategory>,
    /// Localized category name, shown on the badge and used by text search.
    pub category_label: String,
    pub origin: String,
    pub kind: String,
    /// Card image (400×300). `None` → placeholder.
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Full product page data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub summary: ProductSummary,
    /// Long-form description; equals the card description when none exists.
    pub body: String,
    pub organic: bool,
    pub in_stock: Option<bool>,
    pub price: Option<f64>,
    /// Localized label/value rows for the specification table.
    pub specs: Vec<(String, String)>,
    pub packaging: Vec<String>,
    pub harvest_year: Option<i32>,
    pub features: Vec<String>,
    pub certifications: Vec<String>,
    /// Hero image (800×600).
    pub image_url: Option<String>,
    /// Social preview image (1200×630).
    pub share_image_url: Option<String>,
    pub gallery: Vec<String>,
    pub related: Vec<RelatedLink>,
    pub updated_at: Option<DateTime<Utc>>,
    pub provenance: Provenance,
}

/// Link to another product or article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedLink {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub image_url: Option<String>,
}

/// Blog index card data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub published: Option<NaiveDate>,
    pub author: String,
    pub category: Option<BlogCategory>,
    pub image_url: Option<String>,
    pub featured: bool,
    /// Minutes, at least 1.
    pub reading_time: u32,
}

/// Full article data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogArticle {
    pub summary: BlogSummary,
    /// Rendered article body. Produced by our own renderers, which escape
    /// all document text.
    pub body_html: String,
    pub author_bio: Option<String>,
    pub tags: Vec<String>,
    pub related: Vec<RelatedLink>,
    pub updated_at: Option<DateTime<Utc>>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationEntry {
    pub title: String,
    pub description: String,
    pub issuer: Option<String>,
    pub issued: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub image_url: Option<String>,
}

/// Company details for the footer, contact page and structured data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetails {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub hours_weekdays: String,
    pub hours_weekend: String,
    /// `(network, url)` pairs.
    pub social: Vec<(String, String)>,
    pub provenance: Provenance,
}

/// One entry in the header/footer navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: String,
    /// Locale-prefixed path.
    pub path: String,
    pub current: bool,
}

/// Size and source of one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingReport {
    pub name: &'static str,
    pub count: usize,
    pub provenance: Provenance,
}

/// What `check` reports for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub locale: crate::locale::Locale,
    pub listings: Vec<ListingReport>,
    pub company: Provenance,
}

//! Translated UI strings.
//!
//! One TOML file per locale under `i18n/`, embedded at compile time and
//! deserialized into [`Messages`] on first use. Every section rejects unknown
//! keys and requires every field, so a key missing from one language fails
//! the `every_locale_parses` test instead of rendering an empty string.
//!
//! Placeholders use `{name}` syntax and are filled with [`fill`].

use crate::locale::Locale;
use crate::model::{BlogCategory, ProductCategory};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::Deserialize;

const EN_TOML: &str = include_str!("../i18n/en.toml");
const NL_TOML: &str = include_str!("../i18n/nl.toml");

static EN: Lazy<Messages> =
    Lazy::new(|| toml::from_str(EN_TOML).expect("embedded en.toml must parse"));
static NL: Lazy<Messages> =
    Lazy::new(|| toml::from_str(NL_TOML).expect("embedded nl.toml must parse"));

/// The string table for `locale`.
pub fn messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::En => &EN,
        Locale::Nl => &NL,
    }
}

/// Replace `{key}` placeholders in `template`.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in args {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Messages {
    pub nav: Nav,
    pub common: Common,
    pub home: Home,
    pub about: About,
    pub products: Products,
    pub product: ProductPage,
    pub blog: Blog,
    pub faq: Faq,
    pub quality: Quality,
    pub contact: Contact,
    pub quote: Quote,
    pub footer: Footer,
    pub not_found: NotFound,
    pub seo: Seo,
    pub dates: Dates,
}

impl Messages {
    /// Format a calendar date the way the locale writes it.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let month = self
            .dates
            .months
            .get(date.month0() as usize)
            .map(String::as_str)
            .unwrap_or_default();
        fill(
            &self.dates.format,
            &[
                ("day", &date.day().to_string()),
                ("month", month),
                ("year", &date.year().to_string()),
            ],
        )
    }

    /// "1 product found" / "9 products found".
    pub fn results_count(&self, count: usize) -> String {
        let template = if count == 1 {
            &self.products.results_one
        } else {
            &self.products.results_many
        };
        fill(template, &[("count", &count.to_string())])
    }

    /// Badge label for a product category. Unknown categories have none.
    pub fn product_category(&self, category: ProductCategory) -> &str {
        let p = &self.products;
        match category {
            ProductCategory::Seeds => &p.category_seeds,
            ProductCategory::Grains => &p.category_grains,
            ProductCategory::Organic => &p.category_organic,
            ProductCategory::Conventional => &p.category_conventional,
            ProductCategory::Premium => &p.category_premium,
            ProductCategory::Other => "",
        }
    }

    pub fn blog_category(&self, category: BlogCategory) -> &str {
        let b = &self.blog;
        match category {
            BlogCategory::Industry => &b.category_industry,
            BlogCategory::Products => &b.category_products,
            BlogCategory::Insights => &b.category_insights,
            BlogCategory::Announcements => &b.category_announcements,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Nav {
    pub home: String,
    pub about: String,
    pub products: String,
    pub quality: String,
    pub blog: String,
    pub faq: String,
    pub contact: String,
    pub quote: String,
    pub language: String,
    pub menu: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Common {
    pub contact_us: String,
    pub view_products: String,
    pub request_quote: String,
    pub more_info: String,
    pub featured: String,
    pub organic: String,
    pub origin: String,
    pub kind: String,
    pub read_more: String,
    pub required_hint: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Home {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub featured_title: String,
    pub view_all: String,
    pub categories_title: String,
    pub seeds_title: String,
    pub seeds_text: String,
    pub grains_title: String,
    pub grains_text: String,
    pub organic_title: String,
    pub organic_text: String,
    pub why_title: String,
    pub why_quality: String,
    pub why_certified: String,
    pub why_network: String,
    pub why_support: String,
    pub learn_more: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct About {
    pub title: String,
    pub subtitle: String,
    pub hero_title: String,
    pub hero_description: String,
    pub stats_years: String,
    pub stats_clients: String,
    pub stats_countries: String,
    pub stats_products: String,
    pub story_title: String,
    pub story_content: String,
    pub mission_title: String,
    pub mission_content: String,
    pub values_title: String,
    pub values: Vec<ValueItem>,
    pub cta_title: String,
    pub cta_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueItem {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Products {
    pub title: String,
    pub subtitle: String,
    pub search_placeholder: String,
    pub search_button: String,
    pub sort_label: String,
    pub sort_name: String,
    pub sort_newest: String,
    pub sort_featured: String,
    pub category_all: String,
    pub category_seeds: String,
    pub category_grains: String,
    pub category_organic: String,
    pub category_conventional: String,
    pub category_premium: String,
    pub results_one: String,
    pub results_many: String,
    pub results_for: String,
    pub empty_title: String,
    pub empty_text: String,
    pub view_details: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductPage {
    pub specs_title: String,
    pub purity: String,
    pub germination: String,
    pub moisture: String,
    pub weight: String,
    pub packaging: String,
    pub certifications: String,
    pub features_title: String,
    pub in_stock: String,
    pub out_of_stock: String,
    pub harvest_year: String,
    pub interest_title: String,
    pub interest_text: String,
    pub related_title: String,
    pub related_empty: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blog {
    pub title: String,
    pub subtitle: String,
    pub featured: String,
    pub back: String,
    pub author: String,
    pub published_on: String,
    pub reading_time: String,
    pub share: String,
    pub related: String,
    pub empty: String,
    pub tags: String,
    pub category_industry: String,
    pub category_products: String,
    pub category_insights: String,
    pub category_announcements: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    pub title: String,
    pub subtitle: String,
    pub more_title: String,
    pub more_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quality {
    pub title: String,
    pub subtitle: String,
    pub issued_by: String,
    pub valid_until: String,
    pub commitment_title: String,
    pub traceability_title: String,
    pub traceability_text: String,
    pub delivery_title: String,
    pub delivery_text: String,
    pub support_title: String,
    pub support_text: String,
    pub cta_title: String,
    pub cta_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    pub title: String,
    pub subtitle: String,
    pub info_title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub interests: String,
    pub interest_other: String,
    pub interest_products: String,
    pub interest_services: String,
    pub interest_partnership: String,
    pub interest_support: String,
    pub subject: String,
    pub message: String,
    pub consent: String,
    pub submit: String,
    pub success: String,
    pub error: String,
    pub missing: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quote {
    pub title: String,
    pub subtitle: String,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub product_placeholder: String,
    pub quantity: String,
    pub quantity_placeholder: String,
    pub usage: String,
    pub usage_select: String,
    pub usage_agriculture: String,
    pub usage_food_production: String,
    pub usage_feed: String,
    pub usage_processing: String,
    pub usage_export: String,
    pub usage_other: String,
    pub specifications: String,
    pub specifications_placeholder: String,
    pub delivery_location: String,
    pub delivery_location_placeholder: String,
    pub preferred_delivery: String,
    pub preferred_delivery_placeholder: String,
    pub additional_info: String,
    pub additional_info_placeholder: String,
    pub privacy: String,
    pub submit: String,
    pub success_title: String,
    pub success_text: String,
    pub error: String,
    pub missing: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footer {
    pub description: String,
    pub quick_links: String,
    pub contact_title: String,
    pub hours_title: String,
    pub copyright: String,
    pub privacy: String,
    pub terms: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotFound {
    pub title: String,
    pub text: String,
    pub go_home: String,
    pub popular: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seo {
    pub site_description: String,
    pub keywords: Vec<String>,
    pub home: PageSeo,
    pub about: PageSeo,
    pub products: PageSeo,
    pub product_fallback: PageSeo,
    pub blog: PageSeo,
    pub faq: PageSeo,
    pub contact: PageSeo,
    pub quote: PageSeo,
    pub quality: PageSeo,
    pub not_found: PageSeo,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dates {
    /// Template with `{day}`, `{month}` and `{year}`.
    pub format: String,
    pub months: Vec<String>,
}

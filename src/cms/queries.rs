//! GROQ queries.
//!
//! Every query takes a `$locale` parameter and matches documents whose
//! `language` is unset or equal to it, so single-language datasets keep
//! working. Slug queries also take `$slug`.

use super::{Params, params};
use crate::locale::Locale;
use serde_json::json;

const LANGUAGE_FILTER: &str = "(!defined(language) || language == $locale)";

pub fn all_products() -> String {
    format!(
        r#"*[_type == "product" && {LANGUAGE_FILTER}] | order(_createdAt desc) {{
  _id, title, slug, description, category, type, origin, certification,
  specifications, image, featured, organic, inStock, price, _createdAt
}}"#
    )
}

pub fn product_by_slug() -> String {
    format!(
        r#"*[_type == "product" && slug.current == $slug && {LANGUAGE_FILTER}][0] {{
  _id, title, slug, description, category, type, origin, certification,
  specifications, image, gallery, features, featured, organic, inStock, price,
  purity, germination, moistureContent, packagingOptions, harvestYear,
  relatedProducts[]->{{ _id, title, slug, image }},
  _createdAt, _updatedAt
}}"#
    )
}

pub fn all_blog_posts() -> String {
    format!(
        r#"*[_type == "blogPost" && {LANGUAGE_FILTER}] | order(publishedAt desc) {{
  _id, title, slug, excerpt, publishedAt, author, category, image, featured,
  readingTime, "bodyText": pt::text(content)
}}"#
    )
}

pub fn blog_post_by_slug() -> String {
    format!(
        r#"*[_type == "blogPost" && slug.current == $slug && {LANGUAGE_FILTER}][0] {{
  _id, title, slug, content, excerpt, publishedAt, author, category, image,
  tags, featured, readingTime,
  relatedPosts[]->{{ _id, title, slug, excerpt, publishedAt }},
  _createdAt, _updatedAt
}}"#
    )
}

pub fn all_faqs() -> String {
    format!(
        r#"*[_type == "faqItem" && active != false && {LANGUAGE_FILTER}] | order(order asc) {{
  _id, question, answer, category, order, active
}}"#
    )
}

pub fn all_certifications() -> String {
    format!(
        r#"*[_type == "certification" && active != false && {LANGUAGE_FILTER}] | order(order asc) {{
  _id, title, description, image, issuer, issuedDate, expiryDate, order, active
}}"#
    )
}

pub fn company_info() -> String {
    format!(
        r#"*[_type == "companyInfo" && {LANGUAGE_FILTER}][0] {{
  _id, companyName, tagline, description, address, phone, email,
  businessHours, socialMedia
}}"#
    )
}

/// Parameters for listing queries.
pub fn locale_params(locale: Locale) -> Params {
    params([("locale", json!(locale.as_str()))])
}

/// Parameters for slug queries.
pub fn slug_params(locale: Locale, slug: &str) -> Params {
    params([("locale", json!(locale.as_str())), ("slug", json!(slug))])
}

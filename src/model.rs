//! CMS document types.
//!
//! These mirror the projections in [`crate::cms::queries`]. Query projections
//! return `null` for fields a document does not have, so every non-`Option`
//! collection or flag goes through [`null_default`]. Only `_id` and `title`
//! are required.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` (or a missing field, with `#[serde(default)]`) as `T::default()`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slug {
    #[serde(default, deserialize_with = "null_default")]
    pub current: String,
}

/// A CMS image field: an asset reference plus optional crop and hotspot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SanityImage {
    pub asset: Option<AssetRef>,
    pub alt: Option<String>,
    pub hotspot: Option<Hotspot>,
    pub crop: Option<Crop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// Focal point and its surrounding area, as fractions of the image size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fraction of the image trimmed from each edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl SanityImage {
    /// Image with only an asset reference.
    pub fn from_ref(reference: &str) -> Self {
        Self {
            asset: Some(AssetRef {
                reference: reference.to_string(),
            }),
            ..Self::default()
        }
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Seeds,
    Grains,
    Organic,
    Conventional,
    Premium,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specifications {
    pub purity: Option<String>,
    pub germination: Option<String>,
    pub moisture: Option<String>,
    pub weight: Option<String>,
    pub packaging: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: Slug,
    #[serde(default, deserialize_with = "null_default")]
    pub description: String,
    pub category: Option<ProductCategory>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub certification: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub specifications: Specifications,
    pub image: Option<SanityImage>,
    #[serde(default, deserialize_with = "null_default")]
    pub gallery: Vec<SanityImage>,
    #[serde(default, deserialize_with = "null_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub featured: bool,
    pub organic: Option<bool>,
    pub in_stock: Option<bool>,
    pub price: Option<f64>,
    pub purity: Option<f64>,
    pub germination: Option<f64>,
    pub moisture_content: Option<f64>,
    #[serde(default, deserialize_with = "null_default")]
    pub packaging_options: Vec<String>,
    pub harvest_year: Option<i32>,
    #[serde(rename = "_createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub related_products: Vec<ProductRef>,
}

/// Dereferenced product link (`relatedProducts[]->{...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: Slug,
    pub image: Option<SanityImage>,
}

// ============================================================================
// Blog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogCategory {
    Industry,
    Products,
    Insights,
    Announcements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: Slug,
    /// Portable-text blocks. Decoded block by block at render time.
    #[serde(default, deserialize_with = "null_default")]
    pub content: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub excerpt: String,
    pub published_at: Option<String>,
    pub author: Option<Author>,
    pub category: Option<BlogCategory>,
    pub image: Option<SanityImage>,
    #[serde(default, deserialize_with = "null_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub featured: bool,
    pub reading_time: Option<u32>,
    /// Plain body text, projected by listing queries that omit `content`.
    pub body_text: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub related_posts: Vec<BlogPostRef>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: Slug,
    #[serde(default, deserialize_with = "null_default")]
    pub excerpt: String,
    pub published_at: Option<String>,
}

// ============================================================================
// FAQ, certifications, company
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    #[serde(default, deserialize_with = "null_default")]
    pub answer: String,
    pub category: Option<String>,
    pub order: Option<i64>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub description: String,
    pub image: Option<SanityImage>,
    pub issuer: Option<String>,
    pub issued_date: Option<String>,
    pub expiry_date: Option<String>,
    pub order: Option<i64>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub weekdays: Option<String>,
    pub weekend: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub business_hours: Option<BusinessHours>,
    pub social_media: Option<SocialMedia>,
}

/// Parse a CMS date or datetime (`2024-01-15` or RFC 3339) to a calendar date.
pub fn parse_date(value: &str) -> Option<chrono::NaiveDate> {
    let value = value.trim();
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

/// Parse a CMS timestamp to UTC. Plain dates become midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let value = value.trim();
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_with_null_projection_fields_decodes() {
        let doc = json!({
            "_id": "p1",
            "title": "Spelt",
            "slug": {"current": "spelt"},
            "description": null,
            "category": "grains",
            "type": null,
            "origin": "Germany",
            "certification": null,
            "specifications": null,
            "image": null,
            "gallery": null,
            "features": null,
            "featured": null,
            "_createdAt": "2024-03-01T10:00:00Z"
        });
        let product: Product = serde_json::from_value(doc).unwrap();
        assert_eq!(product.slug.current, "spelt");
        assert_eq!(product.description, "");
        assert_eq!(product.category, Some(ProductCategory::Grains));
        assert!(product.certification.is_empty());
        assert!(!product.featured);
    }

    #[test]
    fn unknown_category_maps_to_other() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1", "title": "Anise", "category": "spices"
        }))
        .unwrap();
        assert_eq!(product.category, Some(ProductCategory::Other));
    }

    #[test]
    fn product_requires_title() {
        let result: Result<Product, _> = serde_json::from_value(json!({"_id": "p1"}));
        assert!(result.is_err());
    }

    #[test]
    fn image_reference_decodes() {
        let image: SanityImage = serde_json::from_value(json!({
            "_type": "image",
            "asset": {"_ref": "image-abc-800x600-jpg", "_type": "reference"},
            "hotspot": {"x": 0.5, "y": 0.4, "width": 0.3, "height": 0.3},
        }))
        .unwrap();
        assert_eq!(image.asset.unwrap().reference, "image-abc-800x600-jpg");
        assert!(image.hotspot.is_some());
        assert!(image.crop.is_none());
    }

    #[test]
    fn blog_post_decodes_author_and_category() {
        let post: BlogPost = serde_json::from_value(json!({
            "_id": "b1",
            "title": "Harvest report",
            "slug": {"current": "harvest-report"},
            "author": {"name": "LAR Team"},
            "category": "insights",
            "publishedAt": "2024-06-01T08:00:00Z",
            "readingTime": 4
        }))
        .unwrap();
        assert_eq!(post.author.unwrap().name, "LAR Team");
        assert_eq!(post.category, Some(BlogCategory::Insights));
        assert_eq!(post.reading_time, Some(4));
        assert!(post.content.is_empty());
    }

    #[test]
    fn parse_date_accepts_both_forms() {
        let d = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15"), Some(d));
        assert_eq!(parse_date("2024-01-15T09:30:00Z"), Some(d));
        assert_eq!(parse_date("15/01/2024"), None);
    }

    #[test]
    fn parse_timestamp_orders_dates() {
        let a = parse_timestamp("2024-01-15").unwrap();
        let b = parse_timestamp("2024-01-15T09:30:00Z").unwrap();
        assert!(a < b);
    }
}

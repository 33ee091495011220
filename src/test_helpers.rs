//! Shared test utilities.
//!
//! Sample CMS documents shaped like the query projections, and helpers that
//! assemble a [`Site`] over a [`MockSource`].
//!
//! # Usage
//!
//! ```rust
//! use crate::cms::tests::MockSource;
//! use crate::test_helpers::*;
//!
//! let site = site_with(MockSource::new().respond("\"product\"", json!([sample_product("spelt")])));
//! ```

use crate::cms::tests::MockSource;
use crate::config::SiteConfig;
use crate::content::Content;
use crate::image_url::ImageUrlBuilder;
use crate::site::Site;
use serde_json::{Value, json};
use std::sync::Arc;

// =========================================================================
// Sample CMS documents
// =========================================================================

/// A product document as returned by the product queries.
pub fn sample_product(slug: &str) -> Value {
    json!({
        "_id": format!("product-{slug}"),
        "_createdAt": "2024-03-01T09:30:00Z",
        "_updatedAt": "2024-03-10T14:00:00Z",
        "title": "Spelt",
        "slug": {"current": slug},
        "description": "Ancient grain with a nutty flavour.",
        "category": "grains",
        "type": "Ancient grain",
        "origin": "Netherlands",
        "certification": ["IFS Broker"],
        "specifications": {"moisture": "< 14%", "weight": null, "packaging": null},
        "image": {"asset": {"_ref": "image-abc123-1200x800-jpg"}},
        "gallery": null,
        "features": ["Low gluten", "Stone milled"],
        "featured": false,
        "organic": null,
        "inStock": true,
        "price": null,
        "purity": 99.5,
        "germination": null,
        "moistureContent": null,
        "packagingOptions": ["25 kg bags", "Big bags"],
        "harvestYear": 2023,
        "relatedProducts": [
            {"_id": "product-rye", "title": "Rye", "slug": {"current": "rye"}, "image": null}
        ]
    })
}

/// A blog post document with a short portable-text body.
pub fn sample_blog_post(slug: &str) -> Value {
    json!({
        "_id": format!("post-{slug}"),
        "_updatedAt": "2024-04-02T08:00:00Z",
        "title": "Harvest report",
        "slug": {"current": slug},
        "excerpt": "What this year's harvest means for buyers.",
        "publishedAt": "2024-04-01T07:00:00Z",
        "author": {"name": "Anna de Vries", "bio": "Grain analyst"},
        "category": "insights",
        "image": null,
        "tags": ["harvest"],
        "featured": false,
        "readingTime": null,
        "relatedPosts": null,
        "content": [
            {
                "_type": "block",
                "_key": "h1",
                "style": "h2",
                "markDefs": [],
                "children": [{"_type": "span", "text": "Harvest outlook", "marks": []}]
            },
            {
                "_type": "block",
                "_key": "p1",
                "style": "normal",
                "markDefs": [],
                "children": [{"_type": "span", "text": "Yields are up across the region.", "marks": []}]
            }
        ]
    })
}

// =========================================================================
// Site assembly
// =========================================================================

/// A site with default configuration over `source`.
pub fn site_with(source: MockSource) -> Site {
    site_from_config(SiteConfig::default(), source)
}

pub fn site_from_config(config: SiteConfig, source: MockSource) -> Site {
    let content = Content::new(
        Arc::new(source),
        Some(ImageUrlBuilder::new("proj", "production")),
        config.company.clone(),
    );
    Site::with_content(config, content).unwrap()
}

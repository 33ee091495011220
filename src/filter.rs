//! Product listing search, category filter and sort.
//!
//! The product page reads these from its query string
//! (`?category=seeds&sort=featured&q=wheat`), so the listing works without
//! client-side scripting. Unknown values fall back to the defaults instead of
//! failing the request.
//!
//! Category matching works on the localized category label, so it applies to
//! CMS products and fallback products alike: `seeds` matches labels containing
//! "seed" or "zaden", `grains` matches "grain", "granen" or "korrel",
//! `organic` matches "organic" or "biologisch".

use crate::types::ProductSummary;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Seeds,
    Grains,
    Organic,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Seeds,
        CategoryFilter::Grains,
        CategoryFilter::Organic,
    ];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "seeds" => CategoryFilter::Seeds,
            "grains" => CategoryFilter::Grains,
            "organic" => CategoryFilter::Organic,
            _ => CategoryFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Seeds => "seeds",
            CategoryFilter::Grains => "grains",
            CategoryFilter::Organic => "organic",
        }
    }

    fn needles(self) -> &'static [&'static str] {
        match self {
            CategoryFilter::All => &[],
            CategoryFilter::Seeds => &["seed", "zaden"],
            CategoryFilter::Grains => &["grain", "granen", "korrel"],
            CategoryFilter::Organic => &["organic", "biologisch"],
        }
    }

    fn matches(self, product: &ProductSummary) -> bool {
        if self == CategoryFilter::All {
            return true;
        }
        let label = product.category_label.to_lowercase();
        self.needles().iter().any(|needle| label.contains(needle))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Name,
    Newest,
    Featured,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Name, SortOrder::Newest, SortOrder::Featured];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => SortOrder::Newest,
            "featured" => SortOrder::Featured,
            _ => SortOrder::Name,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Name => "name",
            SortOrder::Newest => "newest",
            SortOrder::Featured => "featured",
        }
    }
}

/// The listing options selected by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: CategoryFilter,
    pub sort: SortOrder,
    /// Free-text search, trimmed. Empty means no search.
    pub search: String,
}

impl ProductQuery {
    /// Read `category`, `sort` and `q` from decoded query parameters.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            category: params
                .get("category")
                .map(|v| CategoryFilter::parse(v))
                .unwrap_or_default(),
            sort: params
                .get("sort")
                .map(|v| SortOrder::parse(v))
                .unwrap_or_default(),
            search: params
                .get("q")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
        }
    }

    /// Whether anything differs from the default listing.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Filter and sort `products`.
    pub fn apply(&self, products: &[ProductSummary]) -> Vec<ProductSummary> {
        let needle = self.search.to_lowercase();
        let mut result: Vec<ProductSummary> = products
            .iter()
            .filter(|p| needle.is_empty() || matches_search(p, &needle))
            .filter(|p| self.category.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Name => result.sort_by(by_title),
            // Products without a creation date keep their relative order.
            SortOrder::Newest => result.sort_by(|a, b| match (a.created_at, b.created_at) {
                (Some(a), Some(b)) => b.cmp(&a),
                _ => Ordering::Equal,
            }),
            SortOrder::Featured => {
                result.sort_by(|a, b| b.featured.cmp(&a.featured).then_with(|| by_title(a, b)))
            }
        }
        result
    }
}

fn matches_search(product: &ProductSummary, needle: &str) -> bool {
    [&product.title, &product.description, &product.category_label]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn by_title(a: &ProductSummary, b: &ProductSummary) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::locale::Locale;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn titles(products: &[ProductSummary]) -> Vec<&str> {
        products.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn parse_is_lenient() {
        let q = ProductQuery::from_params(&params(&[("category", "SEEDS"), ("sort", "bogus")]));
        assert_eq!(q.category, CategoryFilter::Seeds);
        assert_eq!(q.sort, SortOrder::Name);
        assert!(ProductQuery::from_params(&HashMap::new()).is_default());
    }

    #[test]
    fn default_sorts_by_name() {
        let all = ProductQuery::default().apply(&catalog::products(Locale::En));
        assert_eq!(all.len(), 9);
        assert_eq!(all[0].title, "Buckwheat Grains");
        assert_eq!(all[8].title, "Rye Seeds");
    }

    #[test]
    fn category_filter_works_in_both_languages() {
        let query = ProductQuery {
            category: CategoryFilter::Seeds,
            ..ProductQuery::default()
        };
        assert_eq!(query.apply(&catalog::products(Locale::En)).len(), 4);
        assert_eq!(query.apply(&catalog::products(Locale::Nl)).len(), 4);

        let grains = ProductQuery {
            category: CategoryFilter::Grains,
            ..ProductQuery::default()
        };
        assert_eq!(grains.apply(&catalog::products(Locale::Nl)).len(), 2);
    }

    #[test]
    fn category_filter_reads_the_localized_label() {
        let product = ProductSummary {
            slug: "bio-spelt".into(),
            title: "Spelt".into(),
            description: String::new(),
            category: None,
            category_label: "Biologische granen".into(),
            origin: String::new(),
            kind: String::new(),
            image_url: None,
            featured: false,
            created_at: None,
        };
        let products = [product];
        for (category, expected) in [
            (CategoryFilter::Organic, 1),
            (CategoryFilter::Grains, 1),
            (CategoryFilter::Seeds, 0),
        ] {
            let query = ProductQuery {
                category,
                ..ProductQuery::default()
            };
            assert_eq!(query.apply(&products).len(), expected, "{category:?}");
        }
    }

    #[test]
    fn search_matches_title_description_and_category() {
        let search = |s: &str| ProductQuery {
            search: s.to_string(),
            ..ProductQuery::default()
        };
        let products = catalog::products(Locale::En);
        assert_eq!(titles(&search("WHEAT").apply(&products)), ["Premium Wheat Seeds"]);
        assert_eq!(search("omega-3").apply(&products).len(), 1);
        assert_eq!(search("organic").apply(&products).len(), 3);
        assert!(search("nothing like this").apply(&products).is_empty());
    }

    #[test]
    fn featured_first_then_name() {
        let query = ProductQuery {
            sort: SortOrder::Featured,
            ..ProductQuery::default()
        };
        let sorted = query.apply(&catalog::products(Locale::En));
        assert_eq!(
            titles(&sorted[..3]),
            ["Flax Seeds", "Organic Sunflower Seeds", "Premium Wheat Seeds"]
        );
        assert!(sorted[3..].iter().all(|p| !p.featured));
    }

    #[test]
    fn newest_without_dates_keeps_order() {
        let query = ProductQuery {
            sort: SortOrder::Newest,
            ..ProductQuery::default()
        };
        let products = catalog::products(Locale::En);
        assert_eq!(query.apply(&products), products);
    }
}

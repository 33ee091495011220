//! Page metadata: title, description, OpenGraph, Twitter card, robots,
//! canonical URL and language alternates.
//!
//! [`generate_metadata`] is a pure function from a page description to a
//! [`Metadata`] value; [`head_tags`] renders it into `<head>` markup.

use crate::config::{CompanyConfig, SiteSettings};
use crate::locale::{Locale, localized_path};
use maud::{Markup, html};

/// OpenGraph images are requested and declared at this size.
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Default social image, relative to the site origin.
pub const DEFAULT_OG_IMAGE: &str = "/og-image.png";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageKind {
    #[default]
    Website,
    Article,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Website => "website",
            PageKind::Article => "article",
        }
    }
}

/// What a page says about itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Logical path without locale, e.g. `/products/flax-seeds`. Home is `""`.
    pub path: String,
    /// Absolute URL or site-relative path.
    pub image: Option<String>,
    pub kind: PageKind,
    /// Exclude from search indexes (not-found page).
    pub noindex: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub image: String,
    pub image_width: u32,
    pub image_height: u32,
    pub image_alt: String,
    pub locale: &'static str,
    pub alternate_locale: &'static str,
    pub kind: PageKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub image: String,
    pub creator: String,
}

/// Everything that ends up in `<head>` besides scripts.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    /// Comma-separated, empty when the page has none.
    pub keywords: String,
    pub author: String,
    pub creator: String,
    pub publisher: String,
    pub canonical: String,
    /// `(hreflang, url)` pairs, including `x-default`.
    pub alternates: Vec<(&'static str, String)>,
    pub robots: String,
    pub googlebot: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub google_verification: Option<String>,
}

/// Resolve `image` against the site origin. Absolute URLs pass through.
pub fn absolute_url(origin: &str, image: Option<&str>) -> String {
    match image {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url.to_string(),
        Some(path) => format!("{origin}/{}", path.trim_start_matches('/')),
        None => format!("{origin}{DEFAULT_OG_IMAGE}"),
    }
}

/// Absolute, locale-prefixed URL for a logical path.
pub fn page_url(origin: &str, path: &str, locale: Locale) -> String {
    format!("{origin}{}", localized_path(path, locale))
}

pub fn generate_metadata(
    page: &PageMeta,
    locale: Locale,
    site: &SiteSettings,
    company: &CompanyConfig,
) -> Metadata {
    let origin = site.origin();
    let canonical = page_url(origin, &page.path, locale);
    let image = absolute_url(origin, page.image.as_deref());

    let mut alternates: Vec<(&'static str, String)> = Locale::ALL
        .iter()
        .map(|l| (l.hreflang(), page_url(origin, &page.path, *l)))
        .collect();
    alternates.push(("x-default", page_url(origin, &page.path, Locale::default())));

    let (robots, googlebot) = if page.noindex {
        ("noindex, follow".to_string(), "noindex, follow".to_string())
    } else {
        (
            "index, follow".to_string(),
            "index, follow, max-video-preview:-1, max-image-preview:large, max-snippet:-1"
                .to_string(),
        )
    };

    let alternate_locale = Locale::ALL
        .iter()
        .find(|l| **l != locale)
        .map(|l| l.og_locale())
        .unwrap_or_default();

    Metadata {
        title: page.title.clone(),
        description: page.description.clone(),
        keywords: page.keywords.join(", "),
        author: company.name.clone(),
        creator: company.name.clone(),
        publisher: company.name.clone(),
        canonical: canonical.clone(),
        alternates,
        robots,
        googlebot,
        open_graph: OpenGraph {
            title: page.title.clone(),
            description: page.description.clone(),
            url: canonical,
            site_name: format!("{} - {}", company.name, company.tagline),
            image: image.clone(),
            image_width: OG_IMAGE_WIDTH,
            image_height: OG_IMAGE_HEIGHT,
            image_alt: page.title.clone(),
            locale: locale.og_locale(),
            alternate_locale,
            kind: page.kind,
        },
        twitter: TwitterCard {
            card: "summary_large_image",
            title: page.title.clone(),
            description: page.description.clone(),
            image,
            creator: site.twitter_handle.clone(),
        },
        google_verification: site
            .google_site_verification
            .clone()
            .filter(|v| !v.trim().is_empty()),
    }
}

/// `<title>`, meta and link tags for `meta`.
pub fn head_tags(meta: &Metadata) -> Markup {
    let og = &meta.open_graph;
    let tw = &meta.twitter;
    html! {
        title { (meta.title) }
        meta name="description" content=(meta.description);
        @if !meta.keywords.is_empty() {
            meta name="keywords" content=(meta.keywords);
        }
        meta name="author" content=(meta.author);
        meta name="creator" content=(meta.creator);
        meta name="publisher" content=(meta.publisher);
        meta name="robots" content=(meta.robots);
        meta name="googlebot" content=(meta.googlebot);
        @if let Some(token) = &meta.google_verification {
            meta name="google-site-verification" content=(token);
        }
        link rel="canonical" href=(meta.canonical);
        @for (lang, url) in &meta.alternates {
            link rel="alternate" hreflang=(lang) href=(url);
        }

        meta property="og:title" content=(og.title);
        meta property="og:description" content=(og.description);
        meta property="og:url" content=(og.url);
        meta property="og:site_name" content=(og.site_name);
        meta property="og:image" content=(og.image);
        meta property="og:image:width" content=(og.image_width);
        meta property="og:image:height" content=(og.image_height);
        meta property="og:image:alt" content=(og.image_alt);
        meta property="og:locale" content=(og.locale);
        meta property="og:locale:alternate" content=(og.alternate_locale);
        meta property="og:type" content=(og.kind.as_str());

        meta name="twitter:card" content=(tw.card);
        meta name="twitter:title" content=(tw.title);
        meta name="twitter:description" content=(tw.description);
        meta name="twitter:image" content=(tw.image);
        meta name="twitter:creator" content=(tw.creator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str) -> PageMeta {
        PageMeta {
            title: "About Us - LAR Group B.V.".into(),
            description: "About".into(),
            keywords: vec!["seeds".into(), "grains".into()],
            path: path.into(),
            ..PageMeta::default()
        }
    }

    fn meta(page: &PageMeta, locale: Locale) -> Metadata {
        generate_metadata(page, locale, &SiteSettings::default(), &CompanyConfig::default())
    }

    #[test]
    fn canonical_and_alternates_are_locale_prefixed() {
        let m = meta(&page("/about"), Locale::Nl);
        assert_eq!(m.canonical, "https://largroup.nl/nl/about");
        assert_eq!(
            m.alternates,
            vec![
                ("en-US", "https://largroup.nl/en/about".to_string()),
                ("nl-NL", "https://largroup.nl/nl/about".to_string()),
                ("x-default", "https://largroup.nl/en/about".to_string()),
            ]
        );
        assert_eq!(m.open_graph.locale, "nl_NL");
        assert_eq!(m.open_graph.alternate_locale, "en_US");
    }

    #[test]
    fn home_has_no_trailing_slash() {
        let m = meta(&page(""), Locale::En);
        assert_eq!(m.canonical, "https://largroup.nl/en");
    }

    #[test]
    fn default_image_and_site_name() {
        let m = meta(&page("/about"), Locale::En);
        assert_eq!(m.open_graph.image, "https://largroup.nl/og-image.png");
        assert_eq!(m.twitter.image, m.open_graph.image);
        assert_eq!(m.open_graph.site_name, "LAR Group B.V. - Professional Seeds & Grains");
        assert_eq!((m.open_graph.image_width, m.open_graph.image_height), (1200, 630));
        assert_eq!(m.keywords, "seeds, grains");
        assert_eq!(m.twitter.creator, "@largroupbv");
        assert_eq!(m.publisher, "LAR Group B.V.");
    }

    #[test]
    fn absolute_images_pass_through() {
        assert_eq!(
            absolute_url("https://largroup.nl", Some("https://cdn.sanity.io/x.jpg")),
            "https://cdn.sanity.io/x.jpg"
        );
        assert_eq!(
            absolute_url("https://largroup.nl", Some("/static/a.png")),
            "https://largroup.nl/static/a.png"
        );
    }

    #[test]
    fn robots_directives() {
        let m = meta(&page("/about"), Locale::En);
        assert_eq!(m.robots, "index, follow");
        assert!(m.googlebot.contains("max-image-preview:large"));
        assert!(m.googlebot.contains("max-snippet:-1"));

        let hidden = PageMeta {
            noindex: true,
            ..page("/missing")
        };
        assert_eq!(meta(&hidden, Locale::En).robots, "noindex, follow");
    }

    #[test]
    fn verification_only_when_configured() {
        let site = SiteSettings {
            google_site_verification: Some("token123".into()),
            ..SiteSettings::default()
        };
        let m = generate_metadata(&page(""), Locale::En, &site, &CompanyConfig::default());
        let html = head_tags(&m).into_string();
        assert!(html.contains(r#"<meta name="google-site-verification" content="token123">"#));

        let plain = head_tags(&meta(&page(""), Locale::En)).into_string();
        assert!(!plain.contains("google-site-verification"));
    }

    #[test]
    fn head_tags_escape_content() {
        let p = PageMeta {
            title: "Seeds & Grains".into(),
            ..page("/about")
        };
        let html = head_tags(&meta(&p, Locale::En)).into_string();
        assert!(html.contains("<title>Seeds &amp; Grains</title>"), "{html}");
        assert!(html.contains(r#"hreflang="nl-NL" href="https://largroup.nl/nl/about""#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
    }
}

//! The closed set of logical pages.
//!
//! A [`Route`] is a locale-independent page address. The server parses the
//! remainder after the locale segment into a route; the static export and the
//! sitemap walk routes the other way via [`Route::path`].
//!
//! Slugs are CMS data and may hold any character except `/`. They are stored
//! decoded and percent-encoded whenever a path is built, so
//! `Route::parse(&route.path())` returns the same route for every valid slug.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped in a path segment: everything except RFC 3986
/// unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A logical page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Products,
    Product(String),
    Blog,
    BlogPost(String),
    Faq,
    Contact,
    Quote,
    Quality,
}

impl Route {
    /// Routes with no slug parameter, in navigation order.
    pub const STATIC: [Route; 8] = [
        Route::Home,
        Route::About,
        Route::Products,
        Route::Quality,
        Route::Blog,
        Route::Faq,
        Route::Contact,
        Route::Quote,
    ];

    /// Parse the path after the locale segment.
    ///
    /// Query strings and a single trailing slash are ignored. Slug segments
    /// are percent-decoded and must pass [`is_slug`].
    pub fn parse(rest: &str) -> Option<Route> {
        let path = rest.split('?').next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["about"] => Some(Route::About),
            ["products"] => Some(Route::Products),
            ["products", slug] => decode_slug(slug).map(Route::Product),
            ["blog"] => Some(Route::Blog),
            ["blog", slug] => decode_slug(slug).map(Route::BlogPost),
            ["faq"] => Some(Route::Faq),
            ["contact"] => Some(Route::Contact),
            ["quote"] => Some(Route::Quote),
            ["quality-and-certifications"] => Some(Route::Quality),
            _ => None,
        }
    }

    /// Decoded path segments, without locale. Home has none.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Route::Home => vec![],
            Route::About => vec!["about"],
            Route::Products => vec!["products"],
            Route::Product(slug) => vec!["products", slug],
            Route::Blog => vec!["blog"],
            Route::BlogPost(slug) => vec!["blog", slug],
            Route::Faq => vec!["faq"],
            Route::Contact => vec!["contact"],
            Route::Quote => vec!["quote"],
            Route::Quality => vec!["quality-and-certifications"],
        }
    }

    /// Logical path, without locale, with slugs percent-encoded. Home is the
    /// empty string.
    pub fn path(&self) -> String {
        self.segments()
            .into_iter()
            .map(|segment| format!("/{}", encode_segment(segment)))
            .collect()
    }

    /// The top-level navigation entry this route belongs under.
    pub fn section(&self) -> Route {
        match self {
            Route::Product(_) => Route::Products,
            Route::BlogPost(_) => Route::Blog,
            Route::Quote => Route::Contact,
            other => other.clone(),
        }
    }
}

/// Whether a decoded slug can name a page and a directory: non-empty, not
/// `.` or `..`, and free of separators and control characters.
pub fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && !s.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

/// Percent-encode one path segment or query value.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

fn decode_slug(raw: &str) -> Option<String> {
    let slug = percent_decode_str(raw).decode_utf8().ok()?;
    is_slug(&slug).then(|| slug.into_owned())
}

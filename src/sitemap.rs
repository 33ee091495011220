//! `sitemap.xml` and `robots.txt`.

use crate::locale::{Locale, localized_path};
use crate::routes::Route;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Pages listed in the sitemap, in order. The quote form is left out.
pub const SITEMAP_ROUTES: [Route; 7] = [
    Route::Home,
    Route::About,
    Route::Products,
    Route::Quality,
    Route::Blog,
    Route::Faq,
    Route::Contact,
];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// One entry per route and locale, route-major.
pub fn entries(origin: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let mut out = Vec::with_capacity(SITEMAP_ROUTES.len() * Locale::ALL.len());
    for route in &SITEMAP_ROUTES {
        let home = *route == Route::Home;
        for locale in Locale::ALL {
            out.push(SitemapEntry {
                url: format!("{origin}{}", localized_path(&route.path(), locale)),
                last_modified: now,
                change_frequency: if home { "weekly" } else { "monthly" },
                priority: if home { 1.0 } else { 0.8 },
            });
        }
    }
    out
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        // Writing to a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.url),
            entry.last_modified.format("%Y-%m-%dT%H:%M:%SZ"),
            entry.change_frequency,
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn robots_txt(origin: &str) -> String {
    format!("User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {origin}/sitemap.xml\n")
}

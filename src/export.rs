//! Static export: render every page to `dist/`.
//!
//! ```text
//! dist/
//! ├── index.html                     # redirect to /en
//! ├── 404.html                       # not-found page (default locale)
//! ├── sitemap.xml
//! ├── robots.txt
//! ├── static/
//! │   ├── style.css
//! │   └── placeholder-product.svg
//! ├── en/
//! │   ├── index.html
//! │   ├── about/index.html
//! │   ├── products/index.html
//! │   ├── products/flax-seeds/index.html
//! │   └── ...
//! └── nl/
//!     └── ...
//! ```
//!
//! Product and blog slugs come from the same content resolution as the
//! server, so a CMS outage exports the fallback catalog. Exported forms post
//! to the external form service when one is configured.

use crate::locale::{Locale, localized_path};
use crate::routes::{self, Route};
use crate::site::{PageRequest, STATIC_ASSETS, Site};
use chrono::Utc;
use maud::html;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no content for {0}")]
    MissingPage(String),
}

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedPage {
    pub locale: Locale,
    pub route: Route,
    /// Path relative to the output directory.
    pub file: PathBuf,
}

#[derive(Debug, Default)]
pub struct ExportSummary {
    pub pages: Vec<ExportedPage>,
    /// Sitemap, robots, redirects and static assets.
    pub extra_files: Vec<PathBuf>,
}

/// Every route to export in `locale`: the fixed pages plus one per product
/// and blog post. Slug routes that would not parse back to themselves are
/// skipped, so a slug can neither leave the output directory nor overwrite
/// a listing page.
pub async fn routes_for(site: &Site, locale: Locale) -> Vec<Route> {
    let products = site.content().products(locale).await.items;
    let posts = site.content().blog_posts(locale).await.items;

    let slug_routes = products
        .into_iter()
        .map(|p| Route::Product(p.slug))
        .chain(posts.into_iter().map(|p| Route::BlogPost(p.slug)))
        .filter(|route| {
            let round_trips = Route::parse(&route.path()).as_ref() == Some(route);
            if !round_trips {
                tracing::warn!(%locale, ?route, "skipping page with an unusable slug");
            }
            round_trips
        });

    Route::STATIC.into_iter().chain(slug_routes).collect()
}

/// File a page is written to, relative to the output directory. `None` when
/// a segment is empty, `.`, `..` or contains a separator.
pub fn page_file(locale: Locale, route: &Route) -> Option<PathBuf> {
    let mut file = PathBuf::from(locale.as_str());
    for segment in route.segments() {
        if !routes::is_slug(segment) {
            return None;
        }
        file.push(segment);
    }
    Some(file.join("index.html"))
}

fn write_file(output_dir: &Path, relative: &Path, content: &str) -> Result<(), ExportError> {
    let target = output_dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, content)?;
    Ok(())
}

fn redirect_page(target: &str) -> String {
    html! {
        (maud::DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                link rel="canonical" href=(target);
                title { "LAR Group B.V." }
            }
            body {
                a href=(target) { (target) }
            }
        }
    }
    .into_string()
}

/// Render the whole site into `output_dir`.
pub async fn export(site: &Site, output_dir: &Path) -> Result<ExportSummary, ExportError> {
    fs::create_dir_all(output_dir)?;
    let mut summary = ExportSummary::default();
    let request = PageRequest {
        static_export: true,
        ..PageRequest::default()
    };

    for locale in Locale::ALL {
        for route in routes_for(site, locale).await {
            let html = site
                .render(locale, &route, &request)
                .await
                .ok_or_else(|| ExportError::MissingPage(localized_path(&route.path(), locale)))?;
            let Some(file) = page_file(locale, &route) else {
                tracing::warn!(%locale, ?route, "no safe file name for page");
                continue;
            };
            write_file(output_dir, &file, &html)?;
            tracing::debug!(file = %file.display(), "page written");
            summary.pages.push(ExportedPage {
                locale,
                route,
                file,
            });
        }
    }

    let default_locale = Locale::default();
    let extras = [
        (
            PathBuf::from("index.html"),
            redirect_page(&localized_path("", default_locale)),
        ),
        (
            PathBuf::from("404.html"),
            site.render_not_found(default_locale, "/404").await,
        ),
        (PathBuf::from("sitemap.xml"), site.sitemap_xml(Utc::now())),
        (PathBuf::from("robots.txt"), site.robots_txt()),
    ];
    for (file, content) in extras {
        write_file(output_dir, &file, &content)?;
        summary.extra_files.push(file);
    }

    for asset in STATIC_ASSETS {
        if let Some((_, body)) = site.asset(asset.name) {
            let file = Path::new("static").join(asset.name);
            write_file(output_dir, &file, body)?;
            summary.extra_files.push(file);
        }
    }

    tracing::info!(
        pages = summary.pages.len(),
        files = summary.extra_files.len(),
        output = %output_dir.display(),
        "export complete"
    );
    Ok(summary)
}

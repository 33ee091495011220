//! schema.org JSON-LD documents.
//!
//! Each page embeds one or more of these in a
//! `<script type="application/ld+json">` block via [`script`]. Dates are
//! passed in explicitly so output is reproducible in tests and exports.

use crate::config::{CompanyConfig, SiteSettings};
use crate::i18n::messages;
use crate::locale::{Locale, localized_path};
use crate::seo::absolute_url;
use crate::types::FaqEntry;
use chrono::{DateTime, NaiveDate, Utc};
use maud::{Markup, PreEscaped, html};
use serde_json::{Value, json};

const CONTEXT: &str = "https://schema.org";

/// Shared inputs for every document on a page.
#[derive(Debug, Clone, Copy)]
pub struct Schema<'a> {
    pub site: &'a SiteSettings,
    pub company: &'a CompanyConfig,
    pub locale: Locale,
}

impl Schema<'_> {
    fn origin(&self) -> &str {
        self.site.origin()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin(), localized_path(path, self.locale))
    }

    fn organization_ref(&self) -> Value {
        json!({ "@type": "Organization", "name": self.company.name })
    }

    /// The company itself. `same_as` lists social profile URLs.
    pub fn organization(&self, same_as: &[String]) -> Value {
        let c = self.company;
        json!({
            "@context": CONTEXT,
            "@type": "Organization",
            "name": c.name,
            "alternateName": c.tagline,
            "description": messages(self.locale).seo.site_description,
            "url": self.origin(),
            "telephone": c.phone,
            "email": c.email,
            "foundingDate": c.founded.to_string(),
            "address": {
                "@type": "PostalAddress",
                "addressCountry": c.address_country,
                "addressLocality": c.address_locality,
            },
            "contactPoint": {
                "@type": "ContactPoint",
                "telephone": c.phone,
                "contactType": "customer service",
                "email": c.email,
                "availableLanguage": ["English", "Dutch"],
            },
            "sameAs": same_as,
            "logo": format!("{}/logo.png", self.origin()),
            "image": absolute_url(self.origin(), None),
        })
    }

    pub fn web_page(
        &self,
        title: &str,
        description: &str,
        path: &str,
        published: Option<NaiveDate>,
        modified: DateTime<Utc>,
    ) -> Value {
        let mut doc = json!({
            "@context": CONTEXT,
            "@type": "WebPage",
            "name": title,
            "description": description,
            "url": self.url(path),
            "inLanguage": self.locale.hreflang(),
            "isPartOf": {
                "@type": "WebSite",
                "name": self.company.name,
                "url": self.origin(),
            },
            "about": self.organization_ref(),
            "dateModified": modified.to_rfc3339(),
        });
        if let Some(date) = published {
            doc["datePublished"] = json!(date.to_string());
        }
        doc
    }

    /// A blog article. `modified` defaults to `now` when the post has no
    /// update timestamp.
    #[allow(clippy::too_many_arguments)]
    pub fn article(
        &self,
        title: &str,
        description: &str,
        path: &str,
        image: Option<&str>,
        published: Option<NaiveDate>,
        modified: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Value {
        let mut doc = json!({
            "@context": CONTEXT,
            "@type": "Article",
            "headline": title,
            "description": description,
            "url": self.url(path),
            "dateModified": modified.unwrap_or(now).to_rfc3339(),
            "author": self.organization_ref(),
            "publisher": {
                "@type": "Organization",
                "name": self.company.name,
                "logo": {
                    "@type": "ImageObject",
                    "url": format!("{}/logo.png", self.origin()),
                },
            },
            "image": absolute_url(self.origin(), image),
            "inLanguage": self.locale.hreflang(),
        });
        if let Some(date) = published {
            doc["datePublished"] = json!(date.to_string());
        }
        doc
    }

    pub fn product(&self, name: &str, description: &str, image: Option<&str>) -> Value {
        json!({
            "@context": CONTEXT,
            "@type": "Product",
            "name": name,
            "description": description,
            "image": absolute_url(self.origin(), image),
            "brand": { "@type": "Brand", "name": self.company.name },
            "manufacturer": self.organization_ref(),
            "category": "Agricultural Products",
        })
    }

    /// FAQ page with every question as a `mainEntity`.
    pub fn faq_page(&self, title: &str, description: &str, path: &str, faqs: &[FaqEntry]) -> Value {
        let questions: Vec<Value> = faqs
            .iter()
            .map(|f| {
                json!({
                    "@type": "Question",
                    "name": f.question,
                    "acceptedAnswer": { "@type": "Answer", "text": f.answer },
                })
            })
            .collect();
        json!({
            "@context": CONTEXT,
            "@type": "FAQPage",
            "name": title,
            "description": description,
            "url": self.url(path),
            "inLanguage": self.locale.hreflang(),
            "mainEntity": questions,
        })
    }
}

/// Serialize `doc` for embedding in a script element. `</` is escaped so the
/// content can never close the element early.
pub fn to_script_json(doc: &Value) -> String {
    doc.to_string().replace("</", "<\\/")
}

/// `<script type="application/ld+json">` for `doc`.
pub fn script(doc: &Value) -> Markup {
    html! {
        script type="application/ld+json" { (PreEscaped(to_script_json(doc))) }
    }
}

//! Document shell shared by every page: `<head>`, header navigation with the
//! language switcher, and footer.

use crate::analytics::{Analytics, Event};
use crate::config::phone_href;
use crate::i18n::{Messages, fill, messages};
use crate::locale::{Locale, localized_path, switch_locale};
use crate::routes::Route;
use crate::seo::{Metadata, head_tags};
use crate::structured_data;
use crate::types::{CompanyDetails, NavItem};
use maud::{DOCTYPE, Markup, html};
use serde_json::Value;

/// Routes listed in the header and footer navigation, in order.
pub const NAV_ROUTES: [Route; 7] = [
    Route::Home,
    Route::About,
    Route::Products,
    Route::Quality,
    Route::Blog,
    Route::Faq,
    Route::Contact,
];

/// Per-request inputs to the document shell.
pub struct Chrome<'a> {
    pub locale: Locale,
    /// The request path including the locale segment, used by the language
    /// switcher. Query strings are kept.
    pub current_path: &'a str,
    /// Navigation section to highlight. `None` on the not-found page.
    pub section: Option<Route>,
    pub company: &'a CompanyDetails,
    pub analytics: &'a Analytics,
    /// Stylesheet URL, fingerprinted.
    pub stylesheet: &'a str,
    pub year: i32,
}

/// Navigation title for a route.
pub fn route_title(m: &Messages, route: &Route) -> String {
    let nav = &m.nav;
    match route.section() {
        Route::Home => nav.home.clone(),
        Route::About => nav.about.clone(),
        Route::Products => nav.products.clone(),
        Route::Quality => nav.quality.clone(),
        Route::Blog => nav.blog.clone(),
        Route::Faq => nav.faq.clone(),
        Route::Contact => nav.contact.clone(),
        Route::Quote => nav.quote.clone(),
        // `section()` never returns a slug route.
        Route::Product(_) | Route::BlogPost(_) => nav.products.clone(),
    }
}

pub fn nav_items(locale: Locale, section: Option<&Route>) -> Vec<NavItem> {
    let m = messages(locale);
    NAV_ROUTES
        .iter()
        .map(|route| NavItem {
            title: route_title(m, route),
            path: localized_path(&route.path(), locale),
            current: section.is_some_and(|s| s.section() == *route),
        })
        .collect()
}

/// The complete HTML document.
pub fn document(
    chrome: &Chrome,
    meta: &Metadata,
    schemas: &[Value],
    events: &[Event],
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(chrome.locale.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (head_tags(meta))
                link rel="stylesheet" href=(chrome.stylesheet);
                @for schema in schemas {
                    (structured_data::script(schema))
                }
                (chrome.analytics.head())
            }
            body class=[body_class] {
                (chrome.analytics.body_start())
                (site_header(chrome))
                main.site-main {
                    (content)
                }
                (site_footer(chrome))
                (chrome.analytics.events(events))
            }
        }
    }
}

fn site_header(chrome: &Chrome) -> Markup {
    let m = messages(chrome.locale);
    let items = nav_items(chrome.locale, chrome.section.as_ref());
    html! {
        header.site-header {
            a.brand href=(localized_path("", chrome.locale)) {
                span.brand-mark { "L" }
                span.brand-text {
                    span.brand-name { (chrome.company.name) }
                    span.brand-tagline { (chrome.company.tagline) }
                }
            }
            nav.site-nav aria-label=(m.nav.menu) {
                (render_nav(&items, &m.nav.menu))
            }
            div.header-contact {
                a href=(phone_href(&chrome.company.phone)) { (chrome.company.phone) }
                a href={ "mailto:" (chrome.company.email) } { (chrome.company.email) }
            }
            (language_switcher(chrome.locale, chrome.current_path, &m.nav.language))
        }
    }
}

/// Navigation menu; collapses behind a checkbox toggle on narrow screens.
pub fn render_nav(items: &[NavItem], menu_label: &str) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" aria-label=(menu_label) {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        div.nav-panel {
            label.nav-close for="nav-toggle" { "×" }
            ul {
                @for item in items {
                    li class=[item.current.then_some("current")] {
                        a href=(item.path) aria-current=[item.current.then_some("page")] {
                            (item.title)
                        }
                    }
                }
            }
        }
    }
}

/// Links to the current page in every locale.
pub fn language_switcher(current: Locale, current_path: &str, label: &str) -> Markup {
    html! {
        div.language-switcher role="group" aria-label=(label) {
            @for locale in Locale::ALL {
                @let active = locale == current;
                a class=[active.then_some("active")]
                    href=(switch_locale(current_path, locale))
                    hreflang=(locale.as_str())
                    lang=(locale.as_str())
                    title=(locale.native_name()) {
                    (locale.as_str().to_uppercase())
                }
            }
        }
    }
}

fn site_footer(chrome: &Chrome) -> Markup {
    let m = messages(chrome.locale);
    let company = chrome.company;
    let items = nav_items(chrome.locale, None);
    html! {
        footer.site-footer {
            div.footer-grid {
                div.footer-company {
                    div.brand {
                        span.brand-mark { "L" }
                        span.brand-text {
                            span.brand-name { (company.name) }
                            span.brand-tagline { (company.tagline) }
                        }
                    }
                    p { (company.description) }
                    h4 { (m.nav.quality) }
                    div.cert-badges {
                        span.badge.badge-accent { "IFS Broker" }
                        span.badge { "ISO 22000" }
                    }
                }
                div.footer-links {
                    h3 { (m.footer.quick_links) }
                    ul {
                        @for item in &items {
                            li { a href=(item.path) { (item.title) } }
                        }
                    }
                }
                div.footer-contact {
                    h3 { (m.footer.contact_title) }
                    address {
                        div { (company.address) }
                        div { a href=(phone_href(&company.phone)) { (company.phone) } }
                        div { a href={ "mailto:" (company.email) } { (company.email) } }
                    }
                    h4 { (m.footer.hours_title) }
                    div.hours {
                        div { (company.hours_weekdays) }
                        div { (company.hours_weekend) }
                    }
                    @if !company.social.is_empty() {
                        ul.social {
                            @for (network, url) in &company.social {
                                li { a href=(url) target="_blank" rel="noopener noreferrer" { (network) } }
                            }
                        }
                    }
                }
            }
            div.footer-bottom {
                p { (fill(&m.footer.copyright, &[("year", &chrome.year.to_string())])) }
            }
        }
    }
}

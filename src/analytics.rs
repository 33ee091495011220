//! Google Analytics 4 and Google Tag Manager tags, plus the conversion events
//! pages emit.
//!
//! Nothing is rendered for a tag whose id is not configured. Event scripts
//! call `gtag` and push to `dataLayer` only when those globals exist, so they
//! are safe to include unconditionally once a tag is configured.

use crate::config::AnalyticsConfig;
use crate::structured_data::to_script_json;
use maud::{Markup, PreEscaped, html};
use serde_json::{Value, json};

pub const CURRENCY: &str = "EUR";

/// Configured tag ids, blanks removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analytics {
    ga_id: Option<String>,
    gtm_id: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Analytics {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            ga_id: non_blank(&config.ga_measurement_id),
            gtm_id: non_blank(&config.gtm_id),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.ga_id.is_some() || self.gtm_id.is_some()
    }

    /// Loader scripts for `<head>`.
    pub fn head(&self) -> Markup {
        html! {
            @if let Some(id) = &self.gtm_id {
                script { (PreEscaped(gtm_snippet(id))) }
            }
            @if let Some(id) = &self.ga_id {
                script async src=(format!("https://www.googletagmanager.com/gtag/js?id={id}")) {}
                script { (PreEscaped(gtag_config(id))) }
            }
        }
    }

    /// GTM fallback for browsers without JavaScript; first thing in `<body>`.
    pub fn body_start(&self) -> Markup {
        html! {
            @if let Some(id) = &self.gtm_id {
                noscript {
                    iframe src=(format!("https://www.googletagmanager.com/ns.html?id={id}"))
                        height="0" width="0" style="display:none;visibility:hidden" {}
                }
            }
        }
    }

    /// Script that fires `events` once the page loads. Empty when analytics
    /// is off or there are no events.
    pub fn events(&self, events: &[Event]) -> Markup {
        if !self.is_enabled() || events.is_empty() {
            return html! {};
        }
        let mut js = String::new();
        for event in events {
            js.push_str(&event.to_js());
        }
        html! { script { (PreEscaped(js)) } }
    }
}

fn js_string(value: &str) -> String {
    to_script_json(&Value::String(value.to_string()))
}

fn gtm_snippet(id: &str) -> String {
    format!(
        "(function(w,d,s,l,i){{w[l]=w[l]||[];w[l].push({{'gtm.start':\
         new Date().getTime(),event:'gtm.js'}});var f=d.getElementsByTagName(s)[0],\
         j=d.createElement(s),dl=l!='dataLayer'?'&l='+l:'';j.async=true;j.src=\
         'https://www.googletagmanager.com/gtm.js?id='+i+dl;f.parentNode.insertBefore(j,f);\
         }})(window,document,'script','dataLayer',{});",
        js_string(id)
    )
}

fn gtag_config(id: &str) -> String {
    format!(
        "window.dataLayer=window.dataLayer||[];\
         function gtag(){{dataLayer.push(arguments);}}\
         gtag('js',new Date());\
         gtag('config',{},{{page_title:document.title,page_location:window.location.href}});",
        js_string(id)
    )
}

/// `item_id` for a product name: lowercased, whitespace runs replaced by `-`.
pub fn item_id(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// A conversion or engagement event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    QuoteRequest { product: String, company: String },
    ContactForm { subject: String, company: String },
    ViewItem { name: String, category: String, price: Option<f64> },
}

impl Event {
    /// The `gtag('event', ...)` name and parameters.
    pub fn gtag(&self) -> (&'static str, Value) {
        match self {
            Event::QuoteRequest { product, company } => (
                "quote_request",
                json!({
                    "event_category": "engagement",
                    "event_label": format!("{product} - {company}"),
                }),
            ),
            Event::ContactForm { subject, company } => (
                "contact_form",
                json!({
                    "event_category": "engagement",
                    "event_label": format!("{subject} - {company}"),
                }),
            ),
            Event::ViewItem { name, category, price } => (
                "view_item",
                json!({
                    "currency": CURRENCY,
                    "value": price.unwrap_or(0.0),
                    "items": [{
                        "item_id": item_id(name),
                        "item_name": name,
                        "item_category": category,
                        "quantity": 1,
                    }],
                }),
            ),
        }
    }

    /// The object pushed to `dataLayer`.
    pub fn data_layer(&self) -> Value {
        match self {
            Event::QuoteRequest { product, company } => json!({
                "event": "quote_request",
                "product_name": product,
                "company_name": company,
                "event_category": "engagement",
                "value": 0,
            }),
            Event::ContactForm { subject, company } => json!({
                "event": "contact_form_submit",
                "form_subject": subject,
                "company_name": company,
                "event_category": "engagement",
            }),
            Event::ViewItem { name, category, price } => json!({
                "event": "view_item",
                "currency": CURRENCY,
                "value": price.unwrap_or(0.0),
                "items": [{
                    "item_id": item_id(name),
                    "item_name": name,
                    "item_category": category,
                    "price": price.unwrap_or(0.0),
                    "quantity": 1,
                }],
            }),
        }
    }

    fn to_js(&self) -> String {
        let (name, params) = self.gtag();
        format!(
            "if(window.gtag){{gtag('event',{},{});}}\
             if(window.dataLayer){{dataLayer.push({});}}",
            js_string(name),
            to_script_json(&params),
            to_script_json(&self.data_layer()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> Analytics {
        Analytics::new(&AnalyticsConfig {
            ga_measurement_id: Some("G-TEST123".into()),
            gtm_id: Some("GTM-ABC".into()),
        })
    }

    #[test]
    fn nothing_without_ids() {
        let a = Analytics::new(&AnalyticsConfig {
            ga_measurement_id: Some("  ".into()),
            gtm_id: None,
        });
        assert!(!a.is_enabled());
        assert_eq!(a.head().into_string(), "");
        assert_eq!(a.body_start().into_string(), "");
        let event = Event::ContactForm {
            subject: "x".into(),
            company: "y".into(),
        };
        assert_eq!(a.events(&[event]).into_string(), "");
    }

    #[test]
    fn loaders_when_configured() {
        let a = enabled();
        let head = a.head().into_string();
        assert!(head.contains("https://www.googletagmanager.com/gtag/js?id=G-TEST123"));
        assert!(head.contains("gtag('config',\"G-TEST123\""));
        assert!(head.contains("'dataLayer',\"GTM-ABC\""));
        let body = a.body_start().into_string();
        assert!(body.contains("ns.html?id=GTM-ABC"));
        assert!(body.starts_with("<noscript>"));
    }

    #[test]
    fn item_id_collapses_whitespace() {
        assert_eq!(item_id("Premium  Wheat\tSeeds"), "premium-wheat-seeds");
    }

    #[test]
    fn quote_event_payloads() {
        let event = Event::QuoteRequest {
            product: "Flax Seeds".into(),
            company: "Acme".into(),
        };
        let (name, params) = event.gtag();
        assert_eq!(name, "quote_request");
        assert_eq!(params["event_label"], "Flax Seeds - Acme");
        let dl = event.data_layer();
        assert_eq!(dl["event"], "quote_request");
        assert_eq!(dl["product_name"], "Flax Seeds");
        assert_eq!(dl["value"], 0);
    }

    #[test]
    fn contact_event_names_differ_per_channel() {
        let event = Event::ContactForm {
            subject: "General Inquiry".into(),
            company: "Acme".into(),
        };
        assert_eq!(event.gtag().0, "contact_form");
        assert_eq!(event.data_layer()["event"], "contact_form_submit");
        assert_eq!(event.data_layer()["form_subject"], "General Inquiry");
    }

    #[test]
    fn view_item_in_euros() {
        let event = Event::ViewItem {
            name: "Organic Barley".into(),
            category: "Organic".into(),
            price: None,
        };
        let (_, params) = event.gtag();
        assert_eq!(params["currency"], "EUR");
        assert_eq!(params["items"][0]["item_id"], "organic-barley");
        assert_eq!(event.data_layer()["items"][0]["price"], 0.0);
    }

    #[test]
    fn event_script_escapes_user_text() {
        let event = Event::ContactForm {
            subject: "</script><b>".into(),
            company: "Acme".into(),
        };
        let html = enabled().events(&[event]).into_string();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("contact_form_submit"));
    }
}

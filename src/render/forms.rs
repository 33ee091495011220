//! Contact and quote form markup.
//!
//! Forms post back to their own page. Browser-side validation comes from the
//! `required` attributes; the server validates again and re-renders with a
//! status banner.

use crate::analytics::Event;
use crate::forms::{ContactSubmission, QuoteSubmission, SubmitStatus};
use crate::i18n::{Messages, fill, messages};
use crate::locale::Locale;
use maud::{Markup, html};

/// What a form page shows: the values to pre-fill plus the outcome of the
/// last submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormView<T> {
    pub values: T,
    pub status: SubmitStatus,
    /// Wire names of fields that failed validation.
    pub missing: Vec<&'static str>,
    pub quote_number: Option<String>,
    /// Analytics event fired by the rendered page.
    pub event: Option<Event>,
}

impl<T: Default> FormView<T> {
    pub fn with_values(values: T) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// A successful submission clears the form.
    pub fn success(event: Event, quote_number: Option<String>) -> Self {
        Self {
            status: SubmitStatus::Success,
            quote_number,
            event: Some(event),
            ..Self::default()
        }
    }

    /// Failed relay; entered values are kept for a manual retry.
    pub fn failed(values: T) -> Self {
        Self {
            values,
            status: SubmitStatus::Error,
            ..Self::default()
        }
    }

    pub fn invalid(values: T, missing: Vec<&'static str>) -> Self {
        Self {
            values,
            status: SubmitStatus::Error,
            missing,
            ..Self::default()
        }
    }
}

/// Localized label for a field's wire name.
fn field_label<'a>(m: &'a Messages, wire_name: &str) -> &'a str {
    match wire_name {
        "firstName" => &m.contact.first_name,
        "lastName" => &m.contact.last_name,
        "email" => &m.contact.email,
        "company" => &m.contact.company,
        "message" => &m.contact.message,
        "companyName" => &m.quote.company_name,
        "contactName" => &m.quote.contact_name,
        "productName" => &m.quote.product,
        "quantity" => &m.quote.quantity,
        _ => "",
    }
}

fn missing_message(m: &Messages, template: &str, missing: &[&str]) -> String {
    let labels: Vec<&str> = missing.iter().map(|f| field_label(m, f)).collect();
    fill(template, &[("fields", &labels.join(", "))])
}

fn banner(class: &str, text: &str) -> Markup {
    html! {
        div class={ "form-banner " (class) } role=(if class == "error" { "alert" } else { "status" }) {
            p { (text) }
        }
    }
}

fn text_input(
    name: &str,
    label: &str,
    kind: &str,
    value: &str,
    required: bool,
    placeholder: Option<&str>,
    invalid: bool,
) -> Markup {
    html! {
        div.field.invalid[invalid] {
            label for=(name) {
                (label)
                @if required { " *" }
            }
            input id=(name) name=(name) type=(kind) value=(value)
                placeholder=[placeholder] required[required]
                aria-invalid=[invalid.then_some("true")];
        }
    }
}

fn text_area(name: &str, label: &str, value: &str, required: bool, placeholder: Option<&str>, invalid: bool) -> Markup {
    html! {
        div.field.invalid[invalid] {
            label for=(name) {
                (label)
                @if required { " *" }
            }
            textarea id=(name) name=(name) rows="5" placeholder=[placeholder] required[required]
                aria-invalid=[invalid.then_some("true")] { (value) }
        }
    }
}

fn select(name: &str, label: &str, current: &str, options: &[(&str, &str)]) -> Markup {
    html! {
        div.field {
            label for=(name) { (label) }
            select id=(name) name=(name) {
                @for (value, text) in options {
                    option value=(value) selected[*value == current] { (text) }
                }
            }
        }
    }
}

pub fn contact_form(locale: Locale, view: &FormView<ContactSubmission>, action: &str) -> Markup {
    let m = messages(locale);
    let c = &m.contact;
    let v = &view.values;
    let bad = |name: &str| view.missing.iter().any(|f| *f == name);
    html! {
        form.lead-form.contact-form method="post" action=(action) {
            @if view.status == SubmitStatus::Success {
                (banner("success", &c.success))
            } @else if view.status == SubmitStatus::Error && view.missing.is_empty() {
                (banner("error", &c.error))
            } @else if view.status == SubmitStatus::Error {
                (banner("error", &missing_message(m, &c.missing, &view.missing)))
            }
            div.field-row {
                (text_input("firstName", &c.first_name, "text", &v.first_name, true, None, bad("firstName")))
                (text_input("lastName", &c.last_name, "text", &v.last_name, true, None, bad("lastName")))
            }
            div.field-row {
                (text_input("email", &c.email, "email", &v.email, true, None, bad("email")))
                (text_input("company", &c.company, "text", &v.company, true, None, bad("company")))
            }
            div.field-row {
                (text_input("phone", &c.phone, "tel", &v.phone, false, None, false))
                (select("interests", &c.interests, &v.interests, &[
                    ("", c.interest_other.as_str()),
                    ("products", c.interest_products.as_str()),
                    ("services", c.interest_services.as_str()),
                    ("partnership", c.interest_partnership.as_str()),
                    ("support", c.interest_support.as_str()),
                ]))
            }
            (text_input("subject", &c.subject, "text", &v.subject, false, None, false))
            (text_area("message", &c.message, &v.message, true, None, bad("message")))
            div.field.checkbox {
                input id="consent" name="consent" type="checkbox" value="on" checked[v.consent] required;
                label for="consent" { (c.consent) " *" }
            }
            p.hint { (m.common.required_hint) }
            button.button.primary type="submit" { (c.submit) }
        }
    }
}

pub fn quote_form(locale: Locale, view: &FormView<QuoteSubmission>, action: &str) -> Markup {
    let m = messages(locale);
    let q = &m.quote;
    let v = &view.values;
    let bad = |name: &str| view.missing.iter().any(|f| *f == name);
    html! {
        @if view.status == SubmitStatus::Success {
            div.form-banner.success role="status" {
                h2 { (q.success_title) }
                p { (q.success_text) }
                @if let Some(number) = &view.quote_number {
                    p.quote-number { strong { (number) } }
                }
            }
        }
        form.lead-form.quote-form method="post" action=(action) {
            @if view.status == SubmitStatus::Error {
                @if view.missing.is_empty() {
                    (banner("error", &q.error))
                } @else {
                    (banner("error", &missing_message(m, &q.missing, &view.missing)))
                }
            }
            input type="hidden" name="locale" value=(locale.as_str());
            div.field-row {
                (text_input("companyName", &q.company_name, "text", &v.company_name, true, None, bad("companyName")))
                (text_input("contactName", &q.contact_name, "text", &v.contact_name, true, None, bad("contactName")))
            }
            div.field-row {
                (text_input("email", &q.email, "email", &v.email, true, None, bad("email")))
                (text_input("phone", &q.phone, "tel", &v.phone, false, None, false))
            }
            div.field-row {
                (text_input("productName", &q.product, "text", &v.product_name, true, Some(q.product_placeholder.as_str()), bad("productName")))
                (text_input("quantity", &q.quantity, "text", &v.quantity, true, Some(q.quantity_placeholder.as_str()), bad("quantity")))
            }
            (select("usage", &q.usage, &v.usage, &[
                ("", q.usage_select.as_str()),
                ("agriculture", q.usage_agriculture.as_str()),
                ("food-production", q.usage_food_production.as_str()),
                ("feed", q.usage_feed.as_str()),
                ("processing", q.usage_processing.as_str()),
                ("export", q.usage_export.as_str()),
                ("other", q.usage_other.as_str()),
            ]))
            (text_area("specifications", &q.specifications, &v.specifications, false, Some(q.specifications_placeholder.as_str()), false))
            div.field-row {
                (text_input("deliveryLocation", &q.delivery_location, "text", &v.delivery_location, false, Some(q.delivery_location_placeholder.as_str()), false))
                (text_input("preferredDelivery", &q.preferred_delivery, "text", &v.preferred_delivery, false, Some(q.preferred_delivery_placeholder.as_str()), false))
            }
            (text_area("additionalInfo", &q.additional_info, &v.additional_info, false, Some(q.additional_info_placeholder.as_str()), false))
            div.field.checkbox {
                input id="privacy" name="privacy" type="checkbox" value="on" required;
                label for="privacy" { (q.privacy) " *" }
            }
            p.hint { (m.common.required_hint) }
            button.button.primary type="submit" { (q.submit) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_contact_form_has_required_fields() {
        let html = contact_form(Locale::En, &FormView::default(), "/en/contact").into_string();
        assert!(html.contains(r#"action="/en/contact""#));
        for name in ["firstName", "lastName", "email", "company", "message"] {
            assert!(html.contains(&format!(r#"name="{name}""#)), "{name}");
        }
        assert!(!html.contains("form-banner"));
        assert!(html.contains("required"));
    }

    #[test]
    fn invalid_submission_names_missing_fields() {
        let values = ContactSubmission {
            first_name: "Jan".into(),
            ..ContactSubmission::default()
        };
        let view = FormView::invalid(values, vec!["lastName", "message"]);
        let html = contact_form(Locale::Nl, &view, "/nl/contact").into_string();
        assert!(html.contains("form-banner error"));
        assert!(html.contains(r#"value="Jan""#));
        let m = messages(Locale::Nl);
        assert!(html.contains(&m.contact.last_name));
        assert!(html.contains(r#"aria-invalid="true""#));
    }

    #[test]
    fn success_clears_values() {
        let event = Event::ContactForm {
            subject: "General Inquiry".into(),
            company: "Akker BV".into(),
        };
        let view: FormView<ContactSubmission> = FormView::success(event, None);
        assert_eq!(view.values, ContactSubmission::default());
        let html = contact_form(Locale::En, &view, "/en/contact").into_string();
        assert!(html.contains(&messages(Locale::En).contact.success));
    }

    #[test]
    fn failed_relay_keeps_values() {
        let values = QuoteSubmission {
            product_name: "Rye Seeds".into(),
            ..QuoteSubmission::default()
        };
        let html = quote_form(Locale::En, &FormView::failed(values), "/en/quote").into_string();
        assert!(html.contains(r#"value="Rye Seeds""#));
        assert!(html.contains(&messages(Locale::En).quote.error));
    }

    #[test]
    fn quote_success_shows_number() {
        let event = Event::QuoteRequest {
            product: "Rye Seeds".into(),
            company: "Akker BV".into(),
        };
        let view: FormView<QuoteSubmission> = FormView::success(event, Some("QR-1".into()));
        let html = quote_form(Locale::En, &view, "/en/quote").into_string();
        assert!(html.contains("QR-1"));
        assert!(html.contains(r#"name="locale" value="en""#));
    }

    #[test]
    fn usage_option_is_selected() {
        let values = QuoteSubmission {
            usage: "feed".into(),
            ..QuoteSubmission::default()
        };
        let html = quote_form(Locale::En, &FormView::with_values(values), "/en/quote").into_string();
        assert!(html.contains(r#"<option value="feed" selected>"#));
    }
}

//! Lead forms: contact and quote submissions.
//!
//! A submission arrives either as JSON (`/api/contact`, `/api/quote`) or as a
//! URL-encoded HTML form post (`/{locale}/contact`, `/{locale}/quote`). Both
//! decode into the same structs; field decoding is lenient (numbers, booleans
//! and arrays become strings) and validation only checks that required fields
//! are present and not blank.
//!
//! A valid submission is either relayed to the external form service, when a
//! URL is configured for that form, or acknowledged locally: logged with
//! `tracing` and answered. Nothing is persisted.
//!
//! ## Form-service field mapping
//!
//! | Contact | Quote |
//! |---------|-------|
//! | `Name_First` ← firstName | `SingleLine` ← companyName |
//! | `Name_Last` ← lastName | `Name_First`/`Name_Last` ← contactName split at the first space |
//! | `Email` ← email | `Email` ← email |
//! | `SingleLine` ← company | `PhoneNumber_countrycode` ← phone |
//! | `PhoneNumber_countrycode` ← phone | `SingleLine1` ← productName |
//! | `Dropdown` ← subject | `Number` ← quantity, `Dropdown` ← usage |
//! | `MultiLine` ← message | `MultiLine` ← specifications, `SingleLine2` ← deliveryLocation |
//! | `MultiSelect` ← interests | `Date` ← preferredDelivery, `MultiLine1` ← additionalInfo, `Hidden` ← locale |

use crate::config::FormsConfig;
use chrono::{DateTime, Utc};
use reqwest::multipart::Form;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Subject used in analytics when the visitor picked none.
pub const DEFAULT_SUBJECT: &str = "General Inquiry";

#[derive(Error, Debug)]
pub enum FormError {
    #[error("missing required fields: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("form service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("form service returned HTTP {0}")]
    Status(u16),
}

/// Outcome shown on a form page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

// ============================================================================
// Lenient field decoding
// ============================================================================

struct LenientString;

impl<'de> Visitor<'de> for LenientString {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean, list or object")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
        d.deserialize_any(LenientString)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<String, A::Error> {
        let mut parts = Vec::new();
        while let Some(part) = seq.next_element::<LenientField>()? {
            if !part.0.is_empty() {
                parts.push(part.0);
            }
        }
        Ok(parts.join(", "))
    }

    /// Objects are kept as their JSON text, so a field holding one counts as
    /// present.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        let mut object = serde_json::Map::new();
        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            object.insert(key, value);
        }
        Ok(serde_json::Value::Object(object).to_string())
    }
}

struct LenientField(String);

impl<'de> Deserialize<'de> for LenientField {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(LenientString).map(LenientField)
    }
}

fn lenient<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    d.deserialize_any(LenientString)
}

/// `true`, `"true"`, `"on"`, `"yes"` and `"1"` are true; anything else false.
fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = lenient(d)?;
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "yes" | "1"
    ))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ============================================================================
// Submissions
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(deserialize_with = "lenient")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient")]
    pub email: String,
    #[serde(deserialize_with = "lenient")]
    pub company: String,
    #[serde(deserialize_with = "lenient")]
    pub phone: String,
    #[serde(deserialize_with = "lenient")]
    pub subject: String,
    #[serde(deserialize_with = "lenient")]
    pub message: String,
    #[serde(deserialize_with = "lenient")]
    pub interests: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub consent: bool,
}

impl ContactSubmission {
    /// Wire names of required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("company", &self.company),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }

    /// Subject for analytics and logs.
    pub fn subject_or_default(&self) -> &str {
        if is_blank(&self.subject) {
            DEFAULT_SUBJECT
        } else {
            self.subject.trim()
        }
    }

    fn multipart(&self) -> Form {
        Form::new()
            .text("Name_First", self.first_name.clone())
            .text("Name_Last", self.last_name.clone())
            .text("Email", self.email.clone())
            .text("SingleLine", self.company.clone())
            .text("PhoneNumber_countrycode", self.phone.clone())
            .text("Dropdown", self.subject.clone())
            .text("MultiLine", self.message.clone())
            .text("MultiSelect", self.interests.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteSubmission {
    #[serde(deserialize_with = "lenient")]
    pub company_name: String,
    #[serde(deserialize_with = "lenient")]
    pub contact_name: String,
    #[serde(deserialize_with = "lenient")]
    pub email: String,
    #[serde(deserialize_with = "lenient")]
    pub phone: String,
    #[serde(deserialize_with = "lenient")]
    pub product_name: String,
    #[serde(deserialize_with = "lenient")]
    pub quantity: String,
    #[serde(deserialize_with = "lenient")]
    pub usage: String,
    #[serde(deserialize_with = "lenient")]
    pub specifications: String,
    #[serde(deserialize_with = "lenient")]
    pub delivery_location: String,
    #[serde(deserialize_with = "lenient")]
    pub preferred_delivery: String,
    #[serde(deserialize_with = "lenient")]
    pub additional_info: String,
    #[serde(deserialize_with = "lenient")]
    pub locale: String,
}

impl QuoteSubmission {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("companyName", &self.company_name),
            ("contactName", &self.contact_name),
            ("email", &self.email),
            ("productName", &self.product_name),
            ("quantity", &self.quantity),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }

    /// Contact name as (first, rest). A single word has an empty last name.
    pub fn split_contact_name(&self) -> (String, String) {
        let mut words = self.contact_name.split_whitespace();
        let first = words.next().unwrap_or_default().to_string();
        let last = words.collect::<Vec<_>>().join(" ");
        (first, last)
    }

    fn multipart(&self) -> Form {
        let (first, last) = self.split_contact_name();
        Form::new()
            .text("SingleLine", self.company_name.clone())
            .text("Name_First", first)
            .text("Name_Last", last)
            .text("Email", self.email.clone())
            .text("PhoneNumber_countrycode", self.phone.clone())
            .text("SingleLine1", self.product_name.clone())
            .text("Number", self.quantity.clone())
            .text("Dropdown", self.usage.clone())
            .text("MultiLine", self.specifications.clone())
            .text("SingleLine2", self.delivery_location.clone())
            .text("Date", self.preferred_delivery.clone())
            .text("MultiLine1", self.additional_info.clone())
            .text("Hidden", self.locale.clone())
    }
}

// ============================================================================
// Local acknowledgement
// ============================================================================

/// Reference handed back for a quote request.
pub fn quote_number(now: DateTime<Utc>) -> String {
    format!("QR-{}", now.timestamp_millis())
}

/// Log a contact submission.
pub fn acknowledge_contact(submission: &ContactSubmission, now: DateTime<Utc>) {
    tracing::info!(
        name = %format!("{} {}", submission.first_name.trim(), submission.last_name.trim()),
        email = %submission.email,
        company = %submission.company,
        phone = %submission.phone,
        subject = %submission.subject,
        message = %submission.message,
        interests = %submission.interests,
        timestamp = %now.to_rfc3339(),
        "contact form submission"
    );
}

/// Log a quote request and return its quote number.
pub fn acknowledge_quote(submission: &QuoteSubmission, now: DateTime<Utc>) -> String {
    let number = quote_number(now);
    tracing::info!(
        quote_number = %number,
        company_name = %submission.company_name,
        contact_name = %submission.contact_name,
        email = %submission.email,
        phone = %submission.phone,
        product_name = %submission.product_name,
        quantity = %submission.quantity,
        usage = %submission.usage,
        specifications = %submission.specifications,
        delivery_location = %submission.delivery_location,
        preferred_delivery = %submission.preferred_delivery,
        additional_info = %submission.additional_info,
        locale = %submission.locale,
        timestamp = %now.to_rfc3339(),
        "quote request submission"
    );
    number
}

// ============================================================================
// Relay
// ============================================================================

/// How a valid submission was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    /// Accepted by the external form service.
    Relayed,
    /// Logged locally; quote requests carry a quote number.
    Acknowledged { quote_number: Option<String> },
}

/// Sends submissions to the external form service, or acknowledges them
/// locally when no URL is configured for that form.
#[derive(Debug, Clone)]
pub struct FormRelay {
    http: reqwest::Client,
    contact_url: Option<String>,
    quote_url: Option<String>,
}

fn configured(url: &Option<String>) -> Option<String> {
    url.as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
}

impl FormRelay {
    pub fn new(config: &FormsConfig) -> Result<Self, FormError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("lar-site/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            contact_url: configured(&config.contact_url),
            quote_url: configured(&config.quote_url),
        })
    }

    /// Whether contact submissions leave this server.
    pub fn relays_contact(&self) -> bool {
        self.contact_url.is_some()
    }

    pub fn relays_quote(&self) -> bool {
        self.quote_url.is_some()
    }

    /// Form-service URL for contact posts, used by exported static pages.
    pub fn contact_url(&self) -> Option<&str> {
        self.contact_url.as_deref()
    }

    pub fn quote_url(&self) -> Option<&str> {
        self.quote_url.as_deref()
    }

    async fn post(&self, url: &str, form: Form) -> Result<(), FormError> {
        let response = self.http.post(url).multipart(form).send().await?;
        let status = response.status();
        // Form services answer a successful post with a redirect to a
        // thank-you page, which the client follows.
        if status.is_success() {
            Ok(())
        } else {
            Err(FormError::Status(status.as_u16()))
        }
    }

    pub async fn submit_contact(
        &self,
        submission: &ContactSubmission,
        now: DateTime<Utc>,
    ) -> Result<Receipt, FormError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::Missing(missing));
        }
        match &self.contact_url {
            Some(url) => {
                self.post(url, submission.multipart()).await?;
                tracing::info!(company = %submission.company, "contact form relayed");
                Ok(Receipt::Relayed)
            }
            None => {
                acknowledge_contact(submission, now);
                Ok(Receipt::Acknowledged { quote_number: None })
            }
        }
    }

    pub async fn submit_quote(
        &self,
        submission: &QuoteSubmission,
        now: DateTime<Utc>,
    ) -> Result<Receipt, FormError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::Missing(missing));
        }
        match &self.quote_url {
            Some(url) => {
                self.post(url, submission.multipart()).await?;
                tracing::info!(company = %submission.company_name, "quote request relayed");
                Ok(Receipt::Relayed)
            }
            None => Ok(Receipt::Acknowledged {
                quote_number: Some(acknowledge_quote(submission, now)),
            }),
        }
    }
}

//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Configuration is
//! layered: stock defaults are overridden by the user's `config.toml`, which
//! is in turn overridden by environment variables.
//!
//! ```text
//! stock defaults  →  config.toml  →  environment  →  SiteConfig::validate()
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! base_url = "https://largroup.nl"   # Absolute origin used in canonical URLs
//! twitter_handle = "@largroupbv"
//! # google_site_verification = "..."
//!
//! [company]
//! name = "LAR Group B.V."
//! phone = "+31 6 17144921"
//! email = "alex.trade@largseeds.nl"
//!
//! [cms]
//! # project_id = "abc123"           # Omit to render from fallback data only
//! dataset = "production"
//! api_version = "2024-01-01"
//! use_cdn = false
//! timeout_secs = 10
//!
//! [forms]
//! # contact_url = "https://forms.example.com/contact"
//! # quote_url = "https://forms.example.com/quote"
//! timeout_secs = 15
//!
//! [analytics]
//! # ga_measurement_id = "G-XXXXXXX"
//! # gtm_id = "GTM-XXXXXX"
//!
//! [theme]
//! primary = "#1e3a8a"
//!
//! [server]
//! bind = "127.0.0.1:3000"
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Key |
//! |----------|-----|
//! | `SITE_URL` | `site.base_url` |
//! | `GOOGLE_SITE_VERIFICATION` | `site.google_site_verification` |
//! | `SANITY_PROJECT_ID` | `cms.project_id` |
//! | `SANITY_DATASET` | `cms.dataset` |
//! | `SANITY_API_TOKEN` | `cms.token` |
//! | `SANITY_USE_CDN` | `cms.use_cdn` |
//! | `CONTACT_FORM_URL` | `forms.contact_url` |
//! | `QUOTE_FORM_URL` | `forms.quote_url` |
//! | `GA_MEASUREMENT_ID` | `analytics.ga_measurement_id` |
//! | `GTM_ID` | `analytics.gtm_id` |
//!
//! Empty variables are treated as unset. Unknown keys in `config.toml` are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project id shipped in sample configs. Treated the same as "not set".
const PLACEHOLDER_PROJECT_ID: &str = "your-project-id";

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public URL and SEO settings.
    pub site: SiteSettings,
    /// Company contact details used in the footer and structured data.
    pub company: CompanyConfig,
    /// Headless CMS connection.
    pub cms: CmsConfig,
    /// External form service endpoints.
    pub forms: FormsConfig,
    /// Analytics / tag manager ids.
    pub analytics: AnalyticsConfig,
    /// Brand colors injected as CSS custom properties.
    pub theme: ThemeConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.site.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if self.cms.dataset.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cms.dataset must not be empty".into(),
            ));
        }
        if self.cms.api_version.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cms.api_version must not be empty".into(),
            ));
        }
        if self.cms.timeout_secs == 0 || self.forms.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs values must be non-zero".into(),
            ));
        }
        for (key, value) in [
            ("forms.contact_url", &self.forms.contact_url),
            ("forms.quote_url", &self.forms.quote_url),
        ] {
            if let Some(v) = value
                && !(v.starts_with("http://") || v.starts_with("https://"))
            {
                return Err(ConfigError::Validation(format!(
                    "{key} must be an absolute http(s) URL"
                )));
            }
        }
        Ok(())
    }

    /// Apply environment overrides on top of file/stock values.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure over
    /// a map so they never touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = get("SITE_URL") {
            self.site.base_url = v;
        }
        if let Some(v) = get("GOOGLE_SITE_VERIFICATION") {
            self.site.google_site_verification = Some(v);
        }
        if let Some(v) = get("SANITY_PROJECT_ID") {
            self.cms.project_id = Some(v);
        }
        if let Some(v) = get("SANITY_DATASET") {
            self.cms.dataset = v;
        }
        if let Some(v) = get("SANITY_API_TOKEN") {
            self.cms.token = Some(v);
        }
        if let Some(v) = get("SANITY_USE_CDN") {
            self.cms.use_cdn = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(v) = get("CONTACT_FORM_URL") {
            self.forms.contact_url = Some(v);
        }
        if let Some(v) = get("QUOTE_FORM_URL") {
            self.forms.quote_url = Some(v);
        }
        if let Some(v) = get("GA_MEASUREMENT_ID") {
            self.analytics.ga_measurement_id = Some(v);
        }
        if let Some(v) = get("GTM_ID") {
            self.analytics.gtm_id = Some(v);
        }
    }
}

/// Public URL and SEO settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Absolute origin of the public site, e.g. `https://largroup.nl`.
    pub base_url: String,
    /// Twitter/X handle used for `twitter:creator`.
    pub twitter_handle: String,
    /// Value for the `google-site-verification` meta tag.
    pub google_site_verification: Option<String>,
}

impl SiteSettings {
    /// Base URL without a trailing slash.
    pub fn origin(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://largroup.nl".to_string(),
            twitter_handle: "@largroupbv".to_string(),
            google_site_verification: None,
        }
    }
}

/// Company contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanyConfig {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub email: String,
    /// ISO 3166 country code for the postal address.
    pub address_country: String,
    /// Human-readable locality shown on the site.
    pub address_locality: String,
    pub hours_weekdays: String,
    pub hours_weekend: String,
    /// Year the company was founded.
    pub founded: u16,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "LAR Group B.V.".to_string(),
            tagline: "Professional Seeds & Grains".to_string(),
            phone: "+31 6 17144921".to_string(),
            email: "alex.trade@largseeds.nl".to_string(),
            address_country: "NL".to_string(),
            address_locality: "Netherlands".to_string(),
            hours_weekdays: "Mon-Fri: 9:00 - 17:00".to_string(),
            hours_weekend: "Weekend: Closed".to_string(),
            founded: 2009,
        }
    }
}

/// Headless CMS connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    /// CMS project id. When absent every page renders from fallback data.
    pub project_id: Option<String>,
    pub dataset: String,
    /// Dated API version, e.g. `2024-01-01`.
    pub api_version: String,
    /// Query the CDN-backed API host instead of the live one.
    pub use_cdn: bool,
    /// Read token for private datasets.
    pub token: Option<String>,
    /// Override the API origin (`https://<project>.api.sanity.io`).
    pub api_host: Option<String>,
    /// Per-request timeout for CMS queries.
    pub timeout_secs: u64,
}

impl CmsConfig {
    /// The configured project id, ignoring blanks and the sample placeholder.
    pub fn project(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != PLACEHOLDER_PROJECT_ID)
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: false,
            token: None,
            api_host: None,
            timeout_secs: 10,
        }
    }
}

/// External form service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsConfig {
    /// Endpoint receiving contact submissions. Absent → log and acknowledge.
    pub contact_url: Option<String>,
    /// Endpoint receiving quote requests. Absent → log and acknowledge.
    pub quote_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            contact_url: None,
            quote_url: None,
            timeout_secs: 15,
        }
    }
}

/// Analytics ids. Each tag is emitted only when its id is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Google Analytics 4 measurement id (`G-…`).
    pub ga_measurement_id: Option<String>,
    /// Google Tag Manager container id (`GTM-…`).
    pub gtm_id: Option<String>,
}

/// Brand colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Primary brand color (header, buttons).
    pub primary: String,
    pub primary_hover: String,
    /// Accent color (badges, success states).
    pub accent: String,
    pub background: String,
    /// Card and panel background.
    pub surface: String,
    pub text: String,
    /// Secondary text (captions, metadata lines).
    pub text_muted: String,
    pub border: String,
    pub error: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#1e3a8a".to_string(),
            primary_hover: "#1e40af".to_string(),
            accent: "#15803d".to_string(),
            background: "#f9fafb".to_string(),
            surface: "#ffffff".to_string(),
            text: "#111827".to_string(),
            text_muted: "#4b5563".to_string(),
            border: "#e5e7eb".to_string(),
            error: "#b91c1c".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults and deserialize.
///
/// Validation is left to the caller so environment overrides can be applied
/// between merging and validating.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    Ok(merged.try_into()?)
}

/// Load the full configuration: stock defaults, `path` (if present), then
/// environment overrides via `lookup`, then validation.
pub fn load_config<F>(path: &Path, lookup: F) -> Result<SiteConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = resolve_config(load_raw_config(path)?)?;
    config.apply_env(lookup);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# LAR Site Configuration
# ======================
#
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Environment variables (SITE_URL,
# SANITY_PROJECT_ID, CONTACT_FORM_URL, ...) override this file.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Public site
# ---------------------------------------------------------------------------
[site]
# Absolute origin used for canonical URLs, OpenGraph and the sitemap.
base_url = "https://largroup.nl"
# Twitter/X handle used for twitter:creator.
twitter_handle = "@largroupbv"
# google_site_verification = ""

# ---------------------------------------------------------------------------
# Company details (footer, contact page, structured data)
# ---------------------------------------------------------------------------
[company]
name = "LAR Group B.V."
tagline = "Professional Seeds & Grains"
phone = "+31 6 17144921"
email = "alex.trade@largseeds.nl"
address_country = "NL"
address_locality = "Netherlands"
hours_weekdays = "Mon-Fri: 9:00 - 17:00"
hours_weekend = "Weekend: Closed"
founded = 2009

# ---------------------------------------------------------------------------
# Headless CMS
# ---------------------------------------------------------------------------
# Without a project_id every page renders from the built-in fallback
# catalog. With one, CMS content is used wherever it exists and the
# fallback fills the gaps.
[cms]
# project_id = ""
dataset = "production"
api_version = "2024-01-01"
# Query the CDN-backed API host.
use_cdn = false
# token = ""
# Override the API origin (testing, proxies).
# api_host = "https://<project>.api.sanity.io"
timeout_secs = 10

# ---------------------------------------------------------------------------
# Lead forms
# ---------------------------------------------------------------------------
# When a URL is set, submissions are forwarded there as multipart form
# data. Otherwise they are logged and acknowledged locally.
[forms]
# contact_url = ""
# quote_url = ""
timeout_secs = 15

# ---------------------------------------------------------------------------
# Analytics
# ---------------------------------------------------------------------------
[analytics]
# ga_measurement_id = "G-XXXXXXXXXX"
# gtm_id = "GTM-XXXXXXX"

# ---------------------------------------------------------------------------
# Brand colors (CSS custom properties)
# ---------------------------------------------------------------------------
[theme]
primary = "#1e3a8a"
primary_hover = "#1e40af"
accent = "#15803d"
background = "#f9fafb"
surface = "#ffffff"
text = "#111827"
text_muted = "#4b5563"
border = "#e5e7eb"
error = "#b91c1c"

# ---------------------------------------------------------------------------
# HTTP server
# ---------------------------------------------------------------------------
[server]
bind = "127.0.0.1:3000"
"##
}

/// Phone number reduced to `+` and digits, for `tel:` links.
pub fn phone_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}

/// Generate CSS custom properties from the theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-primary-hover: {primary_hover};
    --color-accent: {accent};
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
    --color-error: {error};
}}"#,
        primary = theme.primary,
        primary_hover = theme.primary_hover,
        accent = theme.accent,
        background = theme.background,
        surface = theme.surface,
        text = theme.text,
        text_muted = theme.text_muted,
        border = theme.border,
        error = theme.error,
    )
}

// =============================================================================
// Tests
// =============================================================================

//! Locale resolution and locale-prefixed paths.
//!
//! Every public page lives under a locale segment: `/en/about`, `/nl/about`.
//! Paths without a supported leading segment are not found; the bare `/` is
//! the only exception and is redirected by [`negotiate`].
//!
//! The helpers here are string-level. They know nothing about which logical
//! pages exist; that is [`crate::routes`]'s job.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two supported site languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Nl,
}

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Nl];

    /// Parse a path segment. Only exact lowercase `en` and `nl` are accepted.
    pub fn from_segment(segment: &str) -> Option<Locale> {
        match segment {
            "en" => Some(Locale::En),
            "nl" => Some(Locale::Nl),
            _ => None,
        }
    }

    /// The path segment and `<html lang>` value.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Nl => "nl",
        }
    }

    /// Region-qualified tag used for `hreflang` and `inLanguage`.
    pub fn hreflang(self) -> &'static str {
        match self {
            Locale::En => "en-US",
            Locale::Nl => "nl-NL",
        }
    }

    /// OpenGraph locale (`og:locale`).
    pub fn og_locale(self) -> &'static str {
        match self {
            Locale::En => "en_US",
            Locale::Nl => "nl_NL",
        }
    }

    /// Display name in the locale's own language.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Nl => "Nederlands",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a request path into its locale and the remaining logical path.
///
/// ```text
/// "/nl/about"   → Some((Nl, "/about"))
/// "/en"         → Some((En, ""))
/// "/fr/about"   → None
/// "/"           → None
/// ```
pub fn split_locale(path: &str) -> Option<(Locale, &str)> {
    let trimmed = path.strip_prefix('/')?;
    let (segment, rest) = match trimmed.find(['/', '?']) {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    };
    Locale::from_segment(segment).map(|locale| (locale, rest))
}

/// Prefix a logical path with a locale segment.
///
/// The query string, if any, is kept. `"/"` and `""` both map to the locale
/// root (`/nl`), not `/nl/`.
pub fn localized_path(logical: &str, locale: Locale) -> String {
    let (path, query) = match logical.find('?') {
        Some(idx) => (&logical[..idx], &logical[idx..]),
        None => (logical, ""),
    };
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("/{locale}{query}")
    } else {
        format!("/{locale}/{path}{query}")
    }
}

/// Rewrite `current_path` for another locale, keeping everything after the
/// locale segment. A path without a locale is treated as a logical path.
pub fn switch_locale(current_path: &str, target: Locale) -> String {
    match split_locale(current_path) {
        Some((_, rest)) => localized_path(rest, target),
        None => localized_path(current_path, target),
    }
}

/// Pick the best supported locale from an `Accept-Language` header.
///
/// Entries are ranked by q-value (ties keep header order); `q=0` entries are
/// ignored. Only the primary subtag is compared, so `nl-BE` selects Dutch.
/// Falls back to English.
pub fn negotiate(accept_language: Option<&str>) -> Locale {
    let Some(header) = accept_language else {
        return Locale::default();
    };

    let mut ranked: Vec<(f32, Locale)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            let quality = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            let primary = tag.split('-').next()?.to_ascii_lowercase();
            let locale = Locale::from_segment(&primary)?;
            (quality > 0.0).then_some((quality, locale))
        })
        .collect();

    // Stable sort keeps header order among equal weights.
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked
        .first()
        .map(|(_, locale)| *locale)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_segment_accepts_only_supported() {
        assert_eq!(Locale::from_segment("en"), Some(Locale::En));
        assert_eq!(Locale::from_segment("nl"), Some(Locale::Nl));
        assert_eq!(Locale::from_segment("NL"), None);
        assert_eq!(Locale::from_segment("fr"), None);
        assert_eq!(Locale::from_segment(""), None);
    }

    #[test]
    fn split_locale_extracts_segment() {
        assert_eq!(split_locale("/nl/about"), Some((Locale::Nl, "/about")));
        assert_eq!(split_locale("/en"), Some((Locale::En, "")));
        assert_eq!(
            split_locale("/en/products/flax-seeds"),
            Some((Locale::En, "/products/flax-seeds"))
        );
        assert_eq!(split_locale("/nl?x=1"), Some((Locale::Nl, "?x=1")));
    }

    #[test]
    fn split_locale_rejects_unknown() {
        assert_eq!(split_locale("/"), None);
        assert_eq!(split_locale(""), None);
        assert_eq!(split_locale("/fr/about"), None);
        assert_eq!(split_locale("/nlx/about"), None);
        assert_eq!(split_locale("about"), None);
    }

    #[test]
    fn localized_path_prefixes() {
        assert_eq!(localized_path("/about", Locale::Nl), "/nl/about");
        assert_eq!(localized_path("about", Locale::En), "/en/about");
        assert_eq!(localized_path("/", Locale::Nl), "/nl");
        assert_eq!(localized_path("", Locale::En), "/en");
    }

    #[test]
    fn localized_path_keeps_query() {
        assert_eq!(
            localized_path("/products?category=seeds", Locale::Nl),
            "/nl/products?category=seeds"
        );
        assert_eq!(localized_path("/?a=b", Locale::En), "/en?a=b");
    }

    #[test]
    fn switch_locale_preserves_logical_path() {
        for path in ["/en", "/en/about", "/en/products/flax-seeds", "/en/blog?page=2"] {
            let switched = switch_locale(path, Locale::Nl);
            let (_, before) = split_locale(path).unwrap();
            let (locale, after) = split_locale(&switched).unwrap();
            assert_eq!(locale, Locale::Nl);
            assert_eq!(before, after, "logical path changed for {path}");
        }
    }

    #[test]
    fn switch_locale_same_locale_is_identity() {
        assert_eq!(switch_locale("/nl/faq", Locale::Nl), "/nl/faq");
    }

    #[test]
    fn switch_locale_without_prefix_treats_path_as_logical() {
        assert_eq!(switch_locale("/contact", Locale::Nl), "/nl/contact");
    }

    #[test]
    fn negotiate_defaults_to_english() {
        assert_eq!(negotiate(None), Locale::En);
        assert_eq!(negotiate(Some("")), Locale::En);
        assert_eq!(negotiate(Some("fr-FR,de;q=0.8")), Locale::En);
    }

    #[test]
    fn negotiate_prefers_dutch_browsers() {
        assert_eq!(negotiate(Some("nl-NL,nl;q=0.9,en;q=0.8")), Locale::Nl);
        assert_eq!(negotiate(Some("nl-BE")), Locale::Nl);
    }

    #[test]
    fn negotiate_honours_quality() {
        assert_eq!(negotiate(Some("en;q=0.5,nl;q=0.9")), Locale::Nl);
        assert_eq!(negotiate(Some("nl;q=0,en;q=0.1")), Locale::En);
    }

    #[test]
    fn negotiate_ties_keep_header_order() {
        assert_eq!(negotiate(Some("en,nl")), Locale::En);
        assert_eq!(negotiate(Some("fr,nl,en")), Locale::Nl);
    }
}

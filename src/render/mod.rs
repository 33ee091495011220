//! HTML rendering with Maud.
//!
//! Page renderers are pure functions from resolved content to a [`View`]: the
//! page's metadata, its JSON-LD documents, the analytics events it fires and
//! the `<main>` markup. [`crate::site`] fetches the content, picks the
//! renderer and wraps the view in the shared [`layout`].
//!
//! | Module | Renders |
//! |--------|---------|
//! | [`layout`] | document shell, header navigation, language switcher, footer |
//! | [`pages`] | one function per logical page plus the not-found page |
//! | [`forms`] | contact and quote forms with their status banners |
//!
//! All interpolation is escaped by Maud. The only pre-escaped inserts are
//! JSON-LD and analytics scripts (serialized with `</` escaped) and article
//! bodies produced by our own portable-text and Markdown renderers.

pub mod forms;
pub mod layout;
pub mod pages;

use crate::analytics::Event;
use crate::locale::Locale;
use crate::seo::PageMeta;
use crate::structured_data::Schema;
use chrono::{DateTime, Utc};
use maud::Markup;
use serde_json::Value;

/// Shared inputs for page renderers.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub locale: Locale,
    pub schema: Schema<'a>,
    /// Timestamp used for `dateModified` defaults and the footer year.
    pub now: DateTime<Utc>,
}

/// A rendered page body plus everything the document shell needs from it.
pub struct View {
    pub meta: PageMeta,
    /// JSON-LD documents in addition to the site-wide Organization.
    pub schemas: Vec<Value>,
    pub events: Vec<Event>,
    pub body_class: Option<&'static str>,
    pub body: Markup,
}

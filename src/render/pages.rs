//! Page renderers.
//!
//! One function per logical page. Each takes already-resolved content and
//! returns a [`View`]; none of them touch the network.

use super::forms::{FormView, contact_form, quote_form};
use super::{RenderContext, View};
use crate::analytics::Event;
use crate::filter::{CategoryFilter, ProductQuery, SortOrder};
use crate::forms::{ContactSubmission, QuoteSubmission};
use crate::i18n::{Messages, PageSeo, messages};
use crate::locale::{Locale, localized_path};
use crate::routes::{self, Route};
use crate::seo::{PageKind, PageMeta};
use crate::types::{
    BlogArticle, BlogSummary, CertificationEntry, CompanyDetails, FaqEntry, ProductDetail,
    ProductSummary, RelatedLink,
};
use maud::{Markup, PreEscaped, html};

/// Image shown on product cards without a CMS image.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder-product.svg";

/// Number of products on the home page.
const FEATURED_ON_HOME: usize = 3;

fn link(locale: Locale, route: &Route) -> String {
    localized_path(&route.path(), locale)
}

fn page_meta(m: &Messages, seo: &PageSeo, route: &Route) -> PageMeta {
    PageMeta {
        title: seo.title.clone(),
        description: seo.description.clone(),
        keywords: m.seo.keywords.clone(),
        path: route.path(),
        ..PageMeta::default()
    }
}

fn web_page(ctx: &RenderContext, meta: &PageMeta) -> serde_json::Value {
    ctx.schema
        .web_page(&meta.title, &meta.description, &meta.path, None, ctx.now)
}

fn page_header(title: &str, subtitle: &str) -> Markup {
    html! {
        header.page-header {
            h1 { (title) }
            p.subtitle { (subtitle) }
        }
    }
}

fn breadcrumb(locale: Locale, section: &Route, current: &str) -> Markup {
    let m = messages(locale);
    html! {
        nav.breadcrumb aria-label="breadcrumb" {
            a href=(link(locale, &Route::Home)) { (m.nav.home) }
            " / "
            a href=(link(locale, section)) { (super::layout::route_title(m, section)) }
            " / "
            span aria-current="page" { (current) }
        }
    }
}

// ============================================================================
// Cards
// ============================================================================

pub fn product_card(locale: Locale, product: &ProductSummary) -> Markup {
    let m = messages(locale);
    let href = link(locale, &Route::Product(product.slug.clone()));
    html! {
        article.product-card {
            a.card-image href=(href) {
                img src=(product.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE))
                    alt=(product.title) loading="lazy" width="400" height="300";
                @if product.featured {
                    span.badge.badge-featured { (m.common.featured) }
                }
            }
            div.card-body {
                @if !product.category_label.is_empty() {
                    span.badge { (product.category_label) }
                }
                h3 { a href=(href) { (product.title) } }
                p { (product.description) }
                dl.card-facts {
                    @if !product.origin.is_empty() {
                        dt { (m.common.origin) } dd { (product.origin) }
                    }
                    @if !product.kind.is_empty() {
                        dt { (m.common.kind) } dd { (product.kind) }
                    }
                }
                a.button href=(href) { (m.products.view_details) }
            }
        }
    }
}

fn blog_card(locale: Locale, post: &BlogSummary) -> Markup {
    let m = messages(locale);
    let href = link(locale, &Route::BlogPost(post.slug.clone()));
    html! {
        article.blog-card.featured[post.featured] {
            @if let Some(src) = &post.image_url {
                a.card-image href=(href) { img src=(src) alt=(post.title) loading="lazy"; }
            }
            div.card-body {
                div.meta {
                    @if let Some(category) = post.category {
                        span.badge { (m.blog_category(category)) }
                    }
                    @if post.featured {
                        span.badge.badge-featured { (m.blog.featured) }
                    }
                    @if let Some(date) = post.published {
                        time datetime=(date.to_string()) { (m.format_date(date)) }
                    }
                    span { (post.reading_time) " " (m.blog.reading_time) }
                }
                h3 { a href=(href) { (post.title) } }
                p { (post.excerpt) }
                a.read-more href=(href) { (m.common.read_more) " →" }
            }
        }
    }
}

fn related_links(locale: Locale, links: &[RelatedLink], route: fn(String) -> Route) -> Markup {
    html! {
        ul.related {
            @for item in links {
                li {
                    a href=(link(locale, &route(item.slug.clone()))) {
                        @if let Some(src) = &item.image_url {
                            img src=(src) alt=(item.title) loading="lazy";
                        }
                        strong { (item.title) }
                        @if !item.excerpt.is_empty() {
                            span { (item.excerpt) }
                        }
                    }
                }
            }
        }
    }
}

fn cta(locale: Locale, title: &str, text: &str) -> Markup {
    let m = messages(locale);
    html! {
        section.cta {
            h2 { (title) }
            p { (text) }
            div.actions {
                a.button.primary href=(link(locale, &Route::Contact)) { (m.common.contact_us) }
                a.button href=(link(locale, &Route::Quote)) { (m.common.request_quote) }
            }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Featured products for the home page; the first products when none are
/// marked featured.
pub fn featured_products(products: &[ProductSummary]) -> Vec<&ProductSummary> {
    let featured: Vec<&ProductSummary> = products
        .iter()
        .filter(|p| p.featured)
        .take(FEATURED_ON_HOME)
        .collect();
    if featured.is_empty() {
        products.iter().take(FEATURED_ON_HOME).collect()
    } else {
        featured
    }
}

pub fn home(ctx: &RenderContext, products: &[ProductSummary]) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let h = &m.home;
    let meta = page_meta(m, &m.seo.home, &Route::Home);
    let products_link = link(locale, &Route::Products);
    let categories = [
        (CategoryFilter::Seeds, &h.seeds_title, &h.seeds_text),
        (CategoryFilter::Grains, &h.grains_title, &h.grains_text),
        (CategoryFilter::Organic, &h.organic_title, &h.organic_text),
    ];

    let body = html! {
        section.hero {
            h1 { (h.title) }
            p.subtitle { (h.subtitle) }
            p { (h.description) }
            div.actions {
                a.button.primary href=(products_link) { (m.common.view_products) }
                a.button href=(link(locale, &Route::Quote)) { (m.common.request_quote) }
            }
        }
        section.featured {
            h2 { (h.featured_title) }
            div.product-grid {
                @for product in featured_products(products) {
                    (product_card(locale, product))
                }
            }
            a.view-all href=(products_link) { (h.view_all) " →" }
        }
        section.categories {
            h2 { (h.categories_title) }
            div.category-grid {
                @for (filter, title, text) in &categories {
                    a.category-tile href={ (products_link) "?category=" (filter.as_str()) } {
                        h3 { (title) }
                        p { (text) }
                    }
                }
            }
        }
        section.why {
            h2 { (h.why_title) }
            ul.checklist {
                li { (h.why_quality) }
                li { (h.why_certified) }
                li { (h.why_network) }
                li { (h.why_support) }
            }
            a href=(link(locale, &Route::About)) { (h.learn_more) }
        }
    };

    View {
        schemas: vec![web_page(ctx, &meta)],
        meta,
        events: Vec::new(),
        body_class: Some("home"),
        body,
    }
}

pub fn about(ctx: &RenderContext) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let a = &m.about;
    let meta = page_meta(m, &m.seo.about, &Route::About);
    let stats = [
        ("25+", &a.stats_years),
        ("500+", &a.stats_clients),
        ("50+", &a.stats_countries),
        ("10K+", &a.stats_products),
    ];

    let body = html! {
        (page_header(&a.title, &a.subtitle))
        section.about-hero {
            h2 { (a.hero_title) }
            p { (a.hero_description) }
        }
        section.stats {
            @for (figure, label) in &stats {
                div.stat {
                    span.figure { (figure) }
                    span.label { (label) }
                }
            }
        }
        section.story {
            div {
                h2 { (a.story_title) }
                p { (a.story_content) }
            }
            div {
                h2 { (a.mission_title) }
                p { (a.mission_content) }
            }
        }
        section.values {
            h2 { (a.values_title) }
            div.value-grid {
                @for value in &a.values {
                    div.value {
                        h3 { (value.title) }
                        p { (value.description) }
                    }
                }
            }
        }
        (cta(locale, &a.cta_title, &a.cta_text))
    };

    View {
        schemas: vec![web_page(ctx, &meta)],
        meta,
        events: Vec::new(),
        body_class: None,
        body,
    }
}

fn filter_form(locale: Locale, query: &ProductQuery) -> Markup {
    let p = &messages(locale).products;
    let category_label = |c: CategoryFilter| match c {
        CategoryFilter::All => &p.category_all,
        CategoryFilter::Seeds => &p.category_seeds,
        CategoryFilter::Grains => &p.category_grains,
        CategoryFilter::Organic => &p.category_organic,
    };
    let sort_label = |s: SortOrder| match s {
        SortOrder::Name => &p.sort_name,
        SortOrder::Newest => &p.sort_newest,
        SortOrder::Featured => &p.sort_featured,
    };
    html! {
        form.product-filter method="get" action=(link(locale, &Route::Products)) role="search" {
            input type="search" name="q" value=(query.search)
                placeholder=(p.search_placeholder) aria-label=(p.search_placeholder);
            select name="category" aria-label=(p.category_all) {
                @for c in CategoryFilter::ALL {
                    option value=(c.as_str()) selected[c == query.category] { (category_label(c)) }
                }
            }
            label {
                (p.sort_label) " "
                select name="sort" {
                    @for s in SortOrder::ALL {
                        option value=(s.as_str()) selected[s == query.sort] { (sort_label(s)) }
                    }
                }
            }
            button.button type="submit" { (p.search_button) }
        }
    }
}

pub fn products(ctx: &RenderContext, all: &[ProductSummary], query: &ProductQuery) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let p = &m.products;
    let meta = page_meta(m, &m.seo.products, &Route::Products);
    let shown = query.apply(all);

    let body = html! {
        (page_header(&p.title, &p.subtitle))
        (filter_form(locale, query))
        p.results-count {
            (m.results_count(shown.len()))
            @if !query.search.is_empty() {
                " " (p.results_for) " “" (query.search) "”"
            }
        }
        @if shown.is_empty() {
            div.empty {
                h2 { (p.empty_title) }
                p { (p.empty_text) }
            }
        } @else {
            div.product-grid {
                @for product in &shown {
                    (product_card(locale, product))
                }
            }
        }
    };

    View {
        schemas: vec![web_page(ctx, &meta)],
        meta,
        events: Vec::new(),
        body_class: None,
        body,
    }
}

pub fn product(ctx: &RenderContext, detail: &ProductDetail) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let pp = &m.product;
    let s = &detail.summary;
    let route = Route::Product(s.slug.clone());

    let keywords = [s.category_label.as_str(), s.kind.as_str(), s.origin.as_str()]
        .into_iter()
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .chain(std::iter::once(ctx.schema.company.name.clone()))
        .collect();
    let meta = PageMeta {
        title: format!("{} - {}", s.title, ctx.schema.company.name),
        description: s.description.clone(),
        keywords,
        path: route.path(),
        image: detail.share_image_url.clone(),
        ..PageMeta::default()
    };
    let schema = ctx
        .schema
        .product(&s.title, &s.description, detail.share_image_url.as_deref());
    let event = Event::ViewItem {
        name: s.title.clone(),
        category: s.category_label.clone(),
        price: detail.price,
    };
    let quote_href = format!(
        "{}?product={}",
        link(locale, &Route::Quote),
        routes::encode_segment(&s.slug)
    );

    let body = html! {
        (breadcrumb(locale, &Route::Products, &s.title))
        article.product-detail {
            div.product-media {
                img src=(detail.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE))
                    alt=(s.title) width="800" height="600";
                @if !detail.gallery.is_empty() {
                    div.gallery {
                        @for src in &detail.gallery {
                            img src=(src) alt=(s.title) loading="lazy" width="200" height="200";
                        }
                    }
                }
            }
            div.product-info {
                div.badges {
                    @if !s.category_label.is_empty() {
                        span.badge { (s.category_label) }
                    }
                    @if detail.organic {
                        span.badge.badge-accent { (m.common.organic) }
                    }
                    @if s.featured {
                        span.badge.badge-featured { (m.common.featured) }
                    }
                    @match detail.in_stock {
                        Some(true) => { span.badge.badge-accent { (pp.in_stock) } }
                        Some(false) => { span.badge.badge-muted { (pp.out_of_stock) } }
                        None => {}
                    }
                }
                h1 { (s.title) }
                p.lead { (detail.body) }
                @if let Some(year) = detail.harvest_year {
                    p.harvest { (pp.harvest_year) " " (year) }
                }

                @if !detail.specs.is_empty() {
                    section.specs {
                        h2 { (pp.specs_title) }
                        dl {
                            @for (label, value) in &detail.specs {
                                dt { (label) }
                                dd { (value) }
                            }
                        }
                    }
                }
                @if !detail.packaging.is_empty() {
                    section {
                        h3 { (pp.packaging) }
                        ul { @for option in &detail.packaging { li { (option) } } }
                    }
                }
                @if !detail.features.is_empty() {
                    section {
                        h3 { (pp.features_title) }
                        ul.checklist { @for feature in &detail.features { li { (feature) } } }
                    }
                }
                @if !detail.certifications.is_empty() {
                    section {
                        h3 { (pp.certifications) }
                        div.badges {
                            @for cert in &detail.certifications { span.badge { (cert) } }
                        }
                    }
                }

                section.interest {
                    h2 { (pp.interest_title) }
                    p { (pp.interest_text) }
                    div.actions {
                        a.button.primary href=(quote_href) { (m.common.request_quote) }
                        a.button href=(link(locale, &Route::Contact)) { (m.common.more_info) }
                    }
                }
            }
        }
        section.related-products {
            h2 { (pp.related_title) }
            @if detail.related.is_empty() {
                p { (pp.related_empty) }
            } @else {
                (related_links(locale, &detail.related, Route::Product))
            }
        }
    };

    View {
        meta,
        schemas: vec![schema],
        events: vec![event],
        body_class: Some("product-page"),
        body,
    }
}

pub fn blog(ctx: &RenderContext, posts: &[BlogSummary]) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let b = &m.blog;
    let meta = page_meta(m, &m.seo.blog, &Route::Blog);

    let body = html! {
        (page_header(&b.title, &b.subtitle))
        @if posts.is_empty() {
            div.empty { p { (b.empty) } }
        } @else {
            div.blog-grid {
                @for post in posts {
                    (blog_card(locale, post))
                }
            }
        }
    };

    View {
        schemas: vec![web_page(ctx, &meta)],
        meta,
        events: Vec::new(),
        body_class: None,
        body,
    }
}

pub fn blog_post(ctx: &RenderContext, article: &BlogArticle) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let b = &m.blog;
    let s = &article.summary;
    let route = Route::BlogPost(s.slug.clone());

    let meta = PageMeta {
        title: format!("{} - {}", s.title, ctx.schema.company.name),
        description: s.excerpt.clone(),
        keywords: article.tags.clone(),
        path: route.path(),
        image: s.image_url.clone(),
        kind: PageKind::Article,
        noindex: false,
    };
    let schema = ctx.schema.article(
        &s.title,
        &s.excerpt,
        &meta.path,
        s.image_url.as_deref(),
        s.published,
        article.updated_at,
        ctx.now,
    );

    let body = html! {
        (breadcrumb(locale, &Route::Blog, &s.title))
        article.blog-post {
            header {
                @if let Some(category) = s.category {
                    span.badge { (m.blog_category(category)) }
                }
                h1 { (s.title) }
                p.byline {
                    (b.author) " " (s.author)
                    @if let Some(date) = s.published {
                        " · " (b.published_on) " "
                        time datetime=(date.to_string()) { (m.format_date(date)) }
                    }
                    " · " (s.reading_time) " " (b.reading_time)
                }
            }
            @if let Some(src) = &s.image_url {
                img.hero-image src=(src) alt=(s.title);
            }
            div.article-body {
                (PreEscaped(&article.body_html))
            }
            @if !article.tags.is_empty() {
                footer.tags {
                    span { (b.tags) ": " }
                    @for tag in &article.tags {
                        span.badge { (tag) }
                    }
                }
            }
            @if let Some(bio) = &article.author_bio {
                aside.author-bio {
                    strong { (s.author) }
                    p { (bio) }
                }
            }
        }
        @if !article.related.is_empty() {
            section.related-posts {
                h2 { (b.related) }
                (related_links(locale, &article.related, Route::BlogPost))
            }
        }
        a.back href=(link(locale, &Route::Blog)) { "← " (b.back) }
    };

    View {
        meta,
        schemas: vec![schema],
        events: Vec::new(),
        body_class: Some("article-page"),
        body,
    }
}

pub fn faq(ctx: &RenderContext, faqs: &[FaqEntry]) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let f = &m.faq;
    let meta = page_meta(m, &m.seo.faq, &Route::Faq);
    let schema = ctx
        .schema
        .faq_page(&meta.title, &meta.description, &meta.path, faqs);

    let body = html! {
        (page_header(&f.title, &f.subtitle))
        section.faq-list {
            @for entry in faqs {
                details.faq data-category=(entry.category) {
                    summary { (entry.question) }
                    p { (entry.answer) }
                }
            }
        }
        (cta(locale, &f.more_title, &f.more_text))
    };

    View {
        meta,
        schemas: vec![schema],
        events: Vec::new(),
        body_class: None,
        body,
    }
}

pub fn quality(ctx: &RenderContext, certifications: &[CertificationEntry]) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let q = &m.quality;
    let meta = page_meta(m, &m.seo.quality, &Route::Quality);

    let body = html! {
        (page_header(&q.title, &q.subtitle))
        section.certifications {
            @for cert in certifications {
                article.certification {
                    @if let Some(src) = &cert.image_url {
                        img src=(src) alt=(cert.title) width="200" height="200" loading="lazy";
                    }
                    h2 { (cert.title) }
                    p { (cert.description) }
                    @if let Some(issuer) = &cert.issuer {
                        p.meta { (q.issued_by) ": " (issuer) }
                    }
                    @if let Some(date) = cert.valid_until {
                        p.meta { (q.valid_until) ": " (m.format_date(date)) }
                    }
                }
            }
        }
        section.commitment {
            h2 { (q.commitment_title) }
            div.value-grid {
                div.value { h3 { (q.traceability_title) } p { (q.traceability_text) } }
                div.value { h3 { (q.delivery_title) } p { (q.delivery_text) } }
                div.value { h3 { (q.support_title) } p { (q.support_text) } }
            }
        }
        (cta(locale, &q.cta_title, &q.cta_text))
    };

    View {
        schemas: vec![web_page(ctx, &meta)],
        meta,
        events: Vec::new(),
        body_class: None,
        body,
    }
}

pub fn contact(
    ctx: &RenderContext,
    company: &CompanyDetails,
    form: &FormView<ContactSubmission>,
    action: &str,
) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let c = &m.contact;
    let meta = page_meta(m, &m.seo.contact, &Route::Contact);

    let body = html! {
        (page_header(&c.title, &c.subtitle))
        div.contact-layout {
            (contact_form(locale, form, action))
            aside.contact-info {
                h2 { (c.info_title) }
                address {
                    p { (company.name) }
                    p { (company.address) }
                    p { a href=(crate::config::phone_href(&company.phone)) { (company.phone) } }
                    p { a href={ "mailto:" (company.email) } { (company.email) } }
                }
                h3 { (m.footer.hours_title) }
                p { (company.hours_weekdays) br; (company.hours_weekend) }
                a.button href=(link(locale, &Route::Quote)) { (m.common.request_quote) }
            }
        }
    };

    View {
        schemas: vec![web_page(ctx, &meta)],
        meta,
        events: form.event.iter().cloned().collect(),
        body_class: None,
        body,
    }
}

pub fn quote(ctx: &RenderContext, form: &FormView<QuoteSubmission>, action: &str) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let q = &m.quote;
    let meta = page_meta(m, &m.seo.quote, &Route::Quote);

    let body = html! {
        (page_header(&q.title, &q.subtitle))
        (quote_form(locale, form, action))
    };

    View {
        schemas: vec![web_page(ctx, &meta)],
        meta,
        events: form.event.iter().cloned().collect(),
        body_class: None,
        body,
    }
}

/// The not-found page. Excluded from search indexes.
pub fn not_found(ctx: &RenderContext) -> View {
    let locale = ctx.locale;
    let m = messages(locale);
    let n = &m.not_found;
    let meta = PageMeta {
        title: m.seo.not_found.title.clone(),
        description: m.seo.not_found.description.clone(),
        noindex: true,
        ..PageMeta::default()
    };

    let body = html! {
        section.not-found {
            p.code { "404" }
            h1 { (n.title) }
            p { (n.text) }
            a.button.primary href=(link(locale, &Route::Home)) { (n.go_home) }
            p { (n.popular) }
            ul {
                @for route in [Route::About, Route::Products, Route::Contact] {
                    li { a href=(link(locale, &route)) { (super::layout::route_title(m, &route)) } }
                }
            }
        }
    };

    View {
        meta,
        schemas: Vec::new(),
        events: Vec::new(),
        body_class: Some("not-found-page"),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::config::{CompanyConfig, SiteSettings};
    use crate::structured_data::Schema;
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn with<T>(locale: Locale, f: impl FnOnce(&RenderContext) -> T) -> T {
        let site = SiteSettings::default();
        let company = CompanyConfig::default();
        let ctx = RenderContext {
            locale,
            schema: Schema {
                site: &site,
                company: &company,
                locale,
            },
            now: now(),
        };
        f(&ctx)
    }

    fn count(html: &str, needle: &str) -> usize {
        html.matches(needle).count()
    }

    #[test]
    fn products_page_renders_every_fallback_product() {
        let all = catalog::products(Locale::Nl);
        let view = with(Locale::Nl, |ctx| products(ctx, &all, &ProductQuery::default()));
        let html = view.body.into_string();
        assert_eq!(count(&html, r#"class="product-card""#), all.len());
        assert!(html.contains(&messages(Locale::Nl).results_count(all.len())));
    }

    #[test]
    fn products_page_filters_by_query() {
        let all = catalog::products(Locale::En);
        let query = ProductQuery {
            category: CategoryFilter::Organic,
            ..ProductQuery::default()
        };
        let expected = query.apply(&all).len();
        assert!(expected < all.len());
        let html = with(Locale::En, |ctx| products(ctx, &all, &query)).body.into_string();
        assert_eq!(count(&html, r#"class="product-card""#), expected);
        assert!(html.contains(r#"<option value="organic" selected>"#));
    }

    #[test]
    fn empty_search_shows_message() {
        let all = catalog::products(Locale::En);
        let query = ProductQuery {
            search: "zzz-no-match".into(),
            ..ProductQuery::default()
        };
        let html = with(Locale::En, |ctx| products(ctx, &all, &query)).body.into_string();
        assert!(html.contains(&messages(Locale::En).products.empty_title));
        assert!(html.contains("zzz-no-match"));
    }

    #[test]
    fn home_shows_featured_products() {
        let all = catalog::products(Locale::En);
        let featured = featured_products(&all);
        assert_eq!(featured.len(), 3);
        assert!(featured.iter().all(|p| p.featured));
        let html = with(Locale::En, |ctx| home(ctx, &all)).body.into_string();
        assert_eq!(count(&html, r#"class="product-card""#), 3);
        assert!(html.contains(r#"href="/en/products?category=seeds""#));
    }

    #[test]
    fn featured_falls_back_to_first_products() {
        let mut all = catalog::products(Locale::En);
        for p in &mut all {
            p.featured = false;
        }
        assert_eq!(featured_products(&all).len(), 3);
    }

    #[test]
    fn product_page_fires_view_item_and_links_quote() {
        let detail = catalog::product("flax-seeds", Locale::En).unwrap();
        let view = with(Locale::En, |ctx| product(ctx, &detail));
        assert_eq!(view.events.len(), 1);
        assert!(matches!(&view.events[0], Event::ViewItem { name, .. } if name == &detail.summary.title));
        assert_eq!(view.schemas[0]["@type"], "Product");
        assert_eq!(view.meta.path, "/products/flax-seeds");
        assert!(view.meta.title.ends_with("- LAR Group B.V."));
        let html = view.body.into_string();
        assert!(html.contains(r#"href="/en/quote?product=flax-seeds""#));
        assert!(html.contains(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn blog_post_is_an_article() {
        let article = catalog::blog_post("industry-innovation-2024", Locale::En).unwrap();
        let view = with(Locale::En, |ctx| blog_post(ctx, &article));
        assert_eq!(view.meta.kind, PageKind::Article);
        assert_eq!(view.schemas[0]["@type"], "Article");
        assert_eq!(view.schemas[0]["datePublished"], "2024-01-15");
        let html = view.body.into_string();
        assert!(html.contains(r#"<time datetime="2024-01-15">"#));
        assert!(html.contains("article-body"));
    }

    #[test]
    fn blog_index_lists_posts() {
        let posts = catalog::blog_posts(Locale::Nl);
        let html = with(Locale::Nl, |ctx| blog(ctx, &posts)).body.into_string();
        assert_eq!(count(&html, "<article class=\"blog-card"), posts.len());
    }

    #[test]
    fn faq_page_uses_details_and_schema() {
        let faqs = catalog::faqs(Locale::En);
        let view = with(Locale::En, |ctx| faq(ctx, &faqs));
        assert_eq!(view.schemas[0]["@type"], "FAQPage");
        let html = view.body.into_string();
        assert_eq!(count(&html, "<details"), faqs.len());
    }

    #[test]
    fn quality_lists_certifications() {
        let certs = catalog::certifications(Locale::Nl);
        let html = with(Locale::Nl, |ctx| quality(ctx, &certs)).body.into_string();
        assert!(html.contains("IFS Broker"));
        assert!(html.contains("ISO 22000"));
    }

    #[test]
    fn contact_page_emits_event_only_after_success() {
        let company = catalog::company(&CompanyConfig::default(), Locale::En);
        let idle = with(Locale::En, |ctx| contact(ctx, &company, &FormView::default(), "/en/contact"));
        assert!(idle.events.is_empty());

        let event = Event::ContactForm {
            subject: "General Inquiry".into(),
            company: "Akker BV".into(),
        };
        let done = with(Locale::En, |ctx| {
            contact(ctx, &company, &FormView::success(event.clone(), None), "/en/contact")
        });
        assert_eq!(done.events, vec![event]);
    }

    #[test]
    fn not_found_is_noindex() {
        let view = with(Locale::Nl, not_found);
        assert!(view.meta.noindex);
        let html = view.body.into_string();
        assert!(html.contains("404"));
        assert!(html.contains(r#"href="/nl/about""#));
    }
}

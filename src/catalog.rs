//! Fallback catalog: hand-authored content used whenever the CMS has nothing.
//!
//! Every entry carries English and Dutch text. The functions here return the
//! same view models as CMS resolution, marked [`Provenance::Fallback`], so a
//! site with no CMS configured renders every page in full.
//!
//! Articles are written in Markdown and rendered with `pulldown-cmark`.

use crate::config::CompanyConfig;
use crate::i18n::messages;
use crate::locale::Locale;
use crate::model::{BlogCategory, ProductCategory};
use crate::types::{
    BlogArticle, BlogSummary, CertificationEntry, CompanyDetails, FaqEntry, ProductDetail,
    ProductSummary, Provenance, RelatedLink,
};
use chrono::NaiveDate;
use pulldown_cmark::{Parser, html as md_html};

/// Related products shown under a fallback product.
const MAX_RELATED: usize = 3;

/// A string in both languages.
#[derive(Debug, Clone, Copy)]
struct Localized {
    en: &'static str,
    nl: &'static str,
}

impl Localized {
    fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Nl => self.nl,
        }
    }
}

const fn t(en: &'static str, nl: &'static str) -> Localized {
    Localized { en, nl }
}

// ============================================================================
// Products
// ============================================================================

struct FallbackProduct {
    slug: &'static str,
    title: Localized,
    category: ProductCategory,
    description: Localized,
    /// Product page text, when longer than the card description.
    body: Option<Localized>,
    origin: Localized,
    kind: Localized,
    featured: bool,
}

const PRODUCTS: [FallbackProduct; 9] = [
    FallbackProduct {
        slug: "premium-wheat-seeds",
        title: t("Premium Wheat Seeds", "Premium Tarwe Zaden"),
        category: ProductCategory::Seeds,
        description: t(
            "High-quality wheat seeds for professional agriculture with excellent germination",
            "Hoogwaardige tarwe zaden voor professionele landbouw met uitstekende kiemkracht",
        ),
        body: Some(t(
            "High-quality wheat seeds specially selected for professional farmers. These premium seeds offer excellent germination and yield for optimal crop production.",
            "Hoogwaardige tarwe zaden speciaal geselecteerd voor professionele landbouwers. Deze premium zaden bieden uitstekende kiemkracht en opbrengst voor optimale gewasproductie.",
        )),
        origin: t("Netherlands", "Nederland"),
        kind: t("Winter Grain", "Wintergraan"),
        featured: true,
    },
    FallbackProduct {
        slug: "organic-barley",
        title: t("Organic Barley", "Biologische Gerst"),
        category: ProductCategory::Organic,
        description: t(
            "Certified organic barley of top quality according to EU standards",
            "Gecertificeerde biologische gerst van top kwaliteit volgens EU-normen",
        ),
        body: Some(t(
            "Certified organic barley of top quality, grown according to strict organic standards. Perfect for organic farming and food production.",
            "Gecertificeerde biologische gerst van topkwaliteit, geteeld volgens strenge biologische normen. Perfect voor biologische landbouw en voedingsproductie.",
        )),
        origin: t("Germany", "Duitsland"),
        kind: t("Summer Grain", "Zomergraan"),
        featured: false,
    },
    FallbackProduct {
        slug: "corn-hybrid-seeds",
        title: t("Corn Hybrid Seeds", "Mais Hybrid Zaden"),
        category: ProductCategory::Seeds,
        description: t(
            "Hybrid corn seeds for maximum yield and disease resistance",
            "Hybride mais zaden voor maximale opbrengst en ziekteresistentie",
        ),
        body: Some(t(
            "Hybrid corn seeds designed for maximum yield and disease resistance. Specially developed for modern agricultural practices.",
            "Hybride mais zaden ontworpen voor maximale opbrengst en resistentie tegen ziekten. Speciaal ontwikkeld voor moderne landbouwpraktijken.",
        )),
        origin: t("France", "Frankrijk"),
        kind: t("Hybrid", "Hybride"),
        featured: false,
    },
    FallbackProduct {
        slug: "organic-sunflower-seeds",
        title: t("Organic Sunflower Seeds", "Biologische Zonnebloem Zaden"),
        category: ProductCategory::Organic,
        description: t(
            "Organic sunflower seeds for oil production and nutrition",
            "Biologische zonnebloem zaden voor olie-productie en voeding",
        ),
        body: None,
        origin: t("Ukraine", "Oekraïne"),
        kind: t("Oil Seeds", "Oliezaden"),
        featured: true,
    },
    FallbackProduct {
        slug: "premium-rice-grains",
        title: t("Premium Rice Grains", "Premium Rijst Korrels"),
        category: ProductCategory::Grains,
        description: t(
            "Long grain basmati rice of premium quality for export",
            "Langkorrel basmati rijst van premium kwaliteit voor export",
        ),
        body: None,
        origin: t("India", "India"),
        kind: t("Basmati", "Basmati"),
        featured: false,
    },
    FallbackProduct {
        slug: "organic-quinoa-seeds",
        title: t("Organic Quinoa Seeds", "Biologische Quinoa Zaden"),
        category: ProductCategory::Organic,
        description: t(
            "Organic quinoa seeds rich in proteins and nutrients",
            "Biologische quinoa zaden rijk aan eiwitten en voedingsstoffen",
        ),
        body: None,
        origin: t("Bolivia", "Bolivia"),
        kind: t("Superfood", "Superfood"),
        featured: false,
    },
    FallbackProduct {
        slug: "rye-seeds",
        title: t("Rye Seeds", "Rogge Zaden"),
        category: ProductCategory::Seeds,
        description: t(
            "Winter-hardy rye seeds suitable for cold climates",
            "Winterharde rogge zaden geschikt voor koude klimaten",
        ),
        body: None,
        origin: t("Poland", "Polen"),
        kind: t("Winter Grain", "Wintergraan"),
        featured: false,
    },
    FallbackProduct {
        slug: "buckwheat-grains",
        title: t("Buckwheat Grains", "Boekweit Korrels"),
        category: ProductCategory::Grains,
        description: t(
            "Gluten-free buckwheat grains for healthy nutrition",
            "Glutenvrije boekweit korrels voor gezonde voeding",
        ),
        body: None,
        origin: t("Russia", "Rusland"),
        kind: t("Pseudocereal", "Pseudograan"),
        featured: false,
    },
    FallbackProduct {
        slug: "flax-seeds",
        title: t("Flax Seeds", "Lijnzaad"),
        category: ProductCategory::Seeds,
        description: t(
            "Flax seeds rich in omega-3 fatty acids for nutrition and industry",
            "Lijnzaad rijk aan omega-3 vetzuren voor voeding en industrie",
        ),
        body: None,
        origin: t("Canada", "Canada"),
        kind: t("Oil Seeds", "Oliezaden"),
        featured: true,
    },
];

impl FallbackProduct {
    fn summary(&self, locale: Locale) -> ProductSummary {
        ProductSummary {
            slug: self.slug.to_string(),
            title: self.title.get(locale).to_string(),
            description: self.description.get(locale).to_string(),
            category: Some(self.category),
            category_label: messages(locale).product_category(self.category).to_string(),
            origin: self.origin.get(locale).to_string(),
            kind: self.kind.get(locale).to_string(),
            image_url: None,
            featured: self.featured,
            created_at: None,
        }
    }
}

/// Every fallback product, in catalog order.
pub fn products(locale: Locale) -> Vec<ProductSummary> {
    PRODUCTS.iter().map(|p| p.summary(locale)).collect()
}

/// The fallback product page for `slug`, if the catalog has one.
pub fn product(slug: &str, locale: Locale) -> Option<ProductDetail> {
    let entry = PRODUCTS.iter().find(|p| p.slug == slug)?;
    let m = messages(locale);
    let summary = entry.summary(locale);

    let related = PRODUCTS
        .iter()
        .filter(|p| p.slug != slug && p.category == entry.category)
        .take(MAX_RELATED)
        .map(|p| RelatedLink {
            slug: p.slug.to_string(),
            title: p.title.get(locale).to_string(),
            excerpt: p.description.get(locale).to_string(),
            image_url: None,
        })
        .collect();

    Some(ProductDetail {
        body: entry
            .body
            .map(|b| b.get(locale).to_string())
            .unwrap_or_else(|| summary.description.clone()),
        organic: entry.category == ProductCategory::Organic,
        in_stock: None,
        price: None,
        specs: vec![
            (m.common.kind.clone(), summary.kind.clone()),
            (m.common.origin.clone(), summary.origin.clone()),
        ],
        packaging: Vec::new(),
        harvest_year: None,
        features: Vec::new(),
        certifications: Vec::new(),
        image_url: None,
        share_image_url: None,
        gallery: Vec::new(),
        related,
        updated_at: None,
        provenance: Provenance::Fallback,
        summary,
    })
}

// ============================================================================
// Blog
// ============================================================================

struct FallbackPost {
    slug: &'static str,
    title: Localized,
    excerpt: Localized,
    /// Markdown.
    body: Localized,
    category: BlogCategory,
    published: (i32, u32, u32),
    reading_time: u32,
    featured: bool,
    tags: &'static [Localized],
    related: &'static [&'static str],
}

const AUTHOR: &str = "LAR Team";

const POSTS: [FallbackPost; 3] = [
    FallbackPost {
        slug: "quality-standards-excellence",
        title: t("Quality Standards Excellence", "Uitmuntende Kwaliteitsnormen"),
        excerpt: t(
            "How we maintain the highest quality standards across our supply chain.",
            "Hoe wij de hoogste kwaliteitsnormen handhaven in onze hele keten.",
        ),
        body: t(
            r#"Quality is not a department at LAR Group, it is how we trade. Every lot we handle is sampled, documented and traceable from grower to customer.

## Certified processes

Our IFS Broker and ISO 22000 certifications are audited every year. They cover supplier approval, product specifications, complaint handling and recall procedures.

## Testing every lot

- **Purity:** physical analysis against the agreed specification
- **Germination:** laboratory tests for every seed lot
- **Moisture:** measured at loading and on arrival

Questions about a specific certificate? Our team is happy to share the documentation."#,
            r#"Kwaliteit is bij LAR Group geen afdeling, het is de manier waarop wij handelen. Elke partij wordt bemonsterd, gedocumenteerd en is traceerbaar van teler tot klant.

## Gecertificeerde processen

Onze IFS Broker- en ISO 22000-certificeringen worden jaarlijks geaudit. Ze omvatten leveranciersgoedkeuring, productspecificaties, klachtafhandeling en terugroepprocedures.

## Elke partij getest

- **Zuiverheid:** fysieke analyse volgens de afgesproken specificatie
- **Kiemkracht:** laboratoriumtests voor elke zaadpartij
- **Vochtgehalte:** gemeten bij het laden en bij aankomst

Vragen over een specifiek certificaat? Ons team deelt graag de documentatie."#,
        ),
        category: BlogCategory::Insights,
        published: (2024, 3, 12),
        reading_time: 4,
        featured: false,
        tags: &[t("quality", "kwaliteit"), t("certification", "certificering")],
        related: &["industry-innovation-2024", "new-product-line-launch"],
    },
    FallbackPost {
        slug: "new-product-line-launch",
        title: t("New Product Line Launch", "Lancering Nieuwe Productlijn"),
        excerpt: t(
            "Introducing our latest product innovations for the coming season.",
            "Maak kennis met onze nieuwste productinnovaties voor het komende seizoen.",
        ),
        body: t(
            r#"This season we are expanding our range with organic quinoa and sunflower seeds, sourced from long-standing partners in Bolivia and Ukraine.

## What is new

- Organic quinoa seeds, rich in proteins and nutrients
- Organic sunflower seeds for oil production and nutrition
- Flexible packaging from 25 kg bags to bulk

Contact us for specifications, samples and seasonal pricing."#,
            r#"Dit seizoen breiden wij ons assortiment uit met biologische quinoa en zonnebloemzaden, afkomstig van vaste partners in Bolivia en Oekraïne.

## Wat is er nieuw

- Biologische quinoa zaden, rijk aan eiwitten en voedingsstoffen
- Biologische zonnebloemzaden voor olieproductie en voeding
- Flexibele verpakking van zakken van 25 kg tot bulk

Neem contact met ons op voor specificaties, monsters en seizoensprijzen."#,
        ),
        category: BlogCategory::Products,
        published: (2024, 2, 20),
        reading_time: 3,
        featured: false,
        tags: &[t("products", "producten"), t("organic", "biologisch")],
        related: &["industry-innovation-2024", "quality-standards-excellence"],
    },
    FallbackPost {
        slug: "industry-innovation-2024",
        title: t("Industry Innovation in 2024", "Innovatie in de Sector in 2024"),
        excerpt: t(
            "How technology and changing market demands are reshaping the seeds and grains trade.",
            "Hoe technologie en veranderende marktvraag de handel in zaden en granen veranderen.",
        ),
        body: t(
            r#"The industry landscape continues to evolve at an unprecedented pace, driven by technological advancements and changing market demands. At LAR Group, we're at the forefront of these innovations, continuously adapting our products and services to meet the needs of tomorrow.

## Key Innovation Areas

This year has seen remarkable progress in several key areas:

- **Sustainability:** Environmental considerations are now central to product development
- **Digital Integration:** Smart technologies are becoming standard across product lines
- **Customer-Centric Design:** User experience drives innovation decisions

## Looking Ahead

As we move forward, LAR Group remains committed to leading the industry through innovative solutions that deliver real value to our customers. Our investment in research and development ensures we stay ahead of market trends.

Stay tuned for more updates on our innovation journey and upcoming product launches."#,
            r#"De sector ontwikkelt zich in een ongekend tempo, gedreven door technologische vooruitgang en een veranderende marktvraag. Bij LAR Group lopen we voorop in deze ontwikkelingen en passen we onze producten en diensten voortdurend aan de behoeften van morgen aan.

## Belangrijke innovatiegebieden

Dit jaar is er opmerkelijke vooruitgang geboekt op een aantal gebieden:

- **Duurzaamheid:** milieuoverwegingen staan nu centraal in de productontwikkeling
- **Digitale integratie:** slimme technologie wordt standaard in alle productlijnen
- **Klantgericht ontwerp:** de gebruikerservaring stuurt innovatiebeslissingen

## Vooruitblik

LAR Group blijft zich inzetten om de sector te leiden met innovatieve oplossingen die echte waarde leveren voor onze klanten. Door te investeren in onderzoek en ontwikkeling blijven we markttrends voor.

Blijf op de hoogte van onze innovaties en komende productlanceringen."#,
        ),
        category: BlogCategory::Industry,
        published: (2024, 1, 15),
        reading_time: 5,
        featured: true,
        tags: &[t("innovation", "innovatie"), t("sustainability", "duurzaamheid")],
        related: &["new-product-line-launch", "quality-standards-excellence"],
    },
];

impl FallbackPost {
    fn summary(&self, locale: Locale) -> BlogSummary {
        let (y, m, d) = self.published;
        BlogSummary {
            slug: self.slug.to_string(),
            title: self.title.get(locale).to_string(),
            excerpt: self.excerpt.get(locale).to_string(),
            published: NaiveDate::from_ymd_opt(y, m, d),
            author: AUTHOR.to_string(),
            category: Some(self.category),
            image_url: None,
            featured: self.featured,
            reading_time: self.reading_time,
        }
    }
}

/// Render Markdown to HTML.
fn markdown_to_html(source: &str) -> String {
    let mut html = String::new();
    md_html::push_html(&mut html, Parser::new(source));
    html
}

/// Fallback articles, newest first.
pub fn blog_posts(locale: Locale) -> Vec<BlogSummary> {
    POSTS.iter().map(|p| p.summary(locale)).collect()
}

/// The fallback article for `slug`, if the catalog has one.
pub fn blog_post(slug: &str, locale: Locale) -> Option<BlogArticle> {
    let entry = POSTS.iter().find(|p| p.slug == slug)?;
    let related = entry
        .related
        .iter()
        .filter_map(|r| POSTS.iter().find(|p| p.slug == *r))
        .map(|p| RelatedLink {
            slug: p.slug.to_string(),
            title: p.title.get(locale).to_string(),
            excerpt: p.excerpt.get(locale).to_string(),
            image_url: None,
        })
        .collect();

    Some(BlogArticle {
        summary: entry.summary(locale),
        body_html: markdown_to_html(entry.body.get(locale)),
        author_bio: None,
        tags: entry.tags.iter().map(|t| t.get(locale).to_string()).collect(),
        related,
        updated_at: None,
        provenance: Provenance::Fallback,
    })
}

// ============================================================================
// FAQ, certifications, company
// ============================================================================

const FAQS: [(Localized, Localized, &str); 6] = [
    (
        t(
            "What is your product warranty policy?",
            "Wat is uw garantiebeleid voor producten?",
        ),
        t(
            "All our products come with a comprehensive warranty covering manufacturing defects and performance issues. The warranty period varies by product type, typically ranging from 1 to 5 years. Please refer to your product documentation for specific warranty terms.",
            "Al onze producten hebben een uitgebreide garantie op productiefouten en prestatieproblemen. De garantieperiode verschilt per producttype en ligt doorgaans tussen 1 en 5 jaar. Raadpleeg de productdocumentatie voor de specifieke garantievoorwaarden.",
        ),
        "general",
    ),
    (
        t(
            "How can I request a product quote?",
            "Hoe kan ik een offerte aanvragen?",
        ),
        t(
            "You can request a quote by visiting our contact page and filling out the quote request form. Alternatively, you can call our sales team directly or email us at sales@largroup.com. We'll respond with a detailed quote within 24 hours.",
            "U kunt een offerte aanvragen via het offerteformulier op onze website. U kunt ook ons verkoopteam bellen of mailen naar sales@largroup.com. Wij reageren binnen 24 uur met een gedetailleerde offerte.",
        ),
        "general",
    ),
    (
        t(
            "What certifications do your products have?",
            "Welke certificeringen hebben uw producten?",
        ),
        t(
            "Our products meet or exceed industry standards and hold various certifications including ISO 9001, CE marking, and other relevant quality certifications. Visit our Quality & Certifications page for detailed information about our certifications.",
            "Onze producten voldoen aan of overtreffen de sectornormen en beschikken over diverse certificeringen, waaronder ISO 9001, CE-markering en andere relevante kwaliteitscertificeringen. Bezoek onze pagina Kwaliteit & Certificeringen voor meer informatie.",
        ),
        "quality",
    ),
    (
        t(
            "What are your typical delivery times?",
            "Wat zijn uw gebruikelijke levertijden?",
        ),
        t(
            "Delivery times vary depending on the product and your location. Standard products typically ship within 5-10 business days, while custom orders may take 2-4 weeks. We'll provide specific delivery estimates with your quote.",
            "Levertijden verschillen per product en locatie. Standaardproducten worden doorgaans binnen 5-10 werkdagen verzonden, maatwerkorders kunnen 2-4 weken duren. Bij uw offerte ontvangt u een concrete leverschatting.",
        ),
        "orders",
    ),
    (
        t(
            "Do you offer technical support?",
            "Biedt u technische ondersteuning?",
        ),
        t(
            "Yes, we provide comprehensive technical support to all our customers. Our support team is available Monday-Friday, 9 AM-6 PM CET. You can reach us via phone, email, or through our online support portal.",
            "Ja, wij bieden uitgebreide technische ondersteuning aan al onze klanten. Ons supportteam is bereikbaar van maandag tot en met vrijdag, 9:00-18:00 CET, per telefoon, e-mail of via ons online supportportaal.",
        ),
        "support",
    ),
    (
        t(
            "What payment methods do you accept?",
            "Welke betaalmethoden accepteert u?",
        ),
        t(
            "We accept various payment methods including bank transfers, credit cards, and letters of credit for international orders. Payment terms are typically net 30 days for established customers.",
            "Wij accepteren onder meer bankoverschrijvingen, creditcards en kredietbrieven voor internationale orders. Voor vaste klanten geldt doorgaans een betalingstermijn van 30 dagen.",
        ),
        "pricing",
    ),
];

pub fn faqs(locale: Locale) -> Vec<FaqEntry> {
    FAQS.iter()
        .map(|(question, answer, category)| FaqEntry {
            question: question.get(locale).to_string(),
            answer: answer.get(locale).to_string(),
            category: category.to_string(),
        })
        .collect()
}

const CERTIFICATIONS: [(&str, Localized); 2] = [
    (
        "IFS Broker",
        t(
            "International standard for food safety and quality management in trading.",
            "Internationale standaard voor voedselveiligheid en kwaliteitsmanagement in de handel.",
        ),
    ),
    (
        "ISO 22000",
        t(
            "Food safety management system according to international standards.",
            "Managementsysteem voor voedselveiligheid volgens internationale normen.",
        ),
    ),
];

pub fn certifications(locale: Locale) -> Vec<CertificationEntry> {
    CERTIFICATIONS
        .iter()
        .map(|(title, description)| CertificationEntry {
            title: title.to_string(),
            description: description.get(locale).to_string(),
            issuer: None,
            issued: None,
            valid_until: None,
            image_url: None,
        })
        .collect()
}

/// Company details from configuration, with the localized description.
pub fn company(config: &CompanyConfig, locale: Locale) -> CompanyDetails {
    CompanyDetails {
        name: config.name.clone(),
        tagline: config.tagline.clone(),
        description: messages(locale).footer.description.clone(),
        address: config.address_locality.clone(),
        phone: config.phone.clone(),
        email: config.email.clone(),
        hours_weekdays: config.hours_weekdays.clone(),
        hours_weekend: config.hours_weekend.clone(),
        social: Vec::new(),
        provenance: Provenance::Fallback,
    }
}

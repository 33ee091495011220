//! CLI output formatting.
//!
//! Output is information-first: each entity leads with what it is (a locale,
//! a listing, a page) and file paths follow as secondary context.
//!
//! ## Check
//!
//! ```text
//! Content source: https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production
//! en
//!     products: 9 (fallback)
//!     blog posts: 3 (cms)
//!     faqs: 6 (fallback)
//!     certifications: 2 (fallback)
//!     company: fallback
//! nl
//!     ...
//! ```
//!
//! ## Export
//!
//! ```text
//! en
//!     001 / → en/index.html
//!     002 /about → en/about/index.html
//! nl
//!     ...
//! Files
//!     index.html
//!     sitemap.xml
//!
//! Exported 40 pages in 2 locales, 6 other files → dist
//! ```
//!
//! Each command has a `format_*` function returning lines, for testing, and a
//! `print_*` wrapper that writes them to stdout.

use crate::export::ExportSummary;
use crate::locale::Locale;
use crate::types::Inventory;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(source: &str, inventories: &[Inventory]) -> Vec<String> {
    let mut lines = vec![format!("Content source: {source}")];
    for inventory in inventories {
        lines.push(inventory.locale.to_string());
        for listing in &inventory.listings {
            lines.push(format!(
                "{}{}: {} ({})",
                indent(1),
                listing.name,
                listing.count,
                listing.provenance.as_str()
            ));
        }
        lines.push(format!("{}company: {}", indent(1), inventory.company.as_str()));
    }
    lines
}

pub fn print_check_output(source: &str, inventories: &[Inventory]) {
    for line in format_check_output(source, inventories) {
        println!("{}", line);
    }
}

// ============================================================================
// Export
// ============================================================================

pub fn format_export_output(summary: &ExportSummary, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for locale in Locale::ALL {
        let pages: Vec<_> = summary.pages.iter().filter(|p| p.locale == locale).collect();
        if pages.is_empty() {
            continue;
        }
        lines.push(locale.to_string());
        for (i, page) in pages.iter().enumerate() {
            let path = page.route.path();
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(i + 1),
                if path.is_empty() { "/" } else { path.as_str() },
                page.file.display()
            ));
        }
    }

    if !summary.extra_files.is_empty() {
        lines.push("Files".to_string());
        for file in &summary.extra_files {
            lines.push(format!("{}{}", indent(1), file.display()));
        }
    }

    let locales = Locale::ALL
        .iter()
        .filter(|l| summary.pages.iter().any(|p| p.locale == **l))
        .count();
    lines.push(String::new());
    lines.push(format!(
        "Exported {} {} in {} {}, {} other {} → {}",
        summary.pages.len(),
        if summary.pages.len() == 1 { "page" } else { "pages" },
        locales,
        if locales == 1 { "locale" } else { "locales" },
        summary.extra_files.len(),
        if summary.extra_files.len() == 1 { "file" } else { "files" },
        output_dir.display()
    ));
    lines
}

pub fn print_export_output(summary: &ExportSummary, output_dir: &Path) {
    for line in format_export_output(summary, output_dir) {
        println!("{}", line);
    }
}

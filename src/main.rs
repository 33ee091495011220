use clap::{Parser, Subcommand};
use lar_site::logging::{self, LogFormat};
use lar_site::locale::Locale;
use lar_site::site::Site;
use lar_site::{config, export, output, server};
use std::path::PathBuf;
use std::sync::Arc;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; version_string runs a single time at startup.
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "lar-site")]
#[command(about = "Bilingual website for LAR Group B.V.")]
#[command(long_about = "\
Bilingual website for LAR Group B.V.

Serves the English and Dutch site with content from the Sanity CMS. Every
page falls back to built-in content when the CMS is unconfigured, empty or
unreachable, so the site always renders.

Pages:

  /{en,nl}                               Home
  /{en,nl}/about                         About
  /{en,nl}/products[?category=&sort=&q=] Product catalog
  /{en,nl}/products/{slug}               Product detail
  /{en,nl}/blog, /{en,nl}/blog/{slug}    Blog
  /{en,nl}/faq                           FAQ
  /{en,nl}/quality-and-certifications    Certifications
  /{en,nl}/contact, /{en,nl}/quote       Lead forms

Configuration: config.toml (all keys optional), overridden by SITE_URL,
SANITY_PROJECT_ID, SANITY_DATASET, SANITY_API_TOKEN, SANITY_USE_CDN,
CONTACT_FORM_URL, QUOTE_FORM_URL, GA_MEASUREMENT_ID, GTM_ID and
GOOGLE_SITE_VERIFICATION.

Run 'lar-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Configuration file (optional)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Listen address (overrides [server] bind)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Render every page to a static directory
    Export {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Resolve all content and report where it comes from
    Check,
    /// Print sitemap.xml
    Sitemap,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });
    let load = || config::load_config(&cli.config, |key| std::env::var(key).ok());

    match cli.command {
        Command::Serve { bind } => {
            let site_config = load()?;
            let addr = bind.unwrap_or_else(|| site_config.server.bind.clone());
            let site = Arc::new(Site::new(site_config)?);
            server::serve(site, &addr).await?;
        }
        Command::Export { output: output_dir } => {
            let site = Site::new(load()?)?;
            println!("==> Exporting → {}", output_dir.display());
            let summary = export::export(&site, &output_dir).await?;
            output::print_export_output(&summary, &output_dir);
        }
        Command::Check => {
            let site = Site::new(load()?)?;
            println!("==> Checking content");
            let mut inventories = Vec::new();
            for locale in Locale::ALL {
                inventories.push(site.content().inventory(locale).await);
            }
            output::print_check_output(&site.content().describe(), &inventories);
            println!("==> Configuration is valid");
        }
        Command::Sitemap => {
            let site = Site::new(load()?)?;
            print!("{}", site.sitemap_xml(chrono::Utc::now()));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

//! # Undersign CLI
//!
//! Command-line interface for composing signed agreements.
//!
//! ## Usage
//!
//! ```bash
//! # List available locales
//! undersign locales
//!
//! # Compose a signed document from a signature PNG
//! undersign compose --name "Jane Doe" --organization Acme \
//!     --date 2024-01-15 --signature signature.png
//!
//! # Traditional Chinese, with a CJK-capable font
//! undersign compose --locale zh-TW --font fonts/NotoSansTC.ttf \
//!     --name 王小明 --organization 三年二班 --signature signature.png
//!
//! # Run the HTTP server
//! undersign serve --listen 0.0.0.0:8080
//! ```

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use undersign::{
    UndersignError,
    compose::{AssetPaths, Composer, DEFAULT_FONT_PATH, DEFAULT_LOGO_PATH},
    content::{ContentTable, Locale},
    input::{FormValues, SignatureBitmap},
    page::PageConfig,
    server::{self, ServerConfig},
};

/// Undersign - signed agreement composer
#[derive(Parser, Debug)]
#[command(name = "undersign")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that renders documents.
#[derive(Args, Debug)]
struct RenderOptions {
    /// TrueType/OpenType font for all document text
    #[arg(long, value_name = "FILE", default_value = DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Logo image placed above the title
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOGO_PATH)]
    logo: PathBuf,

    /// JSON content table replacing the built-in agreement text
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// JSON page geometry (missing fields keep their defaults)
    #[arg(long, value_name = "FILE")]
    page_config: Option<PathBuf>,
}

impl RenderOptions {
    fn assets(&self) -> AssetPaths {
        AssetPaths {
            font: Some(self.font.clone()),
            logo: Some(self.logo.clone()),
        }
    }

    fn content_table(&self) -> Result<ContentTable, UndersignError> {
        match &self.content {
            Some(path) => ContentTable::load(path),
            None => Ok(ContentTable::builtin().clone()),
        }
    }

    fn page_config(&self) -> Result<PageConfig, UndersignError> {
        match &self.page_config {
            Some(path) => PageConfig::load(path),
            None => Ok(PageConfig::standard()),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available locales
    Locales {
        /// JSON content table to list instead of the built-in one
        #[arg(long, value_name = "FILE")]
        content: Option<PathBuf>,
    },

    /// Compose a signed document and write it as PNG
    Compose {
        /// Locale tag (en, zh-TW)
        #[arg(long, default_value = "en")]
        locale: Locale,

        /// Signer's name
        #[arg(long)]
        name: String,

        /// Signer's class or organization
        #[arg(long)]
        organization: String,

        /// Signing date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Signature image (PNG with transparent background)
        #[arg(long, value_name = "FILE")]
        signature: PathBuf,

        /// Directory to write the document into
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        #[command(flatten)]
        render: RenderOptions,
    },

    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        #[command(flatten)]
        render: RenderOptions,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("undersign=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), UndersignError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Locales { content } => {
            let table = match content {
                Some(path) => ContentTable::load(&path)?,
                None => ContentTable::builtin().clone(),
            };
            println!("Available locales:");
            for locale in table.locales() {
                println!("  {:<6} {}", locale.tag(), locale.display_name());
            }
        }

        Commands::Compose {
            locale,
            name,
            organization,
            date,
            signature,
            out_dir,
            render,
        } => {
            let bundle = render.content_table()?.bundle(locale)?;
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let form = FormValues::new(name, organization, date);
            if !form.is_complete() {
                return Err(UndersignError::Config(bundle.incomplete_warning.clone()));
            }

            let signature = load_signature(&signature)?;
            if signature.is_blank() {
                eprintln!("Warning: {}", bundle.blank_signature_warning);
            }

            let composer = Composer::new(render.page_config()?)?;
            let document = composer.compose(&bundle, &form, &signature, &render.assets())?;

            for advisory in &document.advisories {
                eprintln!("Warning: {}", advisory);
            }

            std::fs::create_dir_all(&out_dir)?;
            let path = out_dir.join(&document.filename);
            std::fs::write(&path, &document.png)?;
            println!(
                "Saved {} ({}x{})",
                path.display(),
                document.image.width(),
                document.image.height()
            );
        }

        Commands::Serve { listen, render } => {
            let mut config = ServerConfig::new(listen, render.assets());
            config.page = render.page_config()?;
            config.content = render.content_table()?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}

/// Read a signature image from disk.
fn load_signature(path: &Path) -> Result<SignatureBitmap, UndersignError> {
    let bytes = std::fs::read(path)?;
    SignatureBitmap::from_encoded(&bytes)
}

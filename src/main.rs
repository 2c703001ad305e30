//! # Hangtag CLI
//!
//! Command-line interface for generating hang-tag labels from order sheets.
//!
//! ## Usage
//!
//! ```bash
//! # List the products found in a workbook
//! hangtag products orders.xlsx
//!
//! # Search by name, order number or product code
//! hangtag products orders.xlsx --search PO-2024
//!
//! # Count labels for a job
//! hangtag stats orders.xlsx --spare 100 --styles chinese,silver
//!
//! # Write the PDF into ./out
//! hangtag generate orders.xlsx --font msyh.ttf --out out
//!
//! # Render the third label as PNG
//! hangtag preview orders.xlsx --font msyh.ttf --png label.png --index 2
//!
//! # Start the HTTP API
//! hangtag serve --font msyh.ttf --listen 0.0.0.0:8080
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hangtag::{
    HangtagError, ProductRecord,
    document::{self, DEFAULT_DOCUMENT_LABEL},
    font::LabelFont,
    labels::{self, LabelJobConfig, LabelStats, StyleSet},
    layout::{BoldStrategy, RenderOptions},
    preview::{self, DEFAULT_DPI},
    server::{self, ServerConfig},
    sheet::{self, FieldKeywords},
};

/// Hangtag - Garment hang-tag label generator
#[derive(Parser, Debug)]
#[command(name = "hangtag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file overriding the header keywords
    #[arg(long, global = true, value_name = "FILE")]
    keywords: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the products parsed from a workbook
    Products {
        /// Workbook (.xlsx or .xls)
        file: PathBuf,

        /// Only show products whose name, order number or code contains TERM
        #[arg(long, value_name = "TERM")]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how many labels a job will produce
    Stats {
        file: PathBuf,

        /// Comma-separated product ids (default: all)
        #[arg(long, value_name = "IDS")]
        select: Option<String>,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Generate the label PDF
    Generate {
        file: PathBuf,

        /// TrueType font with the glyphs to print
        #[arg(long, value_name = "TTF")]
        font: PathBuf,

        /// Output directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,

        /// Comma-separated product ids (default: all)
        #[arg(long, value_name = "IDS")]
        select: Option<String>,

        /// Name part of the output file
        #[arg(long, default_value = DEFAULT_DOCUMENT_LABEL)]
        label: String,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Render one label to PNG
    Preview {
        file: PathBuf,

        #[arg(long, value_name = "TTF")]
        font: PathBuf,

        /// Output PNG path
        #[arg(long, value_name = "FILE")]
        png: PathBuf,

        /// Zero-based label index in document order
        #[arg(long, default_value = "0")]
        index: usize,

        /// Preview resolution
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: f32,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Start the HTTP API
    Serve {
        /// Font for PDFs and previews; those endpoints are disabled without it
        #[arg(long, value_name = "TTF")]
        font: Option<PathBuf>,

        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Name part of generated file names
        #[arg(long, default_value = DEFAULT_DOCUMENT_LABEL)]
        label: String,

        /// Disable faux-bold text
        #[arg(long)]
        plain: bool,

        /// Minutes an uploaded product list is kept without access
        #[arg(long, value_name = "MIN", default_value = "60")]
        list_ttl: u64,
    },
}

/// Job settings shared by the generating commands.
#[derive(Args, Debug)]
struct JobArgs {
    /// JSON job configuration; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Quantity printed on spare labels
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    spare: Option<i64>,

    /// Font size of the product name row, in points
    #[arg(long, value_name = "PT")]
    font_size: Option<f32>,

    /// Comma-separated styles: chinese, english, silver
    #[arg(long, value_name = "LIST")]
    styles: Option<String>,

    /// Disable faux-bold text
    #[arg(long)]
    plain: bool,
}

impl JobArgs {
    fn job_config(&self) -> Result<LabelJobConfig, HangtagError> {
        let mut config = match &self.config {
            Some(path) => LabelJobConfig::from_json_file(path)?,
            None => LabelJobConfig::default(),
        };
        if let Some(spare) = self.spare {
            config.spare_quantity_per_style = spare;
        }
        if let Some(size) = self.font_size {
            config.primary_font_size = size;
        }
        if let Some(list) = &self.styles {
            config.enabled_styles = StyleSet::parse_list(list)?;
        }
        config.validate()?;
        Ok(config)
    }

    fn render_options(&self) -> RenderOptions {
        render_options(self.plain)
    }
}

fn render_options(plain: bool) -> RenderOptions {
    RenderOptions {
        bold: if plain {
            BoldStrategy::Single
        } else {
            BoldStrategy::default()
        },
        ..RenderOptions::default()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hangtag=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), HangtagError> {
    let cli = Cli::parse();
    let keywords = load_keywords(cli.keywords.as_deref())?;

    match cli.command {
        Commands::Products { file, search, json } => {
            let products = load_products(&file, &keywords).await?;
            let shown: Vec<&ProductRecord> = match &search {
                Some(term) => labels::search(&products, term),
                None => products.iter().collect(),
            };

            if json {
                let text = serde_json::to_string_pretty(&shown)
                    .map_err(|e| HangtagError::Render(format!("JSON encoding failed: {}", e)))?;
                println!("{}", text);
            } else {
                print_products(&shown);
            }
        }

        Commands::Stats { file, select, job } => {
            let config = job.job_config()?;
            let products = load_products(&file, &keywords).await?;
            let products = apply_selection(products, select.as_deref())?;
            print_stats(&LabelStats::compute(&products, &config));
        }

        Commands::Generate {
            file,
            font,
            out,
            select,
            label,
            job,
        } => {
            let config = job.job_config()?;
            let font = LabelFont::from_file(&font)?;
            let products = load_products(&file, &keywords).await?;
            let products = apply_selection(products, select.as_deref())?;
            let instances = labels::expand(&products, &config)?;

            let today = chrono::Local::now().date_naive();
            let options = job.render_options();
            let generated =
                document::generate_pdf(&instances, &config, &font, &options, today, &label)?;

            std::fs::create_dir_all(&out)?;
            let path = out.join(&generated.filename);
            std::fs::write(&path, &generated.bytes)?;
            println!("Wrote {} ({} labels)", path.display(), generated.pages);
        }

        Commands::Preview {
            file,
            font,
            png,
            index,
            dpi,
            job,
        } => {
            let config = job.job_config()?;
            let font = LabelFont::from_file(&font)?;
            let products = load_products(&file, &keywords).await?;
            let instances = labels::expand(&products, &config)?;
            let instance = instances.get(index).ok_or_else(|| {
                HangtagError::Configuration(format!(
                    "label index {} out of range ({} labels)",
                    index,
                    instances.len()
                ))
            })?;

            let bytes = preview::render_preview(instance, &config, &font, &job.render_options(), dpi)?;
            std::fs::write(&png, bytes)?;
            println!("Saved label {} ({}) to {}", index, instance.title, png.display());
        }

        Commands::Serve {
            font,
            listen,
            label,
            plain,
            list_ttl,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                font_path: font,
                keywords,
                render: render_options(plain),
                document_label: label,
                list_ttl: std::time::Duration::from_secs(list_ttl * 60),
                ..ServerConfig::default()
            };
            server::serve(config).await?;
        }
    }

    Ok(())
}

fn load_keywords(path: Option<&Path>) -> Result<FieldKeywords, HangtagError> {
    let Some(path) = path else {
        return Ok(FieldKeywords::default());
    };
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        HangtagError::Configuration(format!("invalid keywords file {}: {}", path.display(), e))
    })
}

/// Read the workbook, abandoning the read on Ctrl-C.
async fn load_products(
    path: &Path,
    keywords: &FieldKeywords,
) -> Result<Vec<ProductRecord>, HangtagError> {
    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let Some(grid) = sheet::load_grid_until(path, cancel).await? else {
        warn!(path = %path.display(), "read cancelled");
        return Err(HangtagError::SourceRead("read cancelled".to_string()));
    };

    let products = sheet::parse_products(&grid, keywords)?;
    info!(path = %path.display(), products = products.len(), "parsed workbook");
    Ok(products)
}

fn apply_selection(
    products: Vec<ProductRecord>,
    ids: Option<&str>,
) -> Result<Vec<ProductRecord>, HangtagError> {
    match ids {
        Some(list) => {
            let ids: Vec<&str> = list.split(',').map(str::trim).collect();
            labels::select(&products, ids.as_slice())
        }
        None => Ok(products),
    }
}

fn print_products(products: &[&ProductRecord]) {
    println!(
        "{:<12} {:<24} {:<16} {:<16} {:>8}  {}",
        "ID", "NAME", "ORDER", "CODE", "QTY", "REMARKS"
    );
    for p in products {
        println!(
            "{:<12} {:<24} {:<16} {:<16} {:>8}  {}",
            p.id, p.product_name, p.order_number, p.product_code, p.quantity, p.remarks
        );
    }
    println!("\n{} product(s)", products.len());
}

fn print_stats(stats: &LabelStats) {
    println!("Products:       {}", stats.selected_products);
    println!("Styles:         {}", stats.enabled_styles);
    println!("Package labels: {}", stats.regular_labels);
    println!("Spare labels:   {}", stats.spare_labels);
    println!("Total labels:   {}", stats.total_labels);
}

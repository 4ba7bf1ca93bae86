//! Command line front end for the storefront catalog client.
//!
//! Mainly a manual testing tool: each subcommand drives one listing or
//! taxonomy flow against the API configured via `SHOPFRONT_*` env vars.

use clap::{Parser, Subcommand};
use shopfront_catalog::{CatalogClient, CategoryTree, ListingController, ListingPhase, ListingSource};
use shopfront_core::{load_app_config, FilterState, SortKey, StockFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopfront-cli")]
#[command(about = "Storefront catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the general product listing with optional filters.
    Browse(ListingArgs),
    /// Search products by keyword.
    Search {
        query: String,
        #[command(flatten)]
        args: ListingArgs,
    },
    /// List the direct children of a category (roots live under their
    /// configured root id).
    Categories {
        /// Parent category id to expand.
        parent: i64,
    },
    /// Show a single product by id.
    Show { id: i64 },
}

#[derive(Debug, clap::Args)]
struct ListingArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    page_size: Option<u32>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    /// Minimum discount percent, e.g. 20.
    #[arg(long)]
    min_discount: Option<u32>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    size: Option<String>,
    /// One of: price_asc, price_desc, newest, oldest, rating.
    #[arg(long)]
    sort: Option<String>,
    #[arg(long, conflicts_with = "out_of_stock")]
    in_stock: bool,
    #[arg(long)]
    out_of_stock: bool,
}

impl ListingArgs {
    fn to_filter(&self, default_page_size: u32) -> anyhow::Result<FilterState> {
        let sort = match self.sort.as_deref() {
            None => None,
            Some("price_asc") => Some(SortKey::PriceAsc),
            Some("price_desc") => Some(SortKey::PriceDesc),
            Some("newest") => Some(SortKey::Newest),
            Some("oldest") => Some(SortKey::Oldest),
            Some("rating") => Some(SortKey::Rating),
            Some(other) => anyhow::bail!("unknown sort key: {other}"),
        };
        let stock = if self.in_stock {
            StockFilter::InStock
        } else if self.out_of_stock {
            StockFilter::OutOfStock
        } else {
            StockFilter::Any
        };
        Ok(FilterState {
            min_price: self.min_price,
            max_price: self.max_price,
            min_discount: self.min_discount,
            stock,
            color: self.color.clone(),
            size: self.size.clone(),
            sort,
            page: self.page,
            page_size: self.page_size.unwrap_or(default_page_size),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let client = CatalogClient::from_config(&config)?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Browse(args) => {
            let filter = args.to_filter(config.default_page_size)?;
            let mut controller = ListingController::new(
                client,
                ListingSource::All,
                config.image_base_url.clone(),
                config.cache_ttl(),
            );
            run_listing(&mut controller, &filter).await
        }
        Commands::Search { query, args } => {
            let filter = args.to_filter(config.default_page_size)?;
            let mut controller = ListingController::new(
                client,
                ListingSource::Search(query),
                config.image_base_url.clone(),
                config.cache_ttl(),
            );
            run_listing(&mut controller, &filter).await
        }
        Commands::Categories { parent } => {
            let tree = CategoryTree::new(client);
            let children = tree.children(parent).await?;
            if children.is_empty() {
                println!("category {parent} has no children");
            }
            for child in children {
                println!("{:>6}  L{}  {}", child.id, child.level, child.name);
            }
            Ok(())
        }
        Commands::Show { id } => {
            let raw = client.fetch_product(id).await?;
            let product = shopfront_catalog::normalize_product(raw, &config.image_base_url);
            println!("{} — {}", product.id, product.title);
            if let Some(brand) = &product.brand {
                println!("  brand:    {brand}");
            }
            print_price_line(&product);
            println!(
                "  rating:   {:.1} ({} reviews)",
                product.rating_avg, product.rating_count
            );
            println!("  stock:    {}", product.total_stock);
            for size in &product.sizes {
                let marker = if size.is_selectable() { " " } else { "x" };
                println!("    [{marker}] {}  ({})", size.name, size.quantity);
            }
            println!("  image:    {}", product.image_url);
            Ok(())
        }
    }
}

async fn run_listing(
    controller: &mut ListingController,
    filter: &FilterState,
) -> anyhow::Result<()> {
    controller.load(filter).await;
    match controller.phase() {
        ListingPhase::Ready => {
            let page = controller
                .page()
                .expect("ready phase always carries a page");
            println!(
                "page {}/{} — {} products total",
                page.current_page, page.total_pages, page.total_elements
            );
            for product in &page.products {
                println!(
                    "{:>6}  {}  [stock {}]",
                    product.id, product.title, product.total_stock
                );
                print_price_line(product);
            }
            Ok(())
        }
        ListingPhase::Error => {
            let message = controller
                .error()
                .map_or_else(|| "unknown error".to_string(), ToString::to_string);
            anyhow::bail!("listing failed: {message}")
        }
        ListingPhase::Idle | ListingPhase::Loading => {
            anyhow::bail!("listing did not complete")
        }
    }
}

fn print_price_line(product: &shopfront_core::DisplayProduct) {
    if product.is_discounted() {
        println!(
            "  price:    {:.2} (was {:.2}, -{}%)",
            product.discounted_price, product.price, product.discount_percent
        );
    } else {
        println!("  price:    {:.2}", product.price);
    }
}

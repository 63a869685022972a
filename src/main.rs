use clap::{Parser, Subcommand};
use product_page::similar::{PriceRangeOption, ShippingPrograms, SortBy};
use product_page::styling::{Rendering, StyleEncoder};
use product_page::types::{Product, ShippingProgram};
use product_page::{ProductPage, config, output};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "product-page")]
#[command(about = "Styled image URLs and similar-product lists for product pages")]
#[command(long_about = "\
Styled image URLs and similar-product lists for product pages

Product records are read as JSON. Image URLs follow the CDN style-code
grammar, e.g.

  https://PROD/images/I/41abcDEF._AC_SL500_.jpg

Run 'product-page gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a style rendering onto a media record and print the URL
    ImageUrl {
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
        #[arg(long)]
        physical_id: String,
        #[arg(long)]
        extension: Option<String>,
        /// CDN host (defaults to images.cdn_host from config)
        #[arg(long)]
        cdn: Option<String>,
        /// Style tokens to apply in order, e.g. "_AC_SL500"
        #[arg(long, default_value = "")]
        rendering: String,
    },
    /// Print the main and look image URLs of a product
    Images {
        /// Product JSON file
        product: PathBuf,
        /// Longest side in pixels (defaults to images.longest_dimension)
        #[arg(long)]
        longest: Option<i32>,
    },
    /// Print the filtered, ordered similar products of a product
    Similar {
        /// Product JSON file
        product: PathBuf,
        /// Sort key; unknown keys keep relevance order
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        price_range: Option<PriceRangeOption>,
        /// Allowed shipping programs (repeatable)
        #[arg(long = "shipping", value_delimiter = ',')]
        shipping: Vec<ShippingProgram>,
        /// Longest side of thumbnail images
        #[arg(long)]
        longest: Option<i32>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let page_config = config::load_config(&cli.config_dir)?;
    debug!(?page_config, "loaded config");

    match cli.command {
        Command::ImageUrl {
            width,
            height,
            physical_id,
            extension,
            cdn,
            rendering,
        } => {
            let rendering: Rendering = rendering.parse()?;
            let mut encoder = StyleEncoder::new(width, height)
                .physical_id(physical_id)
                .cdn(cdn.unwrap_or_else(|| page_config.images.cdn_host.clone()));
            if let Some(extension) = extension {
                encoder = encoder.extension(extension);
            }
            let media = encoder.apply_all(&rendering)?.build();
            match media.url {
                Some(url) => println!("{}", url),
                None => println!("(unrenderable: {}x{})", media.width, media.height),
            }
        }
        Command::Images { product, longest } => {
            let product = read_product(&product)?;
            let longest = longest.unwrap_or(page_config.images.longest_dimension);
            let page = ProductPage::new(&product).with_cdn(page_config.images.cdn_host.clone());
            let main = page.main_image_url(longest)?;
            let look = page.variant_image_url(&page_config.images.look_variant, longest)?;
            output::print_product_images(&product, main.as_deref(), look.as_deref());
        }
        Command::Similar {
            product,
            sort_by,
            price_range,
            shipping,
            longest,
        } => {
            init_thread_pool(&page_config.processing);
            let product = read_product(&product)?;
            let sort_by = sort_by
                .as_deref()
                .map(SortBy::from_key)
                .unwrap_or(page_config.similar.sort_by);
            let price_range = price_range.unwrap_or(page_config.similar.price_range);
            let shipping = if shipping.is_empty() {
                page_config.similar.shipping_filter()
            } else {
                ShippingPrograms::new(shipping)
            };
            let longest = longest.unwrap_or(page_config.images.longest_dimension);

            let page = ProductPage::new(&product).with_cdn(page_config.images.cdn_host.clone());
            let similar = page.similar_products(sort_by, &price_range.range(), &shipping);
            let thumbnails = page.thumbnail_urls(&similar, longest)?;
            output::print_similar_products(&similar, &thumbnails, sort_by, price_range);
        }
        Command::GenConfig => {}
    }

    Ok(())
}

fn read_product(path: &Path) -> Result<Product, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "product_page=debug"
    } else {
        "product_page=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

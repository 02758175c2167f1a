//! # Custom-Size Quote Tool
//!
//! Fetches a product, applies a size choice and prints the price. Optionally
//! adds the result to the configured session's cart.
//!
//! ## Usage
//! ```bash
//! # Quote a 4ft x 3ft custom rug
//! cargo run -p woodnest-client --bin quote -- --product rug-1 --length 4 --width 3
//!
//! # Quote a round table top
//! cargo run -p woodnest-client --bin quote -- --product top-7 --diameter 2
//!
//! # Pick a ready-made size and add two to the cart
//! cargo run -p woodnest-client --bin quote -- --product table-1 --variant 6s --quantity 2 --add
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;
use woodnest_client::{CartService, CartStore, ClientConfig, HttpStorefrontApi, StorefrontApi};
use woodnest_core::{MeasurementField, SizeSelection};

struct Args {
    product: String,
    variant: Option<String>,
    measurements: Vec<(MeasurementField, String)>,
    notes: Option<String>,
    quantity: u32,
    add: bool,
    config: Option<PathBuf>,
}

fn print_help() {
    println!("Usage: quote --product <ID> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -p, --product <ID>      Product to quote (required)");
    println!("  -v, --variant <ID>      Ready-made size variant");
    println!("      --length <N>        Custom length");
    println!("      --width <N>         Custom width");
    println!("      --height <N>        Custom height");
    println!("      --area <N>          Custom area");
    println!("      --diameter <N>      Custom diameter");
    println!("      --notes <TEXT>      Notes for a custom size");
    println!("  -q, --quantity <N>      Quantity to add (default: 1)");
    println!("      --add               Add the selection to the cart");
    println!("  -c, --config <PATH>     Config file path");
    println!("  -h, --help              Show this help message");
}

fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let mut parsed = Args {
        product: String::new(),
        variant: None,
        measurements: Vec::new(),
        notes: None,
        quantity: 1,
        add: false,
        config: None,
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .cloned()
                .with_context(|| format!("{} needs a value", flag))
        };

        match flag {
            "--product" | "-p" => parsed.product = value()?,
            "--variant" | "-v" => parsed.variant = Some(value()?),
            "--length" | "--width" | "--height" | "--area" | "--diameter" => {
                let field: MeasurementField = flag
                    .trim_start_matches("--")
                    .parse()
                    .map_err(anyhow::Error::msg)?;
                parsed.measurements.push((field, value()?));
            }
            "--notes" => parsed.notes = Some(value()?),
            "--quantity" | "-q" => {
                parsed.quantity = value()?.parse().context("quantity must be a whole number")?
            }
            "--config" | "-c" => parsed.config = Some(PathBuf::from(value()?)),
            "--add" => {
                parsed.add = true;
                i += 1;
                continue;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => bail!("unknown argument '{}' (see --help)", other),
        }
        i += 2;
    }

    if parsed.product.is_empty() {
        bail!("--product is required (see --help)");
    }
    if parsed.variant.is_some() && !parsed.measurements.is_empty() {
        bail!("--variant cannot be combined with custom measurements");
    }
    Ok(Some(parsed))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,woodnest=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let argv: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&argv)? else {
        return Ok(());
    };
    init_tracing();

    let config = ClientConfig::load(args.config.clone()).context("loading configuration")?;
    let api = Arc::new(HttpStorefrontApi::new(&config)?);

    let product = api
        .fetch_product(&args.product)
        .await
        .with_context(|| format!("fetching product {}", args.product))?;
    println!("{} (base price {})", product.name, product.price);

    let mut selection = SizeSelection::new(&product);
    if let Some(variant) = &args.variant {
        selection.select_variant(variant)?;
    } else if !args.measurements.is_empty() {
        selection.switch_to_custom()?;
        for (field, input) in &args.measurements {
            selection.set_measurement_input(*field, input);
        }
        selection.set_notes(args.notes.clone());
    }

    if let Some(quote) = selection.quote().filter(|_| !args.measurements.is_empty()) {
        println!(
            "Area: {:.2} sq {}  Price: {}{}",
            quote.area,
            quote.unit,
            quote.price,
            if quote.minimum_charge_applied {
                " (minimum charge)"
            } else {
                ""
            }
        );
        let missing = selection.missing_fields();
        if !missing.is_empty() {
            let names: Vec<_> = missing.iter().map(|f| f.as_str()).collect();
            println!("Missing: {}", names.join(", "));
        }
    } else {
        println!("Price: {}", selection.display_price());
    }

    if args.add {
        let service = CartService::new(api.clone(), Arc::new(CartStore::default()));
        let cart = service.add_to_cart(&selection, args.quantity).await?;
        let totals = service.store().state().totals();
        println!(
            "Added. Cart: {} line(s), {} item(s), total {}",
            totals.item_count,
            totals.total_quantity,
            cart.total()
        );
    }

    Ok(())
}

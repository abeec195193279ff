//! # Canasta Storefront
//!
//! Terminal storefront over the canasta crates: browse the catalog, build a
//! cart that persists between runs, apply coupons, pick shipping, check out.
//!
//! ## Module Organization
//! ```text
//! canasta-storefront/
//! ├── main.rs         ◄─── You are here (startup & REPL)
//! ├── config.rs       ◄─── AppConfig (env overrides, money formatting)
//! ├── session.rs      ◄─── Session + Intent dispatch
//! ├── checkout.rs     ◄─── Simulated order submission
//! ├── render.rs       ◄─── Pure string views (catalog, cart, receipt)
//! └── error.rs        ◄─── UiError for intent handlers
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO (canasta crates at DEBUG), override with RUST_LOG   │
//! │                                                                         │
//! │  2. Resolve Data Directory ───────────────────────────────────────────► │
//! │     • CANASTA_DATA_DIR override, else the platform app-data dir         │
//! │     • Linux: ~/.local/share/storefront/                                 │
//! │                                                                         │
//! │  3. Open the Cart Store ──────────────────────────────────────────────► │
//! │     • FileStore keyed files ("carrito", "cuponAplicado")                │
//! │     • Restores the persisted cart and coupon; bad snapshots reset       │
//! │                                                                         │
//! │  4. Load the Catalog ─────────────────────────────────────────────────► │
//! │     • Built-in base list, tax-adjusted                                  │
//! │     • If CANASTA_FEED_URL is set: one fetch; failure keeps the base     │
//! │                                                                         │
//! │  5. Run the REPL ─────────────────────────────────────────────────────► │
//! │     • Parse a line into a Command / Intent                              │
//! │     • Dispatch through Session::handle                                  │
//! │     • Print the outcome, re-render the cart after every intent          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod config;
mod error;
mod render;
mod session;

use std::io::Write;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use canasta_core::Catalog;
use canasta_store::{feed, CartStore, FileStore, StringStore};

use config::AppConfig;
use error::{ErrorCode, UiError};
use session::{Intent, QuantityChange, Session};

const HELP: &str = "\
Commands:
  list                 Show the catalog
  find <product>       Exact product lookup
  filter <text>        Substring product search
  cart                 Show the cart and totals
  add <product> [qty]  Add a product, by name or catalog number
  inc <line>           Increase a line's quantity by one
  dec <line>           Decrease a line's quantity, stopping at 1
  qty <line> <n>       Set a line's quantity
  rm <line>            Remove a line
  coupon <code>        Apply a coupon (DESCUENTO10, DESCUENTO20)
  ship [n]             Show shipping options, or pick one
  clear                Empty the cart
  checkout             Submit the order
  refresh              Re-fetch the catalog feed
  quit                 Leave the storefront";

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("Fatal: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), UiError> {
    let config = AppConfig::from_env();
    info!(store = %config.store_name, "Starting storefront");

    let data_dir = resolve_data_dir(&config)?;
    info!(?data_dir, "Using data directory");

    let store = FileStore::open(&data_dir)?;
    let cart_store = CartStore::open(store)?;

    // The base catalog is always available; a configured feed can replace it
    let mut catalog = Catalog::base();
    let client = reqwest::Client::new();
    if let Some(url) = &config.feed_url {
        match feed::fetch_catalog(&client, url).await {
            Ok(products) => catalog = Catalog::new(products),
            Err(err) => {
                warn!(error = %err, url = %url, "Catalog fetch failed; using the base catalog")
            }
        }
    }

    let mut session = Session::new(cart_store, catalog, config);
    repl(&mut session, &client).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=canasta_store=trace` - Trace a single crate
/// - Default: INFO, with the canasta crates at DEBUG
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,canasta_core=debug,canasta_store=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the data directory for persisted cart state.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.canasta.storefront/`
/// - **Windows**: `%APPDATA%\canasta\storefront\`
/// - **Linux**: `~/.local/share/storefront/`
///
/// ## Development Override
/// Set `CANASTA_DATA_DIR` to use a custom path.
fn resolve_data_dir(config: &AppConfig) -> Result<PathBuf, UiError> {
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "canasta", "storefront").ok_or_else(|| {
        UiError::new(
            ErrorCode::StorageError,
            "Could not determine the app data directory",
        )
    })?;

    Ok(proj_dirs.data_dir().to_path_buf())
}

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Empty,
    Help,
    Quit,
    List,
    Cart,
    Find(String),
    Filter(String),
    ShipMenu,
    Refresh,
    Intent(Intent),
    Invalid(String),
}

async fn repl<S: StringStore>(
    session: &mut Session<S>,
    client: &reqwest::Client,
) -> Result<(), UiError> {
    println!("Welcome to {}", session.config().store_name);
    println!();
    println!(
        "{}",
        render::catalog_view(session.catalog(), session.config())
    );
    if !session.cart().is_empty() {
        println!("Restored your saved cart:");
        print_cart(session);
    }
    println!("Type 'help' for commands.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "Failed to read input");
                break;
            }
        }

        match parse_command(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::List => println!(
                "{}",
                render::catalog_view(session.catalog(), session.config())
            ),
            Command::Cart => print_cart(session),
            Command::Find(name) => match session.catalog().find(&name) {
                Some(product) => println!(
                    "  {:<24} {}",
                    product.name,
                    session.config().format_money(product.unit_price)
                ),
                None => println!("Product not found: {}", name.trim()),
            },
            Command::Filter(text) => {
                let hits = session.catalog().filter(&text);
                if hits.is_empty() {
                    println!("No products match '{}'", text.trim());
                } else {
                    for product in hits {
                        println!(
                            "  {:<24} {}",
                            product.name,
                            session.config().format_money(product.unit_price)
                        );
                    }
                }
            }
            Command::ShipMenu => println!("{}", render::shipping_menu(session.config())),
            Command::Refresh => refresh_catalog(session, client).await,
            Command::Intent(intent) => {
                let outcome = match resolve_intent(session, intent) {
                    Ok(intent) => session.handle(intent).await,
                    Err(err) => Err(err),
                };
                match outcome {
                    Ok(message) => println!("{}", message),
                    Err(err) => println!("{}", err),
                }
                print_cart(session);
            }
            Command::Invalid(message) => println!("{}", UiError::validation(message)),
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Re-fetches the catalog feed, keeping the current catalog on any failure.
async fn refresh_catalog<S: StringStore>(session: &mut Session<S>, client: &reqwest::Client) {
    let url = match session.config().feed_url.clone() {
        Some(url) => url,
        None => {
            println!("No feed configured; set CANASTA_FEED_URL to enable refresh");
            return;
        }
    };

    match feed::fetch_catalog(client, &url).await {
        Ok(products) => session.replace_catalog(products),
        Err(err) => {
            warn!(error = %err, url = %url, "Catalog refresh failed; keeping current catalog")
        }
    }
    println!(
        "{}",
        render::catalog_view(session.catalog(), session.config())
    );
}

fn print_cart<S: StringStore>(session: &Session<S>) {
    let totals = session.totals();
    println!(
        "{}",
        render::cart_view(
            session.cart(),
            session.coupon(),
            session.shipping(),
            &totals,
            session.config()
        )
    );
}

/// Resolves presentation-only shorthand before dispatch.
///
/// `add 3` means the third catalog entry; the session itself only knows
/// products by name.
fn resolve_intent<S: StringStore>(
    session: &Session<S>,
    intent: Intent,
) -> Result<Intent, UiError> {
    match intent {
        Intent::AddItem { name, quantity } => {
            if let Ok(position) = name.parse::<usize>() {
                let product = position
                    .checked_sub(1)
                    .and_then(|i| session.catalog().get(i))
                    .ok_or_else(|| UiError::not_found("Product", &name))?;
                return Ok(Intent::AddItem {
                    name: product.name.clone(),
                    quantity,
                });
            }
            Ok(Intent::AddItem { name, quantity })
        }
        other => Ok(other),
    }
}

/// Parses one input line. Pure, so the grammar is unit-testable.
fn parse_command(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    let verb = match parts.next() {
        Some(verb) => verb,
        None => return Command::Empty,
    };
    let args: Vec<&str> = parts.collect();

    match verb.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "list" | "catalog" => Command::List,
        "cart" => Command::Cart,
        "find" => {
            if args.is_empty() {
                Command::Invalid("Usage: find <product>".to_string())
            } else {
                Command::Find(args.join(" "))
            }
        }
        "filter" | "search" => Command::Filter(args.join(" ")),
        "add" => parse_add(&args),
        "inc" => match parse_position(&args) {
            Ok(position) => Command::Intent(Intent::ChangeQuantity {
                position,
                change: QuantityChange::Increment,
            }),
            Err(message) => Command::Invalid(message),
        },
        "dec" => match parse_position(&args) {
            Ok(position) => Command::Intent(Intent::ChangeQuantity {
                position,
                change: QuantityChange::Decrement,
            }),
            Err(message) => Command::Invalid(message),
        },
        "qty" => match parse_position(&args) {
            Ok(position) => {
                // Missing or non-numeric value falls back to 1
                let quantity = args.get(1).and_then(|t| t.parse::<i64>().ok()).unwrap_or(1);
                Command::Intent(Intent::ChangeQuantity {
                    position,
                    change: QuantityChange::Set(quantity),
                })
            }
            Err(message) => Command::Invalid(message),
        },
        "rm" | "remove" => match parse_position(&args) {
            Ok(position) => Command::Intent(Intent::RemoveItem { position }),
            Err(message) => Command::Invalid(message),
        },
        "coupon" => {
            if args.is_empty() {
                Command::Invalid("Usage: coupon <code>".to_string())
            } else {
                Command::Intent(Intent::ApplyCoupon {
                    code: args.join(" "),
                })
            }
        }
        "ship" | "shipping" => match args.first() {
            None => Command::ShipMenu,
            Some(token) => match token.parse::<usize>() {
                Ok(option) => Command::Intent(Intent::SelectShipping { option }),
                Err(_) => Command::Invalid(format!("'{}' is not a shipping option", token)),
            },
        },
        "clear" => Command::Intent(Intent::ClearCart),
        "checkout" | "buy" => Command::Intent(Intent::Checkout),
        "refresh" => Command::Refresh,
        other => Command::Invalid(format!("Unknown command '{}'; type 'help'", other)),
    }
}

/// Parses `add <name or #> [qty]`.
///
/// When a quantity token is present it must be numeric; a garbled quantity
/// is rejected here, before any cart mutation.
fn parse_add(args: &[&str]) -> Command {
    if args.is_empty() {
        return Command::Invalid("Usage: add <product> [qty]".to_string());
    }

    let (name_tokens, quantity) = if args.len() >= 2 {
        let qty_token = args[args.len() - 1];
        match qty_token.parse::<i64>() {
            Ok(quantity) => (&args[..args.len() - 1], quantity),
            Err(_) => {
                return Command::Invalid(format!("'{}' is not a quantity", qty_token));
            }
        }
    } else {
        (args, 1)
    };

    Command::Intent(Intent::AddItem {
        name: name_tokens.join(" "),
        quantity,
    })
}

fn parse_position(args: &[&str]) -> Result<usize, String> {
    let token = args
        .first()
        .ok_or_else(|| "A line number is required".to_string())?;
    token
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a line number", token))
}

// =============================================================================
// Unit Tests
// =============================================================================

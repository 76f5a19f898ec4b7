//! VOID CLI - the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! void products list --color negro --sort precio-asc
//! void products show 3
//!
//! # Shop as a guest, then log in (the cart follows the identity)
//! void cart add 3 7 --quantity 2
//! void login -e ana@void.store        # password from VOID_PASSWORD or -p
//! void cart show
//! void checkout
//!
//! # Ask the shopping assistant
//! void chat "¿Tienen buzos en talle L?"
//!
//! # Back office
//! void admin kpis
//! void admin update-product 3 --price 45999.50 --stock 12
//! void admin add-expense "Envíos" 12500 --category logística
//! ```
//!
//! # Environment Variables
//!
//! - `VOID_API_BASE_URL`, `VOID_STORAGE_PATH`, ... - see `void_storefront::config`
//! - `VOID_LOG_JSON` - Set to `1` for JSON log lines
//! - `RUST_LOG` - Log filter (default: `void_storefront=info,void_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use void_core::{
    CategoryId, NewExpense, NewVariant, ProductFilter, ProductId, ProductSort, ProductUpdate, Role,
    VariantId,
};
use void_storefront::config::ClientConfig;
use void_storefront::services::NotificationLevel;
use void_storefront::storage::FileStorage;
use void_storefront::{ClientError, Storefront};

mod commands;

#[derive(Parser)]
#[command(name = "void")]
#[command(author, version, about = "VOID storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "VOID_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out (the guest cart comes back)
    Logout,
    /// Show who requests are sent as
    Whoami,
    /// Create an account
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        last_name: String,

        #[arg(short, long, env = "VOID_PASSWORD", hide_env_values = true)]
        password: String,

        /// Phone country/area prefix, e.g. `+54 11`
        #[arg(long, requires = "phone_number")]
        phone_prefix: Option<String>,

        #[arg(long, requires = "phone_prefix")]
        phone_number: Option<String>,
    },
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Create a payment link for the current cart
    Checkout,
    /// List your orders
    Orders,
    /// Ask the shopping assistant a question
    Chat { question: String },
    /// Back-office commands (admin role required)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product variant
    Add {
        product: ProductId,
        variant: VariantId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a variant entirely
    Remove { variant: VariantId },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        #[arg(long)]
        material: Option<String>,

        /// Maximum price
        #[arg(long)]
        max_price: Option<Decimal>,

        #[arg(long)]
        category: Option<CategoryId>,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        sort: Option<SortArg>,

        #[arg(long)]
        skip: Option<u32>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: Option<u32>,
    },
    /// Show one product and its variants
    Show { id: ProductId },
    /// Free-text search
    Search { query: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Dashboard figures
    Kpis,
    /// List users
    Users,
    /// Change a user's role
    SetRole {
        user_id: String,

        /// `user` or `admin`
        role: Role,
    },
    /// List all orders
    Sales,
    /// Best seller, best stocked product and largest category
    ProductMetrics,
    /// Daily revenue and expenses per category
    Charts,
    /// List expenses
    Expenses,
    /// Record an expense
    AddExpense {
        description: String,
        amount: Decimal,

        #[arg(long)]
        category: Option<String>,

        /// Defaults to today (UTC), `YYYY-MM-DD`
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Edit a product (only the given fields change)
    UpdateProduct {
        id: ProductId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<Decimal>,

        #[arg(long)]
        stock: Option<u32>,

        #[arg(long)]
        category: Option<CategoryId>,
    },
    /// Add a size/color variant to a product
    AddVariant {
        id: ProductId,
        size: String,
        color: String,

        #[arg(long, default_value_t = 0)]
        stock: u32,
    },
    /// Delete a product
    DeleteProduct { id: ProductId },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    PrecioAsc,
    PrecioDesc,
    NombreAsc,
    NombreDesc,
}

impl From<SortArg> for ProductSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::PrecioAsc => Self::PrecioAsc,
            SortArg::PrecioDesc => Self::PrecioDesc,
            SortArg::NombreAsc => Self::NombreAsc,
            SortArg::NombreDesc => Self::NombreDesc,
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "void_storefront=info,void_cli=info".into());

    let json = std::env::var("VOID_LOG_JSON").is_ok_and(|v| v == "1");
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };
    init_tracing();

    let storage = Arc::new(FileStorage::new(&config.storage_path));
    let storefront = Storefront::init(config, storage).await;
    let mut notifications = storefront.notifier().subscribe();

    let result = run(&storefront, cli.command).await;

    let mut shown_error = false;
    while let Ok(notification) = notifications.try_recv() {
        shown_error |= notification.level == NotificationLevel::Error;
        commands::output::notification(&notification);
    }

    if let Err(e) = result {
        tracing::debug!(error = %e, "Command failed");
        if !shown_error {
            commands::output::error(&e.user_message());
        }
        std::process::exit(1);
    }
}

async fn run(storefront: &Storefront, command: Commands) -> Result<(), ClientError> {
    match command {
        Commands::Login { email, password } => {
            commands::account::login(storefront, &email, password).await?;
        }
        Commands::Logout => commands::account::logout(storefront).await,
        Commands::Whoami => commands::account::whoami(storefront).await?,
        Commands::Register {
            email,
            name,
            last_name,
            password,
            phone_prefix,
            phone_number,
        } => {
            let phone = phone_prefix
                .zip(phone_number)
                .map(|(prefix, number)| void_core::Phone { prefix, number });
            commands::account::register(storefront, &email, name, last_name, password, phone)
                .await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(storefront),
            CartAction::Add {
                product,
                variant,
                quantity,
            } => commands::cart::add(storefront, product, variant, quantity).await?,
            CartAction::Remove { variant } => commands::cart::remove(storefront, variant).await?,
        },
        Commands::Products { action } => match action {
            ProductsAction::List {
                material,
                max_price,
                category,
                size,
                color,
                sort,
                skip,
                limit,
            } => {
                let filter = ProductFilter {
                    material,
                    max_price,
                    category_id: category,
                    size,
                    color,
                    skip,
                    limit,
                    sort_by: sort.map(ProductSort::from),
                };
                commands::products::list(storefront, &filter).await?;
            }
            ProductsAction::Show { id } => commands::products::show(storefront, id).await?,
            ProductsAction::Search { query } => {
                commands::products::search(storefront, &query).await?;
            }
        },
        Commands::Checkout => commands::cart::checkout(storefront).await?,
        Commands::Orders => commands::account::orders(storefront).await?,
        Commands::Chat { question } => commands::chat::ask(storefront, &question).await?,
        Commands::Admin { action } => match action {
            AdminAction::Kpis => commands::admin::kpis(storefront).await?,
            AdminAction::Users => commands::admin::users(storefront).await?,
            AdminAction::SetRole { user_id, role } => {
                commands::admin::set_role(storefront, &user_id, role).await?;
            }
            AdminAction::Sales => commands::admin::sales(storefront).await?,
            AdminAction::ProductMetrics => commands::admin::product_metrics(storefront).await?,
            AdminAction::Charts => commands::admin::charts(storefront).await?,
            AdminAction::Expenses => commands::admin::expenses(storefront).await?,
            AdminAction::AddExpense {
                description,
                amount,
                category,
                date,
            } => {
                let expense = NewExpense {
                    description,
                    amount,
                    category,
                    date: date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
                };
                commands::admin::add_expense(storefront, &expense).await?;
            }
            AdminAction::UpdateProduct {
                id,
                name,
                description,
                price,
                stock,
                category,
            } => {
                let update = ProductUpdate {
                    name,
                    description,
                    price,
                    stock,
                    category_id: category,
                    ..ProductUpdate::default()
                };
                commands::admin::update_product(storefront, id, &update).await?;
            }
            AdminAction::AddVariant {
                id,
                size,
                color,
                stock,
            } => {
                let variant = NewVariant { size, color, stock };
                commands::admin::add_variant(storefront, id, &variant).await?;
            }
            AdminAction::DeleteProduct { id } => {
                commands::admin::delete_product(storefront, id).await?;
            }
        },
    }
    Ok(())
}

use anyhow::Context;
use clap::Parser;
use shop_cart::core::ConfigProvider;
use shop_cart::utils::error::{CartError, ErrorCategory};
use shop_cart::utils::{logger, validation::Validate};
use shop_cart::{
    Cart, CartManager, CliConfig, Command, ConsoleNotifier, HttpCatalog, LocalStorage,
    TomlConfig, UpdateProductAmount,
};
use std::fmt::Debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match &cli.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file {}", path))?;
            init_logger(
                cli.verbose || file_config.verbose(),
                cli.json_logs || file_config.json_logs(),
            );
            run(&file_config, &cli.command).await
        }
        None => {
            init_logger(cli.verbose, cli.json_logs);
            run(&cli, &cli.command).await
        }
    }
}

fn init_logger(verbose: bool, json: bool) {
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
}

async fn run<C>(config: &C, command: &Command) -> anyhow::Result<()>
where
    C: ConfigProvider + Validate + Debug,
{
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    let catalog = HttpCatalog::from_config(config).context("Failed to build HTTP client")?;
    let storage = LocalStorage::new(config.storage_path().to_string());
    let manager = CartManager::load(catalog, storage, ConsoleNotifier, config.storage_key())
        .await
        .context("Failed to load the stored cart")?;

    let result = match *command {
        Command::List => Ok(manager.cart().await),
        Command::Add { product_id } => manager.add_product(product_id).await,
        Command::Remove { product_id } => manager.remove_product(product_id).await,
        Command::Update { product_id, amount } => {
            manager
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await
        }
    };

    match result {
        Ok(cart) => {
            print_cart(&cart);
            Ok(())
        }
        Err(e) => {
            // the notifier has already shown the shopper-facing message
            tracing::error!(
                "❌ {} (Category: {:?})",
                e.user_friendly_message(),
                e.category()
            );
            eprintln!("💡 {}", e.recovery_suggestion());
            print_cart(&manager.cart().await);
            std::process::exit(exit_code(&e));
        }
    }
}

fn exit_code(error: &CartError) -> i32 {
    match error.category() {
        ErrorCategory::Configuration => 1,
        ErrorCategory::Stock | ErrorCategory::NotFound => 2,
        ErrorCategory::Transport => 3,
        ErrorCategory::Storage => 4,
    }
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    for entry in cart.entries() {
        let title = entry.title().unwrap_or("(untitled)");
        let subtotal = entry
            .subtotal()
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>6}  {:<40} x{:<4} {:>10}",
            entry.id, title, entry.amount, subtotal
        );
    }

    println!(
        "🛒 {} products, {} items, total {:.2}",
        cart.len(),
        cart.total_items(),
        cart.total()
    );
}

//! Gift CLI
//!
//! Command-line interface for the gift wish-list store

use clap::{Parser, Subcommand};
use gift_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "gift")]
#[command(about = "Gift - products, members and their wish lists", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: commands::StoreOptions,

    /// Emit JSON structured logs on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Product operations
    Product(commands::product::ProductArgs),
    /// Member operations
    Member(commands::member::MemberArgs),
    /// Wish operations
    Wish(commands::wish::WishArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Product(args) => commands::product::execute(&cli.store, args),
        Commands::Member(args) => commands::member::execute(&cli.store, args),
        Commands::Wish(args) => commands::wish::execute(&cli.store, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

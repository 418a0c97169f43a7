//! MomBabyShop CLI - exercise the state core from the command line.
//!
//! The reference presentation-layer collaborator: every public operation
//! of the cart, wishlist, and auth aggregates is reachable here, backed
//! by the JSON-file store under `MOMBABYSHOP_DATA_DIR`.
//!
//! # Usage
//!
//! ```bash
//! # Add two strollers (price in VND)
//! msb-cli cart add --id 1 --name "Xe đẩy em bé" --price 7500000 --image /stroller.png --qty 2
//!
//! # Line identity is id[:color]
//! msb-cli cart add --id 1 --name "Xe đẩy em bé" --price 7500000 --image /stroller.png --color Đen
//! msb-cli cart set-qty 1:Đen 3
//! msb-cli cart total
//!
//! # Wishlist toggle
//! msb-cli wishlist toggle --id 2 --name "Nôi cũi" --price 4200000 --image /crib.png
//!
//! # Demo login
//! msb-cli auth login -e admin@example.com -p 123456 -r admin
//! msb-cli auth whoami
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

use commands::{CliError, auth, cart, wishlist};

#[derive(Parser)]
#[command(name = "msb-cli")]
#[command(author, version, about = "MomBabyShop state tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate the shopping cart
    Cart {
        #[command(subcommand)]
        action: cart::CartAction,
    },
    /// Inspect and mutate the wishlist
    Wishlist {
        #[command(subcommand)]
        action: wishlist::WishlistAction,
    },
    /// Manage the auth session
    Auth {
        #[command(subcommand)]
        action: auth::AuthAction,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "msb_cli=info,mombabyshop_store=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // Operation failures surface as one short message, the same
            // text a toast would show.
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let env = commands::CliEnv::from_env()?;
    match cli.command {
        Commands::Cart { action } => cart::run(&env, action),
        Commands::Wishlist { action } => wishlist::run(&env, action),
        Commands::Auth { action } => auth::run(&env, action),
    }
}

//! Auth session commands.
//!
//! # Usage
//!
//! ```bash
//! msb-cli auth login -e admin@example.com -p 123456 -r admin
//! msb-cli auth whoami
//! msb-cli auth update --phone 0111222333
//! msb-cli auth logout
//! ```
//!
//! Credentials come from the fixed demo directory; see the store crate
//! docs for the seeded accounts.

use clap::Subcommand;

use mombabyshop_core::{UserProfile, UserRole};
use mombabyshop_store::{AuthSession, ProfileUpdate, Registration};

use super::{CliEnv, CliError};

/// Auth subcommands.
#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in with a demo account
    Login {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Role to act under (customer, seller, admin)
        #[arg(short, long, default_value = "customer")]
        role: String,
    },
    /// Register a new customer account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// End the current session (cart and wishlist survive)
    Logout,
    /// Print the current profile
    Whoami,
    /// Update profile fields
    Update {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
        /// New avatar URL
        #[arg(long)]
        avatar: Option<String>,
    },
}

/// Execute an auth subcommand.
///
/// # Errors
///
/// Returns [`CliError`] when validation, credentials, or persistence fail.
pub fn run(env: &CliEnv, action: AuthAction) -> Result<(), CliError> {
    let session = AuthSession::new(env.hub().handle());

    match action {
        AuthAction::Login {
            email,
            password,
            role,
        } => {
            let role: UserRole = role.parse()?;
            let profile = session.login(&email, &password, role)?;
            print_profile(&profile);
        }
        AuthAction::Register {
            name,
            email,
            password,
            phone,
        } => {
            let profile = session.register(Registration {
                name,
                email,
                password,
                phone,
            })?;
            print_profile(&profile);
        }
        AuthAction::Logout => {
            session.logout()?;
            print_message("logged out");
        }
        AuthAction::Whoami => match session.current_profile() {
            Some(profile) => print_profile(&profile),
            None => print_message("(anonymous)"),
        },
        AuthAction::Update {
            name,
            phone,
            avatar,
        } => {
            let profile = session.update_profile(ProfileUpdate {
                name,
                phone,
                avatar,
                ..ProfileUpdate::default()
            })?;
            print_profile(&profile);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_profile(profile: &UserProfile) {
    println!("{} <{}> [{}]", profile.name, profile.email, profile.role);
    if let Some(phone) = &profile.phone {
        println!("  phone: {phone}");
    }
    if let Some(address) = profile.default_address() {
        println!(
            "  default address: {}, {}, {}, {}",
            address.address, address.ward, address.district, address.city
        );
    }
}

#[allow(clippy::print_stdout)]
fn print_message(message: &str) {
    println!("{message}");
}

//! Subcommand implementations.

mod alerts;
mod chat;
mod chat_history;
mod create_listing;
mod dashboard;
mod listings;
mod login;
mod logout;
mod register;
mod request;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::ClientArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with phone number and password
    Login(login::LoginArgs),

    /// Create an account and sign in
    Register(register::RegisterArgs),

    /// Sign out and forget the stored session
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// Show the dashboard for your role
    Dashboard(dashboard::DashboardArgs),

    /// Browse marketplace listings
    Listings(listings::ListingsArgs),

    /// Publish a marketplace listing
    CreateListing(create_listing::CreateListingArgs),

    /// Show recent alerts
    Alerts(alerts::AlertsArgs),

    /// Ask the farming assistant a question
    Chat(chat::ChatArgs),

    /// Show the assistant conversation history
    ChatHistory(chat_history::ChatHistoryArgs),

    /// Send a raw request to the backend
    Request(request::RequestArgs),
}

pub async fn handle(command: Command, client: &ClientArgs) -> Result<()> {
    match command {
        Command::Login(args) => login::run(args, client).await,
        Command::Register(args) => register::run(args, client).await,
        Command::Logout(args) => logout::run(args, client).await,
        Command::Whoami(args) => whoami::run(args, client).await,
        Command::Dashboard(args) => dashboard::run(args, client).await,
        Command::Listings(args) => listings::run(args, client).await,
        Command::CreateListing(args) => create_listing::run(args, client).await,
        Command::Alerts(args) => alerts::run(args, client).await,
        Command::Chat(args) => chat::run(args, client).await,
        Command::ChatHistory(args) => chat_history::run(args, client).await,
        Command::Request(args) => request::run(args, client).await,
    }
}

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shutter=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        files,
        format,
        command,
    } = Cli::parse();
    let files = &files;

    // commands carrying secrets take their args by value so the plaintext can be wiped
    match command {
        Commands::HashPassword(args) => commands::hash::run(args, format),
        Commands::SetAdmin(args) => commands::admin::set_admin(args, files, format).await,
        Commands::AddUser(args) => commands::admin::add_user(args, files, format).await,
        Commands::Login(args) => commands::login::run(args, files, format).await,
        Commands::Whoami(args) => commands::session::whoami(&args, files, format).await,
        Commands::Grant(args) => commands::albums::grant(&args, files, format).await,
        Commands::Check(args) => commands::albums::check(&args, files, format).await,
        Commands::Logout(args) => commands::session::logout(&args, files, format).await,
    }
}

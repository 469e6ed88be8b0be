//! CLI argument definitions for the Shutter binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Shutter gallery session authority
#[derive(Parser, Debug)]
#[command(name = "shutter")]
#[command(about = "Shutter: who is calling, and what may they see")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub files: FileArgs,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the admin config, users and sessions are kept
#[derive(clap::Args, Debug, Clone)]
pub struct FileArgs {
    /// Admin credential file (JSON with hashed username and password)
    #[arg(long, global = true, default_value = "admin.json", env = "SHUTTER_CONFIG")]
    pub config: PathBuf,

    /// User records file (JSON array)
    #[arg(long, global = true, default_value = "users.json", env = "SHUTTER_USERS")]
    pub users: PathBuf,

    /// Session registry file
    #[arg(
        long,
        global = true,
        default_value = "sessions.json",
        env = "SHUTTER_SESSIONS"
    )]
    pub sessions: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the Argon2id hash of a secret
    HashPassword(HashPasswordArgs),
    /// Write the admin credentials, or clear them for passwordless mode
    SetAdmin(SetAdminArgs),
    /// Register a user
    AddUser(AddUserArgs),
    /// Open a new session and log in
    Login(LoginArgs),
    /// Show who a session belongs to and what it may do
    Whoami(SessionArgs),
    /// Make an album visible to a session
    Grant(AlbumArgs),
    /// Check whether an album is visible to a session
    Check(AlbumArgs),
    /// End a session
    Logout(SessionArgs),
}

#[derive(clap::Args, Debug)]
pub struct HashPasswordArgs {
    /// The secret to hash
    pub plaintext: String,
}

#[derive(clap::Args, Debug)]
pub struct SetAdminArgs {
    /// Admin username, stored hashed
    #[arg(long)]
    pub username: Option<String>,

    /// Admin password, stored hashed
    #[arg(long, env = "SHUTTER_ADMIN_PASSWORD")]
    pub password: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct AddUserArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long, env = "SHUTTER_PASSWORD")]
    pub password: String,

    /// Allow this user to upload
    #[arg(long)]
    pub upload: bool,
}

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    pub username: String,

    #[arg(long, env = "SHUTTER_PASSWORD", default_value = "")]
    pub password: String,

    /// Address recorded in the audit log
    #[arg(long, default_value = "127.0.0.1")]
    pub client_addr: String,
}

#[derive(clap::Args, Debug)]
pub struct SessionArgs {
    /// Session id printed by `login`
    #[arg(long, env = "SHUTTER_SESSION")]
    pub session: String,
}

#[derive(clap::Args, Debug)]
pub struct AlbumArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Album id
    pub album: String,
}

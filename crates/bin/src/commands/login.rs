//! Login command.

use serde_json::json;
use shutter::SessionAuthority;
use zeroize::Zeroizing;

use super::Workspace;
use crate::cli::{FileArgs, LoginArgs};
use crate::output::{OutputFormat, print_fields, print_json};

/// Try every way in, in the order a gallery front page would.
async fn log_in(
    authority: &mut SessionAuthority,
    username: &str,
    password: &str,
    client_addr: &str,
) -> shutter::Result<bool> {
    if authority.try_passwordless_login().await? {
        return Ok(true);
    }
    if authority
        .authenticate_admin(username, password, client_addr)
        .await?
    {
        return Ok(true);
    }
    authority
        .authenticate_user(username, password, client_addr)
        .await
}

/// Run the login command
pub async fn run(
    args: LoginArgs,
    files: &FileArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let LoginArgs {
        username,
        password,
        client_addr,
    } = args;
    let password = Zeroizing::new(password);
    let workspace = Workspace::load(files).await?;
    let (session_id, session) = workspace.registry().create().await;
    let mut authority = workspace.collaborators().authority(session);

    if !log_in(&mut authority, &username, &password, &client_addr).await? {
        // the unsaved session is simply dropped; exit skips destructors
        drop(password);
        eprintln!("invalid credentials");
        std::process::exit(1);
    }
    let identity = authority.current_identity().await?;
    workspace.save_sessions().await?;

    match format {
        OutputFormat::Human => print_fields(&[
            ("Session", session_id),
            ("Identity", identity.to_string()),
        ]),
        OutputFormat::Json => print_json(&json!({
            "session": session_id,
            "identity": identity.to_string(),
        }))?,
    }
    Ok(())
}

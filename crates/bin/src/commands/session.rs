//! Session inspection and logout commands.

use serde_json::json;

use super::Workspace;
use crate::cli::{FileArgs, SessionArgs};
use crate::output::{OutputFormat, print_fields, print_json};

/// Run the whoami command
pub async fn whoami(
    args: &SessionArgs,
    files: &FileArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::load(files).await?;
    let mut authority = workspace.authority(&args.session).await?;

    let identity = authority.identity().await?;
    let username = match identity.user_id() {
        Some(_) => Some(authority.current_user().await?.username.clone()),
        None => None,
    };
    let upload = if identity.is_authenticated() {
        authority.can_upload().await?
    } else {
        false
    };
    let albums: Vec<String> = authority
        .visible_albums()
        .await?
        .iter()
        .map(str::to_string)
        .collect();

    match format {
        OutputFormat::Human => {
            let mut fields = vec![("Identity", identity.to_string())];
            if let Some(username) = &username {
                fields.push(("Username", username.clone()));
            }
            fields.push(("Upload", upload.to_string()));
            let albums = if albums.is_empty() {
                "(none)".to_string()
            } else {
                albums.join(", ")
            };
            fields.push(("Albums", albums));
            print_fields(&fields);
        }
        OutputFormat::Json => print_json(&json!({
            "identity": identity.to_string(),
            "username": username,
            "upload": upload,
            "albums": albums,
        }))?,
    }
    Ok(())
}

/// Run the logout command
pub async fn logout(
    args: &SessionArgs,
    files: &FileArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::load(files).await?;
    let mut authority = workspace.authority(&args.session).await?;
    authority.logout().await?;
    workspace.registry().destroy(&args.session).await;
    workspace.save_sessions().await?;

    match format {
        OutputFormat::Human => println!("Logged out {}", args.session),
        OutputFormat::Json => print_json(&json!({ "session": args.session, "logged_out": true }))?,
    }
    Ok(())
}

//! Album visibility commands.

use serde_json::json;

use super::Workspace;
use crate::cli::{AlbumArgs, FileArgs};
use crate::output::{OutputFormat, print_json};

/// Run the grant command
pub async fn grant(
    args: &AlbumArgs,
    files: &FileArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::load(files).await?;
    let authority = workspace.authority(&args.session.session).await?;
    authority.grant_visible_album(&args.album).await?;
    workspace.save_sessions().await?;

    match format {
        OutputFormat::Human => println!("Album {} is visible", args.album),
        OutputFormat::Json => print_json(&json!({ "album": args.album, "visible": true }))?,
    }
    Ok(())
}

/// Run the check command. Exits non-zero when the album is hidden.
pub async fn check(
    args: &AlbumArgs,
    files: &FileArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::load(files).await?;
    let authority = workspace.authority(&args.session.session).await?;
    let visible = authority.has_visible_album(&args.album).await?;

    match format {
        OutputFormat::Human => {
            let state = if visible { "visible" } else { "hidden" };
            println!("Album {} is {state}", args.album);
        }
        OutputFormat::Json => print_json(&json!({ "album": args.album, "visible": visible }))?,
    }
    if !visible {
        std::process::exit(1);
    }
    Ok(())
}

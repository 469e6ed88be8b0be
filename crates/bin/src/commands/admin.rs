//! Admin credential and user registration commands.

use serde_json::json;
use shutter::{AdminCredentials, User, user::hash_password};
use zeroize::Zeroizing;

use super::Workspace;
use crate::cli::{AddUserArgs, FileArgs, SetAdminArgs};
use crate::output::{OutputFormat, print_fields, print_json};

/// Hash a secret, keeping an omitted one as the empty "unset" marker.
fn hash_or_unset(secret: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    let Some(secret) = secret.map(Zeroizing::new) else {
        return Ok(String::new());
    };
    if secret.is_empty() {
        return Ok(String::new());
    }
    Ok(hash_password(secret.as_str())?)
}

/// Run the set-admin command
pub async fn set_admin(
    args: SetAdminArgs,
    files: &FileArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::load(files).await?;
    let credentials = AdminCredentials::new(
        hash_or_unset(args.username)?,
        hash_or_unset(args.password)?,
    );
    let passwordless = credentials.is_unset();
    workspace.config().save(&credentials).await?;

    if passwordless {
        tracing::warn!("admin credentials cleared, every new session can log in as admin");
    }
    match format {
        OutputFormat::Human => print_fields(&[
            ("Config", workspace.config().path().display().to_string()),
            ("Passwordless", passwordless.to_string()),
        ]),
        OutputFormat::Json => print_json(&json!({
            "config": workspace.config().path(),
            "passwordless": passwordless,
        }))?,
    }
    Ok(())
}

/// Run the add-user command
pub async fn add_user(
    args: AddUserArgs,
    files: &FileArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let AddUserArgs {
        username,
        password,
        upload,
    } = args;
    let password = Zeroizing::new(password);
    let workspace = Workspace::load(files).await?;
    let id = workspace.users().next_id().await;
    let user = User::new(
        id,
        username.as_str(),
        hash_password(password.as_str())?,
        upload,
    );
    workspace.users().insert(user).await?;
    workspace.save_users().await?;

    match format {
        OutputFormat::Human => print_fields(&[
            ("User ID", id.to_string()),
            ("Username", username),
            ("Upload", upload.to_string()),
        ]),
        OutputFormat::Json => print_json(&json!({
            "id": id.get(),
            "username": username,
            "upload": upload,
        }))?,
    }
    Ok(())
}

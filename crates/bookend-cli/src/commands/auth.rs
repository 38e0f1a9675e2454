//! Register, login, logout, whoami, and settings commands.

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use bookend_client::{RecordStore, SessionFile, auth};

use crate::cli::OutputFormat;
use crate::commands::require_session;
use crate::format;

/// Prompt for a password when it was not passed on the command line.
fn resolve_password(password: Option<String>, confirm: bool) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => {
            let mut prompt = dialoguer::Password::new().with_prompt("Password");
            if confirm {
                prompt = prompt
                    .with_confirmation("Confirm password", "Passwords do not match");
            }
            prompt.interact().context("reading password")
        }
    }
}

pub async fn cmd_register(
    store: &dyn RecordStore,
    username: &str,
    password: Option<String>,
    quiet: bool,
) -> Result<()> {
    let password = resolve_password(password, true)?;
    if password.is_empty() {
        bail!("Password cannot be empty");
    }

    let user = auth::register(store, username, &password).await?;
    if !quiet {
        println!("Registered {}.", user.username.bold());
        println!("Log in with: bookend login {}", user.username);
    }
    Ok(())
}

pub async fn cmd_login(
    store: &dyn RecordStore,
    sessions: &SessionFile,
    username: &str,
    password: Option<String>,
    quiet: bool,
) -> Result<()> {
    let password = resolve_password(password, false)?;
    let mut session = auth::login(store, username, &password).await?;

    // First login after registration gets the getting-started notes once.
    if session.user.is_new_user {
        if !quiet {
            println!("Welcome to Bookend, {}!", session.user.username.bold());
            println!("  Record a book:   bookend add --title ... --author ... --rating 5");
            println!("  See the feed:    bookend community");
            println!("  See the boards:  bookend rankings");
        }
        session.user = auth::dismiss_tutorial(store, &session.user).await?;
    } else if !quiet {
        println!("Logged in as {}.", session.user.username.bold());
    }

    sessions.save(&session).context("saving session")?;
    Ok(())
}

pub fn cmd_logout(sessions: &SessionFile, quiet: bool) -> Result<()> {
    sessions.clear().context("clearing session")?;
    if !quiet {
        println!("Logged out.");
    }
    Ok(())
}

pub fn cmd_whoami(sessions: &SessionFile, format: OutputFormat) -> Result<()> {
    let session = require_session(sessions)?;
    match format {
        OutputFormat::Json => format::print_json(&session.user)?,
        OutputFormat::Text => {
            println!("{} (id {})", session.user.username, session.user.id);
            if let Some(url) = &session.user.profile_image_url {
                println!("Profile image: {}", url);
            }
        }
    }
    Ok(())
}

pub async fn cmd_settings(
    store: &dyn RecordStore,
    sessions: &SessionFile,
    profile_image_url: Option<String>,
) -> Result<()> {
    let mut session = require_session(sessions)?;

    let Some(url) = profile_image_url else {
        bail!("Nothing to update. Pass --profile-image-url <url>.");
    };

    session.user = auth::update_profile_image(store, &session.user.id, &url).await?;
    sessions.save(&session).context("saving session")?;
    println!("Profile image updated.");
    Ok(())
}

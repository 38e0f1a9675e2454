//! Bookend CLI - personal reading log with community rankings.

mod cli;
mod commands;
mod config;
mod format;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bookend_client::{RestStore, SessionFile};

use crate::cli::{Cli, Commands};
use crate::commands::records::{AddArgs, EditArgs};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load();
    let sessions = match &cli.session_file {
        Some(path) => SessionFile::at(path),
        None => SessionFile::new(),
    };

    let store_url = cli.store_url.clone().or_else(|| config.store_url.clone());
    let service_url = cli
        .service_url
        .clone()
        .or_else(|| config.service_url.clone());
    tracing::debug!(?store_url, ?service_url, "resolved endpoints");

    let open_store = || -> Result<RestStore> {
        let url = store_url
            .as_deref()
            .ok_or_else(|| anyhow!("No store URL configured. Run: bookend config --store-url <url>"))?;
        Ok(RestStore::new(url)?)
    };

    match cli.command {
        Commands::Register { username, password } => {
            let store = open_store()?;
            commands::auth::cmd_register(&store, &username, password, cli.quiet).await
        }
        Commands::Login { username, password } => {
            let store = open_store()?;
            commands::auth::cmd_login(&store, &sessions, &username, password, cli.quiet).await
        }
        Commands::Logout => commands::auth::cmd_logout(&sessions, cli.quiet),
        Commands::Whoami { format } => commands::auth::cmd_whoami(&sessions, format),
        Commands::Add {
            title,
            author,
            query,
            rating,
            notes,
            start_date,
            end_date,
            public,
        } => {
            let store = open_store()?;
            let args = AddArgs {
                title,
                author,
                query,
                rating,
                notes,
                start_date,
                end_date,
                public,
            };
            commands::records::cmd_add(&store, &sessions, service_url.as_deref(), args, cli.quiet)
                .await
        }
        Commands::List { format } => {
            let store = open_store()?;
            commands::records::cmd_list(&store, &sessions, format).await
        }
        Commands::Show { id, format } => {
            let store = open_store()?;
            commands::records::cmd_show(&store, &id, format).await
        }
        Commands::Edit {
            id,
            rating,
            notes,
            start_date,
            end_date,
            public,
            private,
        } => {
            let store = open_store()?;
            let args = EditArgs {
                rating,
                notes,
                start_date,
                end_date,
                public,
                private,
            };
            commands::records::cmd_edit(&store, &id, args, cli.quiet).await
        }
        Commands::Delete { id, yes } => {
            let store = open_store()?;
            commands::records::cmd_delete(&store, &id, yes, cli.quiet).await
        }
        Commands::Community { format } => {
            let store = open_store()?;
            commands::community::cmd_community(&store, format).await
        }
        Commands::Rankings { board, format } => {
            let store = open_store()?;
            commands::rankings::cmd_rankings(&store, board, format).await
        }
        Commands::Search { query, format } => {
            commands::search::cmd_search(service_url.as_deref(), &query, format).await
        }
        Commands::Settings { profile_image_url } => {
            let store = open_store()?;
            commands::auth::cmd_settings(&store, &sessions, profile_image_url).await
        }
        Commands::Seed => {
            let store = open_store()?;
            commands::seed::cmd_seed(&store, cli.quiet).await
        }
        Commands::Config {
            store_url: new_store_url,
            service_url: new_service_url,
        } => cmd_config(new_store_url, new_service_url),
    }
}

/// Show or update the CLI configuration.
fn cmd_config(store_url: Option<String>, service_url: Option<String>) -> Result<()> {
    let mut config = Config::load();

    let changed = store_url.is_some() || service_url.is_some();
    if let Some(url) = store_url {
        config.store_url = Some(url);
    }
    if let Some(url) = service_url {
        config.service_url = Some(url);
    }
    if changed {
        config.save()?;
    }

    println!(
        "store_url   = {}",
        config.store_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "service_url = {}",
        config.service_url.as_deref().unwrap_or("(not set)")
    );
    Ok(())
}

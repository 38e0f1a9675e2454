//! Record lifecycle commands: add, list, show, edit, delete.

use anyhow::{Context, Result, bail};

use bookend_client::{RecordStore, SearchClient, SessionFile};
use bookend_types::{RecordDraft, RecordPatch, strip_markup};

use crate::cli::OutputFormat;
use crate::commands::require_session;
use crate::format;

/// Fields the add command needs beyond the book itself.
pub struct AddArgs {
    pub title: Option<String>,
    pub author: Option<String>,
    pub query: Option<String>,
    pub rating: u8,
    pub notes: String,
    pub start_date: String,
    pub end_date: String,
    pub public: bool,
}

pub async fn cmd_add(
    store: &dyn RecordStore,
    sessions: &SessionFile,
    service_url: Option<&str>,
    args: AddArgs,
    quiet: bool,
) -> Result<()> {
    let session = require_session(sessions)?;

    let mut draft = RecordDraft {
        user_id: session.user.id.clone(),
        username: Some(session.user.username.clone()),
        user_profile_image_url: session.user.profile_image_url.clone(),
        user_rating: args.rating,
        notes: args.notes,
        start_date: args.start_date,
        end_date: args.end_date,
        is_public: args.public,
        ..RecordDraft::default()
    };

    if let Some(query) = &args.query {
        let Some(url) = service_url else {
            bail!("Search needs a service URL. Run: bookend config --service-url <url>");
        };
        let client = SearchClient::new(url)?;
        let hits = client.search(query).await?;
        if hits.is_empty() {
            bail!("No results for '{}'. Add the book manually with --title/--author.", query);
        }

        let labels: Vec<String> = hits
            .iter()
            .map(|h| format!("{} - {}", h.clean_title(), h.clean_author()))
            .collect();
        let picked = dialoguer::Select::new()
            .with_prompt("Pick a book")
            .items(&labels)
            .default(0)
            .interact()
            .context("reading selection")?;

        let hit = &hits[picked];
        draft.title = hit.clean_title();
        draft.author = hit.clean_author();
        if !hit.publisher.is_empty() {
            draft.publisher = Some(strip_markup(&hit.publisher));
        }
        if !hit.isbn.is_empty() {
            draft.isbn = Some(hit.isbn.clone());
        }
        if !hit.image.is_empty() {
            draft.cover_image = Some(hit.image.clone());
        }
    } else {
        let (Some(title), Some(author)) = (args.title, args.author) else {
            bail!("Either --query or both --title and --author are required");
        };
        draft.title = title;
        draft.author = author;
    }

    draft.validate()?;
    let record = store.create_record(&draft).await?;

    if !quiet {
        println!("Recorded '{}' (id {}).", record.title, record.id);
    }
    Ok(())
}

pub async fn cmd_list(
    store: &dyn RecordStore,
    sessions: &SessionFile,
    format: OutputFormat,
) -> Result<()> {
    let session = require_session(sessions)?;
    let mut records = store.records_for_user(&session.user.id).await?;
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    match format {
        OutputFormat::Json => format::print_json(&records)?,
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No records yet. Add one with: bookend add");
            } else {
                format::print_records_table(&records);
            }
        }
    }
    Ok(())
}

pub async fn cmd_show(store: &dyn RecordStore, id: &str, format: OutputFormat) -> Result<()> {
    let record = store.get_record(id).await?;
    match format {
        OutputFormat::Json => format::print_json(&record)?,
        OutputFormat::Text => format::print_record(&record),
    }
    Ok(())
}

/// Optional field changes for the edit command.
pub struct EditArgs {
    pub rating: Option<u8>,
    pub notes: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub public: bool,
    pub private: bool,
}

pub async fn cmd_edit(
    store: &dyn RecordStore,
    id: &str,
    args: EditArgs,
    quiet: bool,
) -> Result<()> {
    let is_public = if args.public {
        Some(true)
    } else if args.private {
        Some(false)
    } else {
        None
    };

    let patch = RecordPatch {
        user_rating: args.rating,
        notes: args.notes,
        start_date: args.start_date,
        end_date: args.end_date,
        is_public,
        user_profile_image_url: None,
    };

    if patch.is_empty() {
        bail!("Nothing to change. Pass at least one of --rating/--notes/--start-date/--end-date/--public/--private.");
    }

    // When only one date is supplied, check the order against the stored
    // record so an edit cannot leave the dates reversed.
    if patch.start_date.is_some() != patch.end_date.is_some() {
        let current = store.get_record(id).await?;
        let merged = RecordPatch {
            start_date: Some(
                patch
                    .start_date
                    .clone()
                    .unwrap_or_else(|| current.start_date.clone()),
            ),
            end_date: Some(
                patch
                    .end_date
                    .clone()
                    .unwrap_or_else(|| current.end_date.clone()),
            ),
            ..RecordPatch::default()
        };
        merged.validate()?;
    }
    patch.validate()?;

    let record = store.update_record(id, &patch).await?;
    if !quiet {
        println!("Updated '{}' (id {}).", record.title, record.id);
    }
    Ok(())
}

pub async fn cmd_delete(store: &dyn RecordStore, id: &str, yes: bool, quiet: bool) -> Result<()> {
    let record = store.get_record(id).await?;

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete '{}' by {}?", record.title, record.author))
            .default(false)
            .interact()
            .context("reading confirmation")?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.delete_record(id).await?;
    if !quiet {
        println!("Deleted '{}'.", record.title);
    }
    Ok(())
}

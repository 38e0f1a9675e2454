//! Community feed command.

use anyhow::Result;

use bookend_client::RecordStore;

use crate::cli::OutputFormat;
use crate::format;

pub async fn cmd_community(store: &dyn RecordStore, format: OutputFormat) -> Result<()> {
    let mut records = store.public_records().await?;
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    match format {
        OutputFormat::Json => format::print_json(&records)?,
        OutputFormat::Text => format::print_community(&records),
    }
    Ok(())
}

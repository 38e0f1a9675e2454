//! Book search command.

use anyhow::{Result, bail};

use bookend_client::SearchClient;

use crate::cli::OutputFormat;
use crate::format;

pub async fn cmd_search(
    service_url: Option<&str>,
    query: &str,
    format: OutputFormat,
) -> Result<()> {
    let Some(url) = service_url else {
        bail!("Search needs a service URL. Run: bookend config --service-url <url>");
    };

    let client = SearchClient::new(url)?;
    let hits = client.search(query).await?;

    match format {
        OutputFormat::Json => format::print_json(&hits)?,
        OutputFormat::Text => format::print_search_results(&hits),
    }
    Ok(())
}

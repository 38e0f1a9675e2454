//! Ranking boards command.

use anyhow::Result;
use time::OffsetDateTime;

use bookend_client::RecordStore;
use bookend_types::calculate_rankings;

use crate::cli::{Board, OutputFormat};
use crate::format;

pub async fn cmd_rankings(
    store: &dyn RecordStore,
    board: Option<Board>,
    format: OutputFormat,
) -> Result<()> {
    let records = store.public_records().await?;
    let rankings = calculate_rankings(&records, OffsetDateTime::now_utc());

    match format {
        OutputFormat::Json => match board {
            Some(Board::Hot) => format::print_json(&rankings.hot)?,
            Some(Board::MostRead) => format::print_json(&rankings.most_read)?,
            Some(Board::TopRated) => format::print_json(&rankings.top_rated)?,
            None => format::print_json(&rankings)?,
        },
        OutputFormat::Text => match board {
            Some(Board::Hot) => format::print_board("Hot right now", &rankings.hot),
            Some(Board::MostRead) => format::print_board("Most read", &rankings.most_read),
            Some(Board::TopRated) => format::print_board("Top rated", &rankings.top_rated),
            None => {
                format::print_board("Hot right now", &rankings.hot);
                println!();
                format::print_board("Most read", &rankings.most_read);
                println!();
                format::print_board("Top rated", &rankings.top_rated);
            }
        },
    }
    Ok(())
}

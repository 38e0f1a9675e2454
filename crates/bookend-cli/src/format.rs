//! Terminal output formatting helpers.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use bookend_types::{BookHit, RankedBook, ReadingRecord};

/// Render a 1-5 rating as filled and empty stars.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a table of the user's own records.
pub fn print_records_table(records: &[ReadingRecord]) {
    let mut builder = Builder::default();
    builder.push_record(["Id", "Title", "Author", "Rating", "Finished", "Public"]);
    for record in records {
        builder.push_record([
            record.id.as_str(),
            record.title.as_str(),
            record.author.as_str(),
            &stars(record.user_rating),
            record.end_date.as_str(),
            if record.is_public { "yes" } else { "no" },
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

/// Print one record in full.
pub fn print_record(record: &ReadingRecord) {
    println!("{}", record.title.bold());
    println!("  by {}", record.author);
    println!("  {} ({})", stars(record.user_rating), record.user_rating);
    if let Some(publisher) = &record.publisher {
        println!("  Publisher: {}", publisher);
    }
    if let Some(isbn) = &record.isbn {
        println!("  ISBN: {}", isbn);
    }
    if !record.start_date.is_empty() || !record.end_date.is_empty() {
        println!("  Read: {} to {}", record.start_date, record.end_date);
    }
    println!(
        "  Visibility: {}",
        if record.is_public {
            "public".green().to_string()
        } else {
            "private".dimmed().to_string()
        }
    );
    if !record.notes.is_empty() {
        println!();
        println!("  {}", record.notes);
    }
}

/// Print the community feed.
pub fn print_community(records: &[ReadingRecord]) {
    if records.is_empty() {
        println!("Nothing in the community feed yet.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Reader", "Title", "Author", "Rating", "Notes"]);
    for record in records {
        builder.push_record([
            record.username.as_deref().unwrap_or("-"),
            record.title.as_str(),
            record.author.as_str(),
            &stars(record.user_rating),
            &truncate(&record.notes, 40),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

/// Print a single ranking board with rank numbers.
pub fn print_board(heading: &str, books: &[RankedBook]) {
    println!("{}", heading.bold());
    if books.is_empty() {
        println!("  (no entries)");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["#", "Title", "Author", "Reads", "Avg"]);
    for (i, book) in books.iter().enumerate() {
        builder.push_record([
            &(i + 1).to_string(),
            book.title.as_str(),
            book.author.as_str(),
            &book.read_count.to_string(),
            &format!("{:.1}", book.average_rating),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

/// Print search results with a leading index for picking.
pub fn print_search_results(hits: &[BookHit]) {
    if hits.is_empty() {
        println!("No results.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["#", "Title", "Author", "Publisher", "ISBN"]);
    for (i, hit) in hits.iter().enumerate() {
        builder.push_record([
            &(i + 1).to_string(),
            &hit.clean_title(),
            &hit.clean_author(),
            hit.publisher.as_str(),
            hit.isbn.as_str(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

//! Community ranking aggregation.
//!
//! Three leaderboards computed client-side over the full public-record set:
//!
//! - **Hot**: recency-weighted popularity. Each record contributes
//!   `1 / (age_in_days + 2)` to its book's score, so recent reads dominate.
//! - **Most read**: raw read count per book.
//! - **Top rated**: average rating shrunk toward the global mean
//!   (Bayesian adjustment), excluding books with fewer ratings than the
//!   prior weight.
//!
//! Books are identified by the concatenation of title and author; there is
//! no canonical book id in the data model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

use crate::types::ReadingRecord;

/// Prior weight `m` for the Bayesian adjustment, and the minimum number of
/// ratings for a book to appear on the top-rated board.
pub const PRIOR_WEIGHT: usize = 2;

/// Number of entries kept per leaderboard.
const BOARD_SIZE: usize = 10;

/// Aggregated per-book entry on a leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedBook {
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Every rating given to this book, in input order.
    pub ratings: Vec<u8>,
    pub read_count: usize,
    pub hot_score: f64,
    pub average_rating: f64,
    pub adjusted_score: f64,
}

/// The three leaderboards, each truncated to the top ten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub hot: Vec<RankedBook>,
    pub most_read: Vec<RankedBook>,
    pub top_rated: Vec<RankedBook>,
}

/// Compute the three leaderboards from the public-record set.
///
/// `now` is the evaluation instant for the hot score; pass
/// [`OffsetDateTime::now_utc`] outside of tests. The computation is a single
/// pass over the records plus one sort per board, and is deterministic for
/// identical input.
pub fn calculate_rankings(records: &[ReadingRecord], now: OffsetDateTime) -> Rankings {
    if records.is_empty() {
        return Rankings::default();
    }

    // Group by title+author, preserving first-seen order so sorts are stable
    // across runs.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut books: Vec<RankedBook> = Vec::new();
    let mut rating_sum: u64 = 0;

    for record in records {
        rating_sum += u64::from(record.user_rating);

        let key = format!("{}{}", record.title, record.author);
        let i = *index.entry(key).or_insert_with(|| {
            books.push(RankedBook {
                title: record.title.clone(),
                author: record.author.clone(),
                cover_image: record.cover_image.clone(),
                ratings: Vec::new(),
                read_count: 0,
                hot_score: 0.0,
                average_rating: 0.0,
                adjusted_score: 0.0,
            });
            books.len() - 1
        });

        let book = &mut books[i];
        book.read_count += 1;
        book.ratings.push(record.user_rating);

        let age_in_days = (now - record.created_at).as_seconds_f64() / 86_400.0;
        book.hot_score += 1.0 / (age_in_days + 2.0);
    }

    // Global mean rating; the fallback arm is unreachable after the empty
    // check above but kept so the formula reads complete.
    let global_mean = if records.is_empty() {
        3.0
    } else {
        rating_sum as f64 / records.len() as f64
    };
    let m = PRIOR_WEIGHT as f64;

    for book in &mut books {
        let v = book.ratings.len() as f64;
        let r = book.ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / v;
        book.average_rating = r;
        book.adjusted_score = (v / (v + m)) * r + (m / (v + m)) * global_mean;
    }

    let hot = top_by(&books, |b| b.hot_score);
    let most_read = top_by(&books, |b| b.read_count as f64);
    let top_rated = {
        let eligible: Vec<RankedBook> = books
            .iter()
            .filter(|b| b.ratings.len() >= PRIOR_WEIGHT)
            .cloned()
            .collect();
        top_by(&eligible, |b| b.adjusted_score)
    };

    Rankings {
        hot,
        most_read,
        top_rated,
    }
}

/// Sort descending by `metric` and keep the top of the board. The sort is
/// stable, so ties keep first-seen order.
fn top_by<F: Fn(&RankedBook) -> f64>(books: &[RankedBook], metric: F) -> Vec<RankedBook> {
    let mut sorted = books.to_vec();
    sorted.sort_by(|a, b| metric(b).total_cmp(&metric(a)));
    sorted.truncate(BOARD_SIZE);
    sorted
}

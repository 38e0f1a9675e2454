//! Demo data generation for testing and demonstration.
//!
//! Seeds the store with a handful of users and enough overlapping reading
//! records that the ranking boards have something to show. Irreversible
//! through this tool; seeded rows are ordinary store rows.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime, macros::format_description};
use tracing::info;

use bookend_types::RecordDraft;

use crate::auth;
use crate::error::Result;
use crate::store::RecordStore;

const SAMPLE_USERS: &[(&str, &str)] = &[
    ("alice", "password123"),
    ("bob", "password123"),
    ("charlie", "password123"),
];

const SAMPLE_BOOKS: &[(&str, &str)] = &[
    ("Dune", "Frank Herbert"),
    ("The Three-Body Problem", "Cixin Liu"),
    ("Project Hail Mary", "Andy Weir"),
    ("1984", "George Orwell"),
    ("Brave New World", "Aldous Huxley"),
    ("Fahrenheit 451", "Ray Bradbury"),
];

const SAMPLE_NOTES: &[&str] = &[
    "An absolute classic, a must-read.",
    "Interesting concepts, but the pacing was a bit slow.",
    "Couldn't put it down! Highly recommended.",
    "The ending was a complete surprise.",
    "A thought-provoking story that will stay with me.",
    "The characters felt very real and relatable.",
];

const RECORD_COUNT: usize = 20;

/// Outcome of a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSummary {
    pub users_created: usize,
    pub records_created: usize,
    pub message: String,
}

/// Create the sample users and records.
///
/// Fails if any sample username is already taken; seeding is intended for
/// an empty store.
pub async fn generate_demo_data(store: &dyn RecordStore) -> Result<DemoSummary> {
    let mut users = Vec::with_capacity(SAMPLE_USERS.len());
    for (username, password) in SAMPLE_USERS {
        users.push(auth::register(store, username, password).await?);
    }
    info!(count = users.len(), "demo users created");

    let date_format = format_description!("[year]-[month]-[day]");
    let mut rng = StdRng::from_os_rng();
    let now = OffsetDateTime::now_utc();

    for i in 0..RECORD_COUNT {
        let user = &users[rng.random_range(0..users.len())];
        // The first pass walks every sample book so each one is guaranteed
        // at least one review; the rest land randomly.
        let (title, author) = if i < SAMPLE_BOOKS.len() {
            SAMPLE_BOOKS[i]
        } else {
            SAMPLE_BOOKS[rng.random_range(0..SAMPLE_BOOKS.len())]
        };

        let start = now - Duration::days(rng.random_range(30..500));
        let end = start + Duration::days(rng.random_range(1..60));

        let draft = RecordDraft {
            user_id: user.id.clone(),
            username: Some(user.username.clone()),
            title: title.to_string(),
            author: author.to_string(),
            publisher: Some("Demo Publisher".to_string()),
            user_rating: rng.random_range(1..=5),
            notes: SAMPLE_NOTES[rng.random_range(0..SAMPLE_NOTES.len())].to_string(),
            start_date: start
                .date()
                .format(date_format)
                .unwrap_or_default(),
            end_date: end.date().format(date_format).unwrap_or_default(),
            is_public: rng.random_bool(0.7),
            ..RecordDraft::default()
        };
        store.create_record(&draft).await?;
    }
    info!(count = RECORD_COUNT, "demo records created");

    Ok(DemoSummary {
        users_created: users.len(),
        records_created: RECORD_COUNT,
        message: format!(
            "{} users and {} records created.",
            users.len(),
            RECORD_COUNT
        ),
    })
}

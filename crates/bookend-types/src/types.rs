//! Core data types for users, reading records, and search results.
//!
//! All wire JSON uses camelCase field names and string ids, matching the
//! conventions of the external record store.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, macros::format_description};

use crate::error::{ValidationError, ValidationResult};

/// A registered user.
///
/// The password travels in clear text against the mock store; credential
/// security is out of scope for this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: String,
    pub username: String,
    pub password: String,
    /// Set on registration, cleared once the user dismisses the tutorial.
    #[serde(default)]
    pub is_new_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// Payload for creating a user. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub is_new_user: bool,
}

/// One user's log entry for one book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Owning user's id. Referential integrity is by convention only.
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile_image_url: Option<String>,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Star rating, 1-5.
    pub user_rating: u8,
    #[serde(default)]
    pub notes: String,
    /// ISO `YYYY-MM-DD`, may be empty.
    #[serde(default)]
    pub start_date: String,
    /// ISO `YYYY-MM-DD`, may be empty.
    #[serde(default)]
    pub end_date: String,
    /// Whether the record appears in the community feed.
    #[serde(default)]
    pub is_public: bool,
    /// Assigned by the store on creation.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Payload for creating a reading record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile_image_url: Option<String>,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub user_rating: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub is_public: bool,
}

impl RecordDraft {
    /// Validate the rating range and date fields.
    pub fn validate(&self) -> ValidationResult {
        validate_rating(self.user_rating)?;
        validate_dates(&self.start_date, &self.end_date)
    }
}

/// Partial update for an existing record. Only present fields are sent;
/// the store merges them into the stored object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile_image_url: Option<String>,
}

impl RecordPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.user_rating.is_none()
            && self.notes.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.is_public.is_none()
            && self.user_profile_image_url.is_none()
    }

    /// Validate the fields that are present. The date-order check applies
    /// only when the patch carries both dates.
    pub fn validate(&self) -> ValidationResult {
        if let Some(rating) = self.user_rating {
            validate_rating(rating)?;
        }
        validate_dates(
            self.start_date.as_deref().unwrap_or(""),
            self.end_date.as_deref().unwrap_or(""),
        )
    }
}

/// One result row from the book-search provider.
///
/// Title and author may carry provider highlight markup (`<b>` tags);
/// use [`strip_markup`] before storing them in a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookHit {
    pub title: String,
    pub link: String,
    pub image: String,
    pub author: String,
    pub discount: String,
    pub publisher: String,
    pub pubdate: String,
    pub isbn: String,
    pub description: String,
}

impl BookHit {
    /// Title with provider markup removed.
    pub fn clean_title(&self) -> String {
        strip_markup(&self.title)
    }

    /// Author with provider markup removed.
    pub fn clean_author(&self) -> String {
        strip_markup(&self.author)
    }
}

/// Remove angle-bracket tags from provider strings.
pub fn strip_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn validate_rating(rating: u8) -> ValidationResult {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange(rating))
    }
}

fn validate_dates(start: &str, end: &str) -> ValidationResult {
    let start_date = parse_iso_date("startDate", start)?;
    let end_date = parse_iso_date("endDate", end)?;
    if let (Some(s), Some(e)) = (start_date, end_date)
        && s > e
    {
        return Err(ValidationError::DateOrder {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// Parse an optional ISO date field. Empty strings are allowed and yield
/// `None`; anything else must be a well-formed `YYYY-MM-DD`.
fn parse_iso_date(field: &'static str, value: &str) -> Result<Option<Date>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, format)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecordDraft {
        RecordDraft {
            user_id: "1".into(),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            user_rating: 4,
            ..RecordDraft::default()
        }
    }

    #[test]
    fn test_draft_valid() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_rating_bounds() {
        for rating in [1, 3, 5] {
            let mut d = draft();
            d.user_rating = rating;
            assert!(d.validate().is_ok(), "rating {rating} should pass");
        }
        for rating in [0, 6, 255] {
            let mut d = draft();
            d.user_rating = rating;
            assert!(
                matches!(d.validate(), Err(ValidationError::RatingOutOfRange(r)) if r == rating),
                "rating {rating} should fail"
            );
        }
    }

    #[test]
    fn test_date_order_checked_on_draft() {
        let mut d = draft();
        d.start_date = "2024-06-01".into();
        d.end_date = "2024-05-01".into();
        assert!(matches!(
            d.validate(),
            Err(ValidationError::DateOrder { .. })
        ));

        d.end_date = "2024-06-01".into(); // same day is fine
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_empty_dates_allowed() {
        let mut d = draft();
        d.start_date = String::new();
        d.end_date = "2024-05-01".into();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_malformed_date_rejected() {
        let mut d = draft();
        d.start_date = "June 1st".into();
        assert!(matches!(
            d.validate(),
            Err(ValidationError::InvalidDate { field: "startDate", .. })
        ));
    }

    #[test]
    fn test_patch_validates_only_present_fields() {
        let patch = RecordPatch {
            notes: Some("updated".into()),
            ..RecordPatch::default()
        };
        assert!(patch.validate().is_ok());

        let patch = RecordPatch {
            user_rating: Some(9),
            ..RecordPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(RecordPatch::default().is_empty());
        let patch = RecordPatch {
            is_public: Some(true),
            ..RecordPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_record_serde_camel_case() {
        let json = r#"{
            "id": "7",
            "userId": "2",
            "username": "alice",
            "title": "Dune",
            "author": "Frank Herbert",
            "userRating": 5,
            "notes": "",
            "startDate": "2024-01-01",
            "endDate": "2024-02-01",
            "isPublic": true,
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let record: ReadingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.user_id, "2");
        assert!(record.is_public);
        assert_eq!(record.username.as_deref(), Some("alice"));

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["userId"], "2");
        assert_eq!(out["isPublic"], true);
        // Optional fields that were absent stay absent.
        assert!(out.get("coverImage").is_none());
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = RecordPatch {
            user_rating: Some(3),
            ..RecordPatch::default()
        };
        let out = serde_json::to_value(&patch).unwrap();
        assert_eq!(out["userRating"], 3);
        assert!(out.get("notes").is_none());
        assert!(out.get("isPublic").is_none());
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>Dune</b>"), "Dune");
        assert_eq!(strip_markup("no tags"), "no tags");
        assert_eq!(strip_markup("<b>Three</b>-Body <i>Problem</i>"), "Three-Body Problem");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_book_hit_clean_fields() {
        let hit = BookHit {
            title: "<b>Project Hail Mary</b>".into(),
            author: "Andy <b>Weir</b>".into(),
            ..BookHit::default()
        };
        assert_eq!(hit.clean_title(), "Project Hail Mary");
        assert_eq!(hit.clean_author(), "Andy Weir");
    }

    #[test]
    fn test_book_hit_tolerates_missing_fields() {
        let hit: BookHit = serde_json::from_str(r#"{"title":"Dune"}"#).unwrap();
        assert_eq!(hit.title, "Dune");
        assert!(hit.isbn.is_empty());
    }
}

//! In-memory record store for tests and offline demos.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use bookend_types::{NewUser, ReadingRecord, RecordDraft, RecordPatch, User};

use crate::error::{ClientError, Result};
use crate::store::RecordStore;

/// An in-memory [`RecordStore`].
///
/// Behaves like the external store: sequential string ids, `createdAt`
/// assigned on insert, merge semantics for partial updates. Supports
/// failure injection so error paths can be exercised in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    records: RwLock<Vec<ReadingRecord>>,
    next_id: AtomicU64,
    should_fail: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            ..Self::default()
        }
    }

    /// Make every subsequent operation fail with a 500-style API error.
    pub fn set_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    fn check_fail(&self) -> Result<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            Err(ClientError::Api {
                status: 500,
                message: "injected store failure".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn next_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.check_fail()?;
        Ok(self.users.read().await.clone())
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        self.check_fail()?;
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("User {} not found", id)))
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        self.check_fail()?;
        let user = User {
            id: self.next_id(),
            username: new_user.username.clone(),
            password: new_user.password.clone(),
            is_new_user: new_user.is_new_user,
            profile_image_url: None,
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &str, user: &User) -> Result<User> {
        self.check_fail()?;
        let mut users = self.users.write().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("User {} not found", id)))?;
        *slot = User {
            id: id.to_string(),
            ..user.clone()
        };
        Ok(slot.clone())
    }

    async fn records_for_user(&self, user_id: &str) -> Result<Vec<ReadingRecord>> {
        self.check_fail()?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_record(&self, id: &str) -> Result<ReadingRecord> {
        self.check_fail()?;
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("Record {} not found", id)))
    }

    async fn create_record(&self, draft: &RecordDraft) -> Result<ReadingRecord> {
        self.check_fail()?;
        let record = ReadingRecord {
            id: self.next_id(),
            user_id: draft.user_id.clone(),
            username: draft.username.clone(),
            user_profile_image_url: draft.user_profile_image_url.clone(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            cover_image: draft.cover_image.clone(),
            publisher: draft.publisher.clone(),
            isbn: draft.isbn.clone(),
            user_rating: draft.user_rating,
            notes: draft.notes.clone(),
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            is_public: draft.is_public,
            created_at: OffsetDateTime::now_utc(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_record(&self, id: &str, patch: &RecordPatch) -> Result<ReadingRecord> {
        self.check_fail()?;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Record {} not found", id)))?;

        if let Some(rating) = patch.user_rating {
            record.user_rating = rating;
        }
        if let Some(notes) = &patch.notes {
            record.notes = notes.clone();
        }
        if let Some(start) = &patch.start_date {
            record.start_date = start.clone();
        }
        if let Some(end) = &patch.end_date {
            record.end_date = end.clone();
        }
        if let Some(is_public) = patch.is_public {
            record.is_public = is_public;
        }
        if let Some(url) = &patch.user_profile_image_url {
            record.user_profile_image_url = Some(url.clone());
        }
        Ok(record.clone())
    }

    async fn delete_record(&self, id: &str) -> Result<()> {
        self.check_fail()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ClientError::NotFound(format!("Record {} not found", id)));
        }
        Ok(())
    }

    async fn public_records(&self) -> Result<Vec<ReadingRecord>> {
        self.check_fail()?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.is_public)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(user_id: &str, title: &str, is_public: bool) -> RecordDraft {
        RecordDraft {
            user_id: user_id.into(),
            title: title.into(),
            author: "Author".into(),
            user_rating: 4,
            is_public,
            ..RecordDraft::default()
        }
    }

    #[tokio::test]
    async fn test_record_lifecycle() {
        let store = MemoryStore::new();
        let created = store.create_record(&draft("1", "Dune", true)).await.unwrap();
        assert!(!created.id.is_empty());

        let fetched = store.get_record(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Dune");

        let patch = RecordPatch {
            user_rating: Some(2),
            notes: Some("reread".into()),
            ..RecordPatch::default()
        };
        let updated = store.update_record(&created.id, &patch).await.unwrap();
        assert_eq!(updated.user_rating, 2);
        assert_eq!(updated.notes, "reread");
        // Untouched fields survive the merge.
        assert_eq!(updated.title, "Dune");
        assert!(updated.is_public);

        store.delete_record(&created.id).await.unwrap();
        assert!(matches!(
            store.get_record(&created.id).await,
            Err(ClientError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_record() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete_record("42").await,
            Err(ClientError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_public_filter() {
        let store = MemoryStore::new();
        store.create_record(&draft("1", "Public", true)).await.unwrap();
        store.create_record(&draft("1", "Private", false)).await.unwrap();
        store.create_record(&draft("2", "Shared", true)).await.unwrap();

        let public = store.public_records().await.unwrap();
        assert_eq!(public.len(), 2);
        assert!(public.iter().all(|r| r.is_public));
    }

    #[tokio::test]
    async fn test_records_for_user_filter() {
        let store = MemoryStore::new();
        store.create_record(&draft("1", "Mine", false)).await.unwrap();
        store.create_record(&draft("2", "Theirs", false)).await.unwrap();

        let mine = store.records_for_user("1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential_strings() {
        let store = MemoryStore::new();
        let a = store
            .create_user(&NewUser {
                username: "alice".into(),
                password: "pw".into(),
                is_new_user: true,
            })
            .await
            .unwrap();
        let b = store
            .create_user(&NewUser {
                username: "bob".into(),
                password: "pw".into(),
                is_new_user: true,
            })
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::new();
        store.set_fail(true);
        assert!(matches!(
            store.list_users().await,
            Err(ClientError::Api { status: 500, .. })
        ));
        store.set_fail(false);
        assert!(store.list_users().await.is_ok());
    }
}

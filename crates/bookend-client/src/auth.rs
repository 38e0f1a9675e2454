//! Registration, login, and profile flows.
//!
//! The external store has no auth of its own; these flows scan the user
//! collection client-side. Passwords are compared in plain text against the
//! mock store, and the duplicate-username check races with concurrent
//! creates. Both are accepted limitations of the delegated-persistence
//! design, not bugs to paper over here.

use tracing::{error, info};

use bookend_types::{NewUser, RecordPatch, User};

use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::store::RecordStore;

/// Register a new user.
///
/// Fails with [`ClientError::UsernameTaken`] when the username is already
/// present (case-insensitive). The check and the create are two separate
/// store calls; a concurrent registration can slip between them.
pub async fn register(store: &dyn RecordStore, username: &str, password: &str) -> Result<User> {
    let users = store.list_users().await.inspect_err(|e| {
        error!("registration failed listing users: {e}");
    })?;

    let wanted = username.to_lowercase();
    if users.iter().any(|u| u.username.to_lowercase() == wanted) {
        return Err(ClientError::UsernameTaken);
    }

    let user = store
        .create_user(&NewUser {
            username: username.to_string(),
            password: password.to_string(),
            is_new_user: true,
        })
        .await?;
    info!(username, id = %user.id, "registered user");
    Ok(user)
}

/// Log in with username and password.
///
/// Scans the user collection for an exact match and returns a session
/// carrying the user plus a demo token. A miss is
/// [`ClientError::UserNotFound`]; the caller must not persist any session
/// state on that path.
pub async fn login(store: &dyn RecordStore, username: &str, password: &str) -> Result<Session> {
    let users = store.list_users().await.inspect_err(|e| {
        error!("login failed listing users: {e}");
    })?;

    let user = users
        .into_iter()
        .find(|u| u.username == username && u.password == password)
        .ok_or(ClientError::UserNotFound)?;

    // A real backend would mint this; the mock store cannot.
    let token = format!("{}-fake-jwt-token", user.username);
    Ok(Session { user, token })
}

/// Update a user's profile image and fan the URL out to every record the
/// user owns, so the community feed shows the new image without a join.
pub async fn update_profile_image(
    store: &dyn RecordStore,
    user_id: &str,
    url: &str,
) -> Result<User> {
    let mut user = store.get_user(user_id).await?;
    user.profile_image_url = Some(url.to_string());
    let user = store.update_user(user_id, &user).await?;

    let records = store.records_for_user(user_id).await?;
    let patch = RecordPatch {
        user_profile_image_url: Some(url.to_string()),
        ..RecordPatch::default()
    };
    for record in &records {
        store.update_record(&record.id, &patch).await?;
    }
    info!(user_id, records = records.len(), "profile image updated");
    Ok(user)
}

/// Clear the new-user flag once the tutorial has been dismissed.
pub async fn dismiss_tutorial(store: &dyn RecordStore, user: &User) -> Result<User> {
    if !user.is_new_user {
        return Ok(user.clone());
    }
    let mut updated = user.clone();
    updated.is_new_user = false;
    store.update_user(&user.id, &updated).await
}

//! REST API endpoints for the bookend-service.
//!
//! Handlers delegate persistence to the [`RecordStore`] behind
//! [`AppState`]; this service holds no state of its own beyond the
//! search credentials. Validation happens here so invalid payloads
//! never reach the store.
//!
//! All endpoints return structured JSON errors via [`AppError`] with an
//! `{"error": "..."}` body.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use bookend_client::{ClientError, Session, auth, demo};
use bookend_types::{
    Rankings, ReadingRecord, RecordDraft, RecordPatch, User, ValidationError, calculate_rankings,
};

use crate::search::SearchError;
use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        // Health
        .route("/api/health", get(health))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Users
        .route("/api/users/{id}", put(update_user))
        .route("/api/users/{id}/profile-image", put(update_profile_image))
        // Reading records
        .route("/api/records", get(list_records).post(create_record))
        .route(
            "/api/records/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        // Community and rankings
        .route("/api/community", get(community))
        .route("/api/rankings", get(rankings))
        // Book search proxy
        .route("/api/search", get(search))
        // Demo data
        .route("/api/dev/seed", post(seed))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Seconds since the process started.
    pub uptime_seconds: u64,
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let now = OffsetDateTime::now_utc();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now,
        uptime_seconds: (now - state.started_at).whole_seconds().max(0) as u64,
    })
}

/// Credentials for register and login.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Register a new user.
///
/// # Errors
///
/// - [`AppError`] with 409 when the username is already taken
///   (case-insensitive).
/// - [`AppError::BadRequest`] when username or password is empty.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let user = auth::register(
        state.store.as_ref(),
        credentials.username.trim(),
        &credentials.password,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in and receive a session with a demo token.
///
/// A credential mismatch is 404, matching the store-scan semantics: the
/// caller cannot tell a missing user from a wrong password.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, AppError> {
    let session = auth::login(
        state.store.as_ref(),
        &credentials.username,
        &credentials.password,
    )
    .await?;
    Ok(Json(session))
}

/// Replace a user object (used to clear the new-user flag).
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(user): Json<User>,
) -> Result<Json<User>, AppError> {
    let updated = state.store.update_user(&id, &user).await?;
    Ok(Json(updated))
}

/// Request body for the profile-image endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageRequest {
    pub profile_image_url: String,
}

/// Set a user's profile image and fan it out to their records.
async fn update_profile_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<ProfileImageRequest>,
) -> Result<Json<User>, AppError> {
    if request.profile_image_url.trim().is_empty() {
        return Err(AppError::BadRequest(
            "profileImageUrl is required".to_string(),
        ));
    }
    let user =
        auth::update_profile_image(state.store.as_ref(), &id, &request.profile_image_url).await?;
    Ok(Json(user))
}

/// Query parameters for listing records.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordsQuery {
    pub user_id: Option<String>,
}

/// List one user's records, newest first.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] when `userId` is missing; there is
/// no endpoint for listing every record across users.
async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordsQuery>,
) -> Result<Json<Vec<ReadingRecord>>, AppError> {
    let user_id = params
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("userId query parameter is required".to_string()))?;

    let mut records = state.store.records_for_user(&user_id).await?;
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(records))
}

/// Create a reading record.
async fn create_record(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<RecordDraft>,
) -> Result<(StatusCode, Json<ReadingRecord>), AppError> {
    if draft.user_id.is_empty() {
        return Err(AppError::BadRequest("userId is required".to_string()));
    }
    if draft.title.trim().is_empty() || draft.author.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Title and author are required".to_string(),
        ));
    }
    draft.validate()?;

    let record = state.store.create_record(&draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get a single record.
async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ReadingRecord>, AppError> {
    let record = state.store.get_record(&id).await?;
    Ok(Json(record))
}

/// Apply a partial update to a record.
async fn update_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<RecordPatch>,
) -> Result<Json<ReadingRecord>, AppError> {
    if patch.is_empty() {
        return Err(AppError::BadRequest(
            "Update payload must set at least one field".to_string(),
        ));
    }
    patch.validate()?;

    let record = state.store.update_record(&id, &patch).await?;
    Ok(Json(record))
}

/// Delete a record.
async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_record(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Community feed: every public record across users, newest first.
async fn community(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ReadingRecord>>, AppError> {
    let mut records = state.store.public_records().await?;
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(records))
}

/// Ranking boards computed over the public records.
async fn rankings(State(state): State<Arc<AppState>>) -> Result<Json<Rankings>, AppError> {
    let records = state.store.public_records().await?;
    let rankings = calculate_rankings(&records, OffsetDateTime::now_utc());
    Ok(Json(rankings))
}

/// Query parameters for book search.
#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// Proxy a book search to the upstream provider.
///
/// # Errors
///
/// - [`AppError::BadRequest`] when the query is missing or empty.
/// - [`AppError::Internal`] when provider credentials are not configured.
/// - The provider's own status when it rejects the request.
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Search query is required".to_string()))?;

    let provider = state.search.as_ref().ok_or_else(|| {
        AppError::Internal("Book search credentials are not configured".to_string())
    })?;

    let items = provider.search(&query).await?;
    Ok(Json(items))
}

/// Response for the demo seed endpoint.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
}

/// Populate the store with demo users and records.
///
/// Seeding an already seeded store fails on the duplicate usernames;
/// the outcome is reported in the body rather than the status so the
/// dev tooling can show the message either way.
async fn seed(State(state): State<Arc<AppState>>) -> Json<SeedResponse> {
    match demo::generate_demo_data(state.store.as_ref()).await {
        Ok(summary) => Json(SeedResponse {
            success: true,
            message: summary.message,
        }),
        Err(e) => Json(SeedResponse {
            success: false,
            message: format!("Failed to generate demo data: {}", e),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Client(ClientError),
    Search(SearchError),
    Internal(String),
}

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::UsernameTaken => AppError::Conflict(e.to_string()),
            ClientError::NotFound(_) | ClientError::UserNotFound => {
                AppError::NotFound(e.to_string())
            }
            other => AppError::Client(other),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::Search(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Client(e) => (
                StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                e.to_string(),
            ),
            AppError::Search(e) => (
                StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "Failed to fetch data from the book search provider".to_string(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use bookend_client::MemoryStore;

    fn create_test_state() -> Arc<AppState> {
        AppState::new(Arc::new(MemoryStore::new()), None)
    }

    async fn response_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn register_user(state: &Arc<AppState>, username: &str) -> User {
        auth::register(state.store.as_ref(), username, "password123")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router().with_state(create_test_state());

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_body(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        assert!(json["timestamp"].is_string());
        assert!(json["uptime_seconds"].is_u64());
    }

    #[tokio::test]
    async fn test_register_creates_user() {
        let app = router().with_state(create_test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                serde_json::json!({"username": "alice", "password": "pw"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = response_body(response).await;
        assert_eq!(json["username"], "alice");
        assert_eq!(json["isNewUser"], true);
        assert!(json["id"].is_string());
    }

    #[tokio::test]
    async fn test_register_duplicate_username_conflicts() {
        let state = create_test_state();
        register_user(&state, "alice").await;
        let app = router().with_state(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                serde_json::json!({"username": "ALICE", "password": "other"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = response_body(response).await;
        assert_eq!(json["error"], "Username already exists");
    }

    #[tokio::test]
    async fn test_register_empty_username_rejected() {
        let app = router().with_state(create_test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                serde_json::json!({"username": "  ", "password": "pw"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let state = create_test_state();
        register_user(&state, "alice").await;
        let app = router().with_state(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                serde_json::json!({"username": "alice", "password": "password123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_body(response).await;
        assert_eq!(json["user"]["username"], "alice");
        assert_eq!(json["token"], "alice-fake-jwt-token");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_not_found() {
        let state = create_test_state();
        register_user(&state, "alice").await;
        let app = router().with_state(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                serde_json::json!({"username": "alice", "password": "nope"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_body(response).await;
        assert_eq!(json["error"], "User not found or password incorrect");
    }

    #[tokio::test]
    async fn test_update_user_clears_new_flag() {
        let state = create_test_state();
        let mut user = register_user(&state, "alice").await;
        user.is_new_user = false;
        let app = router().with_state(state);

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/users/{}", user.id),
                serde_json::to_value(&user).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_body(response).await;
        assert_eq!(json["isNewUser"], false);
    }

    #[tokio::test]
    async fn test_profile_image_fans_out() {
        let state = create_test_state();
        let user = register_user(&state, "alice").await;
        state
            .store
            .create_record(&RecordDraft {
                user_id: user.id.clone(),
                title: "Dune".into(),
                author: "Frank Herbert".into(),
                user_rating: 5,
                ..RecordDraft::default()
            })
            .await
            .unwrap();
        let app = router().with_state(Arc::clone(&state));

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/users/{}/profile-image", user.id),
                serde_json::json!({"profileImageUrl": "https://img.example/a.png"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_body(response).await;
        assert_eq!(json["profileImageUrl"], "https://img.example/a.png");

        let records = state.store.records_for_user(&user.id).await.unwrap();
        assert_eq!(
            records[0].user_profile_image_url.as_deref(),
            Some("https://img.example/a.png")
        );
    }

    #[tokio::test]
    async fn test_list_records_requires_user_id() {
        let app = router().with_state(create_test_state());

        let response = app.oneshot(get_request("/api/records")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("userId"));
    }

    #[tokio::test]
    async fn test_record_crud_lifecycle() {
        let state = create_test_state();
        let user = register_user(&state, "alice").await;
        let app = router().with_state(state);

        // Create
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/records",
                serde_json::json!({
                    "userId": user.id,
                    "username": "alice",
                    "title": "Dune",
                    "author": "Frank Herbert",
                    "userRating": 4,
                    "notes": "Slow start, great finish.",
                    "startDate": "2024-01-01",
                    "endDate": "2024-02-01",
                    "isPublic": true
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = response_body(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["title"], "Dune");

        // Read
        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/records/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // List for owner
        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/records?userId={}", user.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let list = response_body(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        // Update
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/records/{}", id),
                serde_json::json!({"userRating": 5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = response_body(response).await;
        assert_eq!(updated["userRating"], 5);
        assert_eq!(updated["notes"], "Slow start, great finish.");

        // Delete
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/records/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Gone
        let response = app
            .oneshot(get_request(&format!("/api/records/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_record_rejects_bad_rating() {
        let state = create_test_state();
        let user = register_user(&state, "alice").await;
        let app = router().with_state(state);

        for rating in [0, 6] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/records",
                    serde_json::json!({
                        "userId": user.id,
                        "title": "Dune",
                        "author": "Frank Herbert",
                        "userRating": rating
                    }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_create_record_rejects_reversed_dates() {
        let state = create_test_state();
        let user = register_user(&state, "alice").await;
        let app = router().with_state(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/records",
                serde_json::json!({
                    "userId": user.id,
                    "title": "Dune",
                    "author": "Frank Herbert",
                    "userRating": 4,
                    "startDate": "2024-06-01",
                    "endDate": "2024-05-01"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_record_rejects_empty_patch() {
        let state = create_test_state();
        let user = register_user(&state, "alice").await;
        let record = state
            .store
            .create_record(&RecordDraft {
                user_id: user.id.clone(),
                title: "Dune".into(),
                author: "Frank Herbert".into(),
                user_rating: 4,
                ..RecordDraft::default()
            })
            .await
            .unwrap();
        let app = router().with_state(state);

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/records/{}", record.id),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_community_returns_only_public_records() {
        let state = create_test_state();
        let user = register_user(&state, "alice").await;
        for (title, public) in [("Public Book", true), ("Private Book", false)] {
            state
                .store
                .create_record(&RecordDraft {
                    user_id: user.id.clone(),
                    title: title.into(),
                    author: "A".into(),
                    user_rating: 4,
                    is_public: public,
                    ..RecordDraft::default()
                })
                .await
                .unwrap();
        }
        let app = router().with_state(state);

        let response = app.oneshot(get_request("/api/community")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_body(response).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["title"], "Public Book");
    }

    #[tokio::test]
    async fn test_rankings_empty_store() {
        let app = router().with_state(create_test_state());

        let response = app.oneshot(get_request("/api/rankings")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_body(response).await;
        assert!(json["hot"].as_array().unwrap().is_empty());
        assert!(json["mostRead"].as_array().unwrap().is_empty());
        assert!(json["topRated"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rankings_groups_public_records() {
        let state = create_test_state();
        let user = register_user(&state, "alice").await;
        for rating in [5, 3] {
            state
                .store
                .create_record(&RecordDraft {
                    user_id: user.id.clone(),
                    title: "Dune".into(),
                    author: "Frank Herbert".into(),
                    user_rating: rating,
                    is_public: true,
                    ..RecordDraft::default()
                })
                .await
                .unwrap();
        }
        let app = router().with_state(state);

        let response = app.oneshot(get_request("/api/rankings")).await.unwrap();
        let json = response_body(response).await;

        let most_read = json["mostRead"].as_array().unwrap();
        assert_eq!(most_read.len(), 1);
        assert_eq!(most_read[0]["title"], "Dune");
        assert_eq!(most_read[0]["readCount"], 2);
        assert_eq!(most_read[0]["averageRating"], 4.0);
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let app = router().with_state(create_test_state());

        let response = app.oneshot(get_request("/api/search")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_body(response).await;
        assert_eq!(json["error"], "Search query is required");
    }

    #[tokio::test]
    async fn test_search_without_credentials_is_internal_error() {
        let app = router().with_state(create_test_state());

        let response = app
            .oneshot(get_request("/api/search?query=dune"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = response_body(response).await;
        assert_eq!(json["error"], "Book search credentials are not configured");
    }

    #[tokio::test]
    async fn test_seed_endpoint_populates_store() {
        let state = create_test_state();
        let app = router().with_state(Arc::clone(&state));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/dev/seed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(state.store.list_users().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_twice_reports_failure_in_body() {
        let state = create_test_state();
        let app = router().with_state(state);

        for expect_success in [true, false] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/dev/seed")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = response_body(response).await;
            assert_eq!(json["success"], expect_success);
        }
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_server_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail(true);
        let state = AppState::new(store, None);
        let app = router().with_state(state);

        let response = app.oneshot(get_request("/api/community")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_app_error_statuses() {
        let cases = [
            (
                AppError::NotFound("x".to_string()).into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::BadRequest("x".to_string())
                    .into_response()
                    .status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Conflict("x".to_string()).into_response().status(),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Internal("x".to_string()).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (got, want) in cases {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_search_error_passes_upstream_status() {
        let error = AppError::Search(SearchError::Upstream { status: 429 });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_search_failure_without_status_is_internal_error() {
        let error = AppError::Search(SearchError::MalformedResponse);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_error_conversion() {
        assert!(matches!(
            AppError::from(ClientError::UsernameTaken),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(ClientError::UserNotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(ClientError::NotFound("record 9".to_string())),
            AppError::NotFound(_)
        ));
    }
}

//! Repository and tag endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{not_found, unauthorized};
use crate::mock_server::state::MockState;
use crate::Repository;

/// Response for a single repository.
#[derive(Debug, Serialize)]
pub struct RepositoryResponse {
    pub repository: Repository,
}

/// Response for a list of repositories.
#[derive(Debug, Serialize)]
pub struct RepositoriesResponse {
    pub repositories: Vec<Repository>,
}

/// Form parameters for creating a repository.
#[derive(Debug, Deserialize)]
pub struct CreateRepositoryForm {
    pub name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub public: Option<String>,
}

/// GET /repos/show/{user}
pub async fn list_user_repositories(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(user): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state.read().await;

    if state.get_user(&user).is_none() {
        return not_found();
    }

    let authenticated = headers.contains_key(AUTHORIZATION);
    let repositories = state
        .repositories_for(&user, authenticated)
        .into_iter()
        .cloned()
        .collect();
    (StatusCode::OK, Json(RepositoriesResponse { repositories })).into_response()
}

/// GET /repos/show/{user}/{repo}
pub async fn show_repository(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((user, repo)): Path<(String, String)>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_repository(&user, &repo) {
        Some(repository) => (
            StatusCode::OK,
            Json(RepositoryResponse {
                repository: repository.clone(),
            }),
        )
            .into_response(),
        None => not_found(),
    }
}

/// GET /repos/show/{user}/{repo}/tags
///
/// Tags are served as a name-to-hash object, not a list.
pub async fn list_tags(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((user, repo)): Path<(String, String)>,
) -> impl IntoResponse {
    let state = state.read().await;

    if state.get_repository(&user, &repo).is_none() {
        return not_found();
    }

    let tags: serde_json::Map<String, serde_json::Value> = state
        .tags_for(&user, &repo)
        .map(|tags| {
            tags.iter()
                .map(|(name, hash)| (name.clone(), serde_json::Value::String(hash.clone())))
                .collect()
        })
        .unwrap_or_default();
    (StatusCode::OK, Json(serde_json::json!({ "tags": tags }))).into_response()
}

/// GET /repos/search/{query}
pub async fn search_repositories(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(query): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    let repositories = state
        .search_repositories(&query)
        .into_iter()
        .cloned()
        .collect();
    (StatusCode::OK, Json(RepositoriesResponse { repositories }))
}

/// POST /repos/create
pub async fn create_repository(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Form(form): Form<CreateRepositoryForm>,
) -> impl IntoResponse {
    if !headers.contains_key(AUTHORIZATION) {
        return unauthorized();
    }

    let public = form.public.as_deref() != Some("0");
    let mut state = state.write().await;

    match state.create_repository(&form.name, form.description, form.homepage, public) {
        Some(repository) => (
            StatusCode::OK,
            Json(RepositoryResponse {
                repository: repository.clone(),
            }),
        )
            .into_response(),
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": "repository creation failed" })),
        )
            .into_response(),
    }
}

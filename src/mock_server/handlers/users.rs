//! User endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tokio::sync::RwLock;

use super::{not_found, unauthorized};
use crate::mock_server::state::MockState;
use crate::{Key, User};

/// Response for a single user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Response for a user search.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Response for followers/following.
#[derive(Debug, Serialize)]
pub struct LoginsResponse {
    pub users: Vec<String>,
}

/// Response for the authenticated user's keys.
#[derive(Debug, Serialize)]
pub struct KeysResponse {
    pub public_keys: Vec<Key>,
}

/// GET /user/show/{login}
pub async fn show_user(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(login): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_user(&login) {
        Some(user) => (StatusCode::OK, Json(UserResponse { user: user.clone() })).into_response(),
        None => not_found(),
    }
}

/// GET /user/show/{login}/{property}
pub async fn user_property(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((login, property)): Path<(String, String)>,
) -> impl IntoResponse {
    let state = state.read().await;

    if state.get_user(&login).is_none() {
        return not_found();
    }

    match state.user_property(&login, &property) {
        Some(users) => (StatusCode::OK, Json(LoginsResponse { users })).into_response(),
        None => not_found(),
    }
}

/// GET /user/search/{query}
pub async fn search_users(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(query): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    let users = state.search_users(&query).into_iter().cloned().collect();
    (StatusCode::OK, Json(UsersResponse { users }))
}

/// GET /user/keys
pub async fn list_keys(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !headers.contains_key(AUTHORIZATION) {
        return unauthorized();
    }

    let state = state.read().await;
    (
        StatusCode::OK,
        Json(KeysResponse {
            public_keys: state.keys.clone(),
        }),
    )
        .into_response()
}

//! Axum server wiring for the v2 API mock.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A running mock of the v2 API, bound to a random local port.
///
/// Handlers read and write the shared [`MockState`], so a repository
/// created through the API is visible to later lookups.
pub struct MockServer {
    url: String,
    handle: JoinHandle<()>,
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Serve the [`Fixtures::default_scenario`] data.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario().into()).await
    }

    /// Serve no users, repositories or keys.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Serve `state`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let state = state.shared();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");

        let app = Self::create_router(state.clone());
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            url: format!("http://{addr}"),
            handle,
            state,
        }
    }

    /// Base URL to hand to `ApiClient::new`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The data behind the server, for inspection or changes mid-test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Stop serving and wait for the task to finish.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/user/show/:login", get(handlers::show_user))
            .route("/user/show/:login/:property", get(handlers::user_property))
            .route("/user/search/:query", get(handlers::search_users))
            .route("/user/keys", get(handlers::list_keys))
            .route("/repos/show/:user", get(handlers::list_user_repositories))
            .route("/repos/show/:user/:repo", get(handlers::show_repository))
            .route("/repos/show/:user/:repo/tags", get(handlers::list_tags))
            .route("/repos/search/:query", get(handlers::search_repositories))
            .route("/repos/create", post(handlers::create_repository))
            .route("/health", get(health_check))
            .with_state(state)
    }
}

impl From<DefaultScenario> for MockState {
    fn from(scenario: DefaultScenario) -> Self {
        let mut state = scenario
            .users
            .into_iter()
            .fold(MockState::new(), MockState::with_user);

        for (follower, followed) in &scenario.follows {
            state = state.with_follow(follower, followed);
        }
        for repository in scenario.repositories {
            state = state.with_repository(repository);
        }
        for (owner, repo, tags) in scenario.tags {
            state.tags.insert(format!("{owner}/{repo}"), tags);
        }
        state.keys = scenario.keys;
        state.authenticated_login = scenario.authenticated_login;
        state
    }
}

async fn health_check() -> &'static str {
    "ok"
}

//! Mock v2 API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the GitHub
//! v2 API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use octopi::mock_server::MockServer;
//! use octopi::{ApiClient, User};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ApiClient::new(server.url(), None).unwrap();
//!
//!     // Server comes with default fixtures
//!     let user = User::find(&client, "fcoury").await.unwrap();
//!     assert_eq!(user.login, "fcoury");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;

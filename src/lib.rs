//! Octopi: a client library for the GitHub v2 REST API.
//!
//! Remote entities (users, repositories, tags, keys) are plain typed
//! structs. Each declares where it lives through a [`ResourceDeclaration`],
//! and a small generic [`finder`] turns those declarations into requests.
//!
//! # Quick Start
//!
//! ```no_run
//! use octopi::{ApiClient, Options, Resolution, Tag, User};
//!
//! #[tokio::main]
//! async fn main() -> octopi::Result<()> {
//!     // Create client from environment variables
//!     let client = ApiClient::from_env()?;
//!
//!     // Find a user by login
//!     let user = User::find(&client, "fcoury").await?;
//!     println!("User: {}", user);
//!
//!     // Relationships are fetched on demand
//!     let repos = user.repositories(&client).await?;
//!     println!("{} has {} repositories", user, repos.len());
//!
//!     let followers = user.followers(&client).await?;
//!     println!("Followed by: {}", followers.join(", "));
//!
//!     // Deep properties resolve each login into a full user
//!     let following = user.following_deep(&client, Resolution::Sequential).await?;
//!     println!("Following {} users", following.len());
//!
//!     // Tags of a repository
//!     let tags = Tag::all(&client, &Options::from([("user", "fcoury"), ("repo", "octopi")])).await?;
//!     println!("Found {} tags", tags.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`validate_args`] / [`validate_hash`] check argument shapes before
//!   any request is made.
//! - [`PathTemplate`] renders `:name` placeholders into request paths.
//! - [`finder`] provides `find`, `find_all` and `find_plural` over any
//!   [`Resource`].
//! - [`Transport`] is the HTTP seam; [`ApiClient`] implements it with
//!   reqwest.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `OCTOPI_LOGIN` and `OCTOPI_TOKEN` (optional) - credentials; without
//!   them the session is read-only
//! - `OCTOPI_API_URL` (optional) - Base URL (defaults to `https://github.com/api/v2/json`)

mod client;
mod error;
pub mod finder;
mod models;
mod template;
mod traits;
mod validate;

#[cfg(test)]
mod test_support;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ApiClient, Credentials};
pub use error::{OctopiError, Result};
pub use finder::Resolution;
pub use template::{PathParams, PathTemplate};
pub use validate::{validate_args, validate_hash, Options, Shape};

// Re-export traits
pub use traits::{GetOptions, PathKind, Resource, ResourceDeclaration, Transport};

// Re-export models
pub use models::{
    CreateRepository, Key, KeySet, Plan, Repository, RepositoryLookup, RepositorySet, Tag, User,
};

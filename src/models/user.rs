//! User model, lookups and relationship accessors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OctopiError, Result};
use crate::finder::{self, Resolution};
use crate::models::key::{Key, KeySet};
use crate::models::plan::Plan;
use crate::models::repository::{CreateRepository, Repository, RepositoryLookup, RepositorySet};
use crate::models::timestamp;
use crate::template::PathParams;
use crate::traits::{GetOptions, Resource, ResourceDeclaration, Transport};
use crate::validate::{validate_args, Options, Shape};

/// A user account.
///
/// Private counters and the plan are only filled in for the authenticated
/// user's own record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Login name, the user's identity.
    pub login: String,

    #[serde(default)]
    pub id: Option<u64>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub blog: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub followers_count: Option<u64>,

    #[serde(default)]
    pub following_count: Option<u64>,

    #[serde(default)]
    pub public_repo_count: Option<u64>,

    #[serde(default)]
    pub public_gist_count: Option<u64>,

    #[serde(default)]
    pub private_gist_count: Option<u64>,

    #[serde(default)]
    pub owned_private_repo_count: Option<u64>,

    #[serde(default)]
    pub total_private_repo_count: Option<u64>,

    #[serde(default)]
    pub collaborators: Option<u64>,

    /// Disk usage in kilobytes.
    #[serde(default)]
    pub disk_usage: Option<u64>,

    #[serde(default)]
    pub plan: Option<Plan>,
}

impl Resource for User {
    const DECLARATION: ResourceDeclaration = ResourceDeclaration::new(
        "user",
        "users",
        "/user/show/:id",
        Some("/user/search/:query"),
    );
}

impl User {
    /// Find a single user by login.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let user = User::find(&client, "fcoury").await?;
    /// assert_eq!(user.login, "fcoury");
    /// ```
    #[tracing::instrument(skip(transport))]
    pub async fn find(transport: &dyn Transport, login: &str) -> Result<User> {
        validate_args(&[(login, Shape::User)])?;
        finder::find(transport, &[login]).await
    }

    /// Find all users whose login matches `query` ("oe" matches joe, moe
    /// and monroe).
    #[tracing::instrument(skip(transport))]
    pub async fn find_all(transport: &dyn Transport, query: &str) -> Result<Vec<User>> {
        validate_args(&[(query, Shape::User)])?;
        finder::find_all(transport, query).await
    }

    /// All repositories of this user.
    ///
    /// If this is the authenticated user, private repositories are
    /// included.
    #[tracing::instrument(skip(self, transport), fields(login = %self.login))]
    pub async fn repositories(&self, transport: &dyn Transport) -> Result<RepositorySet> {
        let repositories = Repository::for_user(transport, &self.login).await?;
        Ok(RepositorySet::new(repositories).owned_by(self.clone()))
    }

    /// One repository of this user, by name or by named options.
    ///
    /// Options are merged over `{user: login}`, so an explicit `user`
    /// option wins. An `owner/name` lookup must name this user as owner
    /// unless `user` is given explicitly.
    #[tracing::instrument(skip(self, transport, lookup), fields(login = %self.login))]
    pub async fn repository(
        &self,
        transport: &dyn Transport,
        lookup: impl Into<RepositoryLookup> + Send,
    ) -> Result<Repository> {
        let options = lookup.into().into_options();

        let mut merged = Options::new().with("user", self.login.as_str());
        merged.merge(options);
        Repository::find(transport, &merged).await
    }

    /// Create a repository owned by this user.
    #[tracing::instrument(skip(self, transport, params), fields(login = %self.login))]
    pub async fn create_repository(
        &self,
        transport: &dyn Transport,
        name: &str,
        params: &CreateRepository,
    ) -> Result<Repository> {
        validate_args(&[(name, Shape::Repo)])?;
        Repository::create(transport, &self.login, name, params).await
    }

    /// The SSH public keys of the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`OctopiError::AuthenticationRequired`] without issuing a
    /// request when the session is read-only.
    #[tracing::instrument(skip(self, transport), fields(login = %self.login))]
    pub async fn keys(&self, transport: &dyn Transport) -> Result<KeySet> {
        if transport.read_only() {
            tracing::warn!("keys requested on a read-only session");
            return Err(OctopiError::AuthenticationRequired(
                "to view keys, you must be authenticated".to_string(),
            ));
        }

        let path = "/user/keys";
        let mut body = transport.get(path, GetOptions::uncached()).await?;
        let keys = finder::collection_records(&mut body, "public_keys", path)?
            .into_iter()
            .map(serde_json::from_value::<Key>)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(KeySet::new(keys))
    }

    /// Logins of this user's followers.
    pub async fn followers(&self, transport: &dyn Transport) -> Result<Vec<String>> {
        self.property(transport, "followers").await
    }

    /// This user's followers as full users, one lookup per follower.
    ///
    /// Users with many followers may run into the service's rate limit.
    pub async fn followers_deep(
        &self,
        transport: &dyn Transport,
        resolution: Resolution,
    ) -> Result<Vec<User>> {
        self.deep_property(transport, "followers", resolution).await
    }

    /// Logins of the users this user follows.
    pub async fn following(&self, transport: &dyn Transport) -> Result<Vec<String>> {
        self.property(transport, "following").await
    }

    /// The users this user follows, one lookup per user.
    pub async fn following_deep(
        &self,
        transport: &dyn Transport,
        resolution: Resolution,
    ) -> Result<Vec<User>> {
        self.deep_property(transport, "following", resolution).await
    }

    /// Fetch a shallow property: a list of logins.
    #[tracing::instrument(skip(self, transport), fields(login = %self.login))]
    async fn property(&self, transport: &dyn Transport, property: &str) -> Result<Vec<String>> {
        let decl = Self::DECLARATION;
        let path = decl
            .resource_path
            .join(property)
            .render(&PathParams::new().with("id", &self.login))?;

        let mut body = transport.get(&path, GetOptions::default()).await?;
        let logins = finder::collection_records(&mut body, decl.plural, &path)?
            .into_iter()
            .map(serde_json::from_value::<String>)
            .collect::<serde_json::Result<Vec<_>>>()?;
        tracing::debug!(count = logins.len(), "fetched {property}");
        Ok(logins)
    }

    /// Resolve a shallow property into full users.
    async fn deep_property(
        &self,
        transport: &dyn Transport,
        property: &str,
        resolution: Resolution,
    ) -> Result<Vec<User>> {
        let logins = self.property(transport, property).await?;
        finder::resolve_all(logins, resolution, |login| async move {
            User::find(transport, &login).await
        })
        .await
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.login)
    }
}

impl AsRef<str> for User {
    fn as_ref(&self) -> &str {
        &self.login
    }
}

//! Repository model, lookups and the owner-aware repository collection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OctopiError, Result};
use crate::finder;
use crate::models::tag::Tag;
use crate::models::timestamp;
use crate::models::user::User;
use crate::traits::{PathKind, Resource, ResourceDeclaration, Transport};
use crate::validate::{validate_args, validate_hash, Options, Shape};

/// A repository hosted on the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name, without the owner.
    pub name: String,

    /// Login of the owning user.
    pub owner: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub homepage: Option<String>,

    /// Web URL of the repository.
    #[serde(default)]
    pub url: Option<String>,

    /// Whether this repository is a fork.
    #[serde(default)]
    pub fork: bool,

    /// Whether this repository is private.
    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub watchers: Option<u64>,

    #[serde(default)]
    pub forks: Option<u64>,

    #[serde(default)]
    pub open_issues: Option<u64>,

    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub pushed_at: Option<DateTime<Utc>>,
}

impl Resource for Repository {
    const DECLARATION: ResourceDeclaration = ResourceDeclaration::new(
        "repository",
        "repositories",
        "/repos/show/:id",
        Some("/repos/search/:query"),
    );
}

/// Parameters for creating a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRepository {
    pub description: Option<String>,
    pub homepage: Option<String>,
    /// Create a public repository. Defaults to public when unset.
    pub public: Option<bool>,
}

impl CreateRepository {
    fn form(&self, name: &str) -> Vec<(String, String)> {
        let mut form = vec![("name".to_string(), name.to_string())];
        if let Some(description) = &self.description {
            form.push(("description".to_string(), description.clone()));
        }
        if let Some(homepage) = &self.homepage {
            form.push(("homepage".to_string(), homepage.clone()));
        }
        if let Some(public) = self.public {
            form.push(("public".to_string(), if public { "1" } else { "0" }.to_string()));
        }
        form
    }
}

/// A single-repository lookup: a bare name or named options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryLookup {
    Name(String),
    Options(Options),
}

impl RepositoryLookup {
    /// Express the lookup as named options.
    pub fn into_options(self) -> Options {
        match self {
            Self::Name(name) => Options::new().with("name", name),
            Self::Options(options) => options,
        }
    }
}

impl From<&str> for RepositoryLookup {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for RepositoryLookup {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Options> for RepositoryLookup {
    fn from(options: Options) -> Self {
        Self::Options(options)
    }
}

impl Repository {
    /// Fetch one repository.
    ///
    /// `options` must carry the owner as `user` and the repository as
    /// `name`, `repo` or `repository`. An `owner/name` value supplies the
    /// owner on its own; combined with a different `user` it is rejected.
    #[tracing::instrument(skip(transport))]
    pub async fn find(transport: &dyn Transport, options: &Options) -> Result<Repository> {
        let (user, name) = repository_details(options)?;
        finder::find(transport, &[user, name]).await
    }

    /// Search repositories by free text.
    #[tracing::instrument(skip(transport))]
    pub async fn find_all(transport: &dyn Transport, query: &str) -> Result<Vec<Repository>> {
        validate_args(&[(query, Shape::Query)])?;
        finder::find_all(transport, query).await
    }

    /// List all repositories owned by `login`.
    #[tracing::instrument(skip(transport))]
    pub async fn for_user(transport: &dyn Transport, login: &str) -> Result<Vec<Repository>> {
        validate_args(&[(login, Shape::User)])?;
        finder::find_plural(transport, &[login], PathKind::Resource, std::convert::identity).await
    }

    /// Create a repository named `name` for the authenticated `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`OctopiError::AuthenticationRequired`] without issuing a
    /// request when the session is read-only.
    #[tracing::instrument(skip(transport, params))]
    pub async fn create(
        transport: &dyn Transport,
        owner: &str,
        name: &str,
        params: &CreateRepository,
    ) -> Result<Repository> {
        if transport.read_only() {
            tracing::warn!("refusing to create repository on a read-only session");
            return Err(OctopiError::AuthenticationRequired(
                "to create a repository, you must be authenticated".to_string(),
            ));
        }
        validate_args(&[(owner, Shape::User), (name, Shape::Repo)])?;

        let path = "/repos/create";
        let mut body = transport.post(path, &params.form(name)).await?;
        match body.get_mut(Self::DECLARATION.singular).map(serde_json::Value::take) {
            Some(record @ serde_json::Value::Object(_)) => Self::from_record(record),
            _ => Err(OctopiError::MalformedResponse {
                path: path.to_string(),
                reason: "no repository in create response".to_string(),
            }),
        }
    }

    /// The `owner/name` identifier.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// List this repository's tags.
    pub async fn tags(&self, transport: &dyn Transport) -> Result<Vec<Tag>> {
        let options = Options::new()
            .with("user", self.owner.as_str())
            .with("repo", self.name.as_str());
        Tag::all(transport, &options).await
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Option keys that name a repository, in lookup order.
const REPOSITORY_KEYS: [&str; 3] = ["repo", "repository", "name"];

/// Extract `(user, repo)` from lookup options.
///
/// The repository may be named by `repo`, `repository` or `name`. An
/// `owner/name` value supplies the owner when `user` is absent; a `user`
/// naming someone else is a conflict.
pub(crate) fn gather_details(options: &Options) -> Result<(&str, &str)> {
    let (key, repo) = REPOSITORY_KEYS
        .iter()
        .find_map(|&key| options.get(key).map(|value| (key, value)))
        .ok_or_else(|| OctopiError::invalid("repo", Some(Shape::Repo), "a repository is required"))?;

    let (owner, name) = match repo.split_once('/') {
        Some((owner, name)) => (Some(owner), name),
        None => (None, repo),
    };

    let user = match (options.get("user"), owner) {
        (Some(user), Some(owner)) if user != owner => {
            return Err(OctopiError::invalid(
                key,
                Some(Shape::Repo),
                format!("{repo} is not owned by {user}"),
            ))
        }
        (Some(user), _) => user,
        (None, Some(owner)) => owner,
        (None, None) => {
            return Err(OctopiError::invalid(
                "user",
                Some(Shape::User),
                "a repository owner is required",
            ))
        }
    };

    Ok((user, name))
}

/// Validate lookup options and resolve them to `(user, repo)`.
///
/// Repository keys are checked after splitting any `owner/name` value;
/// every other option goes through [`validate_hash`].
pub(crate) fn repository_details(options: &Options) -> Result<(&str, &str)> {
    let rest: Options = options
        .iter()
        .filter(|(key, _)| !REPOSITORY_KEYS.contains(key))
        .collect();
    validate_hash(&rest)?;

    let (user, name) = gather_details(options)?;
    validate_args(&[(user, Shape::User), (name, Shape::Repo)])?;
    Ok((user, name))
}

/// Repositories of one user, remembering who owns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositorySet {
    repositories: Vec<Repository>,
    #[serde(skip)]
    user: Option<User>,
}

impl RepositorySet {
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self {
            repositories,
            user: None,
        }
    }

    /// Attach the owning user.
    #[must_use]
    pub fn owned_by(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// The owning user, if known.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Find a repository by name.
    pub fn get(&self, name: &str) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.name == name)
    }

    /// Repository names in order.
    pub fn names(&self) -> Vec<&str> {
        self.repositories.iter().map(|r| r.name.as_str()).collect()
    }

    /// Private repositories. Only the authenticated owner sees any.
    pub fn private(&self) -> Vec<&Repository> {
        self.repositories.iter().filter(|r| r.private).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Repository> {
        self.repositories.iter()
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    pub fn into_vec(self) -> Vec<Repository> {
        self.repositories
    }
}

impl IntoIterator for RepositorySet {
    type Item = Repository;
    type IntoIter = std::vec::IntoIter<Repository>;

    fn into_iter(self) -> Self::IntoIter {
        self.repositories.into_iter()
    }
}

impl<'a> IntoIterator for &'a RepositorySet {
    type Item = &'a Repository;
    type IntoIter = std::slice::Iter<'a, Repository>;

    fn into_iter(self) -> Self::IntoIter {
        self.repositories.iter()
    }
}

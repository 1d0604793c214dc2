//! Mock server state management.
//!
//! Provides the in-memory data store for the mock API server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Key, Repository, User};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Users indexed by login.
    pub users: HashMap<String, User>,

    /// Follower logins indexed by the followed login, in follow order.
    pub followers: HashMap<String, Vec<String>>,

    /// Followed logins indexed by the follower login, in follow order.
    pub following: HashMap<String, Vec<String>>,

    /// All repositories, in insertion order.
    pub repositories: Vec<Repository>,

    /// Tags as `(name, hash)` pairs indexed by `owner/name`.
    pub tags: HashMap<String, Vec<(String, String)>>,

    /// SSH keys of the authenticated user.
    pub keys: Vec<Key>,

    /// Login that authenticated requests act as.
    pub authenticated_login: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a user to the state.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.login.clone(), user);
        self
    }

    /// Record that `follower` follows `followed`.
    pub fn with_follow(mut self, follower: &str, followed: &str) -> Self {
        self.followers
            .entry(followed.to_string())
            .or_default()
            .push(follower.to_string());
        self.following
            .entry(follower.to_string())
            .or_default()
            .push(followed.to_string());
        self
    }

    /// Add a repository to the state.
    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    /// Set the tags of a repository.
    pub fn with_tags(mut self, owner: &str, repo: &str, tags: &[(&str, &str)]) -> Self {
        self.tags.insert(
            format!("{owner}/{repo}"),
            tags.iter()
                .map(|(name, hash)| (name.to_string(), hash.to_string()))
                .collect(),
        );
        self
    }

    /// Add an SSH key for the authenticated user.
    pub fn with_key(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }

    /// Set the login authenticated requests act as.
    pub fn with_authenticated_login(mut self, login: &str) -> Self {
        self.authenticated_login = Some(login.to_string());
        self
    }

    /// Get a user by login.
    pub fn get_user(&self, login: &str) -> Option<&User> {
        self.users.get(login)
    }

    /// Users whose login contains `query`, sorted by login.
    pub fn search_users(&self, query: &str) -> Vec<&User> {
        let query = query.to_lowercase();
        let mut users: Vec<&User> = self
            .users
            .values()
            .filter(|u| u.login.to_lowercase().contains(&query))
            .collect();
        users.sort_by(|a, b| a.login.cmp(&b.login));
        users
    }

    /// Follower or following logins of a user.
    pub fn user_property(&self, login: &str, property: &str) -> Option<Vec<String>> {
        let index = match property {
            "followers" => &self.followers,
            "following" => &self.following,
            _ => return None,
        };
        Some(index.get(login).cloned().unwrap_or_default())
    }

    /// Repositories owned by `owner`.
    ///
    /// Private repositories are only listed for the authenticated owner.
    pub fn repositories_for(&self, owner: &str, authenticated: bool) -> Vec<&Repository> {
        let sees_private =
            authenticated && self.authenticated_login.as_deref() == Some(owner);
        self.repositories
            .iter()
            .filter(|r| r.owner == owner && (sees_private || !r.private))
            .collect()
    }

    /// Get a repository by owner and name.
    pub fn get_repository(&self, owner: &str, name: &str) -> Option<&Repository> {
        self.repositories
            .iter()
            .find(|r| r.owner == owner && r.name == name)
    }

    /// Public repositories whose name contains `query`.
    pub fn search_repositories(&self, query: &str) -> Vec<&Repository> {
        let query = query.to_lowercase();
        self.repositories
            .iter()
            .filter(|r| !r.private && r.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Tags of a repository, if it has any recorded.
    pub fn tags_for(&self, owner: &str, repo: &str) -> Option<&Vec<(String, String)>> {
        self.tags.get(&format!("{owner}/{repo}"))
    }

    /// Create a repository for the authenticated user.
    ///
    /// Returns `None` when nobody is authenticated or the name is taken.
    pub fn create_repository(
        &mut self,
        name: &str,
        description: Option<String>,
        homepage: Option<String>,
        public: bool,
    ) -> Option<&Repository> {
        let owner = self.authenticated_login.clone()?;
        if self.get_repository(&owner, name).is_some() {
            return None;
        }

        self.repositories.push(Repository {
            name: name.to_string(),
            url: Some(format!("https://github.com/{owner}/{name}")),
            owner,
            description,
            homepage,
            fork: false,
            private: !public,
            watchers: Some(1),
            forks: Some(0),
            open_issues: Some(0),
            created_at: Some(chrono::Utc::now()),
            pushed_at: None,
        });
        self.repositories.last()
    }
}

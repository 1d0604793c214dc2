//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{Key, Plan, Repository, User};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// Create a minimal user with only a login.
    pub fn minimal_user(login: &str) -> User {
        User {
            login: login.to_string(),
            id: None,
            name: None,
            company: None,
            blog: None,
            location: None,
            email: None,
            created_at: None,
            followers_count: Some(0),
            following_count: Some(0),
            public_repo_count: Some(0),
            public_gist_count: Some(0),
            private_gist_count: None,
            owned_private_repo_count: None,
            total_private_repo_count: None,
            collaborators: None,
            disk_usage: None,
            plan: None,
        }
    }

    /// Create a user with a profile filled in.
    pub fn user(login: &str, id: u64, name: &str) -> User {
        let mut user = Self::minimal_user(login);
        user.id = Some(id);
        user.name = Some(name.to_string());
        user.created_at = Utc.with_ymd_and_hms(2008, 3, 5, 16, 35, 34).single();
        user
    }

    /// Create a user as seen by themselves, with private counters and a plan.
    pub fn authenticated_user(login: &str, id: u64, name: &str, plan: &str) -> User {
        let mut user = Self::user(login, id, name);
        user.private_gist_count = Some(1);
        user.owned_private_repo_count = Some(1);
        user.total_private_repo_count = Some(1);
        user.collaborators = Some(0);
        user.disk_usage = Some(1024);
        user.plan = Some(Plan {
            name: Some(plan.to_string()),
            collaborators: Some(1),
            space: Some(614_400),
            private_repos: Some(5),
        });
        user
    }

    // =========================================================================
    // Repository Fixtures
    // =========================================================================

    /// Create a public repository.
    pub fn repository(owner: &str, name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            owner: owner.to_string(),
            description: Some(format!("{name} repository")),
            homepage: None,
            url: Some(format!("https://github.com/{owner}/{name}")),
            fork: false,
            private: false,
            watchers: Some(10),
            forks: Some(2),
            open_issues: Some(1),
            created_at: None,
            pushed_at: None,
        }
    }

    /// Create a private repository.
    pub fn private_repository(owner: &str, name: &str) -> Repository {
        let mut repo = Self::repository(owner, name);
        repo.private = true;
        repo
    }

    // =========================================================================
    // Key Fixtures
    // =========================================================================

    /// Create an SSH key.
    pub fn key(id: u64, title: &str) -> Key {
        Key {
            id,
            title: title.to_string(),
            key: format!("ssh-rsa AAAAB3NzaC1yc2E{id} {title}"),
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create a default scenario with commonly needed test data.
    ///
    /// - `fcoury` (authenticated, micro plan), `joe`, `moe`, `monroe`
    /// - `joe` and `moe` follow `fcoury`; `fcoury` follows `monroe`
    /// - `fcoury/octopi`, private `fcoury/secret`, `joe/proj`
    /// - `joe/proj` tagged `v1.0` and `v1.1`
    /// - one SSH key for `fcoury`
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            users: vec![
                Self::authenticated_user("fcoury", 1, "Felipe Coury", "micro"),
                Self::user("joe", 2, "Joe"),
                Self::user("moe", 3, "Moe"),
                Self::user("monroe", 4, "Monroe"),
            ],
            follows: vec![
                ("joe".to_string(), "fcoury".to_string()),
                ("moe".to_string(), "fcoury".to_string()),
                ("fcoury".to_string(), "monroe".to_string()),
            ],
            repositories: vec![
                Self::repository("fcoury", "octopi"),
                Self::private_repository("fcoury", "secret"),
                Self::repository("joe", "proj"),
            ],
            tags: vec![(
                "joe".to_string(),
                "proj".to_string(),
                vec![
                    ("v1.0".to_string(), "abc123".to_string()),
                    ("v1.1".to_string(), "def456".to_string()),
                ],
            )],
            keys: vec![Self::key(1, "laptop")],
            authenticated_login: Some("fcoury".to_string()),
        }
    }
}

/// A complete test scenario.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub users: Vec<User>,
    /// `(follower, followed)` pairs.
    pub follows: Vec<(String, String)>,
    pub repositories: Vec<Repository>,
    /// `(owner, repo, [(tag, hash)])` entries.
    pub tags: Vec<(String, String, Vec<(String, String)>)>,
    pub keys: Vec<Key>,
    pub authenticated_login: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_user_has_plan() {
        let user = Fixtures::authenticated_user("fcoury", 1, "Felipe Coury", "micro");
        assert_eq!(user.plan.and_then(|p| p.name), Some("micro".to_string()));
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.users.len(), 4);
        assert_eq!(scenario.repositories.len(), 3);
        assert_eq!(scenario.tags[0].2.len(), 2);
    }
}

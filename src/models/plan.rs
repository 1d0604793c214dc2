//! Account plan value object.

use serde::{Deserialize, Serialize};

/// The billing plan attached to a user account.
///
/// Only present on the authenticated user's own record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan name (e.g. "free", "micro").
    #[serde(default)]
    pub name: Option<String>,

    /// Number of collaborators allowed.
    #[serde(default)]
    pub collaborators: Option<u64>,

    /// Disk space allowed, in kilobytes.
    #[serde(default)]
    pub space: Option<u64>,

    /// Number of private repositories allowed.
    #[serde(default)]
    pub private_repos: Option<u64>,
}

impl Plan {
    /// Whether the plan allows any private repositories.
    pub fn allows_private_repos(&self) -> bool {
        self.private_repos.map_or(false, |n| n > 0)
    }
}

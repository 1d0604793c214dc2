//! Resource trait tying entity types to their request paths.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{OctopiError, Result};
use crate::template::PathTemplate;

/// Which of a resource's templates a request goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// The search template (`find_path`).
    Find,
    /// The direct lookup template (`resource_path`).
    Resource,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Find => f.write_str("find"),
            Self::Resource => f.write_str("resource"),
        }
    }
}

/// Static metadata describing how a resource is reached.
#[derive(Debug, Clone)]
pub struct ResourceDeclaration {
    /// Response key for a single record (e.g. `"user"`).
    pub singular: &'static str,
    /// Response key for a collection (e.g. `"users"`).
    pub plural: &'static str,
    /// Template for direct lookups.
    pub resource_path: PathTemplate,
    /// Template for searches, if the resource supports them.
    pub find_path: Option<PathTemplate>,
}

impl ResourceDeclaration {
    /// Declare a resource with a lookup template and an optional search
    /// template.
    pub const fn new(
        singular: &'static str,
        plural: &'static str,
        resource_path: &'static str,
        find_path: Option<&'static str>,
    ) -> Self {
        Self {
            singular,
            plural,
            resource_path: PathTemplate::new(resource_path),
            find_path: match find_path {
                Some(path) => Some(PathTemplate::new(path)),
                None => None,
            },
        }
    }

    /// Select the template for `kind`.
    pub fn path_for(&self, kind: PathKind) -> Result<&PathTemplate> {
        match kind {
            PathKind::Resource => Ok(&self.resource_path),
            PathKind::Find => self.find_path.as_ref().ok_or(OctopiError::MissingPath {
                resource: self.singular,
                kind,
            }),
        }
    }
}

/// An entity type reachable through the generic finder.
///
/// Implementors only declare metadata; the finder functions in
/// [`crate::finder`] do the work.
pub trait Resource: DeserializeOwned + Send {
    /// Where and how this resource lives on the remote service.
    const DECLARATION: ResourceDeclaration;

    /// Build an entity from one decoded record.
    fn from_record(record: Value) -> Result<Self> {
        Ok(serde_json::from_value(record)?)
    }
}

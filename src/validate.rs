//! Argument shape contracts.
//!
//! Every value that ends up interpolated into a request path is checked
//! here first. Validation never performs I/O.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{OctopiError, Result};

/// A named contract a raw argument must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A login name.
    User,
    /// A repository name.
    Repo,
    /// A free-text search term.
    Query,
    /// A full 40-character commit hash.
    Sha,
    /// An issue state, `open` or `closed`.
    State,
    /// A numeric identifier.
    Id,
}

impl Shape {
    /// The tag name of this shape.
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Repo => "repo",
            Self::Query => "query",
            Self::Sha => "sha",
            Self::State => "state",
            Self::Id => "id",
        }
    }

    /// Resolve a named option key to the shape its value must satisfy.
    pub fn for_key(key: &str) -> Option<Self> {
        match key {
            "user" => Some(Self::User),
            "repo" | "repository" | "name" => Some(Self::Repo),
            "query" => Some(Self::Query),
            "sha" => Some(Self::Sha),
            "state" => Some(Self::State),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    /// Check whether `value` satisfies this shape.
    pub fn accepts(self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self {
            Self::User | Self::Repo => {
                value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
                    && !value.chars().all(|c| c == '.')
            }
            Self::Query => !value
                .chars()
                .any(|c| c.is_control() || matches!(c, '/' | '?' | '#')),
            Self::Sha => value.len() == 40 && value.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')),
            Self::State => value == "open" || value == "closed",
            Self::Id => value.chars().all(|c| c.is_ascii_digit()),
        }
    }

    fn describe(self, value: &str) -> String {
        match self {
            Self::User => format!("{value} is an invalid username"),
            Self::Repo => format!("{value} is an invalid repository name"),
            Self::Query => format!("{value} is an invalid search query"),
            Self::Sha => format!("{value} is an invalid SHA hash"),
            Self::State => format!("{value} is an invalid state; should be 'open' or 'closed'"),
            Self::Id => format!("{value} is an invalid ID"),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name())
    }
}

/// Check positional arguments against their shapes.
///
/// Fails on the first value that does not satisfy its shape.
///
/// # Example
///
/// ```
/// use octopi::{validate_args, Shape};
///
/// assert!(validate_args(&[("fcoury", Shape::User), ("octopi", Shape::Repo)]).is_ok());
/// assert!(validate_args(&[("../etc", Shape::User)]).is_err());
/// ```
pub fn validate_args(args: &[(&str, Shape)]) -> Result<()> {
    for &(value, shape) in args {
        if !shape.accepts(value) {
            return Err(OctopiError::invalid(value, Some(shape), shape.describe(value)));
        }
    }
    Ok(())
}

/// Check named options: every key must be a known shape tag and every
/// value must satisfy it.
pub fn validate_hash(options: &Options) -> Result<()> {
    for (key, value) in options.iter() {
        let shape = Shape::for_key(key)
            .ok_or_else(|| OctopiError::invalid(key, None, format!("unknown option '{key}'")))?;
        if !shape.accepts(value) {
            return Err(OctopiError::invalid(key, Some(shape), shape.describe(value)));
        }
    }
    Ok(())
}

/// Named string options, such as `{user: "joe", repo: "proj"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(BTreeMap<String, String>);

impl Options {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an option, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up the first present option among `keys`.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get(k))
    }

    /// Overlay `other` on top of these options; `other` wins on conflicts.
    pub fn merge(&mut self, other: Options) {
        self.0.extend(other.0);
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Options {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_and_repo_shapes() {
        assert!(Shape::User.accepts("fcoury"));
        assert!(Shape::User.accepts("a_b-c.d"));
        assert!(Shape::Repo.accepts("octopi.rs"));
        assert!(!Shape::User.accepts(""));
        assert!(!Shape::User.accepts("joe/proj"));
        assert!(!Shape::User.accepts("white space"));
        assert!(!Shape::Repo.accepts(".."));
        assert!(!Shape::Repo.accepts("proj?x"));
    }

    #[test]
    fn test_other_shapes() {
        assert!(Shape::Sha.accepts("0123456789abcdef0123456789abcdef01234567"));
        assert!(!Shape::Sha.accepts("abc123"));
        assert!(!Shape::Sha.accepts("0123456789ABCDEF0123456789ABCDEF01234567"));
        assert!(Shape::State.accepts("open"));
        assert!(!Shape::State.accepts("merged"));
        assert!(Shape::Id.accepts("42"));
        assert!(!Shape::Id.accepts("4x2"));
        assert!(Shape::Query.accepts("oe"));
        assert!(!Shape::Query.accepts("a/b"));
    }

    #[test]
    fn test_validate_args_reports_offender() {
        let err = validate_args(&[("fcoury", Shape::User), ("bad name", Shape::Repo)]).unwrap_err();
        match err {
            OctopiError::Validation {
                argument, shape, ..
            } => {
                assert_eq!(argument, "bad name");
                assert_eq!(shape, Some(Shape::Repo));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_args_empty_is_ok() {
        assert!(validate_args(&[]).is_ok());
    }

    #[test]
    fn test_validate_hash() {
        let ok = Options::from([("user", "joe"), ("name", "proj")]);
        assert!(validate_hash(&ok).is_ok());

        let bad_value = Options::from([("sha", "nope")]);
        assert!(matches!(
            validate_hash(&bad_value),
            Err(OctopiError::Validation { shape: Some(Shape::Sha), .. })
        ));

        let unknown = Options::from([("color", "blue")]);
        match validate_hash(&unknown).unwrap_err() {
            OctopiError::Validation { argument, shape, .. } => {
                assert_eq!(argument, "color");
                assert_eq!(shape, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_options_merge_prefers_other() {
        let mut base = Options::new().with("user", "fcoury");
        base.merge(Options::from([("user", "joe"), ("name", "proj")]));
        assert_eq!(base.get("user"), Some("joe"));
        assert_eq!(base.first_of(&["repo", "name"]), Some("proj"));
        assert_eq!(base.len(), 2);
    }
}

//! Path templates with `:name` placeholders.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::error::{OctopiError, Result};

/// A request path pattern such as `/repos/show/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate(Cow<'static, str>);

impl PathTemplate {
    /// Create a template from a static pattern.
    pub const fn new(template: &'static str) -> Self {
        Self(Cow::Borrowed(template))
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a template with a fixed trailing segment, e.g.
    /// `/user/show/:id` joined with `followers`.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        Self(Cow::Owned(format!(
            "{}/{}",
            self.0.trim_end_matches('/'),
            segment.trim_start_matches('/')
        )))
    }

    /// Names of the placeholders in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        Tokens::new(&self.0)
            .filter_map(|t| match t {
                Token::Placeholder(name) => Some(name),
                Token::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute every placeholder with its value from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`OctopiError::Template`] if a placeholder has no value.
    ///
    /// # Example
    ///
    /// ```
    /// use octopi::{PathParams, PathTemplate};
    ///
    /// let template = PathTemplate::new("/repos/show/:id");
    /// let path = template.render(&PathParams::new().with("id", "42")).unwrap();
    /// assert_eq!(path, "/repos/show/42");
    /// ```
    pub fn render(&self, params: &PathParams) -> Result<String> {
        let mut out = String::with_capacity(self.0.len());
        for token in Tokens::new(&self.0) {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Placeholder(name) => {
                    let value = params.values.get(name).ok_or_else(|| OctopiError::Template {
                        template: self.0.to_string(),
                        placeholder: name.to_string(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Values for template placeholders, stored URL-encoded.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    values: HashMap<String, String>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a single path segment.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values
            .insert(name.to_string(), urlencoding::encode(value).into_owned());
        self
    }

    /// Bind `name` to several segments joined by `/`. Each segment is
    /// encoded on its own so the separators survive.
    #[must_use]
    pub fn with_segments<S: AsRef<str>>(mut self, name: &str, segments: &[S]) -> Self {
        let joined = segments
            .iter()
            .map(|s| urlencoding::encode(s.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        self.values.insert(name.to_string(), joined);
        self
    }
}

enum Token<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(template: &'a str) -> Self {
        Self { rest: template }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if let Some(after) = self.rest.strip_prefix(':') {
            let len = after.find(|c| !is_name_char(c)).unwrap_or(after.len());
            if len > 0 {
                let (name, rest) = after.split_at(len);
                self.rest = rest;
                return Some(Token::Placeholder(name));
            }
            // A lone ':' is literal text
            let (lit, rest) = self.rest.split_at(1);
            self.rest = rest;
            return Some(Token::Literal(lit));
        }

        let len = self.rest.find(':').unwrap_or(self.rest.len());
        let (lit, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(Token::Literal(lit))
    }
}

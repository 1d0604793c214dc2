//! Generic resource finder.
//!
//! Renders a resource's declared template, issues the GET through the
//! [`Transport`], and turns the decoded body into entities. Entity types
//! wrap these functions with their own argument validation.

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;

use crate::error::{OctopiError, Result};
use crate::template::PathParams;
use crate::traits::{GetOptions, PathKind, Resource, Transport};

/// How deep properties resolve their identifiers into entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// One lookup at a time, in order.
    #[default]
    Sequential,
    /// Up to `limit` lookups in flight; results keep the input order.
    Concurrent { limit: usize },
}

/// Fetch exactly one entity by its identifying path segments.
///
/// The segments are joined with `/` and substituted for `:id` in the
/// resource's lookup template.
///
/// # Errors
///
/// Returns [`OctopiError::NotFound`] if the service reports no match
/// (HTTP 404, or a body without the singular key).
#[tracing::instrument(skip(transport), fields(resource = R::DECLARATION.singular))]
pub async fn find<R: Resource>(transport: &dyn Transport, id: &[&str]) -> Result<R> {
    let decl = R::DECLARATION;
    let path = decl
        .path_for(PathKind::Resource)?
        .render(&PathParams::new().with_segments("id", id))?;
    let not_found = || OctopiError::NotFound {
        resource: decl.singular,
        id: id.join("/"),
    };

    tracing::debug!(%path, "finding single record");
    let mut body = match transport.get(&path, GetOptions::default()).await {
        Ok(body) => body,
        Err(OctopiError::ApiError {
            status_code: Some(404),
            ..
        }) => return Err(not_found()),
        Err(e) => return Err(e),
    };

    match body.get_mut(decl.singular).map(Value::take) {
        None | Some(Value::Null) => Err(not_found()),
        Some(record @ Value::Object(_)) => R::from_record(record),
        Some(other) => Err(OctopiError::MalformedResponse {
            path,
            reason: format!("expected an object under '{}', got {other}", decl.singular),
        }),
    }
}

/// Search for entities through the resource's `find_path`.
///
/// An empty result is not an error.
#[tracing::instrument(skip(transport), fields(resource = R::DECLARATION.singular))]
pub async fn find_all<R: Resource>(transport: &dyn Transport, query: &str) -> Result<Vec<R>> {
    find_plural(transport, &[query], PathKind::Find, std::convert::identity).await
}

/// Fetch a collection, remapping each raw record before decoding it.
///
/// The joined `segments` are bound to both `:id` and `:query`. Records are
/// read from the resource's plural key: array elements are passed as-is,
/// object entries as `[key, value]` pairs in response order.
///
/// # Example
///
/// ```ignore
/// // Tags come back as {"tags": {"v1.0": "abc123"}}
/// let tags: Vec<Tag> = find_plural(
///     transport,
///     &["joe", "proj", "tags"],
///     PathKind::Resource,
///     |pair| json!({ "name": pair[0], "hash": pair[1] }),
/// )
/// .await?;
/// ```
#[tracing::instrument(skip(transport, transform), fields(resource = R::DECLARATION.singular))]
pub async fn find_plural<R, S, F>(
    transport: &dyn Transport,
    segments: &[S],
    kind: PathKind,
    transform: F,
) -> Result<Vec<R>>
where
    R: Resource,
    S: AsRef<str> + std::fmt::Debug,
    F: FnMut(Value) -> Value,
{
    let decl = R::DECLARATION;
    let params = PathParams::new()
        .with_segments("id", segments)
        .with_segments("query", segments);
    let path = decl.path_for(kind)?.render(&params)?;

    tracing::debug!(%path, "finding records");
    let mut body = transport.get(&path, GetOptions::default()).await?;
    let records = collection_records(&mut body, decl.plural, &path)?;
    tracing::debug!(count = records.len(), "decoding records");

    records
        .into_iter()
        .map(transform)
        .map(R::from_record)
        .collect()
}

/// Pull the records stored under `key` out of a response body.
pub(crate) fn collection_records(body: &mut Value, key: &str, path: &str) -> Result<Vec<Value>> {
    match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(Value::Object(entries)) => Ok(entries
            .into_iter()
            .map(|(k, v)| Value::Array(vec![Value::String(k), v]))
            .collect()),
        Some(other) => Err(OctopiError::MalformedResponse {
            path: path.to_string(),
            reason: format!("expected a collection under '{key}', got {other}"),
        }),
    }
}

/// Resolve every id into an entity according to `resolution`.
///
/// Results follow the order of `ids`. The first failure aborts the whole
/// resolution; no partial collection is returned.
pub async fn resolve_all<T, F, Fut>(
    ids: Vec<String>,
    resolution: Resolution,
    mut resolve: F,
) -> Result<Vec<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match resolution {
        Resolution::Sequential => {
            let mut resolved = Vec::with_capacity(ids.len());
            for id in ids {
                resolved.push(resolve(id).await?);
            }
            Ok(resolved)
        }
        Resolution::Concurrent { limit } => {
            stream::iter(ids)
                .map(resolve)
                .buffered(limit.max(1))
                .try_collect()
                .await
        }
    }
}

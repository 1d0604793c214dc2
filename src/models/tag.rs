//! Tag model and lookups.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::finder;
use crate::models::repository::repository_details;
use crate::traits::{PathKind, Resource, ResourceDeclaration, Transport};
use crate::validate::Options;

/// A named tag in a repository, pointing at a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name (e.g. "v1.0").
    pub name: String,

    /// Commit hash the tag points at.
    pub hash: String,
}

impl Resource for Tag {
    const DECLARATION: ResourceDeclaration =
        ResourceDeclaration::new("tag", "tags", "/repos/show/:id", None);
}

impl Tag {
    /// List all tags of a repository.
    ///
    /// `options` are read the same way as for [`Repository::find`]: the
    /// repository as `repo`, `repository` or `name`, its owner as `user`
    /// or through an `owner/name` value.
    ///
    /// [`Repository::find`]: crate::Repository::find
    ///
    /// The service answers with a name-to-hash mapping rather than a list of
    /// tag objects; each pair becomes one `Tag`, in response order.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tags = Tag::all(&client, &Options::from([("user", "joe"), ("repo", "proj")])).await?;
    /// ```
    #[tracing::instrument(skip(transport))]
    pub async fn all(transport: &dyn Transport, options: &Options) -> Result<Vec<Tag>> {
        let (user, repo) = repository_details(options)?;

        finder::find_plural(
            transport,
            &[user, repo, "tags"],
            PathKind::Resource,
            tag_attributes,
        )
        .await
    }
}

/// Map a raw `[name, hash]` pair to tag attributes.
fn tag_attributes(pair: Value) -> Value {
    json!({ "name": pair[0], "hash": pair[1] })
}

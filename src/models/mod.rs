//! Entity model types.

mod key;
mod plan;
mod repository;
mod tag;
mod timestamp;
mod user;

pub use key::*;
pub use plan::*;
pub use repository::{CreateRepository, Repository, RepositoryLookup, RepositorySet};
pub use tag::*;
pub use user::*;

//! Trait definitions for Octopi operations.
//!
//! [`Transport`] is the seam to the HTTP layer; [`Resource`] attaches a
//! declaration to each entity type so the generic finder can serve it.

mod resource;
mod transport;

pub use resource::{PathKind, Resource, ResourceDeclaration};
pub use transport::{GetOptions, Transport};

//! In-memory persistence: per-kind repositories and the registry that owns them.

pub mod entity;
pub mod registry;
pub mod repository;

pub use entity::{Entity, EntityId};
pub use registry::{RegistryError, Repository};
pub use repository::{EntityRepository, RepositoryError};

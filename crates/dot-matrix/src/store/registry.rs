use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::consultants::Consultant;

use super::entity::Entity;
use super::repository::EntityRepository;

/// Fixed mapping from entity kind to the repository holding that kind.
///
/// The set of kinds is decided in [`Repository::new`]; there is no runtime registration.
pub struct Repository {
    repositories: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Repository {
    pub fn new() -> Self {
        let mut registry = Self {
            repositories: HashMap::new(),
        };
        registry.register::<Consultant>();
        registry
    }

    fn register<T: Entity>(&mut self) {
        self.repositories.insert(
            TypeId::of::<T>(),
            Arc::new(EntityRepository::<T>::new()),
        );
    }

    /// Repository registered for kind `T`. Repeated calls hand out the same instance.
    pub fn for_kind<T: Entity>(&self) -> Result<Arc<EntityRepository<T>>, RegistryError> {
        self.repositories
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|repository| repository.downcast::<EntityRepository<T>>().ok())
            .ok_or(RegistryError::UnregisteredKind { kind: T::KIND })
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no repository registered for {kind}")]
    UnregisteredKind { kind: &'static str },
}

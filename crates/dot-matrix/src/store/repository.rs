use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::entity::{Entity, EntityId};

/// Append-only, in-memory store for a single entity kind.
///
/// Ids come from a counter that only moves forward, and entities are keyed by id rather
/// than by position, so `find` stays correct whatever the insertion history.
/// Assigning an id and inserting the entity happen under one lock.
#[derive(Debug)]
pub struct EntityRepository<T> {
    state: Mutex<RepositoryState<T>>,
}

#[derive(Debug)]
struct RepositoryState<T> {
    records: BTreeMap<EntityId, T>,
    next_id: u64,
}

impl<T> Default for EntityRepository<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(RepositoryState {
                records: BTreeMap::new(),
                next_id: 0,
            }),
        }
    }
}

impl<T: Entity> EntityRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next id, stores the entity, and returns the stored copy.
    pub fn save(&self, mut entity: T) -> Result<T, RepositoryError> {
        if let Some(id) = entity.id() {
            return Err(RepositoryError::AlreadyPersisted { kind: T::KIND, id });
        }

        let mut state = self.lock()?;
        let id = EntityId(state.next_id);
        entity.assign_id(id);
        state.records.insert(id, entity.clone());
        state.next_id += 1;

        debug!(kind = T::KIND, %id, "entity saved");
        Ok(entity)
    }

    /// Replaces a previously saved entity.
    pub fn update(&self, entity: T) -> Result<T, RepositoryError> {
        let id = entity.id().ok_or(RepositoryError::Unsaved { kind: T::KIND })?;
        let mut state = self.lock()?;
        match state.records.get_mut(&id) {
            Some(slot) => {
                *slot = entity.clone();
                debug!(kind = T::KIND, %id, "entity updated");
                Ok(entity)
            }
            None => Err(RepositoryError::NotFound { kind: T::KIND, id }),
        }
    }

    /// Applies `change` to the stored entity in place, under the same lock as the lookup.
    /// Returns the changed copy, or `None` when nothing is stored under `id`.
    pub fn modify<F>(&self, id: EntityId, change: F) -> Result<Option<T>, RepositoryError>
    where
        F: FnOnce(&mut T),
    {
        let mut state = self.lock()?;
        let Some(slot) = state.records.get_mut(&id) else {
            return Ok(None);
        };
        change(slot);
        debug!(kind = T::KIND, %id, "entity modified");
        Ok(Some(slot.clone()))
    }

    pub fn find(&self, id: EntityId) -> Result<Option<T>, RepositoryError> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    /// Snapshot of every stored entity, ordered by id.
    pub fn all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.records.len())
    }

    pub fn first(&self) -> Result<Option<T>, RepositoryError> {
        Ok(self.lock()?.records.values().next().cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, RepositoryState<T>>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable(format!("{} store lock poisoned", T::KIND)))
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{kind} {id} already persisted")]
    AlreadyPersisted { kind: &'static str, id: EntityId },
    #[error("{kind} has not been saved yet")]
    Unsaved { kind: &'static str },
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: EntityId },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Repository-assigned identifier. Dense and sequential per repository, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim().parse::<u64>().map(EntityId)
    }
}

/// A domain record that can be stored in an [`EntityRepository`](super::EntityRepository).
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable kind, used in lookup errors and logs.
    const KIND: &'static str;

    fn id(&self) -> Option<EntityId>;

    /// Called exactly once, by the repository, when the entity is first saved.
    fn assign_id(&mut self, id: EntityId);
}

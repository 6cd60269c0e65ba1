//! Base fields shared by every persisted entity.
//!
//! Entities embed [`EntityMetadata`] instead of inheriting from a common base
//! type. The soft-delete flag lives here but is only ever flipped by a
//! repository; entities expose it read-only.
//!
//! Timestamps are truncated to microseconds, the resolution of a Postgres
//! `timestamptz`, so a record compares equal to its stored copy.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Identity, audit timestamps and soft-delete flag for a persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata<Id> {
    id: Id,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_deleted: bool,
}

impl<Id: Copy> EntityMetadata<Id> {
    /// Creates metadata for a freshly created, non-deleted entity.
    #[must_use]
    pub fn new(id: Id, clock: &impl Clock) -> Self {
        let timestamp = storage_now(clock);
        Self {
            id,
            created_at: timestamp,
            updated_at: timestamp,
            is_deleted: false,
        }
    }

    /// Reconstructs metadata from persisted columns.
    #[must_use]
    pub const fn from_persisted(
        id: Id,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        is_deleted: bool,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at,
            is_deleted,
        }
    }

    /// Returns the entity identifier.
    #[must_use]
    pub const fn id(&self) -> Id {
        self.id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the entity has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Updates the modification timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = storage_now(clock);
    }

    /// Returns a copy flagged as deleted at the given instant.
    ///
    /// Only storage adapters call this, when they apply a soft delete.
    #[must_use]
    pub fn into_deleted(self, deleted_at: DateTime<Utc>) -> Self {
        Self {
            is_deleted: true,
            updated_at: storage_precision(deleted_at),
            ..self
        }
    }
}

/// Reads the clock at the resolution entities store.
#[must_use]
pub fn storage_now(clock: &impl Clock) -> DateTime<Utc> {
    storage_precision(clock.utc())
}

/// Drops sub-microsecond precision from `timestamp`.
fn storage_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(6)
}

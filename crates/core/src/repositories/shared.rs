//! Generic in-memory repository.
//!
//! A [`Repository`] owns an ordered collection of one entity kind and is its only mutator.
//! Every operation first waits on the repository's [`LatencySimulator`] and only then touches
//! the collection, so concurrent operations complete in delay order rather than issue order.
//!
//! ## Concurrency
//!
//! The collection sits behind a `tokio::sync::RwLock` that is held only for the in-memory step.
//! Plain [`Repository::update`] is last-writer-wins: two overlapping updates to the same id
//! apply in completion order. Callers that need to detect this use
//! [`Repository::get_versioned`] together with [`Repository::update_if_version`].
//!
//! ## Copies
//!
//! Entities are cloned on the way in and on the way out. Nothing returned by a repository
//! aliases its internal state.

use super::Entity;
use crate::id::{IdAllocator, IdPolicy};
use crate::latency::LatencySimulator;
use crate::{ClinicError, ClinicResult};
use clinic_types::EntityId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// An entity together with its optimistic-concurrency version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned<T> {
    pub entity: T,
    /// Starts at 1 on creation and increases by one on every successful update.
    pub version: u64,
}

struct Stored<T> {
    entity: T,
    version: u64,
}

struct Collection<T> {
    records: Vec<Stored<T>>,
    allocator: IdAllocator,
}

impl<T: Entity> Collection<T> {
    fn position(&self, id: EntityId) -> Option<usize> {
        self.records.iter().position(|stored| stored.entity.id() == id)
    }

    fn not_found(id: EntityId) -> ClinicError {
        tracing::warn!(kind = %T::KIND, id, "entity not found");
        ClinicError::NotFound { kind: T::KIND, id }
    }
}

/// In-memory store for one entity kind.
///
/// Cloning a repository yields another handle onto the same collection.
pub struct Repository<T> {
    collection: Arc<RwLock<Collection<T>>>,
    latency: LatencySimulator,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
            latency: self.latency,
        }
    }
}

impl<T: Entity> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("kind", &T::KIND)
            .field("latency", &self.latency.delay())
            .finish_non_exhaustive()
    }
}

impl<T: Entity> Repository<T> {
    /// Creates an empty repository.
    pub fn empty(latency: LatencySimulator, policy: IdPolicy) -> Self {
        Self {
            collection: Arc::new(RwLock::new(Collection {
                records: Vec::new(),
                allocator: IdAllocator::new(policy, Vec::new()),
            })),
            latency,
        }
    }

    /// Creates a repository holding `records` in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidInput`] if any id is zero or appears more than once.
    pub fn seeded(records: Vec<T>, latency: LatencySimulator, policy: IdPolicy) -> ClinicResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            let id = record.id();
            if id == 0 {
                return Err(ClinicError::InvalidInput(format!(
                    "{} seed contains an entity without an id",
                    T::KIND
                )));
            }
            if !seen.insert(id) {
                return Err(ClinicError::InvalidInput(format!(
                    "{} seed contains duplicate id {id}",
                    T::KIND
                )));
            }
        }

        let allocator = IdAllocator::new(policy, records.iter().map(Entity::id));
        let records = records
            .into_iter()
            .map(|entity| Stored { entity, version: 1 })
            .collect();

        Ok(Self {
            collection: Arc::new(RwLock::new(Collection { records, allocator })),
            latency,
        })
    }

    /// Returns a handle onto the same collection whose operations use a different delay.
    pub fn with_latency(&self, delay: Duration) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
            latency: LatencySimulator::new(delay),
        }
    }

    /// Snapshot of every entity, in insertion order.
    pub async fn get_all(&self) -> Vec<T> {
        self.latency.wait().await;
        let collection = self.collection.read().await;
        tracing::debug!(kind = %T::KIND, count = collection.records.len(), "listed entities");
        collection
            .records
            .iter()
            .map(|stored| stored.entity.clone())
            .collect()
    }

    /// Looks up one entity. `None` is the normal "no match" answer, not a failure.
    pub async fn get_by_id(&self, id: EntityId) -> Option<T> {
        self.get_versioned(id).await.map(|versioned| versioned.entity)
    }

    /// Looks up one entity together with its current version.
    pub async fn get_versioned(&self, id: EntityId) -> Option<Versioned<T>> {
        self.latency.wait().await;
        let collection = self.collection.read().await;
        let found = collection
            .records
            .iter()
            .find(|stored| stored.entity.id() == id)
            .map(|stored| Versioned {
                entity: stored.entity.clone(),
                version: stored.version,
            });
        tracing::debug!(kind = %T::KIND, id, found = found.is_some(), "looked up entity");
        found
    }

    /// Entities matching `predicate`, in insertion order.
    pub async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.latency.wait().await;
        let collection = self.collection.read().await;
        collection
            .records
            .iter()
            .filter(|stored| predicate(&stored.entity))
            .map(|stored| stored.entity.clone())
            .collect()
    }

    /// Number of entities currently held.
    pub async fn count(&self) -> usize {
        self.latency.wait().await;
        self.collection.read().await.records.len()
    }

    /// Creates an entity from `patch` merged over the kind's defaults and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidInput`] only if the id space is exhausted.
    pub async fn create(&self, patch: T::Patch) -> ClinicResult<T> {
        self.latency.wait().await;

        let mut entity = T::default();
        entity.merge(patch);

        let mut collection = self.collection.write().await;
        let current: Vec<EntityId> = collection.records.iter().map(|s| s.entity.id()).collect();
        let id = collection.allocator.next_id(current)?;
        entity.set_id(id);
        collection.records.push(Stored {
            entity: entity.clone(),
            version: 1,
        });

        tracing::debug!(kind = %T::KIND, id, "created entity");
        Ok(entity)
    }

    /// Shallow-merges `patch` over the stored entity and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if no entity has `id`; the collection is left unchanged.
    pub async fn update(&self, id: EntityId, patch: T::Patch) -> ClinicResult<T> {
        self.latency.wait().await;

        let mut collection = self.collection.write().await;
        let index = collection
            .position(id)
            .ok_or_else(|| Collection::<T>::not_found(id))?;
        let stored = &mut collection.records[index];
        stored.entity.merge(patch);
        stored.version += 1;

        tracing::debug!(kind = %T::KIND, id, version = stored.version, "updated entity");
        Ok(stored.entity.clone())
    }

    /// Like [`update`](Self::update), but only applies when the stored version equals
    /// `expected_version`.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::NotFound`] if no entity has `id`.
    /// - [`ClinicError::StaleVersion`] if the entity changed since `expected_version` was read.
    pub async fn update_if_version(
        &self,
        id: EntityId,
        expected_version: u64,
        patch: T::Patch,
    ) -> ClinicResult<Versioned<T>> {
        self.latency.wait().await;

        let mut collection = self.collection.write().await;
        let index = collection
            .position(id)
            .ok_or_else(|| Collection::<T>::not_found(id))?;
        let stored = &mut collection.records[index];

        if stored.version != expected_version {
            tracing::warn!(
                kind = %T::KIND,
                id,
                expected = expected_version,
                actual = stored.version,
                "rejected stale update"
            );
            return Err(ClinicError::StaleVersion {
                kind: T::KIND,
                id,
                expected: expected_version,
                actual: stored.version,
            });
        }

        stored.entity.merge(patch);
        stored.version += 1;

        tracing::debug!(kind = %T::KIND, id, version = stored.version, "updated entity");
        Ok(Versioned {
            entity: stored.entity.clone(),
            version: stored.version,
        })
    }

    /// Removes the entity with `id`. Nothing referring to it is touched.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if no entity has `id`; the collection is left unchanged.
    pub async fn delete(&self, id: EntityId) -> ClinicResult<()> {
        self.latency.wait().await;

        let mut collection = self.collection.write().await;
        let index = collection
            .position(id)
            .ok_or_else(|| Collection::<T>::not_found(id))?;
        collection.records.remove(index);

        tracing::debug!(kind = %T::KIND, id, "deleted entity");
        Ok(())
    }
}

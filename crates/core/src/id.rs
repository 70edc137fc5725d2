//! Identifier allocation.
//!
//! Every repository asks an [`IdAllocator`] for the id of a newly created entity. A store applies
//! one [`IdPolicy`] to all of its repositories.

use crate::{ClinicError, ClinicResult};
use clinic_types::EntityId;
use std::str::FromStr;

/// How new ids are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// `max(current ids) + 1`, or 1 for an empty collection.
    ///
    /// Only ids present at call time are considered, so deleting the current maximum makes its
    /// number available again.
    #[default]
    MaxPlusOne,
    /// One more than the largest id ever seen by the allocator. Ids are never reassigned.
    Monotonic,
}

impl FromStr for IdPolicy {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max-plus-one" | "max+1" => Ok(IdPolicy::MaxPlusOne),
            "monotonic" => Ok(IdPolicy::Monotonic),
            other => Err(ClinicError::InvalidInput(format!(
                "unknown id policy {other:?} (expected \"max-plus-one\" or \"monotonic\")"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct IdAllocator {
    policy: IdPolicy,
    /// Largest id ever issued or seeded. Only consulted and advanced under `Monotonic`.
    high_water: EntityId,
}

impl IdAllocator {
    /// Creates an allocator that has already seen `existing`.
    pub fn new(policy: IdPolicy, existing: impl IntoIterator<Item = EntityId>) -> Self {
        let high_water = existing.into_iter().max().unwrap_or(0);
        Self { policy, high_water }
    }

    /// Returns the id for the next entity, given the ids currently in the collection.
    pub fn next_id(&mut self, current: impl IntoIterator<Item = EntityId>) -> ClinicResult<EntityId> {
        let current_max = current.into_iter().max().unwrap_or(0);
        match self.policy {
            IdPolicy::MaxPlusOne => Self::increment(current_max),
            IdPolicy::Monotonic => {
                let next = Self::increment(self.high_water.max(current_max))?;
                self.high_water = next;
                Ok(next)
            }
        }
    }

    fn increment(id: EntityId) -> ClinicResult<EntityId> {
        id.checked_add(1)
            .ok_or_else(|| ClinicError::InvalidInput("entity id space exhausted".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_starts_at_one() {
        let mut allocator = IdAllocator::new(IdPolicy::MaxPlusOne, Vec::new());
        assert_eq!(allocator.next_id(Vec::new()).unwrap(), 1);
    }

    #[test]
    fn test_max_plus_one_skips_gaps() {
        let mut allocator = IdAllocator::new(IdPolicy::MaxPlusOne, [1, 2, 3]);
        assert_eq!(allocator.next_id([1, 3]).unwrap(), 4);
    }

    #[test]
    fn test_max_plus_one_reuses_deleted_maximum() {
        let mut allocator = IdAllocator::new(IdPolicy::MaxPlusOne, [1, 2, 3]);
        assert_eq!(allocator.next_id([1, 2]).unwrap(), 3);
    }

    #[test]
    fn test_max_plus_one_leaves_high_water_untouched() {
        let mut allocator = IdAllocator::new(IdPolicy::MaxPlusOne, [1, 2, 3]);
        assert_eq!(allocator.next_id([1, 2, 3, 9]).unwrap(), 10);
        assert_eq!(allocator.high_water, 3);
    }

    #[test]
    fn test_monotonic_never_reuses() {
        let mut allocator = IdAllocator::new(IdPolicy::Monotonic, [1, 2, 3]);
        assert_eq!(allocator.next_id([1, 2]).unwrap(), 4);
        assert_eq!(allocator.next_id([1, 2]).unwrap(), 5);
    }

    #[test]
    fn test_exhausted_id_space_is_an_error() {
        let mut allocator = IdAllocator::new(IdPolicy::MaxPlusOne, [EntityId::MAX]);
        assert!(allocator.next_id([EntityId::MAX]).is_err());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Max-Plus-One".parse::<IdPolicy>().unwrap(), IdPolicy::MaxPlusOne);
        assert!("random".parse::<IdPolicy>().is_err());
    }
}

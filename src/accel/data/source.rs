//! Access to rating vectors.
use crate::sparse::SparseVector;
use crate::types::{ItemId, UserId};

/// Source of rating vectors for users and items.
///
/// Implementations must return an empty vector, not fail, for an entity
/// with no ratings.  Scorers only read from the source, and may do so from
/// several threads at once.
pub trait RatingSource {
    /// Get a user's ratings, keyed by item.
    fn user_ratings(&self, user: UserId) -> SparseVector;

    /// Get an item's ratings, keyed by user.
    fn item_ratings(&self, item: ItemId) -> SparseVector;

    /// Get the IDs of all users with ratings, in ascending order.
    fn user_ids(&self) -> Vec<UserId>;

    /// Get the IDs of all items with ratings, in ascending order.
    fn item_ids(&self) -> Vec<ItemId>;
}

impl<S: RatingSource + ?Sized> RatingSource for &S {
    fn user_ratings(&self, user: UserId) -> SparseVector {
        (**self).user_ratings(user)
    }

    fn item_ratings(&self, item: ItemId) -> SparseVector {
        (**self).item_ratings(item)
    }

    fn user_ids(&self) -> Vec<UserId> {
        (**self).user_ids()
    }

    fn item_ids(&self) -> Vec<ItemId> {
        (**self).item_ids()
    }
}

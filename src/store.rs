//! Holding persistence.
//!
//! Handlers receive a [`HoldingStore`] through router state instead of
//! reaching for a global database handle. Implementations validate their
//! input, so anything they return satisfies the holding invariants.

use crate::error::Result;
use crate::portfolio::{Holding, HoldingUpdate, NewHolding};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait HoldingStore: Send + Sync {
    /// Stores a new holding under a freshly assigned id.
    fn create(&self, new_holding: NewHolding) -> Result<Holding>;

    /// All holdings in creation order.
    fn list(&self) -> Result<Vec<Holding>>;

    fn get(&self, id: u64) -> Result<Option<Holding>>;

    /// Fails with `NotFound` for an unknown id.
    fn update(&self, id: u64, update: HoldingUpdate) -> Result<Holding>;

    /// Returns whether a holding was removed. Unknown ids are not an error.
    fn delete(&self, id: u64) -> Result<bool>;
}

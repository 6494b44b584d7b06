use super::HoldingStore;
use crate::error::{Error, Result};
use crate::portfolio::holding::now;
use crate::portfolio::{Holding, HoldingUpdate, NewHolding};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct MemoryState {
    holdings: Vec<Holding>,
    next_id: u64,
}

/// Process-local store. Contents are lost on restart.
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            state: RwLock::new(MemoryState {
                holdings: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| Error::Storage("holding store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| Error::Storage("holding store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HoldingStore for MemoryStore {
    fn create(&self, new_holding: NewHolding) -> Result<Holding> {
        let new_holding = new_holding.validate()?;
        let mut state = self.write()?;

        let holding = new_holding.into_holding(state.next_id, now());
        state.next_id += 1;
        state.holdings.push(holding.clone());

        Ok(holding)
    }

    fn list(&self) -> Result<Vec<Holding>> {
        Ok(self.read()?.holdings.clone())
    }

    fn get(&self, id: u64) -> Result<Option<Holding>> {
        Ok(self.read()?.holdings.iter().find(|h| h.id == id).cloned())
    }

    fn update(&self, id: u64, update: HoldingUpdate) -> Result<Holding> {
        let update = update.validate()?;
        let mut state = self.write()?;

        let Some(holding) = state.holdings.iter_mut().find(|h| h.id == id) else {
            return Err(Error::NotFound(id));
        };
        holding.apply(update, now());

        Ok(holding.clone())
    }

    fn delete(&self, id: u64) -> Result<bool> {
        let mut state = self.write()?;
        let before = state.holdings.len();
        state.holdings.retain(|h| h.id != id);
        Ok(state.holdings.len() != before)
    }
}

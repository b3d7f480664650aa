//! In-process session store
//!
//! A HashMap-backed [`SessionStore`] used by tests and single-process
//! embedders. Identifier handling mirrors a real backend: a fresh uuid on
//! start, rotation keeps the container, destroy drops everything.

use std::collections::HashMap;

use tracing::debug;

use crate::store::{SessionStore, SessionValue};
use crate::{Error, Result};

/// In-memory session store (for testing and single-process use)
#[derive(Debug, Default)]
pub struct MemoryStore {
    id: Option<String>,
    entries: HashMap<String, SessionValue>,
}

impl MemoryStore {
    /// Create a new, inactive store
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_started(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Store("Session not started".to_string()));
        }
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn start(&mut self) -> Result<()> {
        if self.id.is_none() {
            let id = uuid::Uuid::new_v4().to_string();
            debug!("Started in-memory session: {}", id);
            self.id = Some(id);
        }
        Ok(())
    }

    fn current_id(&self) -> Result<String> {
        self.id
            .clone()
            .ok_or_else(|| Error::Store("Session not started".to_string()))
    }

    fn regenerate_id(&mut self) -> Result<String> {
        self.ensure_started()?;
        let id = uuid::Uuid::new_v4().to_string();
        debug!("Regenerated in-memory session id: {}", id);
        self.id = Some(id.clone());
        Ok(id)
    }

    fn destroy(&mut self) -> Result<()> {
        if self.id.take().is_some() {
            debug!("Destroyed in-memory session");
        }
        self.entries.clear();
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<SessionValue>> {
        self.ensure_started()?;
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: SessionValue) -> Result<()> {
        self.ensure_started()?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.ensure_started()?;
        self.entries.remove(key);
        Ok(())
    }
}

//! Session management
//!
//! [`SessionManager`] layers registration, expiry, and two keyed
//! namespaces (durable data and read-once flash values) over any
//! [`SessionStore`] backend.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::store::{SessionStore, SessionValue};
use crate::{Error, Result};

use super::clock;
use super::types::SessionRecord;

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidArgument(
            "Expected a non-empty session key".to_string(),
        ));
    }
    Ok(())
}

/// Session manager
///
/// Owns a [`SessionStore`] and keeps the backend session started for as
/// long as the manager lives. Bookkeeping (id, start, expiry), durable
/// data, and flash values each live under a configurable slot key in the
/// backend container.
#[derive(Debug)]
pub struct SessionManager<S: SessionStore> {
    store: S,
    config: SessionConfig,
}

impl<S: SessionStore> SessionManager<S> {
    /// Attach to a store with the default configuration, starting the
    /// backend session if it is not already running
    pub fn new(store: S) -> Result<Self> {
        Self::with_config(store, SessionConfig::default())
    }

    /// Attach to a store with the given configuration
    pub fn with_config(mut store: S, config: SessionConfig) -> Result<Self> {
        config.slots.validate()?;
        store.start()?;
        Ok(Self { store, config })
    }

    /// Active configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Backend identifier of the running session
    pub fn current_id(&self) -> Result<String> {
        self.store.current_id()
    }

    /// Register the session: stamp the expiry `minutes` from now, the
    /// backend id, and the start time into their bookkeeping slots
    pub fn register(&mut self, minutes: u32) -> Result<()> {
        let id = self.store.current_id()?;
        let started_at = clock::unix_now();
        let expires_at = clock::unix_now_offset_minutes(minutes);

        self.store
            .save(&self.config.slots.expire, SessionValue::Int(expires_at))?;
        self.store
            .save(&self.config.slots.id, SessionValue::Text(id.clone()))?;
        self.store
            .save(&self.config.slots.start, SessionValue::Int(started_at))?;

        info!("Registered session {} for {} minutes", id, minutes);
        Ok(())
    }

    /// Register with the configured default lifetime
    pub fn register_default(&mut self) -> Result<()> {
        let minutes = self.config.default_lifetime_minutes;
        self.register(minutes)
    }

    /// Rotate the backend id, keeping the container. Returns `false`
    /// when the backend refuses, leaving the stored id slot untouched.
    pub fn regenerate(&mut self) -> bool {
        let new_id = match self.store.regenerate_id() {
            Ok(id) => id,
            Err(err) => {
                warn!("Session id rotation failed: {}", err);
                return false;
            }
        };

        match self
            .store
            .save(&self.config.slots.id, SessionValue::Text(new_id.clone()))
        {
            Ok(()) => {
                debug!("Rotated session id: {}", new_id);
                true
            }
            Err(err) => {
                warn!("Failed to record rotated session id: {}", err);
                false
            }
        }
    }

    /// Whether the session is past its expiry. A missing or unreadable
    /// expiry slot counts as expired.
    pub fn is_expired(&self) -> Result<bool> {
        let expires_at = self
            .store
            .load(&self.config.slots.expire)?
            .and_then(|value| value.as_i64());

        match expires_at {
            Some(ts) => Ok(ts < clock::unix_now()),
            None => Ok(true),
        }
    }

    /// Snapshot of the bookkeeping slots, if the session has been
    /// registered
    pub fn record(&self) -> Result<Option<SessionRecord>> {
        let id = self.store.load(&self.config.slots.id)?;
        let start = self.store.load(&self.config.slots.start)?;
        let expire = self.store.load(&self.config.slots.expire)?;

        match (id, start, expire) {
            (Some(SessionValue::Text(id)), Some(start), Some(expire)) => {
                match (start.as_i64(), expire.as_i64()) {
                    (Some(started_at), Some(expires_at)) => Ok(Some(SessionRecord {
                        id,
                        started_at,
                        expires_at,
                    })),
                    _ => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    /// Destroy the backend session and everything it holds
    pub fn destroy(&mut self) -> Result<()> {
        self.store.destroy()?;
        info!("Destroyed session");
        Ok(())
    }

    /// Store a value under `key` in the data namespace
    pub fn set(&mut self, key: &str, value: impl Into<SessionValue>) -> Result<()> {
        validate_key(key)?;
        let mut data = self.load_namespace(&self.config.slots.data)?;
        data.insert(key.to_string(), value.into());
        self.store
            .save(&self.config.slots.data, SessionValue::Map(data))
    }

    /// Read a value from the data namespace
    pub fn get(&self, key: &str) -> Result<Option<SessionValue>> {
        validate_key(key)?;
        let mut data = self.load_namespace(&self.config.slots.data)?;
        Ok(data.remove(key))
    }

    /// Remove `key` from the data namespace
    pub fn remove(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut data = self.load_namespace(&self.config.slots.data)?;
        if data.remove(key).is_some() {
            self.store
                .save(&self.config.slots.data, SessionValue::Map(data))?;
        }
        Ok(())
    }

    /// Drop the entire data namespace
    pub fn clear_data(&mut self) -> Result<()> {
        self.store.delete(&self.config.slots.data)?;
        debug!("Cleared session data");
        Ok(())
    }

    /// Store a read-once value under `key` in the flash namespace
    pub fn flash(&mut self, key: &str, value: impl Into<SessionValue>) -> Result<()> {
        validate_key(key)?;
        let mut flash = self.load_namespace(&self.config.slots.flash)?;
        flash.insert(key.to_string(), value.into());
        self.store
            .save(&self.config.slots.flash, SessionValue::Map(flash))
    }

    /// Whether a flash value exists under `key`
    pub fn is_flashed(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let flash = self.load_namespace(&self.config.slots.flash)?;
        Ok(flash.contains_key(key))
    }

    /// Take the flash value under `key`, removing it from the session
    pub fn get_flashed(&mut self, key: &str) -> Result<Option<SessionValue>> {
        validate_key(key)?;
        let mut flash = self.load_namespace(&self.config.slots.flash)?;
        match flash.remove(key) {
            Some(value) => {
                self.store
                    .save(&self.config.slots.flash, SessionValue::Map(flash))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Read the flash value under `key` without consuming it
    pub fn peek_flashed(&self, key: &str) -> Result<Option<SessionValue>> {
        validate_key(key)?;
        let mut flash = self.load_namespace(&self.config.slots.flash)?;
        Ok(flash.remove(key))
    }

    /// Remove the flash value under `key`
    pub fn remove_flashed(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut flash = self.load_namespace(&self.config.slots.flash)?;
        if flash.remove(key).is_some() {
            self.store
                .save(&self.config.slots.flash, SessionValue::Map(flash))?;
        }
        Ok(())
    }

    /// Drop the entire flash namespace
    pub fn clear_flashed(&mut self) -> Result<()> {
        self.store.delete(&self.config.slots.flash)?;
        debug!("Cleared session flash data");
        Ok(())
    }

    /// Drop both namespaces, leaving the bookkeeping slots in place
    pub fn clear(&mut self) -> Result<()> {
        self.clear_flashed()?;
        self.clear_data()
    }

    /// Read a namespace slot as a map. Absent or mis-shaped slots read
    /// as empty and are overwritten on the next write.
    fn load_namespace(&self, slot: &str) -> Result<HashMap<String, SessionValue>> {
        match self.store.load(slot)? {
            Some(SessionValue::Map(map)) => Ok(map),
            _ => Ok(HashMap::new()),
        }
    }
}

//! Session store trait definition
//!
//! Defines the contract a backing session store must satisfy for the
//! session manager to drive it. Identifier generation, persistence across
//! requests, and transport all live behind this seam; the manager only
//! owns the shape and semantics of what it puts into the container.

use crate::Result;
use crate::store::SessionValue;

/// Backing store for one client's session
///
/// Implementations persist a keyed container between requests for a single
/// client. The manager assumes exclusive, non-concurrent access for its
/// lifetime; any cross-request or cross-process locking on the same session
/// is the store's concern.
pub trait SessionStore {
    /// Activate (or attach to) the current client session
    ///
    /// Idempotent when the session is already active.
    fn start(&mut self) -> Result<()>;

    /// Identifier of the active session
    fn current_id(&self) -> Result<String>;

    /// Rotate the session identifier, keeping the container intact
    ///
    /// Returns the new identifier.
    fn regenerate_id(&mut self) -> Result<String>;

    /// Tear down the active session and drop its container
    ///
    /// Idempotent: destroying an inactive session is not an error.
    fn destroy(&mut self) -> Result<()>;

    /// Read a value from the session container
    fn load(&self, key: &str) -> Result<Option<SessionValue>>;

    /// Write a value into the session container
    fn save(&mut self, key: &str, value: SessionValue) -> Result<()>;

    /// Remove a key from the session container; absent keys are a no-op
    fn delete(&mut self, key: &str) -> Result<()>;
}

//! Session store interface
//!
//! The backing store that persists a client's session between requests is
//! supplied by the host environment and hidden behind the [`SessionStore`]
//! trait. This module also defines [`SessionValue`], the serializable value
//! union stored in the container, and [`MemoryStore`], an in-process store
//! for tests and single-process embedders.

mod memory;
mod traits;
mod value;

pub use memory::MemoryStore;
pub use traits::SessionStore;
pub use value::SessionValue;

//! Session lifecycle management

mod clock;
mod manager;
mod types;

pub use manager::SessionManager;
pub use types::SessionRecord;

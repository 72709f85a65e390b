//! Session store adapters.
//!
//! - `InMemorySessionStore` - process lifetime only
//! - `FileSessionStore` - restored on load, persisted on every change

mod file;
mod in_memory;

pub use file::FileSessionStore;
pub use in_memory::InMemorySessionStore;

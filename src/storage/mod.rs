//! Store access for the resolver.
//!
//! [`StoreGateway`] is the narrow read-only contract strategies query
//! through; [`InMemoryStore`] is the thread-safe reference implementation
//! used by tests.

mod memory;
mod traits;

pub use memory::InMemoryStore;
pub use traits::{StoreError, StoreGateway};

pub mod lookup;
pub mod serve;

// Re-export command handlers
pub use lookup::{Lookup, LookupCommand};
pub use serve::ServeArgs;

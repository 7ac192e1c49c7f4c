//! Command implementations.

mod discover;
mod extract;
mod profile;

pub use discover::execute_discover;
pub use extract::execute_extract;
pub use profile::execute_profile;

//! Shared wire types for the huddle client and its document-store provider.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::*;
pub use models::*;
pub use protocol::*;

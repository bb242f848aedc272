pub mod config;
pub mod error;
pub mod schema;

pub use config::{DefaultParameters, ResolverSettings};
pub use error::{AliasError, MappingError, Result};
pub use schema::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

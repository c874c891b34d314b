//! Static station directory.
//!
//! Provides station identifier → name and coordinates, loaded once from a
//! delimited text file at startup and read-only afterwards.

mod directory;
mod error;
mod loader;

pub use directory::{Station, StationDirectory};
pub use error::StationError;
pub use loader::{load_directory, parse_directory};

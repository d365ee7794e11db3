//! Station directory.
//!
//! Provides name/id lookup and direction-aware ordering over the
//! station reference data, loaded once at startup.

mod directory;
mod error;

pub use directory::StationDirectory;
pub use error::StationError;

#[cfg(test)]
pub(crate) use directory::test_support;

//! Filesystem layer for the extension marketplace
//!
//! Reads and writes the static registry documents (`registry.json`,
//! `providers.json`) as pretty-printed JSON.

pub mod error;
pub mod io;
pub mod json;

pub use error::{Error, Result};
pub use io::WriteMode;
pub use json::JsonStore;

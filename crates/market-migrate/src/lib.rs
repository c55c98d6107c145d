//! Registry migrations for the extension marketplace.
//!
//! Each migration rewrites the registry documents once:
//!
//! - [`extract`]: split embedded provider objects out into `providers.json`
//! - [`convert`]: replace embedded provider objects with `provider_id`
//! - [`fix`]: detect providers for records whose id is `"unknown"`
//!
//! The transformations work on raw JSON so that fields this crate does not
//! know about survive untouched. Files are overwritten in place unless the
//! caller passes an atomic [`market_fs::JsonStore`].

pub mod convert;
pub mod document;
pub mod error;
pub mod extract;
pub mod fix;

pub use convert::{ConvertReport, convert_file, convert_provider_ids};
pub use error::{Error, Result};
pub use extract::{ExtractReport, Extraction, extract_files, extract_providers};
pub use fix::{FixOutcome, FixReport, fix_file, fix_unknown_providers};

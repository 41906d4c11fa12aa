//! I/O module
//!
//! Handles the card store on disk.
//!
//! # Components
//!
//! - `record_format` - Text format of a single card record (parse, serialize)
//! - `file_store` - File-backed `LineStore` with atomic saves

pub mod file_store;
pub mod record_format;

pub use file_store::FileLineStore;
pub use record_format::{parse_card, serialize_card};

//! Dataset discovery.
//!
//! Uses the `ignore` crate to respect .gitignore while listing documents.

mod files;

pub use files::{file_name, find_documents};

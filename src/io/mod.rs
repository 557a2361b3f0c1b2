//! File I/O for case data.
//!
//! Meshes and fields are stored as JSON documents; see `case::CaseDir` for
//! the directory layout.

pub mod json;

pub use json::{from_json_str, read_json, to_json_string, write_json};

//! JSON document I/O.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes `value` as pretty-printed JSON to `path`.
///
/// # Example
/// ```no_run
/// use casetools::{Mesh, Point};
/// use casetools::io::write_json;
/// use std::path::Path;
///
/// let mesh = Mesh::from_box((1.0, 1.0, 1.0), (2, 2, 2), Point::origin()).unwrap();
/// write_json(Path::new("constant/mesh.json"), &mesh).unwrap();
/// ```
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialize to: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

/// Reads a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let value: T = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize from: {}", path.display()))?;

    Ok(value)
}

pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize to string")
}

pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).context("Failed to deserialize from string")
}

//! Case stored as a directory of JSON documents.
//!
//! ```text
//! <case>/constant/mesh.json    static mesh
//! <case>/<time>/mesh.json      optional mesh for a moving geometry
//! <case>/<time>/<field>.json   one document per field
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::case::CaseSource;
use crate::error::CaseError;
use crate::field::FieldData;
use crate::io::{read_json, write_json};
use crate::mesh::Mesh;
use crate::time::{TimeSelector, TimeSnapshot};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

pub const CONSTANT_DIR: &str = "constant";
pub const MESH_FILE: &str = "mesh.json";

#[derive(Debug, Clone)]
pub struct CaseDir {
    root: PathBuf,
}

impl CaseDir {
    /// Opens an existing case directory.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(CaseError::InvalidInput(format!(
                "case directory {} does not exist",
                root.display()
            ))
            .into());
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Creates the case directory with a static mesh.
    pub fn create(root: &Path, mesh: &Mesh) -> Result<Self> {
        let constant = root.join(CONSTANT_DIR);
        fs::create_dir_all(&constant)
            .with_context(|| format!("Failed to create directory: {}", constant.display()))?;
        write_json(&constant.join(MESH_FILE), mesh)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn time_dir(&self, time: &TimeSnapshot) -> PathBuf {
        self.root.join(&time.name)
    }

    /// Snapshot standing for the `constant` directory of a case without
    /// time directories.
    pub fn constant_time() -> TimeSnapshot {
        TimeSnapshot::new(0, 0., CONSTANT_DIR)
    }

    pub fn field_path(&self, time: &TimeSnapshot, name: &str) -> PathBuf {
        self.time_dir(time).join(format!("{name}.json"))
    }
}

impl CaseSource for CaseDir {
    fn times(&self) -> Result<Vec<TimeSnapshot>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list case directory: {}", self.root.display()))?;

        let mut found: Vec<(f64, String)> = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to list: {}", self.root.display()))?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if let Ok(value) = name.parse::<f64>()
                && value.is_finite()
            {
                found.push((value, name));
            }
        }
        found.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(found
            .into_iter()
            .enumerate()
            .map(|(i, (value, name))| TimeSnapshot::new(i, value, &name))
            .collect())
    }

    fn read_mesh(&self, time: &TimeSnapshot) -> Result<Mesh> {
        let moving = self.time_dir(time).join(MESH_FILE);
        let path = if moving.is_file() {
            moving
        } else {
            self.root.join(CONSTANT_DIR).join(MESH_FILE)
        };
        debug!("Reading mesh {}", path.display());
        read_json(&path)
    }

    fn has_field(&self, time: &TimeSnapshot, name: &str) -> bool {
        self.field_path(time, name).is_file()
    }

    fn read_field(&self, time: &TimeSnapshot, name: &str) -> Result<FieldData> {
        let path = self.field_path(time, name);
        if !path.is_file() {
            return Err(CaseError::FieldNotFound {
                field: name.to_string(),
                time: time.name.clone(),
            }
            .into());
        }
        debug!("Reading field {}", path.display());
        read_json(&path)
    }

    /// As the default, but a case without time directories and no `--time`
    /// list falls back to the `constant` snapshot.
    fn select_times(&self, selector: &TimeSelector) -> Result<Vec<TimeSnapshot>> {
        let all = self.times()?;
        if all.is_empty() && selector.times.is_none() {
            warn!(
                "No time directories in {}, using {CONSTANT_DIR}",
                self.root.display()
            );
            return Ok(vec![Self::constant_time()]);
        }
        selector.select(&all)
    }

    fn write_field(&mut self, time: &TimeSnapshot, name: &str, field: &FieldData) -> Result<()> {
        let dir = self.time_dir(time);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        let path = self.field_path(time, name);
        info!("Writing {}", path.display());
        write_json(&path, field)
    }
}

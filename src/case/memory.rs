use std::collections::HashMap;

use crate::case::CaseSource;
use crate::error::CaseError;
use crate::field::FieldData;
use crate::mesh::Mesh;
use crate::time::TimeSnapshot;
use anyhow::Result;

/// Case held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryCase {
    mesh: Mesh,
    times: Vec<TimeSnapshot>,
    meshes: HashMap<usize, Mesh>,
    fields: HashMap<(usize, String), FieldData>,
}

impl MemoryCase {
    /// Creates a case with a static `mesh` and snapshots at `times`.
    pub fn new(mesh: Mesh, times: &[f64]) -> Self {
        Self {
            mesh,
            times: TimeSnapshot::from_values(times),
            meshes: HashMap::new(),
            fields: HashMap::new(),
        }
    }

    fn snapshot_index(&self, time: f64) -> Result<usize> {
        self.times
            .iter()
            .find(|t| (t.value - time).abs() < 1e-9)
            .map(|t| t.index)
            .ok_or_else(|| CaseError::InvalidInput(format!("no snapshot at time {time}")).into())
    }

    /// Replaces the mesh at one snapshot (moving geometry).
    pub fn set_mesh_at(&mut self, time: f64, mesh: Mesh) -> Result<()> {
        let i = self.snapshot_index(time)?;
        self.meshes.insert(i, mesh);
        Ok(())
    }

    pub fn insert_field(&mut self, time: f64, name: &str, field: impl Into<FieldData>) -> Result<()> {
        let i = self.snapshot_index(time)?;
        self.fields.insert((i, name.to_string()), field.into());
        Ok(())
    }

    pub fn field(&self, time: f64, name: &str) -> Option<&FieldData> {
        let i = self.snapshot_index(time).ok()?;
        self.fields.get(&(i, name.to_string()))
    }
}

impl CaseSource for MemoryCase {
    fn times(&self) -> Result<Vec<TimeSnapshot>> {
        Ok(self.times.clone())
    }

    fn read_mesh(&self, time: &TimeSnapshot) -> Result<Mesh> {
        Ok(self.meshes.get(&time.index).unwrap_or(&self.mesh).clone())
    }

    fn has_field(&self, time: &TimeSnapshot, name: &str) -> bool {
        self.fields.contains_key(&(time.index, name.to_string()))
    }

    fn read_field(&self, time: &TimeSnapshot, name: &str) -> Result<FieldData> {
        self.fields
            .get(&(time.index, name.to_string()))
            .cloned()
            .ok_or_else(|| {
                CaseError::FieldNotFound {
                    field: name.to_string(),
                    time: time.name.clone(),
                }
                .into()
            })
    }

    fn write_field(&mut self, time: &TimeSnapshot, name: &str, field: &FieldData) -> Result<()> {
        self.fields
            .insert((time.index, name.to_string()), field.clone());
        Ok(())
    }
}

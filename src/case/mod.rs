//! Access to the meshes and fields of a case.
//!
//! Every tool works against the `CaseSource` trait, so it runs unchanged on
//! a case directory (`CaseDir`) or an in-memory case (`MemoryCase`).

pub mod dir;
pub mod memory;

use crate::Vector;
use crate::field::{FieldData, VolField};
use crate::mesh::Mesh;
use crate::time::{TimeSelector, TimeSnapshot};
use anyhow::Result;

pub use dir::CaseDir;
pub use memory::MemoryCase;

pub trait CaseSource {
    /// All stored snapshots, ordered by time value.
    fn times(&self) -> Result<Vec<TimeSnapshot>>;

    /// Mesh valid at `time`. Cases with a static mesh return the same mesh
    /// for every snapshot.
    fn read_mesh(&self, time: &TimeSnapshot) -> Result<Mesh>;

    fn has_field(&self, time: &TimeSnapshot, name: &str) -> bool;

    /// Reads field `name` at `time`, failing with `CaseError::FieldNotFound`
    /// if it is not stored there.
    fn read_field(&self, time: &TimeSnapshot, name: &str) -> Result<FieldData>;

    fn write_field(&mut self, time: &TimeSnapshot, name: &str, field: &FieldData) -> Result<()>;

    /// Reads a vector field (`CaseError::FieldKind` for a scalar field).
    fn read_vector_field(&self, time: &TimeSnapshot, name: &str) -> Result<VolField<Vector>> {
        self.read_field(time, name)?.into_vector(name)
    }

    /// Snapshots chosen by `selector`.
    fn select_times(&self, selector: &TimeSelector) -> Result<Vec<TimeSnapshot>> {
        selector.select(&self.times()?)
    }
}

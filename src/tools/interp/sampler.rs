use crate::Vector;
use crate::case::CaseSource;
use crate::field::{FieldValue, VolField};
use crate::mesh::{BoundaryPatch, Mesh, MeshSearch};
use crate::time::TimeSnapshot;
use crate::tools::interp::SampleConfig;
use anyhow::Result;
use tracing::debug;

/// Values of `field` seen by the faces of `patch`.
///
/// Each face starts from its owner-cell value. With a non-zero `offset` the
/// face centre is shifted by `offset` along the probe axis and, if the
/// shifted point falls inside a cell, that cell's value is used instead.
pub fn sample_values<T: FieldValue>(
    mesh: &Mesh,
    field: &VolField<T>,
    patch: &BoundaryPatch,
    offset: f64,
    config: &SampleConfig,
) -> Result<Vec<T>> {
    let mut values = field.patch_internal(patch)?;
    if offset.abs() <= config.tolerance {
        return Ok(values);
    }

    let search = MeshSearch::new(mesh);
    let shift = config.probe_axis.unit() * offset;
    let mut hits = 0;
    for (value, g) in values.iter_mut().zip(patch.geometry()) {
        if let Some(cell) = search.find_cell(g.centre + shift)
            && let Some(v) = field.value(cell)
        {
            *value = v;
            hits += 1;
        }
    }
    debug!(
        "Patch {}: {hits} of {} offset points found inside the mesh",
        patch.name(),
        patch.len()
    );

    Ok(values)
}

/// Samples vector field `field` on patch `patch` at snapshot `time`.
pub fn sample_patch<C: CaseSource + ?Sized>(
    case: &C,
    time: &TimeSnapshot,
    field: &str,
    patch: &str,
    offset: f64,
    config: &SampleConfig,
) -> Result<Vec<Vector>> {
    let mesh = case.read_mesh(time)?;
    let patch = mesh.patch_by_name(patch)?;
    let values = case.read_vector_field(time, field)?;
    values.check_size(&mesh)?;

    sample_values(&mesh, &values, patch, offset, config)
}

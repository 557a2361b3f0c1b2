//! Per-face tables of patch geometry and field values across snapshots.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::case::CaseSource;
use crate::field::{FieldData, FieldValue};
use crate::mesh::BoundaryPatch;
use crate::time::TimeSnapshot;
use crate::tools::interp::{SampleConfig, sample_values};
use anyhow::{Context, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct FaceDataRequest {
    pub patches: Vec<String>,
    /// Field whose values are collected, scalar or vector
    pub field: Option<String>,
    /// Sample offset along the probe axis
    pub offset: f64,
    /// Start each line with `(cx cy cz),(sx sy sz),area`
    pub face_data: bool,
}

/// One comma separated line per face of a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchFaceTable {
    pub patch: String,
    pub lines: Vec<String>,
}

impl PatchFaceTable {
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        for line in self.lines.iter() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Writes the table to `<dir>/<patch>.<field>`.
    pub fn write_csv(&self, dir: &Path, field: Option<&str>) -> Result<PathBuf> {
        let path = dir.join(format!("{}.{}", self.patch, field.unwrap_or("faceData")));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        info!("Written patch {} to {}", self.patch, path.display());
        Ok(path)
    }
}

fn append<T: FieldValue>(lines: &mut [String], values: &[T]) {
    for (line, v) in lines.iter_mut().zip(values) {
        if !line.is_empty() {
            line.push(',');
        }
        line.push_str(&v.format_value());
    }
}

fn geometry_lines(patch: &BoundaryPatch) -> Vec<String> {
    patch
        .geometry()
        .iter()
        .map(|g| {
            let c = g.centre;
            format!(
                "({} {} {}),{},{}",
                c.x,
                c.y,
                c.z,
                g.area_vector.format_value(),
                g.area
            )
        })
        .collect()
}

/// Collects per-face tables for every requested patch.
///
/// Values of all snapshots in `times` are appended to each face's line in
/// time order. Snapshots without the field are skipped. Fails with
/// `CaseError::PatchNotFound` for an unknown patch.
pub fn collect_face_data<C: CaseSource + ?Sized>(
    case: &C,
    times: &[TimeSnapshot],
    request: &FaceDataRequest,
    config: &SampleConfig,
) -> Result<Vec<PatchFaceTable>> {
    let Some(first) = times.first() else {
        return Ok(Vec::new());
    };
    let base_mesh = case.read_mesh(first)?;

    let mut tables = Vec::with_capacity(request.patches.len());
    for name in request.patches.iter() {
        info!("Calculating for patch {name}");
        let patch = base_mesh.patch_by_name(name)?;
        let mut lines = if request.face_data {
            geometry_lines(patch)
        } else {
            vec![String::new(); patch.len()]
        };

        if let Some(field) = &request.field {
            for time in times {
                if !case.has_field(time, field) {
                    info!("Time = {}: no field {field}", time.name);
                    continue;
                }
                debug!("Time = {}: reading {field}", time.name);
                let mesh = case.read_mesh(time)?;
                let patch = mesh.patch_by_name(name)?;
                match case.read_field(time, field)? {
                    FieldData::Scalar(f) => {
                        f.check_size(&mesh)?;
                        append(&mut lines, &sample_values(&mesh, &f, patch, request.offset, config)?);
                    }
                    FieldData::Vector(f) => {
                        f.check_size(&mesh)?;
                        append(&mut lines, &sample_values(&mesh, &f, patch, request.offset, config)?);
                    }
                }
            }
        }

        tables.push(PatchFaceTable {
            patch: name.clone(),
            lines,
        });
    }

    Ok(tables)
}

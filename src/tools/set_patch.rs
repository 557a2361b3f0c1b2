//! Overwrites the boundary values of a scalar field on one patch.

use std::io::Read;

use crate::case::CaseSource;
use crate::field::FieldData;
use crate::time::TimeSnapshot;
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SetPatchReport {
    pub updated: Vec<TimeSnapshot>,
    pub skipped: Vec<TimeSnapshot>,
}

/// Reads whitespace separated numbers. The first token that is not a
/// number ends the list.
pub fn read_values<R: Read>(mut reader: R) -> Result<Vec<f64>> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read values")?;

    let values: Vec<f64> = text
        .split_whitespace()
        .map_while(|token| token.parse::<f64>().ok())
        .collect();
    info!("Read {} values", values.len());

    Ok(values)
}

/// Sets the boundary values of scalar field `field` on `patch` at every
/// snapshot in `times` holding that field.
///
/// Snapshots without the field, or where it is a vector field, are skipped.
/// Fails with `CaseError::PatchNotFound` or, if the number of values does
/// not match the patch size, `CaseError::SizeMismatch`. Every snapshot is
/// checked before the first one is written.
pub fn set_patch_values<C: CaseSource + ?Sized>(
    case: &mut C,
    times: &[TimeSnapshot],
    field: &str,
    patch: &str,
    values: &[f64],
) -> Result<SetPatchReport> {
    let mut report = SetPatchReport::default();
    let mut pending = Vec::new();

    for time in times {
        if !case.has_field(time, field) {
            info!("Time = {}: no field {field}", time.name);
            report.skipped.push(time.clone());
            continue;
        }
        let mut data = match case.read_field(time, field)? {
            FieldData::Scalar(f) => f,
            other => {
                info!("Time = {}: {field} is a {}, skipping", time.name, other.class());
                report.skipped.push(time.clone());
                continue;
            }
        };

        let mesh = case.read_mesh(time)?;
        let p = mesh.patch_by_name(patch)?;
        data.set_boundary(p, values.to_vec())?;
        pending.push((time, data));
    }

    for (time, data) in pending {
        info!("Time = {}: set {} values of {field} on patch {patch}", time.name, values.len());
        case.write_field(time, field, &data.into())?;
        report.updated.push(time.clone());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::MemoryCase;
    use crate::error::{CaseError, case_error};
    use crate::field::VolField;
    use crate::mesh::Mesh;
    use crate::{Point, Vector};

    fn case() -> Result<MemoryCase> {
        let mesh = Mesh::from_box((2., 1., 1.), (2, 1, 1), Point::origin())?;
        let mut case = MemoryCase::new(mesh, &[0., 1., 2.]);
        case.insert_field(0., "T", VolField::uniform(300., 2))?;
        case.insert_field(1., "T", VolField::new(vec![Vector::zero(); 2]))?;
        Ok(case)
    }

    #[test]
    fn test_read_values() -> Result<()> {
        let values = read_values("1.5\n2 3e2\n  -4\n".as_bytes())?;
        assert_eq!(values, vec![1.5, 2., 300., -4.]);
        let values = read_values("1 2 end 3".as_bytes())?;
        assert_eq!(values, vec![1., 2.]);
        assert!(read_values("".as_bytes())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_set_values() -> Result<()> {
        let mut case = case()?;
        let times = case.times()?;
        let report = set_patch_values(&mut case, &times, "T", "bottom", &[310., 320.])?;

        let updated: Vec<f64> = report.updated.iter().map(|t| t.value).collect();
        let skipped: Vec<f64> = report.skipped.iter().map(|t| t.value).collect();
        assert_eq!(updated, vec![0.]);
        assert_eq!(skipped, vec![1., 2.]);

        let field = case.field(0., "T").unwrap().clone().into_scalar("T")?;
        assert_eq!(field.boundary["bottom"], vec![310., 320.]);
        assert_eq!(field.internal, vec![300., 300.]);
        Ok(())
    }

    #[test]
    fn test_wrong_number_of_values() -> Result<()> {
        let mut case = case()?;
        let times = case.times()?;
        let err = set_patch_values(&mut case, &times, "T", "bottom", &[310.]).unwrap_err();
        assert!(matches!(
            case_error(&err),
            Some(CaseError::SizeMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
        // Nothing was written
        let field = case.field(0., "T").unwrap().clone().into_scalar("T")?;
        assert!(field.boundary.is_empty());
        Ok(())
    }

    #[test]
    fn test_later_failure_writes_nothing() -> Result<()> {
        let mut case = case()?;
        case.insert_field(2., "T", VolField::uniform(300., 2))?;
        // The mesh at time 2 has no patches
        let boxed = Mesh::from_box((2., 1., 1.), (2, 1, 1), Point::origin())?;
        let bare = Mesh::new(boxed.points().to_vec(), boxed.cells().to_vec(), Vec::new(), Vec::new())?;
        case.set_mesh_at(2., bare)?;
        let times = case.times()?;

        let err = set_patch_values(&mut case, &times, "T", "bottom", &[310., 320.]).unwrap_err();
        assert!(matches!(case_error(&err), Some(CaseError::PatchNotFound(_))));
        let field = case.field(0., "T").unwrap().clone().into_scalar("T")?;
        assert!(field.boundary.is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_patch() -> Result<()> {
        let mut case = case()?;
        let times = case.times()?;
        let err = set_patch_values(&mut case, &times, "T", "inlet", &[1.]).unwrap_err();
        assert!(matches!(case_error(&err), Some(CaseError::PatchNotFound(_))));
        Ok(())
    }
}

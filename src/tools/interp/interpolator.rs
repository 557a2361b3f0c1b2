use std::io::Write;

use crate::Vector;
use crate::case::CaseSource;
use crate::field::FieldValue;
use crate::time::{TimeSnapshot, select_bracket};
use crate::tools::interp::{InterpConfig, sample_patch};
use anyhow::Result;
use tracing::{debug, warn};

/// What to interpolate.
#[derive(Debug, Clone)]
pub struct InterpRequest {
    pub field: String,
    pub patch: String,
    /// Requested time (an angle in degrees for rotating cases)
    pub time: f64,
    /// Sample offset along the probe axis, `0` samples the owner cells
    pub offset: f64,
}

impl InterpRequest {
    pub fn new(field: &str, patch: &str, time: f64) -> Self {
        Self {
            field: field.to_string(),
            patch: patch.to_string(),
            time,
            offset: 0.,
        }
    }
}

/// Interpolates a vector field on a patch to `request.time`.
///
/// The two snapshots of `times` around the requested time are sampled and
/// blended linearly, component by component. Returns one value per patch
/// face.
pub fn interpolate_patch_field<C: CaseSource + ?Sized>(
    case: &C,
    times: &[TimeSnapshot],
    request: &InterpRequest,
    config: &InterpConfig,
) -> Result<Vec<Vector>> {
    if let Some(first) = times.first() {
        case.read_mesh(first)?.patch_by_name(&request.patch)?;
    }
    let bracket = select_bracket(times, request.time, &config.bracket)?;
    debug!(
        "Bracket: (t0={}, i0={}), (t1={}, i1={}), T={}, on time: {}",
        bracket.t0, bracket.i0, bracket.t1, bracket.i1, bracket.target, bracket.on_time
    );

    let sample = |i: usize| {
        sample_patch(
            case,
            &times[i],
            &request.field,
            &request.patch,
            request.offset,
            &config.sample,
        )
    };

    let u0 = sample(bracket.i0)?;
    if bracket.on_time {
        return Ok(u0);
    }
    let u1 = sample(bracket.i1)?;

    let p = bracket.weight();
    if !(0. ..=1.).contains(&p) {
        warn!("Time {} lies outside the stored period, extrapolating with p = {p}", request.time);
    }

    Ok(u0
        .into_iter()
        .zip(u1)
        .map(|(a, b)| Vector::lerp(a, b, p))
        .collect())
}

/// Writes one `x y z` line per value.
pub fn write_vectors<W: Write>(out: &mut W, values: &[Vector]) -> Result<()> {
    for v in values {
        writeln!(out, "{} {} {}", v.dx, v.dy, v.dz)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use crate::case::MemoryCase;
    use crate::error::{CaseError, case_error};
    use crate::field::VolField;
    use crate::mesh::Mesh;

    fn rotating_case(angles: &[f64], velocities: &[Vector]) -> Result<MemoryCase> {
        let mesh = Mesh::from_box((2., 1., 1.), (2, 1, 1), Point::origin())?;
        let mut case = MemoryCase::new(mesh, angles);
        for (&t, &u) in angles.iter().zip(velocities) {
            case.insert_field(t, "U", VolField::uniform(u, 2))?;
        }
        Ok(case)
    }

    fn interpolate(case: &MemoryCase, time: f64) -> Result<Vec<Vector>> {
        let times = case.times()?;
        let request = InterpRequest::new("U", "bottom", time);
        interpolate_patch_field(case, &times, &request, &InterpConfig::new())
    }

    #[test]
    fn test_halfway_between_two_snapshots() -> Result<()> {
        let case = rotating_case(&[0., 90.], &[Vector::new(1., 0., 0.), Vector::new(0., 1., 0.)])?;
        let values = interpolate(&case, 45.)?;
        assert_eq!(values.len(), 2);
        for v in values {
            assert!(v.is_close(&Vector::new(0.5, 0.5, 0.)));
        }
        Ok(())
    }

    #[test]
    fn test_endpoints_reproduce_snapshots() -> Result<()> {
        let u0 = Vector::new(1., 0., 0.);
        let u1 = Vector::new(0., 1., 0.);
        let case = rotating_case(&[0., 90.], &[u0, u1])?;
        assert_eq!(interpolate(&case, 0.)?, vec![u0, u0]);
        assert_eq!(interpolate(&case, 90.)?, vec![u1, u1]);
        assert_eq!(interpolate(&case, 89.9995)?, vec![u1, u1]);
        Ok(())
    }

    #[test]
    fn test_wraparound_uses_first_snapshot() -> Result<()> {
        let case = rotating_case(
            &[0., 90., 180., 270.],
            &[
                Vector::new(1., 0., 0.),
                Vector::new(0., 1., 0.),
                Vector::new(-1., 0., 0.),
                Vector::new(0., -1., 0.),
            ],
        )?;
        for v in interpolate(&case, 315.)? {
            assert!(v.is_close(&Vector::new(0.5, -0.5, 0.)));
        }
        Ok(())
    }

    #[test]
    fn test_selected_times_only() -> Result<()> {
        let case = rotating_case(
            &[0., 90., 180.],
            &[Vector::new(1., 0., 0.), Vector::new(0., 1., 0.), Vector::new(0., 0., 1.)],
        )?;
        let all = case.times()?;
        let times = vec![all[0].clone(), all[2].clone()];
        let request = InterpRequest::new("U", "bottom", 90.);
        let values = interpolate_patch_field(&case, &times, &request, &InterpConfig::new())?;
        assert!(values[0].is_close(&Vector::new(0.5, 0., 0.5)));
        Ok(())
    }

    #[test]
    fn test_patch_not_found() -> Result<()> {
        let case = rotating_case(&[0., 90.], &[Vector::new(1., 0., 0.), Vector::new(0., 1., 0.)])?;
        let times = case.times()?;
        let request = InterpRequest::new("U", "inlet", 45.);
        let err = interpolate_patch_field(&case, &times, &request, &InterpConfig::new()).unwrap_err();
        assert_eq!(
            case_error(&err),
            Some(&CaseError::PatchNotFound("inlet".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_missing_field_at_upper_snapshot() -> Result<()> {
        let mesh = Mesh::from_box((1., 1., 1.), (1, 1, 1), Point::origin())?;
        let mut case = MemoryCase::new(mesh, &[0., 90.]);
        case.insert_field(0., "U", VolField::uniform(Vector::new(1., 0., 0.), 1))?;
        let err = interpolate(&case, 45.).unwrap_err();
        assert!(matches!(case_error(&err), Some(CaseError::FieldNotFound { .. })));
        // On the stored snapshot only that snapshot is read
        assert_eq!(interpolate(&case, 0.)?, vec![Vector::new(1., 0., 0.)]);
        Ok(())
    }

    #[test]
    fn test_write_vectors() -> Result<()> {
        let mut out = Vec::new();
        write_vectors(&mut out, &[Vector::new(0.5, 0.5, 0.), Vector::new(-1., 2.25, 3.)])?;
        assert_eq!(String::from_utf8(out)?, "0.5 0.5 0\n-1 2.25 3\n");
        Ok(())
    }
}

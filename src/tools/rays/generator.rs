use std::io::Write;

use crate::case::CaseSource;
use crate::mesh::{BoundaryPatch, Mesh};
use crate::time::TimeSnapshot;
use crate::tools::rays::RayConfig;
use crate::{Point, Vector};
use anyhow::Result;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    /// `None` when only origins were requested
    pub direction: Option<Vector>,
}

/// Rays of one patch at one snapshot, in face order.
#[derive(Debug, Clone)]
pub struct PatchRays {
    pub time: TimeSnapshot,
    pub rays: Vec<Ray>,
}

/// Builds one ray per face of `patch`.
///
/// By default a ray starts at the owner-cell centre (`Cf - delta`) and
/// points along `delta = Cf - C`. In outward mode it starts at the face
/// centre and its direction is the face unit normal times `-1`.
pub fn patch_rays(mesh: &Mesh, patch: &BoundaryPatch, config: &RayConfig) -> Vec<Ray> {
    let (deltas, multiplier) = if config.outward {
        (patch.unit_normals(), -1.)
    } else {
        (mesh.patch_delta(patch), 1.)
    };

    patch
        .face_centres()
        .into_iter()
        .zip(deltas)
        .map(|(cf, delta)| {
            let origin = if config.outward { cf } else { cf - delta };
            let direction = (!config.origins_only).then_some(delta * multiplier);
            Ray { origin, direction }
        })
        .collect()
}

/// Builds the rays of `patch` at every snapshot in `times`.
///
/// The mesh is read per snapshot so moving geometry is followed. Fails
/// with `CaseError::PatchNotFound` if any snapshot lacks the patch; no rays
/// are returned in that case.
pub fn generate_rays<C: CaseSource + ?Sized>(
    case: &C,
    times: &[TimeSnapshot],
    patch: &str,
    config: &RayConfig,
) -> Result<Vec<PatchRays>> {
    let mut out = Vec::with_capacity(times.len());
    for time in times {
        let mesh = case.read_mesh(time)?;
        let p = mesh.patch_by_name(patch)?;
        debug!("Time = {}: {} rays on patch {patch}", time.name, p.len());
        out.push(PatchRays {
            time: time.clone(),
            rays: patch_rays(&mesh, p, config),
        });
    }
    Ok(out)
}

/// Writes one `ox oy oz [dx dy dz]` line per ray, snapshots in order.
pub fn write_rays<W: Write>(out: &mut W, rays: &[PatchRays]) -> Result<()> {
    for ray in rays.iter().flat_map(|r| r.rays.iter()) {
        let o = ray.origin;
        match ray.direction {
            Some(d) => writeln!(out, "{} {} {} {} {} {}", o.x, o.y, o.z, d.dx, d.dy, d.dz)?,
            None => writeln!(out, "{} {} {}", o.x, o.y, o.z)?,
        }
    }
    Ok(())
}

//! Rotation of a vector field back into the fixed frame.
//!
//! In rotating-domain cases the time value is the azimuth of the domain in
//! degrees, so each snapshot is rotated about the axis by `-time`.

use crate::Vector;
use crate::case::CaseSource;
use crate::field::VolField;
use crate::geom::Axis;
use crate::geom::rotation::{rotate_vectors, rotation_matrix};
use crate::time::TimeSnapshot;
use anyhow::Result;
use tracing::info;

pub struct RotateConfig {
    /// Vector field to rotate
    pub field: String,
    /// Name of the rotated field
    pub output: String,
    pub axis: Axis,
    /// Compute without writing the rotated field
    pub no_write: bool,
}

impl RotateConfig {
    pub fn new() -> Self {
        Self {
            field: "U".to_string(),
            output: "Utrans".to_string(),
            axis: Axis::Z,
            no_write: false,
        }
    }
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct RotatedTime {
    pub time: TimeSnapshot,
    /// Rotation angle in radians
    pub angle: f64,
    pub field: VolField<Vector>,
}

/// Rotates every internal and boundary vector of `field` about `axis`.
pub fn rotate_vol_field(field: &VolField<Vector>, axis: Axis, angle: f64) -> Result<VolField<Vector>> {
    let rot = rotation_matrix(&axis.unit(), angle)?;
    let rot = rot.view();
    Ok(VolField {
        internal: rotate_vectors(&field.internal, &rot),
        boundary: field
            .boundary
            .iter()
            .map(|(name, values)| (name.clone(), rotate_vectors(values, &rot)))
            .collect(),
    })
}

/// Rotates `config.field` at every snapshot in `times` by `-time` degrees
/// and writes it as `config.output` unless `config.no_write` is set.
pub fn rotate_field<C: CaseSource + ?Sized>(
    case: &mut C,
    times: &[TimeSnapshot],
    config: &RotateConfig,
) -> Result<Vec<RotatedTime>> {
    let mut rotated = Vec::new();

    for time in times {
        if !case.has_field(time, &config.field) {
            info!("Time = {}: no {}", time.name, config.field);
            continue;
        }
        let field = case.read_vector_field(time, &config.field)?;
        let angle = -time.value.to_radians();
        info!("Time = {}: rotating {} by {angle} radians", time.name, config.field);

        let field = rotate_vol_field(&field, config.axis, angle)?;
        if !config.no_write {
            case.write_field(time, &config.output, &field.clone().into())?;
        }
        rotated.push(RotatedTime {
            time: time.clone(),
            angle,
            field,
        });
    }

    Ok(rotated)
}

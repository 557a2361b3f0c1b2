use crate::geom::Axis;
use crate::time::BracketConfig;

pub struct SampleConfig {
    /// Offsets with a magnitude up to this value sample the owner cells
    pub tolerance: f64,
    /// Direction along which the sample point is shifted from the face centre
    pub probe_axis: Axis,
}

impl SampleConfig {
    pub fn new() -> Self {
        Self {
            tolerance: 1e-3,
            probe_axis: Axis::Z,
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct InterpConfig {
    pub bracket: BracketConfig,
    pub sample: SampleConfig,
}

impl InterpConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

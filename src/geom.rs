pub mod bboxes;
pub mod point;
pub mod polygon;
pub mod rotation;
pub mod tetrahedron;
pub mod vector;

/// Geometric precision
pub const EPS: f64 = 1e-13;

/// Approximate equality for scalars.
pub trait IsClose {
    fn is_close(&self, other: f64) -> bool;
}

impl IsClose for f64 {
    fn is_close(&self, other: f64) -> bool {
        (self - other).abs() < EPS
    }
}

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    /// Unit vector along the axis.
    pub fn unit(self) -> vector::Vector {
        match self {
            Axis::X => vector::Vector::new(1., 0., 0.),
            Axis::Y => vector::Vector::new(0., 1., 0.),
            Axis::Z => vector::Vector::new(0., 0., 1.),
        }
    }
}

impl std::str::FromStr for Axis {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(anyhow::anyhow!("Unknown axis '{other}', expected x, y or z")),
        }
    }
}

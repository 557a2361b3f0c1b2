//! Cell-centred fields with per-patch boundary values.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::Vector;
use crate::error::CaseError;
use crate::mesh::{BoundaryPatch, Mesh};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Value types a field can hold.
pub trait FieldValue: Copy + Debug + PartialEq + Serialize + DeserializeOwned {
    /// Class name used in field files.
    const CLASS: &'static str;

    /// Componentwise linear interpolation `a + p (b - a)`.
    fn lerp(a: Self, b: Self, p: f64) -> Self;

    /// Text form used in tabular output (`1.5`, `(1 2 3)`).
    fn format_value(&self) -> String;
}

impl FieldValue for f64 {
    const CLASS: &'static str = "volScalarField";

    fn lerp(a: Self, b: Self, p: f64) -> Self {
        a + p * (b - a)
    }

    fn format_value(&self) -> String {
        format!("{}", self)
    }
}

impl FieldValue for Vector {
    const CLASS: &'static str = "volVectorField";

    fn lerp(a: Self, b: Self, p: f64) -> Self {
        a + (b - a) * p
    }

    fn format_value(&self) -> String {
        format!("({} {} {})", self.dx, self.dy, self.dz)
    }
}

/// Internal (per-cell) values plus optional per-patch boundary values.
///
/// A patch without stored boundary values is zero-gradient: its boundary
/// value is the owner-cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolField<T> {
    pub internal: Vec<T>,
    #[serde(default = "BTreeMap::new")]
    pub boundary: BTreeMap<String, Vec<T>>,
}

impl<T: FieldValue> VolField<T> {
    pub fn new(internal: Vec<T>) -> Self {
        Self {
            internal,
            boundary: BTreeMap::new(),
        }
    }

    /// Uniform field over `n_cells` cells.
    pub fn uniform(value: T, n_cells: usize) -> Self {
        Self::new(vec![value; n_cells])
    }

    /// Value in cell `cell`.
    pub fn value(&self, cell: usize) -> Option<T> {
        self.internal.get(cell).copied()
    }

    /// Checks that the field holds one value per mesh cell.
    pub fn check_size(&self, mesh: &Mesh) -> Result<()> {
        if self.internal.len() != mesh.n_cells() {
            return Err(CaseError::SizeMismatch {
                what: "internal field".to_string(),
                expected: mesh.n_cells(),
                found: self.internal.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Owner-cell values of every patch face, in face order.
    pub fn patch_internal(&self, patch: &BoundaryPatch) -> Result<Vec<T>> {
        patch
            .faces()
            .iter()
            .map(|f| {
                self.value(f.owner).ok_or_else(|| {
                    CaseError::SizeMismatch {
                        what: format!("internal field (owner cell of patch {})", patch.name()),
                        expected: f.owner + 1,
                        found: self.internal.len(),
                    }
                    .into()
                })
            })
            .collect()
    }

    /// Boundary values of a patch: stored values, or the owner-cell values.
    pub fn boundary_values(&self, patch: &BoundaryPatch) -> Result<Vec<T>> {
        match self.boundary.get(patch.name()) {
            Some(values) if values.len() == patch.len() => Ok(values.clone()),
            Some(values) => Err(CaseError::SizeMismatch {
                what: format!("boundary values of patch {}", patch.name()),
                expected: patch.len(),
                found: values.len(),
            }
            .into()),
            None => self.patch_internal(patch),
        }
    }

    /// Replaces the boundary values of `patch`.
    pub fn set_boundary(&mut self, patch: &BoundaryPatch, values: Vec<T>) -> Result<()> {
        if values.len() != patch.len() {
            return Err(CaseError::SizeMismatch {
                what: format!("values for patch {}", patch.name()),
                expected: patch.len(),
                found: values.len(),
            }
            .into());
        }
        self.boundary.insert(patch.name().to_string(), values);
        Ok(())
    }

    /// Applies `f` to every internal and boundary value.
    pub fn map<U: FieldValue>(&self, f: impl Fn(T) -> U) -> VolField<U> {
        VolField {
            internal: self.internal.iter().map(|&v| f(v)).collect(),
            boundary: self
                .boundary
                .iter()
                .map(|(k, vs)| (k.clone(), vs.iter().map(|&v| f(v)).collect()))
                .collect(),
        }
    }
}

/// A field as stored in a time snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum FieldData {
    #[serde(rename = "volScalarField")]
    Scalar(VolField<f64>),
    #[serde(rename = "volVectorField")]
    Vector(VolField<Vector>),
}

impl FieldData {
    /// Class name of the stored field.
    pub fn class(&self) -> &'static str {
        match self {
            FieldData::Scalar(_) => f64::CLASS,
            FieldData::Vector(_) => Vector::CLASS,
        }
    }

    /// Unwraps a vector field, failing with `CaseError::FieldKind`.
    pub fn into_vector(self, name: &str) -> Result<VolField<Vector>> {
        match self {
            FieldData::Vector(f) => Ok(f),
            other => Err(kind_error(name, Vector::CLASS, other.class())),
        }
    }

    /// Unwraps a scalar field, failing with `CaseError::FieldKind`.
    pub fn into_scalar(self, name: &str) -> Result<VolField<f64>> {
        match self {
            FieldData::Scalar(f) => Ok(f),
            other => Err(kind_error(name, f64::CLASS, other.class())),
        }
    }
}

fn kind_error(name: &str, expected: &'static str, found: &'static str) -> anyhow::Error {
    CaseError::FieldKind {
        field: name.to_string(),
        expected,
        found,
    }
    .into()
}

impl From<VolField<f64>> for FieldData {
    fn from(f: VolField<f64>) -> Self {
        FieldData::Scalar(f)
    }
}

impl From<VolField<Vector>> for FieldData {
    fn from(f: VolField<Vector>) -> Self {
        FieldData::Vector(f)
    }
}

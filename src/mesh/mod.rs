//! Unstructured finite-volume mesh.
//!
//! Cells are polyhedra stored as a tetrahedral decomposition. Boundary faces
//! are polygons grouped into named patches, each face knowing its owner cell.
//! Derived geometry (cell centres, cell volumes, face centres, area vectors)
//! is computed once on construction.

pub mod builder;
pub mod patch;
pub mod search;
pub mod zone;

use crate::error::CaseError;
use crate::geom::tetrahedron::{tetrahedron_centroid, tetrahedron_volume};
use crate::geom::EPS;
use crate::name::{SortByName, position_by_name};
use crate::{Point, Vector};
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use patch::{BoundaryPatch, Face, FaceGeometry};
pub use search::MeshSearch;
pub use zone::CellZone;

/// Vertex indices of one tetrahedron.
pub type TetIndex = [usize; 4];

/// A polyhedral cell given by its tetrahedral decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub tets: Vec<TetIndex>,
}

/// On-disk layout of a mesh (see `Mesh`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshFile {
    pub points: Vec<Point>,
    pub cells: Vec<Vec<TetIndex>>,
    pub patches: Vec<PatchFile>,
    #[serde(default)]
    pub cell_zones: Vec<CellZone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchFile {
    pub name: String,
    pub faces: Vec<Face>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MeshFile", into = "MeshFile")]
pub struct Mesh {
    points: Vec<Point>,
    cells: Vec<Cell>,
    patches: Vec<BoundaryPatch>,
    cell_zones: Vec<CellZone>,
    cell_centres: Vec<Point>,
    cell_volumes: Vec<f64>,
}

impl Mesh {
    /// Creates a mesh and computes its derived geometry.
    ///
    /// Fails with `CaseError::InvalidMesh` if any index is out of range, a
    /// cell has no tetrahedra, a face has fewer than 3 vertices, or two
    /// patches share a name.
    pub fn new(
        points: Vec<Point>,
        cells: Vec<Cell>,
        patches: Vec<(String, Vec<Face>)>,
        cell_zones: Vec<CellZone>,
    ) -> Result<Self> {
        let n_points = points.len();
        let n_cells = cells.len();

        for (ci, cell) in cells.iter().enumerate() {
            if cell.tets.is_empty() {
                return Err(CaseError::InvalidMesh(format!("cell {ci} has no tetrahedra")).into());
            }
            if let Some(&bad) = cell.tets.iter().flatten().find(|&&p| p >= n_points) {
                return Err(CaseError::InvalidMesh(format!(
                    "cell {ci} references point {bad}, mesh has {n_points} points"
                ))
                .into());
            }
        }

        let mut built_patches: Vec<BoundaryPatch> = Vec::with_capacity(patches.len());
        for (name, faces) in patches {
            if position_by_name(&built_patches, &name).is_some() {
                return Err(CaseError::InvalidMesh(format!("duplicate patch {name}")).into());
            }
            built_patches.push(BoundaryPatch::new(name, faces, &points, n_cells)?);
        }

        for zone in cell_zones.iter() {
            if let Some(&bad) = zone.cells.iter().find(|&&c| c >= n_cells) {
                return Err(CaseError::InvalidMesh(format!(
                    "cell zone {} references cell {bad}, mesh has {n_cells} cells",
                    zone.name
                ))
                .into());
            }
        }

        let (cell_centres, cell_volumes) = cells
            .iter()
            .map(|c| cell_centre_and_volume(c, &points))
            .unzip();

        Ok(Self {
            points,
            cells,
            patches: built_patches,
            cell_zones,
            cell_centres,
            cell_volumes,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cell_centres(&self) -> &[Point] {
        &self.cell_centres
    }

    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    /// Corner points of every tetrahedron of cell `cell`.
    pub fn cell_tets(&self, cell: usize) -> impl Iterator<Item = [Point; 4]> + '_ {
        self.cells[cell].tets.iter().map(|t| {
            [
                self.points[t[0]],
                self.points[t[1]],
                self.points[t[2]],
                self.points[t[3]],
            ]
        })
    }

    pub fn patches(&self) -> &[BoundaryPatch] {
        &self.patches
    }

    /// Index of the patch called `name`.
    pub fn find_patch(&self, name: &str) -> Option<usize> {
        position_by_name(&self.patches, name)
    }

    pub fn patch(&self, id: usize) -> &BoundaryPatch {
        &self.patches[id]
    }

    /// Resolves a patch by name, failing with `CaseError::PatchNotFound`.
    pub fn patch_by_name(&self, name: &str) -> Result<&BoundaryPatch> {
        self.find_patch(name)
            .map(|id| &self.patches[id])
            .ok_or_else(|| CaseError::PatchNotFound(name.to_string()).into())
    }

    /// Patch names in alphabetical order.
    pub fn patch_names(&self) -> Vec<&str> {
        let mut patches: Vec<&BoundaryPatch> = self.patches.iter().collect();
        patches.as_mut_slice().sort_by_name();
        patches.iter().map(|p| p.name()).collect()
    }

    pub fn cell_zones(&self) -> &[CellZone] {
        &self.cell_zones
    }

    /// Resolves a cell zone by name, failing with `CaseError::ZoneNotFound`.
    pub fn cell_zone(&self, name: &str) -> Result<&CellZone> {
        position_by_name(&self.cell_zones, name)
            .map(|id| &self.cell_zones[id])
            .ok_or_else(|| CaseError::ZoneNotFound(name.to_string()).into())
    }

    /// Cell-centre-to-face-centre vectors of a patch (`Cf - C_owner`).
    pub fn patch_delta(&self, patch: &BoundaryPatch) -> Vec<Vector> {
        patch
            .geometry()
            .iter()
            .map(|g| g.centre - self.cell_centres[g.owner])
            .collect()
    }
}

/// Volume-weighted centre and total volume of a cell.
fn cell_centre_and_volume(cell: &Cell, points: &[Point]) -> (Point, f64) {
    let mut volume = 0.;
    let mut weighted = Vector::zero();
    let mut plain = Vector::zero();

    for t in cell.tets.iter() {
        let (p0, p1, p2, p3) = (points[t[0]], points[t[1]], points[t[2]], points[t[3]]);
        let v = tetrahedron_volume(p0, p1, p2, p3);
        let c = Vector::from_a_point(tetrahedron_centroid(p0, p1, p2, p3));
        volume += v;
        weighted = weighted + c * v;
        plain = plain + c;
    }

    let centre = if volume < EPS {
        plain * (1. / cell.tets.len() as f64)
    } else {
        weighted * (1. / volume)
    };

    (Point::new(centre.dx, centre.dy, centre.dz), volume)
}

impl TryFrom<MeshFile> for Mesh {
    type Error = CaseError;

    fn try_from(file: MeshFile) -> std::result::Result<Self, Self::Error> {
        let cells = file.cells.into_iter().map(|tets| Cell { tets }).collect();
        let patches = file.patches.into_iter().map(|p| (p.name, p.faces)).collect();
        Mesh::new(file.points, cells, patches, file.cell_zones).map_err(|e| match e
            .downcast::<CaseError>()
        {
            Ok(case_err) => case_err,
            Err(other) => CaseError::InvalidMesh(other.to_string()),
        })
    }
}

impl From<Mesh> for MeshFile {
    fn from(mesh: Mesh) -> Self {
        Self {
            points: mesh.points,
            cells: mesh.cells.into_iter().map(|c| c.tets).collect(),
            patches: mesh
                .patches
                .into_iter()
                .map(|p| PatchFile {
                    name: p.name().to_string(),
                    faces: p.faces().to_vec(),
                })
                .collect(),
            cell_zones: mesh.cell_zones,
        }
    }
}

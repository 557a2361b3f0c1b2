use crate::error::CaseError;
use crate::geom::polygon::face_centre_and_area;
use crate::name::HasName;
use crate::{Point, Vector};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A boundary face: polygon vertex indices (right-hand rule gives the
/// outward normal) and the index of the cell it bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub vertices: Vec<usize>,
    pub owner: usize,
}

/// Geometry of one boundary face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    /// Area-weighted face centre (`Cf`)
    pub centre: Point,
    /// Outward area vector (`Sf`), its length is the face area
    pub area_vector: Vector,
    /// Face area (`|Sf|`)
    pub area: f64,
    /// Owner cell index
    pub owner: usize,
}

impl FaceGeometry {
    /// Outward unit normal (`nf`). Zero for a degenerate face.
    pub fn unit_normal(&self) -> Vector {
        self.area_vector.normalize().unwrap_or_default()
    }
}

/// A named, ordered set of boundary faces.
#[derive(Debug, Clone)]
pub struct BoundaryPatch {
    name: String,
    faces: Vec<Face>,
    geometry: Vec<FaceGeometry>,
}

impl HasName for BoundaryPatch {
    fn get_name(&self) -> &str {
        &self.name
    }
}

impl BoundaryPatch {
    pub(crate) fn new(
        name: String,
        faces: Vec<Face>,
        points: &[Point],
        n_cells: usize,
    ) -> Result<Self> {
        let mut geometry = Vec::with_capacity(faces.len());

        for (fi, face) in faces.iter().enumerate() {
            if face.owner >= n_cells {
                return Err(CaseError::InvalidMesh(format!(
                    "patch {name} face {fi} has owner {}, mesh has {n_cells} cells",
                    face.owner
                ))
                .into());
            }
            let mut pts = Vec::with_capacity(face.vertices.len());
            for &v in face.vertices.iter() {
                let p = points.get(v).ok_or_else(|| {
                    CaseError::InvalidMesh(format!(
                        "patch {name} face {fi} references point {v}, mesh has {} points",
                        points.len()
                    ))
                })?;
                pts.push(*p);
            }
            let (centre, area_vector) = face_centre_and_area(&pts)
                .map_err(|e| CaseError::InvalidMesh(format!("patch {name} face {fi}: {e}")))?;

            geometry.push(FaceGeometry {
                centre,
                area_vector,
                area: area_vector.length(),
                owner: face.owner,
            });
        }

        Ok(Self {
            name,
            faces,
            geometry,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn geometry(&self) -> &[FaceGeometry] {
        &self.geometry
    }

    /// Owner cell of every face, in face order.
    pub fn owners(&self) -> Vec<usize> {
        self.faces.iter().map(|f| f.owner).collect()
    }

    /// Face centres (`Cf`), in face order.
    pub fn face_centres(&self) -> Vec<Point> {
        self.geometry.iter().map(|g| g.centre).collect()
    }

    /// Outward unit normals (`nf`), in face order.
    pub fn unit_normals(&self) -> Vec<Vector> {
        self.geometry.iter().map(|g| g.unit_normal()).collect()
    }
}

//! Point-in-cell search.
//!
//! Cells are binned into a uniform voxel grid by their bounding boxes, grown
//! by a small margin. A query looks up the voxel holding the point and tests
//! the candidate cells' tetrahedra with barycentric coordinates. Cells that
//! would span too many voxels are kept out of the grid and always tested.

use std::collections::HashMap;

use crate::geom::EPS;
use crate::geom::bboxes::{bounding_box, is_point_inside_bbox};
use crate::geom::tetrahedron::is_point_inside_tetrahedron;
use crate::mesh::Mesh;
use crate::{Point, Vector};

/// Relative tolerance applied to barycentric coordinates.
const INSIDE_TOL: f64 = 1e-9;

/// Growth of a cell's bounding box, relative to its diagonal.
const BBOX_MARGIN: f64 = 1e-6;

/// Cells covering more voxels than this are scanned on every query.
const MAX_CELL_VOXELS: f64 = 512.;

pub struct MeshSearch<'a> {
    mesh: &'a Mesh,
    grid: HashMap<(i64, i64, i64), Vec<usize>>,
    oversized: Vec<usize>,
    bboxes: Vec<(Point, Point)>,
    step: f64,
}

impl<'a> MeshSearch<'a> {
    /// Builds the search structure with about one cell per voxel: the
    /// largest extent of the mesh divided by the cube root of the cell count.
    pub fn new(mesh: &'a Mesh) -> Self {
        let bboxes = cell_bboxes(mesh);
        let step = default_step(&bboxes);
        Self::with_bboxes(mesh, bboxes, step)
    }

    /// Builds the search structure with an explicit voxel size.
    pub fn with_step(mesh: &'a Mesh, step: f64) -> Self {
        Self::with_bboxes(mesh, cell_bboxes(mesh), step)
    }

    fn with_bboxes(mesh: &'a Mesh, bboxes: Vec<(Point, Point)>, step: f64) -> Self {
        let step = if step > EPS { step } else { 1. };
        let mut grid: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
        let mut oversized = Vec::new();

        for (cell, (pmin, pmax)) in bboxes.iter().enumerate() {
            let (imin, jmin, kmin) = voxel_key(*pmin, step);
            let (imax, jmax, kmax) = voxel_key(*pmax, step);
            let span = |lo: i64, hi: i64| (hi as f64 - lo as f64) + 1.;
            if span(imin, imax) * span(jmin, jmax) * span(kmin, kmax) > MAX_CELL_VOXELS {
                oversized.push(cell);
                continue;
            }
            for i in imin..=imax {
                for j in jmin..=jmax {
                    for k in kmin..=kmax {
                        grid.entry((i, j, k)).or_default().push(cell);
                    }
                }
            }
        }

        Self {
            mesh,
            grid,
            oversized,
            bboxes,
            step,
        }
    }

    /// Returns the lowest-numbered cell containing `pt`, if any.
    pub fn find_cell(&self, pt: Point) -> Option<usize> {
        self.grid
            .get(&voxel_key(pt, self.step))
            .into_iter()
            .flatten()
            .chain(self.oversized.iter())
            .copied()
            .filter(|&cell| self.cell_contains(cell, pt))
            .min()
    }

    /// Number of stored (voxel, cell) pairs, oversized cells counted once.
    pub fn n_entries(&self) -> usize {
        self.grid.values().map(Vec::len).sum::<usize>() + self.oversized.len()
    }

    fn cell_contains(&self, cell: usize, pt: Point) -> bool {
        let (pmin, pmax) = self.bboxes[cell];
        is_point_inside_bbox(pt, pmin, pmax, 0.)
            && self
                .mesh
                .cell_tets(cell)
                .any(|[p0, p1, p2, p3]| is_point_inside_tetrahedron(pt, p0, p1, p2, p3, INSIDE_TOL))
    }
}

fn voxel_key(pt: Point, step: f64) -> (i64, i64, i64) {
    (
        (pt.x / step).floor() as i64,
        (pt.y / step).floor() as i64,
        (pt.z / step).floor() as i64,
    )
}

fn default_step(bboxes: &[(Point, Point)]) -> f64 {
    let corners: Vec<Point> = bboxes.iter().flat_map(|&(lo, hi)| [lo, hi]).collect();
    let Some((lo, hi)) = bounding_box(&corners) else {
        return 1.;
    };
    let extent = (hi.x - lo.x).max(hi.y - lo.y).max(hi.z - lo.z);
    extent / (bboxes.len() as f64).cbrt()
}

/// Cell bounding boxes grown by `BBOX_MARGIN`.
fn cell_bboxes(mesh: &Mesh) -> Vec<(Point, Point)> {
    (0..mesh.n_cells())
        .map(|cell| {
            let pts: Vec<Point> = mesh.cell_tets(cell).flatten().collect();
            // Cells always hold at least one tetrahedron
            let (pmin, pmax) = bounding_box(&pts).unwrap_or((Point::origin(), Point::origin()));
            let m = BBOX_MARGIN * (pmax - pmin).length();
            let grow = Vector::new(m, m, m);
            (pmin - grow, pmax + grow)
        })
        .collect()
}

use crate::error::CaseError;
use crate::mesh::{Cell, CellZone, Face, Mesh};
use crate::Point;
use anyhow::Result;

/// Kuhn decomposition of a hexahedron into 6 tetrahedra sharing the
/// diagonal 0-6 (local corner numbering, see `Mesh::from_box`).
const HEX_TETS: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

impl Mesh {
    /// Creates a structured box mesh with `lengths` split into `divisions`
    /// hexahedral cells, starting at corner `origin`.
    ///
    /// Cell `(i, j, k)` has index `i + nx * (j + ny * k)`. Hex corners are
    /// numbered 0-3 counter-clockwise on the lower face and 4-7 above them.
    ///
    /// Boundary patches and their face order:
    /// - `bottom` (z min), `top` (z max): `j` outer, `i` inner
    /// - `west` (x min), `east` (x max): `k` outer, `j` inner
    /// - `south` (y min), `north` (y max): `k` outer, `i` inner
    ///
    /// All cells are also collected in the cell zone `all`.
    pub fn from_box(
        lengths: (f64, f64, f64),
        divisions: (usize, usize, usize),
        origin: Point,
    ) -> Result<Self> {
        let (lx, ly, lz) = lengths;
        let (nx, ny, nz) = divisions;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(CaseError::InvalidInput(format!(
                "box divisions must be positive, got {nx}x{ny}x{nz}"
            ))
            .into());
        }
        if !(lx > 0. && ly > 0. && lz > 0.) {
            return Err(CaseError::InvalidInput(format!(
                "box lengths must be positive, got {lx}x{ly}x{lz}"
            ))
            .into());
        }

        let pid = |i: usize, j: usize, k: usize| i + (nx + 1) * (j + (ny + 1) * k);
        let cid = |i: usize, j: usize, k: usize| i + nx * (j + ny * k);

        let mut points = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
        for k in 0..=nz {
            for j in 0..=ny {
                for i in 0..=nx {
                    points.push(Point::new(
                        origin.x + lx * i as f64 / nx as f64,
                        origin.y + ly * j as f64 / ny as f64,
                        origin.z + lz * k as f64 / nz as f64,
                    ));
                }
            }
        }

        let mut cells = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let corners = [
                        pid(i, j, k),
                        pid(i + 1, j, k),
                        pid(i + 1, j + 1, k),
                        pid(i, j + 1, k),
                        pid(i, j, k + 1),
                        pid(i + 1, j, k + 1),
                        pid(i + 1, j + 1, k + 1),
                        pid(i, j + 1, k + 1),
                    ];
                    let tets = HEX_TETS
                        .iter()
                        .map(|t| [corners[t[0]], corners[t[1]], corners[t[2]], corners[t[3]]])
                        .collect();
                    cells.push(Cell { tets });
                }
            }
        }

        let face = |vertices: [usize; 4], owner: usize| Face {
            vertices: vertices.to_vec(),
            owner,
        };

        let mut bottom = Vec::new();
        let mut top = Vec::new();
        for j in 0..ny {
            for i in 0..nx {
                bottom.push(face(
                    [pid(i, j, 0), pid(i, j + 1, 0), pid(i + 1, j + 1, 0), pid(i + 1, j, 0)],
                    cid(i, j, 0),
                ));
                top.push(face(
                    [pid(i, j, nz), pid(i + 1, j, nz), pid(i + 1, j + 1, nz), pid(i, j + 1, nz)],
                    cid(i, j, nz - 1),
                ));
            }
        }

        let mut west = Vec::new();
        let mut east = Vec::new();
        for k in 0..nz {
            for j in 0..ny {
                west.push(face(
                    [pid(0, j, k), pid(0, j, k + 1), pid(0, j + 1, k + 1), pid(0, j + 1, k)],
                    cid(0, j, k),
                ));
                east.push(face(
                    [pid(nx, j, k), pid(nx, j + 1, k), pid(nx, j + 1, k + 1), pid(nx, j, k + 1)],
                    cid(nx - 1, j, k),
                ));
            }
        }

        let mut south = Vec::new();
        let mut north = Vec::new();
        for k in 0..nz {
            for i in 0..nx {
                south.push(face(
                    [pid(i, 0, k), pid(i + 1, 0, k), pid(i + 1, 0, k + 1), pid(i, 0, k + 1)],
                    cid(i, 0, k),
                ));
                north.push(face(
                    [pid(i, ny, k), pid(i, ny, k + 1), pid(i + 1, ny, k + 1), pid(i + 1, ny, k)],
                    cid(i, ny - 1, k),
                ));
            }
        }

        let patches = vec![
            ("bottom".to_string(), bottom),
            ("top".to_string(), top),
            ("west".to_string(), west),
            ("east".to_string(), east),
            ("south".to_string(), south),
            ("north".to_string(), north),
        ];
        let all = CellZone::new("all", (0..nx * ny * nz).collect());

        Mesh::new(points, cells, patches, vec![all])
    }
}

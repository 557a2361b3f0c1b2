use crate::Point;
use crate::geom::EPS;

/// Calculates volume using the Cayley-Menger formula.
pub fn tetrahedron_volume(pt0: Point, pt1: Point, pt2: Point, pt3: Point) -> f64 {
    // Edge lengths
    let a = (pt1 - pt0).length();
    let b = (pt2 - pt0).length();
    let c = (pt3 - pt0).length();
    let d = (pt2 - pt1).length();
    let e = (pt3 - pt2).length();
    let f = (pt3 - pt1).length();

    let a2 = a.powi(2);
    let b2 = b.powi(2);
    let c2 = c.powi(2);
    let d2 = d.powi(2);
    let e2 = e.powi(2);
    let f2 = f.powi(2);

    let x = b2 + c2 - e2;
    let y = a2 + c2 - f2;
    let z = a2 + b2 - d2;

    let x2 = x.powi(2);
    let y2 = y.powi(2);
    let z2 = z.powi(2);

    let nominator = 4. * a2 * b2 * c2 - a2 * x2 - b2 * y2 - c2 * z2 + x * y * z;

    // Use max(0.0) to handle negative values from floating-point errors
    // for degenerate tetrahedrons (e.g., all 4 points coplanar)
    nominator.max(0.0).sqrt() / 12.
}

/// Returns tetrahedron centroid (i.e. average of each vertices)
pub fn tetrahedron_centroid(pt0: Point, pt1: Point, pt2: Point, pt3: Point) -> Point {
    let x = (pt0.x + pt1.x + pt2.x + pt3.x) / 4.;
    let y = (pt0.y + pt1.y + pt2.y + pt3.y) / 4.;
    let z = (pt0.z + pt1.z + pt2.z + pt3.z) / 4.;
    Point::new(x, y, z)
}

/// Six times the signed volume (triple product).
///
/// Positive when `pt3` lies on the side of the plane `(pt0, pt1, pt2)`
/// pointed to by the right-hand normal.
fn signed_volume6(pt0: Point, pt1: Point, pt2: Point, pt3: Point) -> f64 {
    (pt1 - pt0).cross(pt2 - pt0).dot(pt3 - pt0)
}

/// Barycentric coordinates of `ptest` in the tetrahedron.
///
/// Returns `None` for a degenerate (flat) tetrahedron.
pub fn tetrahedron_barycentric(
    ptest: Point,
    pt0: Point,
    pt1: Point,
    pt2: Point,
    pt3: Point,
) -> Option<[f64; 4]> {
    let total = signed_volume6(pt0, pt1, pt2, pt3);
    let scale = (pt1 - pt0)
        .length()
        .max((pt2 - pt0).length())
        .max((pt3 - pt0).length());
    if total.abs() <= EPS * scale.powi(3) {
        return None;
    }
    Some([
        signed_volume6(ptest, pt1, pt2, pt3) / total,
        signed_volume6(pt0, ptest, pt2, pt3) / total,
        signed_volume6(pt0, pt1, ptest, pt3) / total,
        signed_volume6(pt0, pt1, pt2, ptest) / total,
    ])
}

/// Checks whether `ptest` lies inside (or on the boundary of) the tetrahedron.
///
/// Vertex order does not matter. `tol` is applied to the barycentric
/// coordinates.
pub fn is_point_inside_tetrahedron(
    ptest: Point,
    pt0: Point,
    pt1: Point,
    pt2: Point,
    pt3: Point,
    tol: f64,
) -> bool {
    match tetrahedron_barycentric(ptest, pt0, pt1, pt2, pt3) {
        Some(lambda) => lambda.iter().all(|&l| l >= -tol),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tet() -> (Point, Point, Point, Point) {
        (
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(0., 1., 0.),
            Point::new(0., 0., 1.),
        )
    }

    #[test]
    fn test_volume() {
        let (a, b, c, d) = unit_tet();
        assert!((tetrahedron_volume(a, b, c, d) - 1. / 6.).abs() < 1e-12);
        // Order does not change the (unsigned) volume
        assert!((tetrahedron_volume(b, a, c, d) - 1. / 6.).abs() < 1e-12);
    }

    #[test]
    fn test_centroid() {
        let (a, b, c, d) = unit_tet();
        let ctr = tetrahedron_centroid(a, b, c, d);
        assert!(ctr.is_close(&Point::new(0.25, 0.25, 0.25)));
    }

    #[test]
    fn test_barycentric_sums_to_one() {
        let (a, b, c, d) = unit_tet();
        let lambda = tetrahedron_barycentric(Point::new(0.1, 0.2, 0.3), a, b, c, d).unwrap();
        let sum: f64 = lambda.iter().sum();
        assert!((sum - 1.).abs() < 1e-12);
        assert!((lambda[1] - 0.1).abs() < 1e-12);
        assert!((lambda[2] - 0.2).abs() < 1e-12);
        assert!((lambda[3] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_point_inside() {
        let (a, b, c, d) = unit_tet();
        assert!(is_point_inside_tetrahedron(Point::new(0.1, 0.1, 0.1), a, b, c, d, 1e-9));
        assert!(is_point_inside_tetrahedron(Point::new(0.1, 0.1, 0.1), b, a, c, d, 1e-9));
        // On a face
        assert!(is_point_inside_tetrahedron(Point::new(0.2, 0.2, 0.0), a, b, c, d, 1e-9));
        // Outside
        assert!(!is_point_inside_tetrahedron(Point::new(0.5, 0.5, 0.5), a, b, c, d, 1e-9));
        assert!(!is_point_inside_tetrahedron(Point::new(-0.1, 0.1, 0.1), a, b, c, d, 1e-9));
    }

    #[test]
    fn test_small_tetrahedron() {
        let s = 1e-5;
        let (a, b, c, d) = (
            Point::new(0., 0., 0.),
            Point::new(s, 0., 0.),
            Point::new(0., s, 0.),
            Point::new(0., 0., s),
        );
        assert!(is_point_inside_tetrahedron(Point::new(s / 5., s / 5., s / 5.), a, b, c, d, 1e-9));
        assert!(!is_point_inside_tetrahedron(Point::new(s, s, s), a, b, c, d, 1e-9));
    }

    #[test]
    fn test_degenerate() {
        let a = Point::new(0., 0., 0.);
        let b = Point::new(1., 0., 0.);
        let c = Point::new(0., 1., 0.);
        let d = Point::new(1., 1., 0.);
        assert!(tetrahedron_barycentric(Point::new(0.2, 0.2, 0.), a, b, c, d).is_none());
        assert!(tetrahedron_volume(a, b, c, d) < 1e-12);
    }
}

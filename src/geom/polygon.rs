//! Planar (or nearly planar) polygon faces.
//!
//! Face geometry is computed by decomposing the polygon into a triangle fan
//! around the vertex average, which tolerates slightly warped faces.

use crate::geom::EPS;
use crate::{Point, Vector};
use anyhow::{Result, anyhow};

/// Returns `(centre, area_vector)` of the polygon `pts`.
///
/// The area vector points along the right-hand normal of the vertex order and
/// its length equals the face area. The centre is the area-weighted centroid.
pub fn face_centre_and_area(pts: &[Point]) -> Result<(Point, Vector)> {
    if pts.len() < 3 {
        return Err(anyhow!("Face needs at least 3 vertices, got {}", pts.len()));
    }

    if pts.len() == 3 {
        let centre = Point::average(pts);
        let area = (pts[1] - pts[0]).cross(pts[2] - pts[0]) * 0.5;
        return Ok((centre, area));
    }

    let p_avg = Point::average(pts);
    let mut sum_n = Vector::zero();
    let mut sum_a = 0.;
    let mut sum_ac = Vector::zero();

    for (i, &p) in pts.iter().enumerate() {
        let next = pts[(i + 1) % pts.len()];
        // Triangle centroid times 3
        let c = Vector::from_a_point(p) + Vector::from_a_point(next) + Vector::from_a_point(p_avg);
        let n = (next - p).cross(p_avg - p);
        let a = n.length();

        sum_n = sum_n + n;
        sum_a += a;
        sum_ac = sum_ac + c * a;
    }

    let centre = if sum_a < EPS {
        p_avg
    } else {
        let c = sum_ac * (1. / (3. * sum_a));
        Point::new(c.dx, c.dy, c.dz)
    };

    Ok((centre, sum_n * 0.5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() -> Result<()> {
        let pts = [
            Point::new(0., 0., 0.),
            Point::new(3., 0., 0.),
            Point::new(0., 3., 0.),
        ];
        let (c, s) = face_centre_and_area(&pts)?;
        assert!(c.is_close(&Point::new(1., 1., 0.)));
        assert!(s.is_close(&Vector::new(0., 0., 4.5)));
        Ok(())
    }

    #[test]
    fn test_square() -> Result<()> {
        let pts = [
            Point::new(0., 0., 1.),
            Point::new(2., 0., 1.),
            Point::new(2., 2., 1.),
            Point::new(0., 2., 1.),
        ];
        let (c, s) = face_centre_and_area(&pts)?;
        assert!(c.is_close_tol(&Point::new(1., 1., 1.), 1e-12));
        assert!(s.is_close_tol(&Vector::new(0., 0., 4.), 1e-12));
        Ok(())
    }

    #[test]
    fn test_reversed_order_flips_normal() -> Result<()> {
        let pts = [
            Point::new(0., 2., 0.),
            Point::new(2., 2., 0.),
            Point::new(2., 0., 0.),
            Point::new(0., 0., 0.),
        ];
        let (_, s) = face_centre_and_area(&pts)?;
        assert!(s.is_close_tol(&Vector::new(0., 0., -4.), 1e-12));
        Ok(())
    }

    #[test]
    fn test_l_shape_centroid() -> Result<()> {
        // L-shape made of three unit squares
        let pts = [
            Point::new(0., 0., 0.),
            Point::new(2., 0., 0.),
            Point::new(2., 1., 0.),
            Point::new(1., 1., 0.),
            Point::new(1., 2., 0.),
            Point::new(0., 2., 0.),
        ];
        let (c, s) = face_centre_and_area(&pts)?;
        assert!((s.length() - 3.).abs() < 1e-12);
        let expected = Point::new(5. / 6., 5. / 6., 0.);
        assert!(c.is_close_tol(&expected, 1e-12));
        Ok(())
    }

    #[test]
    fn test_too_few_vertices() {
        let pts = [Point::new(0., 0., 0.), Point::new(1., 0., 0.)];
        assert!(face_centre_and_area(&pts).is_err());
    }
}

use crate::geom::point::Point;

/// Checks whether a point is inside (or on) the box `(pmin, pmax)` grown by `tol`.
pub fn is_point_inside_bbox(ptest: Point, pmin: Point, pmax: Point, tol: f64) -> bool {
    ptest.x >= pmin.x - tol
        && ptest.x <= pmax.x + tol
        && ptest.y >= pmin.y - tol
        && ptest.y <= pmax.y + tol
        && ptest.z >= pmin.z - tol
        && ptest.z <= pmax.z + tol
}

/// Returns the min and max corners of the box holding all points `pts`.
///
/// Returns `None` for an empty slice.
pub fn bounding_box(pts: &[Point]) -> Option<(Point, Point)> {
    let first = *pts.first()?;
    let (pmin, pmax) = pts.iter().skip(1).fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
        )
    });

    Some((pmin, pmax))
}

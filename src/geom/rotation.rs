use crate::Vector;
use crate::geom::IsClose;
use crate::geom::vector::convert::{array_to_vectors, vectors_to_array};
use anyhow::{Result, anyhow};
use ndarray as nd;

/// Calculate rotation matrix for a unit vector `u` and angle `phi` (radians).
///
/// Uses Rodrigues' rotation formula, which is numerically more stable than
/// expanding the basic axis rotations:
/// `R = I + sin(phi) W + 2 sin^2(phi / 2) W^2`, where `W` is the
/// cross-product matrix of `u`.
///
/// Reference: https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula
pub fn rotation_matrix(u: &Vector, phi: f64) -> Result<nd::Array2<f64>> {
    if !u.length().is_close(1.) {
        return Err(anyhow!("Rotation axis must be a unit vector, got {u:.3}"));
    }

    let w: nd::Array2<f64> = nd::arr2(&[[0., -u.dz, u.dy], [u.dz, 0., -u.dx], [-u.dy, u.dx, 0.]]);

    Ok(nd::Array::eye(3) + phi.sin() * &w + (2. * (phi / 2.).sin().powi(2)) * w.dot(&w))
}

/// Rotate vectors using the rotation matrix `rot`.
pub fn rotate_vectors(vectors: &[Vector], rot: &nd::ArrayView2<f64>) -> Vec<Vector> {
    let arr = vectors_to_array(vectors);
    // Row vectors: v' = v R^T
    let arr = arr.dot(&rot.t());

    array_to_vectors(arr)
}

/// Rotate vectors around the unit vector `u` by the angle `phi` (radians).
pub fn rotate_vectors_around_axis(vectors: &[Vector], u: &Vector, phi: f64) -> Result<Vec<Vector>> {
    if phi.abs().is_close(0.) {
        // No need to rotate
        return Ok(vectors.to_vec());
    }
    let rot = rotation_matrix(u, phi)?;

    Ok(rotate_vectors(vectors, &rot.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_rotate_around_z() -> Result<()> {
        let v0 = Vector::new(1.0, 0.0, 0.0);
        let v1 = Vector::new(0.0, 1.0, 0.0);
        let v2 = Vector::new(0.0, 0.0, 2.0);
        let u = Vector::new(0., 0., 1.);

        let rotated = rotate_vectors_around_axis(&[v0, v1, v2], &u, PI / 2.)?;

        assert!(rotated[0].is_close_tol(&Vector::new(0.0, 1.0, 0.0), 1e-12));
        assert!(rotated[1].is_close_tol(&Vector::new(-1.0, 0.0, 0.0), 1e-12));
        assert!(rotated[2].is_close_tol(&Vector::new(0.0, 0.0, 2.0), 1e-12));
        Ok(())
    }

    #[test]
    fn test_rotate_around_y() -> Result<()> {
        let v = Vector::new(1.0, 0.0, 0.0);
        let u = Vector::new(0., 1., 0.);
        let rotated = rotate_vectors_around_axis(&[v], &u, -PI / 2.)?;
        assert!(rotated[0].is_close_tol(&Vector::new(0.0, 0.0, 1.0), 1e-12));
        Ok(())
    }

    #[test]
    fn test_zero_angle_is_identity() -> Result<()> {
        let v = Vector::new(0.3, -2.0, 7.0);
        let rotated = rotate_vectors_around_axis(&[v], &Vector::new(0., 0., 1.), 0.)?;
        assert_eq!(rotated[0], v);
        Ok(())
    }

    #[test]
    fn test_non_unit_axis_rejected() {
        assert!(rotation_matrix(&Vector::new(0., 0., 2.), 1.0).is_err());
    }
}

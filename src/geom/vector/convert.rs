use crate::Vector;
use ndarray as nd;

pub fn vectors_to_array(vectors: &[Vector]) -> nd::Array2<f64> {
    let mut arr = nd::Array2::from_elem((vectors.len(), 3), 0.);

    for (i, v) in vectors.iter().enumerate() {
        arr[[i, 0]] = v.dx;
        arr[[i, 1]] = v.dy;
        arr[[i, 2]] = v.dz;
    }

    arr
}

pub fn array_to_vectors(arr: nd::Array2<f64>) -> Vec<Vector> {
    let mut vectors: Vec<Vector> = Vec::new();
    let num_rows = arr.shape()[0];

    for i in 0..num_rows {
        let (dx, dy, dz) = (arr[[i, 0]], arr[[i, 1]], arr[[i, 2]]);
        vectors.push(Vector::new(dx, dy, dz));
    }

    vectors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion() {
        let a0 = Vector::new(1., 2., 3.);
        let a1 = Vector::new(4., 5., 6.);
        let arr = vectors_to_array(&[a0, a1]);
        assert_eq!(arr.shape(), &[2, 3]);
        let v = array_to_vectors(arr);
        assert_eq!(v, vec![a0, a1]);
    }
}

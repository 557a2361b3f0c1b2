use crate::mesh::Mesh;
use anyhow::Result;

/// Total volume of the cells in cell zone `zone`.
pub fn cell_zone_volume(mesh: &Mesh, zone: &str) -> Result<f64> {
    let zone = mesh.cell_zone(zone)?;
    let volumes = mesh.cell_volumes();
    Ok(zone.cells.iter().map(|&c| volumes[c]).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use crate::error::{CaseError, case_error};
    use crate::mesh::CellZone;

    #[test]
    fn test_zone_volume() -> Result<()> {
        let mesh = Mesh::from_box((4., 1., 1.), (4, 1, 1), Point::origin())?;
        assert!((cell_zone_volume(&mesh, "all")? - 4.).abs() < 1e-10);
        Ok(())
    }

    #[test]
    fn test_partial_zone() -> Result<()> {
        let mesh = Mesh::from_box((2., 2., 2.), (2, 2, 2), Point::origin())?;
        let json = serde_json::to_value(&mesh)?;
        let mut file: crate::mesh::MeshFile = serde_json::from_value(json)?;
        file.cell_zones.push(CellZone::new("fan", vec![0, 3, 5]));
        let mesh: Mesh = serde_json::from_value(serde_json::to_value(file)?)?;
        assert!((cell_zone_volume(&mesh, "fan")? - 3.).abs() < 1e-10);
        Ok(())
    }

    #[test]
    fn test_unknown_zone() -> Result<()> {
        let mesh = Mesh::from_box((1., 1., 1.), (1, 1, 1), Point::origin())?;
        let err = cell_zone_volume(&mesh, "fan").unwrap_err();
        assert!(matches!(case_error(&err), Some(CaseError::ZoneNotFound(_))));
        Ok(())
    }
}

use crate::name::HasName;
use serde::{Deserialize, Serialize};

/// A named set of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellZone {
    pub name: String,
    pub cells: Vec<usize>,
}

impl CellZone {
    pub fn new(name: &str, cells: Vec<usize>) -> Self {
        Self {
            name: name.to_string(),
            cells,
        }
    }
}

impl HasName for CellZone {
    fn get_name(&self) -> &str {
        &self.name
    }
}

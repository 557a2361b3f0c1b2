pub mod case;
pub mod error;
pub mod field;
pub mod geom;
pub mod io;
pub mod logging;
pub mod mesh;
pub mod name;
pub mod time;
pub mod tools;

// Prelude
pub use case::{CaseDir, CaseSource, MemoryCase};
pub use error::CaseError;
pub use field::{FieldData, VolField};
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use mesh::Mesh;
pub use time::TimeSnapshot;

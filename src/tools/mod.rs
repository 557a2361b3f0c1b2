//! Case post-processing utilities.
//!
//! Each tool takes a `CaseSource` plus the snapshots it should run on and
//! returns plain data; `main.rs` decides where the output goes.

pub mod face_data;
pub mod interp;
pub mod rays;
pub mod rotate;
pub mod set_patch;
pub mod zone_volume;

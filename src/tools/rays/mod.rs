//! Rays from boundary faces, one per face, for external ray tracers.

pub mod config;
pub mod generator;

pub use config::RayConfig;
pub use generator::{PatchRays, Ray, generate_rays, patch_rays, write_rays};

//! Patch field sampling and interpolation between stored snapshots.

pub mod config;
pub mod interpolator;
pub mod sampler;

pub use config::{InterpConfig, SampleConfig};
pub use interpolator::{InterpRequest, interpolate_patch_field, write_vectors};
pub use sampler::{sample_patch, sample_values};

//! # Dendra Core
//!
//! Shared building blocks for dendra morphologies.
//!
//! This crate provides:
//! - **Xyzr**: Per-branch coordinate samples (x, y, z, radius)
//! - **Movable**: Translation and rotation of anything that owns geometry
//! - **DendraConfig**: Layout and compartment defaults
//! - **DendraError**: Unified error type
//!
//! ## Memory Layout
//!
//! Samples use `#[repr(C)]` so a coordinate array can be handed to numeric
//! code as a flat `(samples, 4)` row-major `f64` buffer via `bytemuck`.

pub mod config;
pub mod error;
pub mod traits;
pub mod xyzr;

// Re-export main types at crate root
pub use config::{CompartmentDefaults, DendraConfig, LayoutConfig};
pub use error::{DendraError, DendraResult};
pub use traits::{Movable, RotationPlane};
pub use xyzr::{Xyzr, XyzrSample};

/// Number of columns in a coordinate array (x, y, z, radius)
pub const XYZR_COLUMNS: usize = 4;

/// Column holding the radius; translations never write it
pub const RADIUS_COLUMN: usize = 3;

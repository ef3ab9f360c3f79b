//! Core utilities and foundational types shared by every croak crate.
//!
//! - [`CroakError`] / [`Result`]: the workspace-wide error type
//! - [`Timer`]: redraw-to-redraw delta fed to the per-frame update
//! - [`Axis`]: per-axis addressing of Euler rotations and offsets

pub mod axis;
pub mod errors;
pub mod time;

pub use axis::Axis;
pub use errors::{CroakError, Result};
pub use time::Timer;

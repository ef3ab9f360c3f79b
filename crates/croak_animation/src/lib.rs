//! Procedural pose animation for croak.
//!
//! Two kinds of pose changes drive the rig:
//!
//! - **Parametric motions** ([`MotionKind`]): jump and swim. Every joint angle
//!   is `baseline + weight × f(t)` for one shared arc `f` (see [`motion::arc`]),
//!   so a motion carries no state beyond an active flag and its running time.
//! - **Nudge controls** ([`controls`]): one fixed delta per key press, with a
//!   wraparound clamp.
//!
//! [`CharacterController`] owns the [`AnimationState`] and is the single
//! entry point for both input and the per-frame update.

pub mod controller;
pub mod controls;
pub mod motion;
pub mod pose;
pub mod settings;

pub use controller::{CharacterController, MotionEvents};
pub use controls::{BodyDirection, ControlAction, NudgeControl};
pub use motion::{AnimationState, MotionEvent, MotionKind, MotionState};
pub use pose::JointDrive;
pub use settings::{CharacterSettings, MotionSettings};

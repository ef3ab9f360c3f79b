//! Application layer for croak.
//!
//! - [`input`]: platform-agnostic keys, mouse buttons and input state
//! - [`KeyMap`]: key presses to character actions
//! - [`Session`]: the frog rig, its controller and asset queue, driven one
//!   frame at a time
//! - [`FrameSink`]: where each posed frame goes (the renderer seam)
//! - [`capability`]: graphics adapter probe run before startup
//! - `winit` (feature): window runner and the `WindowSink` hook

pub mod capability;
pub mod input;
pub mod keymap;
pub mod session;

#[cfg(feature = "winit")]
pub mod winit;

#[cfg(not(target_arch = "wasm32"))]
pub use capability::probe_render_capability;
pub use capability::{RENDER_UNAVAILABLE_MESSAGE, RenderCapability, request_render_capability};
pub use input::{ButtonState, Input, Key, KeyPress, MouseButton};
pub use keymap::{KeyBinding, KeyMap};
pub use session::{FrameOutput, FrameSink, LogSink, Session};

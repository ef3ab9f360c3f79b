//! # Croak
//!
//! A keyboard-driven, procedurally animated frog rig.
//!
//! The frog is a tree of fourteen named nodes. Jump and swim motions pose
//! every joint from one shared parabolic arc; individual limbs respond to
//! key presses with small incremental rotations. Rendering is left to a
//! [`FrameSink`](app::FrameSink), which receives the posed rig every frame;
//! the `render` feature provides a wgpu one.
//!
//! ## Crates
//!
//! | module | crate | contents |
//! |--------|-------|----------|
//! | [`scene`] | `croak_scene` | rig hierarchy, transforms, frog topology |
//! | [`animation`] | `croak_animation` | motions, nudge controls, controller |
//! | [`assets`] | `croak_assets` | asset binding and load queue |
//! | [`app`] | `croak_app` | input, key map, session, window runner |
//! | `render` (feature) | `croak_render` | wgpu renderer, orbit camera |
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use croak::prelude::*;
//!
//! let mut session = Session::new(CharacterSettings::default())?;
//! session.handle_key(KeyPress::new(Key::J));
//! let frame = session.frame(1.0 / 60.0);
//! ```

pub use croak_animation as animation;
pub use croak_app as app;
pub use croak_assets as assets;
pub use croak_core::{CroakError, Result, errors};
pub use croak_scene as scene;

#[cfg(feature = "render")]
pub use croak_render as render;

pub use glam;

pub mod prelude {
    pub use croak_animation::{
        CharacterController, CharacterSettings, ControlAction, MotionEvent, MotionKind,
        MotionSettings,
    };
    #[cfg(not(target_arch = "wasm32"))]
    pub use croak_app::probe_render_capability;
    pub use croak_app::{
        FrameOutput, FrameSink, Key, KeyMap, KeyPress, LogSink, RENDER_UNAVAILABLE_MESSAGE,
        Session,
    };
    #[cfg(not(target_arch = "wasm32"))]
    pub use croak_assets::FsAssetLoader;
    pub use croak_assets::{AssetLoader, FROG_ASSETS, LoadProgress};
    pub use croak_core::{Axis, CroakError, Result, Timer};
    pub use croak_scene::{FrogPart, NodeHandle, Rig, build_frog_rig};

    pub use glam::{Quat, Vec3};
}

//! The frog session: rig, controller, key map and asset queue in one place.
//!
//! A [`Session`] is what the window runner drives. It is independent of
//! any windowing system, so it can be stepped headless from tests or from
//! another event loop.

use croak_animation::{CharacterController, CharacterSettings, ControlAction, MotionEvents};
use croak_assets::{AssetLoader, BindingTable, BoundAsset, LoadProgress, LoadQueue};
use croak_core::Result;
use croak_scene::{Rig, build_frog_rig};

use crate::input::KeyPress;
use crate::keymap::KeyMap;

/// Everything that happened during one [`Session::frame`].
#[derive(Debug, Default)]
pub struct FrameOutput {
    /// Seconds the frame advanced.
    pub dt: f32,
    /// Motions that ended this frame.
    pub events: MotionEvents,
    /// Assets that finished loading and were bound this frame.
    pub bound: Vec<BoundAsset>,
}

/// Receives the posed rig once per frame. The renderer lives behind this
/// seam: it turns bound assets into meshes under their nodes and draws the
/// rig using each node's world matrix.
pub trait FrameSink {
    fn present(&mut self, rig: &Rig, frame: &FrameOutput);
}

/// A sink that only logs. Used when no renderer is attached.
#[derive(Debug, Default)]
pub struct LogSink;

impl FrameSink for LogSink {
    fn present(&mut self, rig: &Rig, frame: &FrameOutput) {
        for bound in &frame.bound {
            let node = rig.node(bound.node).map_or("?", |n| n.name());
            log::debug!(
                "'{}' ({} bytes) attached to '{node}'",
                bound.asset.path,
                bound.asset.bytes.len()
            );
        }
        for event in &frame.events {
            log::debug!("{event:?}");
        }
    }
}

pub struct Session {
    rig: Rig,
    controller: CharacterController,
    key_map: KeyMap,
    bindings: BindingTable,
    loads: LoadQueue,
}

impl Session {
    /// Builds the frog rig in its rest pose.
    ///
    /// # Errors
    ///
    /// Fails if `settings` are invalid or the frog topology cannot be built.
    pub fn new(settings: CharacterSettings) -> Result<Self> {
        settings.validate()?;
        let (mut rig, parts) = build_frog_rig()?;
        rig.update_world_matrices();

        Ok(Self {
            rig,
            controller: CharacterController::new(parts, settings),
            key_map: KeyMap::frog(),
            bindings: BindingTable::frog(),
            loads: LoadQueue::new(),
        })
    }

    #[must_use]
    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    #[inline]
    #[must_use]
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    #[inline]
    #[must_use]
    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    #[must_use]
    pub fn load_progress(&self) -> LoadProgress {
        self.loads.progress()
    }

    /// Starts loading `paths`. Completions are bound during later frames.
    pub fn request_assets<L: AssetLoader + ?Sized>(&mut self, loader: &L, paths: &[&str]) {
        self.loads.request_all(loader, paths);
    }

    /// Handles one key-down. Returns the action it triggered, if any.
    pub fn handle_key(&mut self, press: KeyPress) -> Option<ControlAction> {
        let action = self.key_map.action_for(press)?;
        self.controller.apply(&mut self.rig, action);
        Some(action)
    }

    /// Applies an action directly, bypassing the key map.
    pub fn apply(&mut self, action: ControlAction) {
        self.controller.apply(&mut self.rig, action);
    }

    /// Advances one frame of `dt` seconds.
    ///
    /// Binds finished loads, steps every active motion and refreshes world
    /// matrices, in that order.
    pub fn frame(&mut self, dt: f32) -> FrameOutput {
        let bound = self.loads.drain(&mut self.rig, &self.bindings);
        let events = self.controller.update(&mut self.rig, dt);
        self.rig.update_world_matrices();
        FrameOutput { dt, events, bound }
    }
}

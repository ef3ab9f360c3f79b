use smallvec::SmallVec;

use croak_scene::{PartMap, Rig};

use crate::controls::{self, ARM_STROKE, ControlAction, LEG_STROKE, LOOK_LEFT, LOOK_RIGHT};
use crate::motion::{AnimationState, MotionEvent, MotionKind, MotionState, arc};
use crate::pose::apply_drives;
use crate::settings::CharacterSettings;

/// Events produced by one [`CharacterController::update`].
pub type MotionEvents = SmallVec<[MotionEvent; 2]>;

/// Owns the animation state of one character and applies it to a rig.
///
/// The input handler calls [`apply`](Self::apply) for each key-down, and
/// the render loop calls [`update`](Self::update) once per frame with the
/// frame's delta time. Both run on the same thread and take the rig by
/// reference.
#[derive(Debug, Clone)]
pub struct CharacterController {
    settings: CharacterSettings,
    parts: PartMap,
    state: AnimationState,
}

impl CharacterController {
    #[must_use]
    pub fn new(parts: PartMap, settings: CharacterSettings) -> Self {
        Self {
            settings,
            parts,
            state: AnimationState::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &CharacterSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn parts(&self) -> &PartMap {
        &self.parts
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self, kind: MotionKind) -> bool {
        self.state.get(kind).is_active()
    }

    /// Starts `kind` from time zero. Starting a motion that is already
    /// running does nothing and returns `false`.
    pub fn start(&mut self, kind: MotionKind) -> bool {
        let state = self.state.get_mut(kind);
        if state.is_active() {
            log::debug!("{kind:?} already running; start ignored");
            return false;
        }
        *state = MotionState::Active { time: 0.0 };
        log::info!("{kind:?} started");
        true
    }

    /// Applies one key-down worth of control to the rig.
    pub fn apply(&mut self, rig: &mut Rig, action: ControlAction) {
        match action {
            ControlAction::Move(direction) => {
                controls::move_body(rig, direction, self.settings.body_step);
            }
            ControlAction::Tilt(direction) => {
                controls::tilt_body(rig, direction, self.settings.body_tilt_step);
            }
            ControlAction::ArmStroke => {
                if ARM_STROKE.apply(rig, &self.parts) {
                    log::trace!("Arm stroke wrapped");
                }
            }
            ControlAction::LegStroke => {
                if LEG_STROKE.apply(rig, &self.parts) {
                    log::trace!("Leg stroke wrapped");
                }
            }
            ControlAction::LookLeft => {
                LOOK_LEFT.apply(rig, &self.parts);
            }
            ControlAction::LookRight => {
                LOOK_RIGHT.apply(rig, &self.parts);
            }
            ControlAction::StartJump => {
                self.start(MotionKind::Jump);
            }
            ControlAction::StartSwim => {
                self.start(MotionKind::Swim);
            }
        }
    }

    /// Advances every active motion by `dt` seconds and poses the rig.
    ///
    /// A motion ends once its elapsed time reaches its duration, or, for the
    /// jump, once the root has dropped below zero. The ending frame settles
    /// the joints at the end of the arc, puts the root back at height zero
    /// and reports [`MotionEvent::Finished`].
    pub fn update(&mut self, rig: &mut Rig, dt: f32) -> MotionEvents {
        let mut events = MotionEvents::new();

        for kind in MotionKind::ALL {
            let MotionState::Active { time } = self.state.get_mut(kind) else {
                continue;
            };
            *time += dt;
            let time = *time;
            let motion = match kind {
                MotionKind::Jump => self.settings.jump,
                MotionKind::Swim => self.settings.swim,
            };
            let speed = motion.speed();
            let elapsed = motion.to_units(time);
            let root = rig.root();

            let below_ground = kind.lifts_root()
                && rig
                    .node(root)
                    .is_some_and(|node| node.transform.position.y < 0.0);

            if elapsed >= motion.duration || below_ground {
                apply_drives(rig, &self.parts, kind.drives(), speed, 0.0);
                if let Some(node) = rig.node_mut(root) {
                    node.transform.position.y = 0.0;
                }
                *self.state.get_mut(kind) = MotionState::Idle;
                log::info!("{kind:?} finished after {elapsed:.2} units");
                events.push(MotionEvent::Finished(kind));
                continue;
            }

            let height = arc(speed, motion.duration, elapsed);
            apply_drives(rig, &self.parts, kind.drives(), speed, height);
            if let Some(node) = rig.node_mut(root) {
                if kind.lifts_root() {
                    node.transform.position.y = height;
                }
                node.transform.position.z += motion.creep(dt);
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croak_scene::{FrogPart, build_frog_rig};

    fn setup() -> (Rig, CharacterController) {
        let (rig, parts) = build_frog_rig().unwrap();
        (rig, CharacterController::new(parts, CharacterSettings::default()))
    }

    fn root_y(rig: &Rig) -> f32 {
        rig.node(rig.root()).unwrap().transform.position.y
    }

    #[test]
    fn jump_reaches_half_height_at_one_unit() {
        let (mut rig, mut ctrl) = setup();
        assert!(ctrl.start(MotionKind::Jump));

        // 500 ms per unit: one unit of elapsed time.
        let events = ctrl.update(&mut rig, 0.5);
        assert!(events.is_empty());
        assert!((root_y(&rig) - 2.5).abs() < 1e-5);

        let events = ctrl.update(&mut rig, 0.5);
        assert_eq!(events.as_slice(), &[MotionEvent::Finished(MotionKind::Jump)]);
        assert_eq!(root_y(&rig), 0.0);
        assert!(!ctrl.is_active(MotionKind::Jump));
    }

    #[test]
    fn restart_while_active_keeps_running_time() {
        let (mut rig, mut ctrl) = setup();
        ctrl.update(&mut rig, 0.25);
        ctrl.start(MotionKind::Swim);
        ctrl.update(&mut rig, 0.3);
        assert!(!ctrl.start(MotionKind::Swim));
        assert_eq!(ctrl.state().swim.time(), Some(0.3));
    }

    #[test]
    fn jump_finishes_after_long_idle_stretch() {
        let (mut rig, mut ctrl) = setup();
        // A week of idle frames folded into one step.
        ctrl.update(&mut rig, 604_800.0);
        ctrl.start(MotionKind::Jump);

        let mut finished_at = None;
        for frame in 1..=600 {
            if !ctrl.update(&mut rig, 1.0 / 60.0).is_empty() {
                finished_at.get_or_insert(frame);
            }
        }
        assert!(finished_at.is_some_and(|f| (60..=61).contains(&f)), "{finished_at:?}");
        assert_eq!(root_y(&rig), 0.0);
        assert!(!ctrl.is_active(MotionKind::Jump));
    }

    #[test]
    fn swim_creeps_forward_without_lifting() {
        let (mut rig, mut ctrl) = setup();
        ctrl.apply(&mut rig, ControlAction::StartSwim);
        ctrl.update(&mut rig, 0.01);

        let root = &rig.node(rig.root()).unwrap().transform;
        assert_eq!(root.position.y, 0.0);
        assert!((root.position.z - 0.1).abs() < 1e-5);
    }

    #[test]
    fn jump_ends_early_when_root_drops_below_ground() {
        let (mut rig, mut ctrl) = setup();
        ctrl.start(MotionKind::Jump);
        ctrl.update(&mut rig, 0.1);
        let root = rig.root();
        rig.node_mut(root).unwrap().transform.position.y = -0.5;

        let events = ctrl.update(&mut rig, 0.1);
        assert_eq!(events.len(), 1);
        assert_eq!(root_y(&rig), 0.0);
    }

    #[test]
    fn finished_jump_returns_limbs_to_rest() {
        let (mut rig, mut ctrl) = setup();
        ctrl.start(MotionKind::Jump);
        for _ in 0..9 {
            ctrl.update(&mut rig, 0.13);
        }
        assert!(!ctrl.is_active(MotionKind::Jump));
        let leg = rig.node(ctrl.parts().get(FrogPart::Leg1L)).unwrap();
        assert_eq!(leg.transform.rotation.x, 0.0);
        assert_eq!(leg.transform.rotation.y, 0.0);
    }
}

//! Parametric motions: the shared arc curve and the per-motion state machine.

use crate::pose::{JUMP_DRIVES, JointDrive, SWIM_DRIVES};

/// The two parametric motions of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Jump,
    Swim,
}

impl MotionKind {
    /// Evaluation order within a frame; later motions win on shared joints.
    pub const ALL: [MotionKind; 2] = [MotionKind::Jump, MotionKind::Swim];

    /// Joint drive table of this motion.
    #[must_use]
    pub fn drives(self) -> &'static [JointDrive] {
        match self {
            MotionKind::Jump => JUMP_DRIVES,
            MotionKind::Swim => SWIM_DRIVES,
        }
    }

    /// Whether the motion lifts the root along the arc.
    #[must_use]
    pub fn lifts_root(self) -> bool {
        matches!(self, MotionKind::Jump)
    }
}

/// The shared scalar trajectory `f(t) = v·t·(1 − t/D)`.
///
/// Zero at `t = 0` and `t = duration`, non-negative in between, peaking at
/// `duration / 2`. For `duration = 2` this is `v·t − 0.5·v·t²`.
#[inline]
#[must_use]
pub fn arc(speed: f32, duration: f32, t: f32) -> f32 {
    speed * t * (1.0 - t / duration)
}

/// Lifecycle of a single motion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotionState {
    #[default]
    Idle,
    /// Running for `time` seconds since activation.
    Active { time: f32 },
}

impl MotionState {
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, MotionState::Active { .. })
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> Option<f32> {
        match *self {
            MotionState::Active { time } => Some(time),
            MotionState::Idle => None,
        }
    }
}

/// Active flag and running time of every motion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    pub jump: MotionState,
    pub swim: MotionState,
}

impl AnimationState {
    #[must_use]
    pub fn get(&self, kind: MotionKind) -> MotionState {
        match kind {
            MotionKind::Jump => self.jump,
            MotionKind::Swim => self.swim,
        }
    }

    pub fn get_mut(&mut self, kind: MotionKind) -> &mut MotionState {
        match kind {
            MotionKind::Jump => &mut self.jump,
            MotionKind::Swim => &mut self.swim,
        }
    }

    #[must_use]
    pub fn any_active(&self) -> bool {
        self.jump.is_active() || self.swim.is_active()
    }
}

/// Emitted by the per-frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// The motion returned to idle; emitted once per activation.
    Finished(MotionKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_matches_quadratic_form_for_nominal_duration() {
        let v = 5.0;
        for i in 0..=20 {
            let t = i as f32 * 0.1;
            let expected = v * t - 0.5 * v * t * t;
            assert!((arc(v, 2.0, t) - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn arc_is_non_negative_with_peak_at_half_duration() {
        for &duration in &[1.0_f32, 2.0, 3.5] {
            let v = 10.0 / duration;
            let peak = arc(v, duration, duration / 2.0);
            assert_eq!(arc(v, duration, 0.0), 0.0);
            assert!(arc(v, duration, duration).abs() < 1e-6);
            for i in 0..=100 {
                let t = duration * i as f32 / 100.0;
                let value = arc(v, duration, t);
                assert!(value >= -1e-6, "negative at t={t}");
                assert!(value <= peak + 1e-6, "above peak at t={t}");
            }
        }
    }

    #[test]
    fn state_accessors() {
        let mut state = AnimationState::default();
        assert!(!state.any_active());
        *state.get_mut(MotionKind::Swim) = MotionState::Active { time: 1.5 };
        assert_eq!(state.get(MotionKind::Swim).time(), Some(1.5));
        assert!(state.any_active());
        assert!(!state.jump.is_active());
    }
}

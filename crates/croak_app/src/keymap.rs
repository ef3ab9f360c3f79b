use rustc_hash::FxHashMap;

use croak_animation::{BodyDirection, ControlAction};

use crate::input::{Key, KeyPress};

/// A key plus the shift state it is bound under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: Key,
    pub shift: bool,
}

impl KeyBinding {
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    #[must_use]
    pub const fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// Maps key presses to character actions. Unbound presses map to nothing.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: FxHashMap<KeyBinding, ControlAction>,
}

impl KeyMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The frog layout.
    ///
    /// | keys | action |
    /// |------|--------|
    /// | arrows | move the body |
    /// | shift + arrows | tilt / roll the body |
    /// | `w` / `s` | arm / leg stroke |
    /// | `a` / `d` | look left / right |
    /// | `j` / `q` | jump / swim |
    #[must_use]
    pub fn frog() -> Self {
        use BodyDirection::{Back, Forward, Left, Right};

        let mut map = Self::new();
        let arrows = [
            (Key::ArrowUp, Forward),
            (Key::ArrowDown, Back),
            (Key::ArrowLeft, Left),
            (Key::ArrowRight, Right),
        ];
        for (key, direction) in arrows {
            map.bind(KeyBinding::plain(key), ControlAction::Move(direction));
            map.bind(KeyBinding::shifted(key), ControlAction::Tilt(direction));
        }

        map.bind(KeyBinding::plain(Key::W), ControlAction::ArmStroke);
        map.bind(KeyBinding::plain(Key::S), ControlAction::LegStroke);
        map.bind(KeyBinding::plain(Key::A), ControlAction::LookLeft);
        map.bind(KeyBinding::plain(Key::D), ControlAction::LookRight);
        map.bind(KeyBinding::plain(Key::J), ControlAction::StartJump);
        map.bind(KeyBinding::plain(Key::Q), ControlAction::StartSwim);
        map
    }

    /// Binds `binding` to `action`, replacing any previous action.
    pub fn bind(&mut self, binding: KeyBinding, action: ControlAction) -> Option<ControlAction> {
        self.bindings.insert(binding, action)
    }

    pub fn unbind(&mut self, binding: KeyBinding) -> Option<ControlAction> {
        self.bindings.remove(&binding)
    }

    #[must_use]
    pub fn action_for(&self, press: KeyPress) -> Option<ControlAction> {
        let action = self
            .bindings
            .get(&KeyBinding {
                key: press.key,
                shift: press.shift,
            })
            .copied();
        if action.is_none() {
            log::trace!("Ignoring unbound key {press:?}");
        }
        action
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_changes_arrow_meaning() {
        let map = KeyMap::frog();
        assert_eq!(
            map.action_for(KeyPress::new(Key::ArrowDown)),
            Some(ControlAction::Move(BodyDirection::Back))
        );
        assert_eq!(
            map.action_for(KeyPress::new(Key::ArrowDown).with_shift()),
            Some(ControlAction::Tilt(BodyDirection::Back))
        );
    }

    #[test]
    fn letters_and_unbound_keys() {
        let map = KeyMap::frog();
        assert_eq!(map.len(), 14);
        assert_eq!(map.action_for(KeyPress::new(Key::J)), Some(ControlAction::StartJump));
        assert_eq!(map.action_for(KeyPress::new(Key::Q)), Some(ControlAction::StartSwim));
        assert_eq!(map.action_for(KeyPress::new(Key::Z)), None);
        assert_eq!(map.action_for(KeyPress::new(Key::W).with_shift()), None);
    }

    #[test]
    fn rebinding_replaces_action() {
        let mut map = KeyMap::frog();
        let old = map.bind(KeyBinding::plain(Key::Space), ControlAction::StartJump);
        assert_eq!(old, None);
        assert_eq!(map.unbind(KeyBinding::plain(Key::J)), Some(ControlAction::StartJump));
        assert_eq!(map.action_for(KeyPress::new(Key::Space)), Some(ControlAction::StartJump));
        assert_eq!(map.action_for(KeyPress::new(Key::J)), None);
    }
}

//=========================================================================
// Key Bindings
//=========================================================================
//
// Maps physical keys to navigation controls.
//
// Architecture:
//   KeyCode → HashMap → Control
//   StateTracker + KeyBindings → "is any key bound to this control held?"
//
// Several keys may drive the same control (W and ArrowUp both walk
// forward). A key drives at most one control; rebinding replaces.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use super::state_tracker::StateTracker;

//=== Control =============================================================

/// Logical navigation control, independent of the physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Backward,
    Left,
    Right,
    Sprint,
    Jump,
    /// Re-open the info popup of the zone the player stands in.
    Interact,
    /// Cancel a running cinematic.
    Skip,
}

//=== KeyBindings =========================================================

/// Key → control lookup table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Control>,
}

impl KeyBindings {
    /// Creates an empty binding table.
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to a control, replacing any previous binding of that key.
    pub fn bind_key(&mut self, key: KeyCode, control: Control) {
        self.bindings.insert(key, control);
    }

    /// Removes the binding of a key (no-op if unbound).
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Removes every key bound to `control`.
    pub fn clear_control(&mut self, control: Control) {
        self.bindings.retain(|_, bound| *bound != control);
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the control driven by `key`, if any.
    pub fn control_for(&self, key: KeyCode) -> Option<Control> {
        self.bindings.get(&key).copied()
    }

    /// Returns `true` while any key bound to `control` is held.
    pub fn is_held(&self, control: Control, keys: &StateTracker) -> bool {
        keys.keys_down().any(|key| self.control_for(*key) == Some(control))
    }

    /// Returns `true` if a key bound to `control` went down this frame.
    pub fn was_pressed(&self, control: Control, keys: &StateTracker) -> bool {
        keys.keys_pressed().any(|key| self.control_for(*key) == Some(control))
    }
}

impl Default for KeyBindings {
    /// Arrow keys mirror WASD, both shifts sprint, Escape and Enter skip.
    fn default() -> Self {
        let mut bindings = Self::empty();

        bindings.bind_key(KeyCode::KeyW, Control::Forward);
        bindings.bind_key(KeyCode::ArrowUp, Control::Forward);
        bindings.bind_key(KeyCode::KeyS, Control::Backward);
        bindings.bind_key(KeyCode::ArrowDown, Control::Backward);
        bindings.bind_key(KeyCode::KeyA, Control::Left);
        bindings.bind_key(KeyCode::ArrowLeft, Control::Left);
        bindings.bind_key(KeyCode::KeyD, Control::Right);
        bindings.bind_key(KeyCode::ArrowRight, Control::Right);
        bindings.bind_key(KeyCode::ShiftLeft, Control::Sprint);
        bindings.bind_key(KeyCode::ShiftRight, Control::Sprint);
        bindings.bind_key(KeyCode::Space, Control::Jump);
        bindings.bind_key(KeyCode::KeyE, Control::Interact);
        bindings.bind_key(KeyCode::Escape, Control::Skip);
        bindings.bind_key(KeyCode::Enter, Control::Skip);

        bindings
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::InputEvent;

    //--- Test Helpers -----------------------------------------------------

    fn tracker_with(events: &[InputEvent]) -> StateTracker {
        let mut tracker = StateTracker::new();
        tracker.process_events(events);
        tracker
    }

    //=====================================================================
    // Defaults
    //=====================================================================

    #[test]
    fn default_bindings_cover_both_key_sets() {
        let bindings = KeyBindings::default();

        assert_eq!(bindings.control_for(KeyCode::KeyW), Some(Control::Forward));
        assert_eq!(bindings.control_for(KeyCode::ArrowUp), Some(Control::Forward));
        assert_eq!(bindings.control_for(KeyCode::ArrowRight), Some(Control::Right));
        assert_eq!(bindings.control_for(KeyCode::ShiftRight), Some(Control::Sprint));
        assert_eq!(bindings.control_for(KeyCode::Enter), Some(Control::Skip));
        assert_eq!(bindings.control_for(KeyCode::KeyQ), None);
    }

    //=====================================================================
    // Binding API
    //=====================================================================

    #[test]
    fn rebinding_replaces_previous() {
        let mut bindings = KeyBindings::default();
        bindings.bind_key(KeyCode::KeyE, Control::Jump);
        assert_eq!(bindings.control_for(KeyCode::KeyE), Some(Control::Jump)); // Last wins
    }

    #[test]
    fn clear_control_removes_all_keys_for_it() {
        let mut bindings = KeyBindings::default();
        bindings.clear_control(Control::Forward);

        assert_eq!(bindings.control_for(KeyCode::KeyW), None);
        assert_eq!(bindings.control_for(KeyCode::ArrowUp), None);
        assert_eq!(bindings.control_for(KeyCode::KeyS), Some(Control::Backward));
    }

    #[test]
    fn unbind_nonexistent_is_noop() {
        let mut bindings = KeyBindings::empty();
        bindings.unbind_key(KeyCode::Space);
        assert_eq!(bindings.control_for(KeyCode::Space), None);
    }

    //=====================================================================
    // State Queries
    //=====================================================================

    #[test]
    fn held_through_any_bound_key() {
        let bindings = KeyBindings::default();
        let keys = tracker_with(&[InputEvent::KeyDown(KeyCode::ArrowUp)]);

        assert!(bindings.is_held(Control::Forward, &keys));
        assert!(!bindings.is_held(Control::Backward, &keys));
    }

    #[test]
    fn pressed_is_edge_only() {
        let bindings = KeyBindings::default();
        let mut keys = tracker_with(&[InputEvent::KeyDown(KeyCode::Escape)]);
        assert!(bindings.was_pressed(Control::Skip, &keys));

        keys.clear();
        assert!(!bindings.was_pressed(Control::Skip, &keys));
        assert!(bindings.is_held(Control::Skip, &keys));
    }
}

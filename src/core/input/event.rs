//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (e.g. Winit)
// into a unified, controller-friendly format used by the input subsystem.
//
// Responsibilities:
// - Represent keyboard input by physical key code
// - Represent window focus loss (which releases every held key)
// - Provide equality and hashing semantics for deduplication
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held keys + per-frame edges)
//         ↓
//    KeyBindings → InputIntent
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyW` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Common special keys (Space, Enter, Escape, Shift, etc.)
///
/// Additional keys can be added as needed without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Left Shift (sprint by default)
    ShiftLeft,

    /// Right Shift (sprint by default)
    ShiftRight,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Keyboard events are edge events: `KeyDown` sets a key held, `KeyUp`
/// releases it. `FocusLost` is sent when the window loses focus, since
/// the matching key-up events will never arrive.
///
/// ```text
/// Equality Rules:
/// KeyDown(W) == KeyDown(W)     ✓
/// KeyDown(W) == KeyUp(W)       ✗ (different type)
/// FocusLost  == FocusLost      ✓
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down (repeats are tolerated and deduplicated).
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Window lost focus; every held key is released.
    FocusLost,

    /// Unrecognized or unsupported event, ignored by the input system.
    Unidentified,
}

impl InputEvent {
    /// Returns the key carried by a keyboard event, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => Some(*key),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    //=====================================================================
    // Equality Tests
    //=====================================================================

    #[test]
    fn equality_same_type_same_key() {
        assert_eq!(InputEvent::KeyDown(KeyCode::KeyW), InputEvent::KeyDown(KeyCode::KeyW));
    }

    #[test]
    fn equality_different_type() {
        assert_ne!(
            InputEvent::KeyDown(KeyCode::KeyW),
            InputEvent::KeyUp(KeyCode::KeyW),
            "KeyDown(W) and KeyUp(W) must not be equal"
        );
    }

    #[test]
    fn equality_different_key() {
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyW), InputEvent::KeyDown(KeyCode::KeyS));
    }

    //=====================================================================
    // Payload Access
    //=====================================================================

    #[test]
    fn key_accessor_returns_payload() {
        assert_eq!(InputEvent::KeyUp(KeyCode::Space).key(), Some(KeyCode::Space));
        assert_eq!(InputEvent::FocusLost.key(), None);
        assert_eq!(InputEvent::Unidentified.key(), None);
    }

    //=====================================================================
    // HashSet Behavior
    //=====================================================================

    #[test]
    fn hashset_deduplicates_repeats() {
        let mut set = HashSet::new();
        set.insert(InputEvent::KeyDown(KeyCode::KeyA));
        set.insert(InputEvent::KeyDown(KeyCode::KeyA));
        set.insert(InputEvent::KeyUp(KeyCode::KeyA));
        assert_eq!(set.len(), 2, "KeyDown and KeyUp coexist, repeats collapse");
    }
}

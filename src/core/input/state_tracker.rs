//=========================================================================
// State Tracker
//=========================================================================
//
// Keyboard state: which keys are held, and which changed this frame.
//
// Architecture:
//   InputEvent → process_events() → held / pressed / released sets
//
// Frame lifecycle: clear() → process_events() → query
//
// Focus loss releases every held key: the platform will never deliver
// the matching key-up events once the window is in the background.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// Held keys plus the press/release edges of the current frame.
#[derive(Debug, Default)]
pub struct StateTracker {
    /// Survives frame boundaries.
    held: HashSet<KeyCode>,

    /// Edges, reset by `clear()`.
    pressed: HashSet<KeyCode>,
    released: HashSet<KeyCode>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Forgets last frame's edges. Held keys stay held.
    pub(crate) fn clear(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.apply(*event);
        }
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            // OS repeats arrive as extra KeyDowns; only the first is an edge
            InputEvent::KeyDown(key) if self.held.insert(key) => {
                self.pressed.insert(key);
            }
            InputEvent::KeyUp(key) if self.held.remove(&key) => {
                self.released.insert(key);
            }
            InputEvent::FocusLost => {
                trace!(target: "nav::input", "Focus lost, releasing {} held keys", self.held.len());
                self.released.extend(self.held.drain());
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) | InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// `true` for as long as the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// `true` only on the frame the key came up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.released.contains(&key)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.held.iter()
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.pressed.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

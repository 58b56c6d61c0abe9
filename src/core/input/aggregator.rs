//=========================================================================
// Input Aggregator
//=========================================================================
//
// Fuses keyboard state and touch-button state into one InputIntent.
//
// Architecture:
//   InputEvent batches → StateTracker ─┐
//                                       ├─ KeyBindings → keyboard intent ─┐
//   TouchPatch (out-of-band) → TouchState ────────────────────────────────┴─ OR → sample()
//
// Frame lifecycle: begin_frame() → process_events() → sample()/control_pressed()
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::bindings::{Control, KeyBindings};
use super::event::InputEvent;
use super::intent::{InputIntent, TouchPatch, TouchState};
use super::state_tracker::StateTracker;

//=== InputAggregator =====================================================

/// Owns every input source and produces the per-frame [`InputIntent`].
///
/// Absent sources contribute all-false axes; sampling never fails.
#[derive(Debug, Default)]
pub struct InputAggregator {
    keys: StateTracker,
    bindings: KeyBindings,
    touch: TouchState,
}

impl InputAggregator {
    /// Creates an aggregator with the default key bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregator with custom key bindings.
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears last frame's key edges.
    pub(crate) fn begin_frame(&mut self) {
        self.keys.clear();
    }

    /// Applies a batch of keyboard/focus events.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        self.keys.process_events(events);
    }

    /// Writes touch-button state (last write wins per axis).
    pub fn set_touch(&mut self, patch: TouchPatch) {
        trace!(target: "nav::input", "Touch patch: {:?}", patch);
        self.touch.apply(patch);
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the fused intent for the current frame.
    pub fn sample(&self) -> InputIntent {
        self.keyboard_intent().merge(self.touch.as_intent())
    }

    /// Returns `true` if a key bound to `control` went down this frame.
    pub fn control_pressed(&self, control: Control) -> bool {
        self.bindings.was_pressed(control, &self.keys)
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn touch(&self) -> TouchState {
        self.touch
    }

    //--- Internal Helpers -------------------------------------------------

    fn keyboard_intent(&self) -> InputIntent {
        let held = |control| self.bindings.is_held(control, &self.keys);

        InputIntent {
            forward: held(Control::Forward),
            backward: held(Control::Backward),
            left: held(Control::Left),
            right: held(Control::Right),
            sprint: held(Control::Sprint),
            jump: held(Control::Jump),
            interact: held(Control::Interact),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Input Intent
//=========================================================================
//
// Canonical per-frame movement intent and the touch-button state that
// feeds into it.
//
//   keyboard axes ──┐
//                   ├── OR per axis ──> InputIntent
//   touch axes ─────┘
//
//=========================================================================

//=== InputIntent =========================================================

/// What the player wants to do this frame, source-agnostic.
///
/// Recomputed every frame; never stored across frames by consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub jump: bool,
    pub interact: bool,
}

impl InputIntent {
    /// Combines two sources with a logical OR on every axis.
    pub fn merge(self, other: InputIntent) -> InputIntent {
        InputIntent {
            forward: self.forward || other.forward,
            backward: self.backward || other.backward,
            left: self.left || other.left,
            right: self.right || other.right,
            sprint: self.sprint || other.sprint,
            jump: self.jump || other.jump,
            interact: self.interact || other.interact,
        }
    }
}

//=== TouchState ==========================================================

/// Latest state of the on-screen buttons.
///
/// Written out-of-band by the overlay, sampled (not queued) by the
/// aggregator. Values never expire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub jump: bool,
    pub interact: bool,
}

impl TouchState {
    /// Applies a partial update; only `Some` fields are written.
    pub fn apply(&mut self, patch: TouchPatch) {
        fn write(slot: &mut bool, value: Option<bool>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        write(&mut self.forward, patch.forward);
        write(&mut self.backward, patch.backward);
        write(&mut self.left, patch.left);
        write(&mut self.right, patch.right);
        write(&mut self.sprint, patch.sprint);
        write(&mut self.jump, patch.jump);
        write(&mut self.interact, patch.interact);
    }

    pub(crate) fn as_intent(&self) -> InputIntent {
        InputIntent {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            sprint: self.sprint,
            jump: self.jump,
            interact: self.interact,
        }
    }
}

//=== TouchPatch ==========================================================

/// Partial touch update, last write wins per axis.
///
/// # Examples
///
/// ```
/// use campus_tour::core::input::{TouchPatch, TouchState};
///
/// let mut touch = TouchState::default();
/// touch.apply(TouchPatch { forward: Some(true), ..TouchPatch::default() });
/// touch.apply(TouchPatch { sprint: Some(true), ..TouchPatch::default() });
///
/// assert!(touch.forward && touch.sprint);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchPatch {
    pub forward: Option<bool>,
    pub backward: Option<bool>,
    pub left: Option<bool>,
    pub right: Option<bool>,
    pub sprint: Option<bool>,
    pub jump: Option<bool>,
    pub interact: Option<bool>,
}

impl TouchPatch {
    /// Folds a later patch into this one; the later value wins per axis.
    ///
    /// Applying the result equals applying `self` then `later`.
    pub fn then(self, later: TouchPatch) -> TouchPatch {
        TouchPatch {
            forward: later.forward.or(self.forward),
            backward: later.backward.or(self.backward),
            left: later.left.or(self.left),
            right: later.right.or(self.right),
            sprint: later.sprint.or(self.sprint),
            jump: later.jump.or(self.jump),
            interact: later.interact.or(self.interact),
        }
    }

    /// Patch that releases every button.
    pub fn release_all() -> Self {
        Self {
            forward: Some(false),
            backward: Some(false),
            left: Some(false),
            right: Some(false),
            sprint: Some(false),
            jump: Some(false),
            interact: Some(false),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

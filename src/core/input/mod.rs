//=========================================================================
// Input System
//
// Turns raw keyboard/focus events and on-screen button state into one
// canonical movement intent per frame.
//
// Responsibilities:
// - Track held keys and per-frame key edges
// - Map keys to navigation controls
// - Fuse keyboard and touch sources (logical OR per axis)
//
// Notes:
// The InputAggregator is owned and updated by the NavigationController.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod aggregator;
mod bindings;
mod intent;
mod state_tracker;

//=== Public API ==========================================================

pub use aggregator::InputAggregator;
pub use bindings::{Control, KeyBindings};
pub use event::{InputEvent, KeyCode};
pub use intent::{InputIntent, TouchPatch, TouchState};
pub use state_tracker::StateTracker;

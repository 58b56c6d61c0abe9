//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the window layer (winit) and out-of-band input sources with
// the navigation controller.
//
// Components:
// - `interface`: event types, the UI sender and error definitions
// - `event_collector`: controller-side per-frame draining of both channels
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::{InputSender, PlatformError};

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;

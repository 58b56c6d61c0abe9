//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events, errors and the UI sender).
//
// Defines the contract for communication between the window event loop,
// UI overlays and the navigation controller.
//
// Two channels carry PlatformEvent:
//   window  → Inputs / WindowClosed   (one producer, one batch per frame)
//   UI      → Touch / Tour / Mode     (any number of InputSender clones)
// Key events never wait behind overlay traffic.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Sender, TrySendError};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::events::TourCommand;
use crate::core::input::{InputEvent, TouchPatch};
use crate::core::motion::NavigationMode;

//=== PlatformEvent =======================================================

/// Events sent to the controller side over the bridge channel.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Keyboard/focus events for one frame, in arrival order.
    Inputs(Vec<InputEvent>),

    /// On-screen button update from an overlay.
    Touch(TouchPatch),

    /// Tour button click (next, previous, go to stop).
    Tour(TourCommand),

    /// Free roam / guided tour switch.
    Mode(NavigationMode),

    /// Window close requested.
    WindowClosed,
}

//=== InputSender =========================================================

/// Cloneable handle for UI controls on any thread.
///
/// Everything sent is applied by the controller at the start of its next
/// frame. Sends never block; each returns `false` if the update was
/// dropped (channel full or the engine has shut down).
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<PlatformEvent>,
}

impl InputSender {
    pub(crate) fn new(sender: Sender<PlatformEvent>) -> Self {
        Self { sender }
    }

    /// Sends an on-screen button update.
    pub fn set_touch(&self, patch: TouchPatch) -> bool {
        self.send(PlatformEvent::Touch(patch))
    }

    /// Queues a tour command (honored in guided mode only).
    pub fn request_tour(&self, command: TourCommand) -> bool {
        self.send(PlatformEvent::Tour(command))
    }

    /// Switches between free roam and guided tour.
    pub fn set_mode(&self, mode: NavigationMode) -> bool {
        self.send(PlatformEvent::Mode(mode))
    }

    fn send(&self, event: PlatformEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(target: "platform::input", "UI channel full, {:?} dropped", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop there is no frame clock.
#[derive(Debug)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

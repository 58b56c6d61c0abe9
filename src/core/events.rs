//=========================================================================
// Navigation Events & Commands
//=========================================================================
//
// Messages crossing the controller boundary through the MessageBus.
//
//   controller ──NavigationEvent──> UI (popups, overlays, audio cues)
//   UI buttons ──TourCommand──────> controller (applied next frame)
//
// Every NavigationEvent is a one-shot notification for one logical
// transition; consumers read them after the frame and never see them
// again.
//
//=========================================================================

use crate::core::motion::NavigationMode;
use crate::core::proximity::ZonePayload;
use crate::core::tour::Waypoint;

//=== NavigationEvent =====================================================

/// Notification produced by the controller during a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    /// The player became closest to a zone it stands in.
    ZoneEntered { id: String, payload: ZonePayload },

    /// The previously active zone is no longer selected.
    ZoneExited { id: String },

    /// Interact was pressed inside the active zone.
    ZoneInteracted { id: String, payload: ZonePayload },

    /// The tour accepted a transition and now targets `index`.
    WaypointChanged { index: usize },

    /// The player arrived at a waypoint for the first time since targeting it.
    WaypointReached { index: usize, waypoint: Waypoint },

    /// The last waypoint was reached.
    TourCompleted,

    /// The cinematic finished or was skipped; the camera now follows.
    CinematicEnded,

    /// Free roam and guided tour were switched.
    ModeChanged { mode: NavigationMode },
}

//=== TourCommand =========================================================

/// Tour navigation requested by UI buttons.
///
/// Queued through `NavigationController::request_tour` and applied during
/// the next frame; only honored in guided mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourCommand {
    Next,
    Previous,
    GoTo(usize),
}

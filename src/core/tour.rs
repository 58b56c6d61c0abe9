//=========================================================================
// Tour Sequencer
//=========================================================================
//
// Finite-state sequencer over an ordered list of waypoints.
//
// States:
// ```text
//                go_to_next / go_to_previous / go_to_index
//   Idle(i) ─────────────────────────────────────────────> InTransit(j)
//      ^                                                        │
//      └───────────────────── arrive() ─────────────────────────┘
//                                │ (j == last)
//                                v
//                            Completed
// ```
//
// Guards are preconditions, not errors: a transition requested while in
// transit, past either end, or to the current index is ignored.
//
// Arrival notifications fire once per waypoint until the sequencer moves
// to a different index; TourCompleted fires once per tour.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec3;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::events::NavigationEvent;
use crate::core::message_bus::MessageBus;

//=== Waypoint ============================================================

/// An ordered stop in a scripted tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub position: Vec3,
    pub name: String,
    pub description: String,

    /// Camera offset used instead of the default while this stop is targeted.
    pub camera_offset: Option<Vec3>,
}

impl Waypoint {
    pub fn new(position: Vec3, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            description: description.into(),
            camera_offset: None,
        }
    }

    pub fn with_camera_offset(mut self, offset: Vec3) -> Self {
        self.camera_offset = Some(offset);
        self
    }
}

//=== TourPhase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPhase {
    /// Standing at (or heading to, before the first arrival) a waypoint.
    Idle(usize),
    /// Travelling towards a waypoint.
    InTransit(usize),
    /// Resting at the last waypoint after the tour completed.
    Completed,
    /// No waypoints loaded.
    Empty,
}

//=== TourSequencer =======================================================

#[derive(Debug, Clone, Default)]
pub struct TourSequencer {
    waypoints: Vec<Waypoint>,
    current_index: usize,
    in_transit: bool,
    last_notified: Option<usize>,
    completed: bool,
}

impl TourSequencer {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self {
            waypoints,
            ..Self::default()
        }
    }

    /// Loads a new tour and resets to `Idle(0)`.
    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        info!(target: "nav::tour", "Tour loaded with {} waypoints", waypoints.len());
        *self = Self::new(waypoints);
    }

    //--- Queries ----------------------------------------------------------

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.get(self.current_index)
    }

    pub fn is_in_transit(&self) -> bool {
        self.in_transit
    }

    /// `true` once the last waypoint has been reached; stays set until
    /// a new tour is loaded.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.waypoints.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn phase(&self) -> TourPhase {
        if self.waypoints.is_empty() {
            TourPhase::Empty
        } else if self.in_transit {
            TourPhase::InTransit(self.current_index)
        } else if self.completed && !self.can_go_next() {
            TourPhase::Completed
        } else {
            TourPhase::Idle(self.current_index)
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Heads for the next waypoint. Returns `true` if accepted.
    pub fn go_to_next(&mut self, events: &mut MessageBus) -> bool {
        if !self.can_go_next() {
            debug!(target: "nav::tour", "Next ignored at last waypoint {}", self.current_index);
            return false;
        }
        self.begin_transit(self.current_index + 1, events)
    }

    /// Heads for the previous waypoint. Returns `true` if accepted.
    pub fn go_to_previous(&mut self, events: &mut MessageBus) -> bool {
        if !self.can_go_previous() {
            debug!(target: "nav::tour", "Previous ignored at first waypoint");
            return false;
        }
        self.begin_transit(self.current_index - 1, events)
    }

    /// Heads for waypoint `index`. Returns `true` if accepted.
    pub fn go_to_index(&mut self, index: usize, events: &mut MessageBus) -> bool {
        if index >= self.waypoints.len() || index == self.current_index {
            debug!(
                target: "nav::tour",
                "Go-to {} ignored (current {}, {} waypoints)",
                index,
                self.current_index,
                self.waypoints.len()
            );
            return false;
        }
        self.begin_transit(index, events)
    }

    /// Reports that the player reached the current waypoint.
    pub fn arrive(&mut self, events: &mut MessageBus) {
        let index = self.current_index;
        let Some(waypoint) = self.waypoints.get(index) else {
            return;
        };

        self.in_transit = false;

        if self.last_notified != Some(index) {
            info!(target: "nav::tour", "Reached waypoint {} '{}'", index, waypoint.name);
            events.push(NavigationEvent::WaypointReached {
                index,
                waypoint: waypoint.clone(),
            });
            self.last_notified = Some(index);
        }

        if !self.can_go_next() && !self.completed {
            info!(target: "nav::tour", "Tour completed");
            self.completed = true;
            events.push(NavigationEvent::TourCompleted);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn begin_transit(&mut self, index: usize, events: &mut MessageBus) -> bool {
        if self.in_transit {
            debug!(target: "nav::tour", "Transition to {} ignored, already in transit", index);
            return false;
        }

        info!(target: "nav::tour", "Heading to waypoint {}", index);
        self.current_index = index;
        self.in_transit = true;
        events.push(NavigationEvent::WaypointChanged { index });
        true
    }
}

//=== ManualNavigationGate ================================================

/// Cooldown for manual next/previous input, on the controller's frame clock.
///
/// A single human press spans many frames; only the first input within
/// the window is accepted.
#[derive(Debug, Clone)]
pub struct ManualNavigationGate {
    cooldown: Duration,
    clock: Duration,
    last_accepted: Option<Duration>,
}

impl ManualNavigationGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            clock: Duration::ZERO,
            last_accepted: None,
        }
    }

    /// Advances the frame clock. Negative or non-finite steps count as zero.
    pub fn advance(&mut self, dt: f32) {
        self.clock += Duration::try_from_secs_f32(dt.max(0.0)).unwrap_or_default();
    }

    /// Returns `true` and restarts the cooldown if outside the window.
    pub fn try_accept(&mut self) -> bool {
        let open = self
            .last_accepted
            .map_or(true, |last| self.clock.saturating_sub(last) >= self.cooldown);

        if open {
            self.last_accepted = Some(self.clock);
        } else {
            debug!(target: "nav::tour", "Manual navigation debounced");
        }
        open
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

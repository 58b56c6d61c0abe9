//=========================================================================
// Proximity Tracker
//=========================================================================
//
// Invisible zone layer: decides which point of interest (if any) the
// player is standing at.
//
// Algorithm (every frame with a known position):
//   1. planar distance from player (x, z) to every zone center
//   2. candidates: distance < radius
//   3. selected: strictly smallest distance, first-defined wins ties
//   4. selected != previous → ZoneExited(previous), ZoneEntered(selected)
//
// Only the single nearest zone is ever active, so overlapping zones do
// not produce event storms.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::events::NavigationEvent;
use crate::core::message_bus::MessageBus;

//=== Zone Types ==========================================================

/// Informational content shown when the player enters a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePayload {
    pub title: String,
    pub message: String,
}

impl ZonePayload {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A circular region of interest on the horizontal plane.
///
/// `center` is the resolved world (x, z) of the zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDefinition {
    pub id: String,
    pub center: Vec2,
    pub radius: f32,
    pub payload: ZonePayload,
}

impl ZoneDefinition {
    pub fn new(id: impl Into<String>, center: Vec2, radius: f32, payload: ZonePayload) -> Self {
        Self {
            id: id.into(),
            center,
            radius,
            payload,
        }
    }
}

//=== ProximityTracker ====================================================

#[derive(Debug, Clone, Default)]
pub struct ProximityTracker {
    zones: Vec<ZoneDefinition>,
    active: Option<usize>,
    interact_held: bool,
}

impl ProximityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every zone definition.
    ///
    /// An active zone is exited first so enter/exit notifications stay paired.
    pub fn set_zones(&mut self, zones: Vec<ZoneDefinition>, events: &mut MessageBus) {
        if let Some(previous) = self.active.take() {
            self.emit_exit(previous, events);
        }
        debug!(target: "nav::proximity", "Loaded {} zones", zones.len());
        self.zones = zones;
    }

    pub fn zones(&self) -> &[ZoneDefinition] {
        &self.zones
    }

    /// The zone the player currently stands in, if any.
    pub fn active_zone(&self) -> Option<&ZoneDefinition> {
        self.active.and_then(|index| self.zones.get(index))
    }

    //--- Per-frame Update -------------------------------------------------

    /// Recomputes the nearest zone and emits transitions.
    pub fn update(&mut self, position: Vec3, events: &mut MessageBus) {
        let selected = self.nearest(Vec2::new(position.x, position.z));

        if selected == self.active {
            return;
        }

        if let Some(previous) = self.active {
            self.emit_exit(previous, events);
        }
        if let Some(next) = selected {
            let zone = &self.zones[next];
            info!(target: "nav::proximity", "Entered zone '{}'", zone.id);
            events.push(NavigationEvent::ZoneEntered {
                id: zone.id.clone(),
                payload: zone.payload.clone(),
            });
        }

        self.active = selected;
    }

    /// Feeds the interact control level; a rising edge inside a zone
    /// re-surfaces its payload.
    pub fn interact(&mut self, held: bool, events: &mut MessageBus) {
        let rising = held && !self.interact_held;
        self.interact_held = held;

        if !rising {
            return;
        }

        match self.active_zone() {
            Some(zone) => {
                info!(target: "nav::proximity", "Interacted with zone '{}'", zone.id);
                events.push(NavigationEvent::ZoneInteracted {
                    id: zone.id.clone(),
                    payload: zone.payload.clone(),
                });
            }
            None => debug!(target: "nav::proximity", "Interact outside any zone ignored"),
        }
    }

    /// Index of the nearest zone containing `point`.
    pub fn nearest(&self, point: Vec2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;

        for (index, zone) in self.zones.iter().enumerate() {
            let distance = point.distance(zone.center);
            if distance >= zone.radius {
                continue;
            }
            // Strict comparison keeps the first-defined zone on ties
            if best.map_or(true, |(_, nearest)| distance < nearest) {
                best = Some((index, distance));
            }
        }

        trace!(target: "nav::proximity", "Nearest zone to {:?}: {:?}", point, best);
        best.map(|(index, _)| index)
    }

    //--- Internal Helpers -------------------------------------------------

    fn emit_exit(&self, index: usize, events: &mut MessageBus) {
        if let Some(zone) = self.zones.get(index) {
            info!(target: "nav::proximity", "Left zone '{}'", zone.id);
            events.push(NavigationEvent::ZoneExited { id: zone.id.clone() });
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn zone(id: &str, x: f32, z: f32, radius: f32) -> ZoneDefinition {
        let payload = ZonePayload::new(id.to_uppercase(), "info");
        ZoneDefinition::new(id, Vec2::new(x, z), radius, payload)
    }

    fn tracker(zones: Vec<ZoneDefinition>) -> (ProximityTracker, MessageBus) {
        let mut events = MessageBus::new();
        let mut tracker = ProximityTracker::new();
        tracker.set_zones(zones, &mut events);
        (tracker, events)
    }

    fn at(x: f32, z: f32) -> Vec3 {
        Vec3::new(x, 0.0, z)
    }

    fn event_log(events: &MessageBus) -> Vec<String> {
        events
            .read::<NavigationEvent>()
            .iter()
            .map(|event| match event {
                NavigationEvent::ZoneEntered { id, .. } => format!("enter:{}", id),
                NavigationEvent::ZoneExited { id } => format!("exit:{}", id),
                NavigationEvent::ZoneInteracted { id, .. } => format!("interact:{}", id),
                other => format!("{:?}", other),
            })
            .collect()
    }

    //=====================================================================
    // Selection
    //=====================================================================

    #[test]
    fn overlapping_zones_select_nearest() {
        let (mut tracker, mut events) =
            tracker(vec![zone("a", 0.0, 0.0, 5.0), zone("b", 3.0, 0.0, 5.0)]);

        tracker.update(at(1.0, 0.0), &mut events);
        assert_eq!(tracker.active_zone().map(|z| z.id.as_str()), Some("a"));
        assert_eq!(event_log(&events), ["enter:a"]);

        events.clear_all();
        tracker.update(at(4.0, 0.0), &mut events);
        assert_eq!(tracker.active_zone().map(|z| z.id.as_str()), Some("b"));
        assert_eq!(event_log(&events), ["exit:a", "enter:b"], "Exit precedes enter in one frame");
    }

    #[test]
    fn equal_distance_prefers_first_defined() {
        let (tracker, _) = tracker(vec![zone("west", -1.0, 0.0, 5.0), zone("east", 1.0, 0.0, 5.0)]);
        assert_eq!(tracker.nearest(Vec2::ZERO), Some(0));
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        let (tracker, _) = tracker(vec![zone("a", 0.0, 0.0, 5.0)]);
        assert_eq!(tracker.nearest(Vec2::new(5.0, 0.0)), None);
        assert_eq!(tracker.nearest(Vec2::new(4.99, 0.0)), Some(0));
    }

    #[test]
    fn height_is_ignored() {
        let (mut tracker, mut events) = tracker(vec![zone("tower", 0.0, 0.0, 2.0)]);
        tracker.update(Vec3::new(0.5, 40.0, 0.5), &mut events);
        assert!(tracker.active_zone().is_some());
    }

    //=====================================================================
    // Transitions
    //=====================================================================

    #[test]
    fn steady_state_emits_nothing() {
        let (mut tracker, mut events) = tracker(vec![zone("a", 0.0, 0.0, 5.0)]);

        tracker.update(at(20.0, 20.0), &mut events);
        tracker.update(at(20.0, 21.0), &mut events);
        assert!(event_log(&events).is_empty(), "none → none is silent");

        tracker.update(at(0.0, 0.0), &mut events);
        tracker.update(at(1.0, 1.0), &mut events);
        assert_eq!(event_log(&events), ["enter:a"]);
    }

    #[test]
    fn enter_and_exit_alternate() {
        let (mut tracker, mut events) = tracker(vec![zone("a", 0.0, 0.0, 5.0)]);

        for x in [0.0, 10.0, 1.0, 2.0, 10.0, 0.0] {
            tracker.update(at(x, 0.0), &mut events);
        }

        assert_eq!(event_log(&events), ["enter:a", "exit:a", "enter:a", "exit:a", "enter:a"]);
    }

    #[test]
    fn replacing_zones_exits_active_one() {
        let (mut tracker, mut events) = tracker(vec![zone("a", 0.0, 0.0, 5.0)]);
        tracker.update(at(0.0, 0.0), &mut events);

        tracker.set_zones(vec![zone("b", 30.0, 0.0, 5.0)], &mut events);

        assert!(tracker.active_zone().is_none());
        assert_eq!(event_log(&events), ["enter:a", "exit:a"]);
    }

    #[test]
    fn no_zones_means_no_selection() {
        let (mut tracker, mut events) = tracker(vec![]);
        tracker.update(at(0.0, 0.0), &mut events);
        assert!(tracker.active_zone().is_none());
        assert!(event_log(&events).is_empty());
    }

    //=====================================================================
    // Interact
    //=====================================================================

    #[test]
    fn interact_fires_on_rising_edge_inside_zone() {
        let (mut tracker, mut events) = tracker(vec![zone("library", 0.0, 0.0, 5.0)]);
        tracker.update(at(0.0, 0.0), &mut events);
        events.clear_all();

        tracker.interact(true, &mut events);
        tracker.interact(true, &mut events);
        tracker.interact(false, &mut events);
        tracker.interact(true, &mut events);

        assert_eq!(event_log(&events), ["interact:library", "interact:library"]);
    }

    #[test]
    fn interact_outside_zone_is_ignored() {
        let (mut tracker, mut events) = tracker(vec![zone("library", 0.0, 0.0, 5.0)]);
        tracker.update(at(50.0, 0.0), &mut events);
        tracker.interact(true, &mut events);
        assert!(event_log(&events).is_empty());
    }
}

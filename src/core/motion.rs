//=========================================================================
// Motion Controller
//=========================================================================
//
// Converts the per-frame intent into a horizontal velocity command for
// the physics body.
//
// Architecture:
// ```text
//   FreeRoam:   InputIntent ──axes × walk/sprint speed──┐
//                                                       ├─> MotionCommand ─> set_velocity(x, vy, z)
//   GuidedTour: target − position ──normalize × speed───┘        │
//                         │                                      └─> facing
//                         └─ planar distance < threshold ─> arrived (once per target)
// ```
//
// Only the horizontal plane (x, z) is ever commanded. The body's current
// vertical velocity is written back unchanged; jumping goes through an
// impulse instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::config::NavigationConfig;
use crate::core::input::InputIntent;
use crate::core::physics::PhysicsBody;

//=== NavigationMode ======================================================

/// Who steers the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigationMode {
    /// Player-driven movement from keyboard/touch.
    #[default]
    FreeRoam,
    /// Auto-navigation towards the current tour waypoint.
    GuidedTour,
}

//=== MotionCommand =======================================================

/// Result of one motion resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    /// Target horizontal velocity as (x, z).
    pub horizontal: Vec2,

    /// Avatar yaw in radians (`atan2(x, z)` of the last non-zero heading).
    pub facing: f32,

    /// `true` on the single call where the guided target is first reached.
    pub arrived: bool,
}

//=== MotionController ====================================================

/// Mode-aware steering for the avatar.
#[derive(Debug, Clone)]
pub struct MotionController {
    mode: NavigationMode,
    target: Option<Vec3>,
    arrival_latched: bool,
    facing: f32,

    walk_speed: f32,
    sprint_speed: f32,
    guided_speed: f32,
    arrival_threshold: f32,
    jump_impulse: f32,
    grounded_threshold: f32,
}

impl MotionController {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            mode: NavigationMode::default(),
            target: None,
            arrival_latched: false,
            facing: 0.0,
            walk_speed: config.walk_speed(),
            sprint_speed: config.sprint_speed(),
            guided_speed: config.guided_speed(),
            arrival_threshold: config.arrival_threshold(),
            jump_impulse: config.jump_impulse(),
            grounded_threshold: config.grounded_threshold(),
        }
    }

    //--- State ------------------------------------------------------------

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: NavigationMode) {
        self.mode = mode;
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Points guided steering at a new target and re-arms the arrival signal.
    pub fn set_target(&mut self, target: Option<Vec3>) {
        debug!(target: "nav::motion", "Guided target set to {:?}", target);
        self.target = target;
        self.arrival_latched = false;
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    //--- Resolution -------------------------------------------------------

    /// Computes this frame's horizontal velocity and facing.
    ///
    /// `position` is only consulted in guided mode; without it (body not
    /// spawned yet) the command is a standstill.
    pub fn resolve(&mut self, intent: &InputIntent, position: Option<Vec3>) -> MotionCommand {
        let (horizontal, arrived) = match self.mode {
            NavigationMode::FreeRoam => (self.free_velocity(intent), false),
            NavigationMode::GuidedTour => self.guided_velocity(position),
        };

        // No rotation on zero input
        if horizontal != Vec2::ZERO {
            self.facing = horizontal.x.atan2(horizontal.y);
        }

        MotionCommand {
            horizontal,
            facing: self.facing,
            arrived,
        }
    }

    /// Resolves motion and writes it to the body, jumping if requested.
    pub fn drive<B: PhysicsBody + ?Sized>(
        &mut self,
        intent: &InputIntent,
        body: &mut B,
    ) -> MotionCommand {
        let command = self.resolve(intent, body.position());

        if let Some(impulse) = self.jump(intent, body.velocity()) {
            debug!(target: "nav::motion", "Jump impulse {:?}", impulse);
            body.apply_impulse(impulse, true);
        }

        let vertical = body.velocity().y;
        body.set_velocity(Vec3::new(command.horizontal.x, vertical, command.horizontal.y), true);

        trace!(target: "nav::motion", "Commanded {:?} (mode {:?})", command, self.mode);
        command
    }

    /// Upward impulse to apply, if jump is held while grounded.
    pub fn jump(&self, intent: &InputIntent, velocity: Vec3) -> Option<Vec3> {
        let grounded = velocity.y.abs() < self.grounded_threshold;
        (intent.jump && grounded && self.jump_impulse > 0.0).then(|| Vec3::Y * self.jump_impulse)
    }

    //--- Internal Helpers -------------------------------------------------

    fn free_velocity(&self, intent: &InputIntent) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if intent.forward {
            direction.y -= 1.0;
        }
        if intent.backward {
            direction.y += 1.0;
        }
        if intent.left {
            direction.x -= 1.0;
        }
        if intent.right {
            direction.x += 1.0;
        }

        let speed = if intent.sprint { self.sprint_speed } else { self.walk_speed };
        direction * speed
    }

    fn guided_velocity(&mut self, position: Option<Vec3>) -> (Vec2, bool) {
        let (Some(target), Some(position)) = (self.target, position) else {
            return (Vec2::ZERO, false);
        };

        let offset = Vec2::new(target.x - position.x, target.z - position.z);
        let distance = offset.length();

        // Also covers the zero-length offset, which must not be normalized
        if distance < self.arrival_threshold {
            let arrived = !self.arrival_latched;
            if arrived {
                debug!(target: "nav::motion", "Arrived at {:?} (distance {:.3})", target, distance);
            }
            self.arrival_latched = true;
            return (Vec2::ZERO, arrived);
        }

        (offset / distance * self.guided_speed, false)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Physics Collaborator
//=========================================================================
//
// Contract between the controller and whatever rigid-body engine moves
// the avatar. The controller reads position/velocity and writes velocity
// or impulses; it never integrates motion itself.
//
//   MotionController ──set_velocity / apply_impulse──> PhysicsBody
//   Proximity/Camera <──position()───────────────────── PhysicsBody
//
// `SimpleBody` is a small reference body (Euler integration, flat
// ground, square walls) used by the demo binary and the tests.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, trace};

//=== PhysicsBody =========================================================

/// Read/write view of the avatar's rigid body.
pub trait PhysicsBody {
    /// Current position, or `None` while the body is not spawned yet.
    fn position(&self) -> Option<Vec3>;

    fn velocity(&self) -> Vec3;

    /// Overwrites linear velocity; `wake` rouses a sleeping body.
    fn set_velocity(&mut self, velocity: Vec3, wake: bool);

    /// Adds an instantaneous change of momentum.
    fn apply_impulse(&mut self, impulse: Vec3, wake: bool);
}

/// A body the controller may step itself.
///
/// Hosts with their own physics loop implement only [`PhysicsBody`] and
/// call the controller phases around their step.
pub trait PhysicsStep: PhysicsBody {
    fn step(&mut self, dt: f32);
}

//=== SimpleBody ==========================================================

const GRAVITY: f32 = 9.81;

/// Unit-mass point body on a flat ground plane at `y = 0`.
///
/// # Examples
///
/// ```
/// use campus_tour::core::physics::{PhysicsBody, PhysicsStep, SimpleBody};
/// use glam::Vec3;
///
/// let mut body = SimpleBody::new().with_bounds(50.0);
/// assert!(body.position().is_none());
///
/// body.spawn(Vec3::new(0.0, 5.0, 0.0));
/// body.set_velocity(Vec3::new(2.0, 0.0, 0.0), true);
/// body.step(0.5);
///
/// assert_eq!(body.position().map(|p| p.x), Some(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleBody {
    position: Option<Vec3>,
    velocity: Vec3,
    bounds: Option<f32>,
    awake: bool,
}

impl SimpleBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confines the body to `|x| <= half_extent` and `|z| <= half_extent`.
    ///
    /// # Panics
    ///
    /// Panics if `half_extent <= 0.0`.
    pub fn with_bounds(mut self, half_extent: f32) -> Self {
        assert!(half_extent > 0.0, "Bounds must be positive, got {}", half_extent);
        self.bounds = Some(half_extent);
        self
    }

    /// Places the body in the world and resets its velocity.
    pub fn spawn(&mut self, position: Vec3) {
        debug!(target: "nav::motion", "Body spawned at {:?}", position);
        self.position = Some(position);
        self.velocity = Vec3::ZERO;
        self.awake = true;
    }
}

impl PhysicsBody for SimpleBody {
    fn position(&self) -> Option<Vec3> {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3, wake: bool) {
        self.velocity = velocity;
        self.awake |= wake;
    }

    fn apply_impulse(&mut self, impulse: Vec3, wake: bool) {
        self.velocity += impulse;
        self.awake |= wake;
    }
}

impl PhysicsStep for SimpleBody {
    fn step(&mut self, dt: f32) {
        let Some(mut position) = self.position else {
            return;
        };
        if !self.awake {
            return;
        }

        self.velocity.y -= GRAVITY * dt;
        position += self.velocity * dt;

        if position.y <= 0.0 {
            position.y = 0.0;
            self.velocity.y = self.velocity.y.max(0.0);
        }

        if let Some(limit) = self.bounds {
            let clamped_x = position.x.clamp(-limit, limit);
            let clamped_z = position.z.clamp(-limit, limit);
            if clamped_x != position.x {
                self.velocity.x = 0.0;
            }
            if clamped_z != position.z {
                self.velocity.z = 0.0;
            }
            position.x = clamped_x;
            position.z = clamped_z;
        }

        trace!(target: "nav::motion", "Body at {:?}, velocity {:?}", position, self.velocity);
        self.position = Some(position);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spawned_at(position: Vec3) -> SimpleBody {
        let mut body = SimpleBody::new();
        body.spawn(position);
        body
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn unspawned_body_has_no_position_and_ignores_steps() {
        let mut body = SimpleBody::new();
        body.set_velocity(Vec3::X, true);
        body.step(1.0);
        assert!(body.position().is_none());
    }

    #[test]
    fn spawn_resets_velocity() {
        let mut body = spawned_at(Vec3::ZERO);
        body.set_velocity(Vec3::X, true);
        body.spawn(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(body.velocity(), Vec3::ZERO);
    }

    //=====================================================================
    // Integration
    //=====================================================================

    #[test]
    fn falls_to_ground_and_stops() {
        let mut body = spawned_at(Vec3::new(0.0, 5.0, 0.0));

        for _ in 0..200 {
            body.step(0.016);
        }

        assert_eq!(body.position().map(|p| p.y), Some(0.0));
        assert_eq!(body.velocity().y, 0.0);
    }

    #[test]
    fn impulse_lifts_body_off_ground() {
        let mut body = spawned_at(Vec3::ZERO);
        body.apply_impulse(Vec3::new(0.0, 5.0, 0.0), true);
        body.step(0.016);

        assert!(body.position().is_some_and(|p| p.y > 0.0));
    }

    #[test]
    fn bounds_clamp_position_and_stop_velocity() {
        let mut body = SimpleBody::new().with_bounds(50.0);
        body.spawn(Vec3::new(49.0, 0.0, 0.0));
        body.set_velocity(Vec3::new(10.0, 0.0, 0.0), true);
        body.step(1.0);

        assert_eq!(body.position().map(|p| p.x), Some(50.0));
        assert_eq!(body.velocity().x, 0.0);
    }

    #[test]
    #[should_panic(expected = "Bounds must be positive")]
    fn bounds_reject_zero() {
        SimpleBody::new().with_bounds(0.0);
    }
}

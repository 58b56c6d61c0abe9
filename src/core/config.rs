//=========================================================================
// Navigation Config
//=========================================================================
//
// Every tunable of the navigation controller in one place.
//
// Defaults reproduce the campus build: walking at 5 units/s, sprinting
// at 9, tour steering at 8, camera trailing the avatar from (10, 18, 30).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec3;

//=== NavigationConfig ====================================================

/// Tunable parameters for motion, tour pacing and camera smoothing.
///
/// # Examples
///
/// ```
/// use campus_tour::core::config::NavigationConfig;
///
/// let config = NavigationConfig::default()
///     .with_walk_speed(4.0)
///     .with_sprint_speed(10.0);
///
/// assert_eq!(config.walk_speed(), 4.0);
/// assert_eq!(config.guided_speed(), 8.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    walk_speed: f32,
    sprint_speed: f32,
    guided_speed: f32,
    arrival_threshold: f32,
    manual_debounce: Duration,
    jump_impulse: f32,
    grounded_threshold: f32,
    follow_offset: Vec3,
    follow_smoothing: f32,
    cinematic_smoothing: f32,
    initial_camera_position: Vec3,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 9.0,
            guided_speed: 8.0,
            arrival_threshold: 0.5,
            manual_debounce: Duration::from_millis(500),
            jump_impulse: 5.0,
            grounded_threshold: 0.1,
            follow_offset: Vec3::new(10.0, 18.0, 30.0),
            follow_smoothing: 0.1,
            cinematic_smoothing: 0.05,
            initial_camera_position: Vec3::new(0.0, 12.0, 8.0),
        }
    }
}

impl NavigationConfig {
    //--- Motion -----------------------------------------------------------

    /// Sets the free-roam walking speed (units/s).
    ///
    /// # Panics
    ///
    /// Panics if `speed <= 0.0`.
    pub fn with_walk_speed(mut self, speed: f32) -> Self {
        assert!(speed > 0.0, "Walk speed must be positive, got {}", speed);
        self.walk_speed = speed;
        self
    }

    /// Sets the free-roam sprinting speed (units/s).
    ///
    /// # Panics
    ///
    /// Panics if `speed <= 0.0`.
    pub fn with_sprint_speed(mut self, speed: f32) -> Self {
        assert!(speed > 0.0, "Sprint speed must be positive, got {}", speed);
        self.sprint_speed = speed;
        self
    }

    /// Sets the steering speed used while following a tour.
    ///
    /// # Panics
    ///
    /// Panics if `speed <= 0.0`.
    pub fn with_guided_speed(mut self, speed: f32) -> Self {
        assert!(speed > 0.0, "Guided speed must be positive, got {}", speed);
        self.guided_speed = speed;
        self
    }

    /// Sets the planar distance under which a waypoint counts as reached.
    ///
    /// # Panics
    ///
    /// Panics if `threshold <= 0.0`.
    pub fn with_arrival_threshold(mut self, threshold: f32) -> Self {
        assert!(threshold > 0.0, "Arrival threshold must be positive, got {}", threshold);
        self.arrival_threshold = threshold;
        self
    }

    /// Sets the upward impulse applied on jump. Zero disables jumping.
    ///
    /// # Panics
    ///
    /// Panics if `impulse < 0.0`.
    pub fn with_jump_impulse(mut self, impulse: f32) -> Self {
        assert!(impulse >= 0.0, "Jump impulse must not be negative, got {}", impulse);
        self.jump_impulse = impulse;
        self
    }

    /// Sets the vertical speed under which the body counts as grounded.
    ///
    /// # Panics
    ///
    /// Panics if `threshold <= 0.0`.
    pub fn with_grounded_threshold(mut self, threshold: f32) -> Self {
        assert!(threshold > 0.0, "Grounded threshold must be positive, got {}", threshold);
        self.grounded_threshold = threshold;
        self
    }

    //--- Tour -------------------------------------------------------------

    /// Sets the cooldown between accepted manual next/previous inputs.
    pub fn with_manual_debounce(mut self, debounce: Duration) -> Self {
        self.manual_debounce = debounce;
        self
    }

    //--- Camera -----------------------------------------------------------

    /// Sets the camera offset from the player in follow mode.
    pub fn with_follow_offset(mut self, offset: Vec3) -> Self {
        self.follow_offset = offset;
        self
    }

    /// Sets the per-tick interpolation factor in follow mode.
    ///
    /// # Panics
    ///
    /// Panics unless `0.0 < factor <= 1.0`.
    pub fn with_follow_smoothing(mut self, factor: f32) -> Self {
        assert_smoothing(factor);
        self.follow_smoothing = factor;
        self
    }

    /// Sets the per-tick interpolation factor in cinematic mode.
    ///
    /// # Panics
    ///
    /// Panics unless `0.0 < factor <= 1.0`.
    pub fn with_cinematic_smoothing(mut self, factor: f32) -> Self {
        assert_smoothing(factor);
        self.cinematic_smoothing = factor;
        self
    }

    /// Sets where the camera sits before the first update.
    pub fn with_initial_camera_position(mut self, position: Vec3) -> Self {
        self.initial_camera_position = position;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn walk_speed(&self) -> f32 {
        self.walk_speed
    }

    pub fn sprint_speed(&self) -> f32 {
        self.sprint_speed
    }

    pub fn guided_speed(&self) -> f32 {
        self.guided_speed
    }

    pub fn arrival_threshold(&self) -> f32 {
        self.arrival_threshold
    }

    pub fn manual_debounce(&self) -> Duration {
        self.manual_debounce
    }

    pub fn jump_impulse(&self) -> f32 {
        self.jump_impulse
    }

    pub fn grounded_threshold(&self) -> f32 {
        self.grounded_threshold
    }

    pub fn follow_offset(&self) -> Vec3 {
        self.follow_offset
    }

    pub fn follow_smoothing(&self) -> f32 {
        self.follow_smoothing
    }

    pub fn cinematic_smoothing(&self) -> f32 {
        self.cinematic_smoothing
    }

    pub fn initial_camera_position(&self) -> Vec3 {
        self.initial_camera_position
    }
}

fn assert_smoothing(factor: f32) {
    assert!(
        factor > 0.0 && factor <= 1.0,
        "Smoothing factor must be in (0, 1], got {}",
        factor
    );
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use campus_tour::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder, FrameOutput};
pub use crate::core::platform_bridge::{InputSender, PlatformError};

// Controller and configuration
pub use crate::core::config::NavigationConfig;
pub use crate::core::controller::NavigationController;
pub use crate::core::events::{NavigationEvent, TourCommand};

// Input
pub use crate::core::input::{Control, InputEvent, InputIntent, KeyBindings, KeyCode, TouchPatch};

// Subsystem content
pub use crate::core::camera::{CameraMode, CameraPose, OrbitLeg};
pub use crate::core::motion::NavigationMode;
pub use crate::core::physics::{PhysicsBody, PhysicsStep, SimpleBody};
pub use crate::core::proximity::{ZoneDefinition, ZonePayload};
pub use crate::core::tour::{TourPhase, Waypoint};

// Math
pub use glam::{Vec2, Vec3};

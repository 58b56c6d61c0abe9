//=========================================================================
// Navigation Core
//
// Navigation & interaction controller for campus exploration.
//
// Responsibilities:
// - Fuse keyboard and touch input into one intent per frame
// - Steer the avatar (free roam or guided tour) through a physics body
// - Detect the nearest point-of-interest zone
// - Sequence tour waypoints
// - Drive the camera (cinematic orbits, then follow)
//
// Notes:
// Everything here is single-threaded and frame-driven. The
// NavigationController owns every subsystem and advances them in a
// fixed order once per frame; the platform layer only feeds it input.
//
//=========================================================================

//=== Subsystems ==========================================================

pub mod camera;
pub mod config;
pub mod controller;
pub mod events;
pub mod input;
pub mod message_bus;
pub mod motion;
pub mod physics;
pub mod platform_bridge;
pub mod proximity;
pub mod tour;

//=========================================================================
// Campus Tour - Library Root
//
// Navigation & interaction controller for a 3D campus exploration
// experience.
//
// Responsibilities:
// - Expose the navigation core (`core`) for hosts with their own loop
// - Expose the windowed runtime (`Engine`) for standalone use
// - Keep the winit integration (`platform`) private
//
// Typical usage:
// ```no_run
// use campus_tour::prelude::*;
//
// let mut body = SimpleBody::new();
// body.spawn(Vec3::ZERO);
// EngineBuilder::new().build().run(body, |_frame| {})?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the frame-driven controller and its subsystems. It has
// no window dependency and can be driven by any host loop.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, FrameOutput};

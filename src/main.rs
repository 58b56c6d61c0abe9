//=========================================================================
// Campus Tour Demo
//
// Opens a window over a small demo campus: two points of interest, a
// three-stop tour and an opening cinematic. Run with `--guided` to start
// in guided-tour mode.
//
// Controls:
//   WASD / arrows   walk (guided: W/S step through stops)
//   Shift           sprint
//   Space           jump
//   E               show the current zone again
//   Escape / Enter  skip the cinematic
//
//=========================================================================

use campus_tour::prelude::*;
use log::{error, info};

fn campus_zones() -> Vec<ZoneDefinition> {
    vec![
        ZoneDefinition::new(
            "main-building",
            Vec2::new(10.0, 0.0),
            6.0,
            ZonePayload::new("Edificio Principal", "Rectoría y oficinas administrativas."),
        ),
        ZoneDefinition::new(
            "library",
            Vec2::new(-10.0, -10.0),
            5.0,
            ZonePayload::new("Biblioteca Central", "Sala de lectura abierta de 8:00 a 20:00."),
        ),
    ]
}

fn campus_tour() -> Vec<Waypoint> {
    vec![
        Waypoint::new(Vec3::new(0.0, 0.0, 0.0), "Entrada", "Punto de partida del recorrido."),
        Waypoint::new(Vec3::new(10.0, 0.0, 0.0), "Edificio Principal", "Sede de la administración.")
            .with_camera_offset(Vec3::new(0.0, 8.0, 14.0)),
        Waypoint::new(
            Vec3::new(-10.0, 0.0, -10.0),
            "Biblioteca Central",
            "Colecciones y salas de estudio.",
        ),
    ]
}

fn opening_cinematic() -> Vec<OrbitLeg> {
    vec![
        OrbitLeg { center: Vec3::ZERO, radius: 40.0, height: 25.0, duration: 6.0 },
        OrbitLeg { center: Vec3::new(10.0, 0.0, 0.0), radius: 18.0, height: 12.0, duration: 4.0 },
    ]
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let guided = std::env::args().any(|arg| arg == "--guided");

    let mut body = SimpleBody::new().with_bounds(50.0);
    body.spawn(Vec3::new(0.0, 5.0, 0.0));

    let engine = EngineBuilder::new()
        .with_window_title("Campus Tour")
        .build()
        .init(|controller| {
            controller.set_zones(campus_zones());
            controller.set_waypoints(campus_tour());
            controller.start_cinematic(opening_cinematic());
            if guided {
                controller.set_mode(NavigationMode::GuidedTour);
            }
        });

    let result = engine.run(body, |frame| {
        for event in &frame.events {
            match event {
                NavigationEvent::ZoneEntered { payload, .. }
                | NavigationEvent::ZoneInteracted { payload, .. } => {
                    info!("{}: {}", payload.title, payload.message);
                }
                NavigationEvent::WaypointReached { waypoint, .. } => {
                    info!("Llegada a {}: {}", waypoint.name, waypoint.description);
                }
                other => info!("{:?}", other),
            }
        }
    });

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

use bevy::prelude::*;
use bevy::window::WindowResolution;

use ringbounce::config::{self, SimConfig};
use ringbounce::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use ringbounce::graphics;
use ringbounce::rendering::RenderingPlugin;
use ringbounce::scenario;
use ringbounce::simulation::SimulationPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Ringbounce".into(),
            resolution: WindowResolution::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    // Compiled defaults; load_sim_config overwrites them from assets/sim.toml
    // (and RINGBOUNCE_VARIANT) before anything else reads them.
    .insert_resource(SimConfig::default())
    .add_plugins((SimulationPlugin, RenderingPlugin))
    .add_systems(
        Startup,
        (
            config::load_sim_config,
            graphics::setup_camera.after(config::load_sim_config),
            scenario::spawn_simulation.after(config::load_sim_config),
        ),
    );

    app.run();
}

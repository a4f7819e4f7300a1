use bevy::prelude::*;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel, origin at the window center
    commands.spawn(Camera2d);
    info!("Camera spawned");
}

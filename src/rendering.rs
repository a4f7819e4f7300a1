//! Presentation of the recorded [`DisplayList`] plus the stats overlay.
//!
//! ## Layer Model
//!
//! | Layer            | Technology | Source                     |
//! |------------------|------------|----------------------------|
//! | Boundary outline | Gizmos     | `DrawCommand::Stroke`      |
//! | Body fills       | `Mesh2d`   | `DrawCommand::Fill`        |
//! | Stats overlay    | Bevy UI    | `Simulation::stats`        |
//!
//! Body fills reuse a pool of `Mesh2d` discs that all share one unit-radius
//! mesh; each frame the i-th fill command repositions and rescales the i-th
//! disc.  The pool only grows, and spare discs are hidden.
//!
//! The engine works in canvas coordinates (origin top-left, y down).  Bevy's
//! 2D world has its origin at the window center with y up, so every command
//! goes through [`canvas_to_world`] first.

use bevy::color::palettes::css;
use bevy::math::{DVec2, Isometry2d};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

use crate::body::ColorTag;
use crate::config::{load_sim_config, SimConfig};
use crate::constants::DISC_SEGMENTS;
use crate::simulation::Simulation;
use crate::surface::{DisplayList, DrawCommand};

// ── Resources and markers ─────────────────────────────────────────────────────

/// Shared unit-radius disc mesh used by every body fill.
#[derive(Resource, Clone, Debug)]
pub struct DiscMesh(pub Handle<Mesh>);

/// Pooled fill entity; the index is the fill command it presents.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyDisc(pub usize);

/// Marker for the stats text root node.
#[derive(Component)]
pub struct StatsTextDisplay;

/// Registers the presentation systems.  Expects [`crate::simulation::SimulationPlugin`].
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_disc_mesh, setup_stats_text.after(load_sim_config)),
        )
        .add_systems(
            PostUpdate,
            (present_display_list_system, stats_display_system),
        );
    }
}

// ── Coordinates and colors ────────────────────────────────────────────────────

/// Map a canvas-space point to Bevy world space for a `width × height` canvas.
pub fn canvas_to_world(point: DVec2, width: f64, height: f64) -> Vec2 {
    Vec2::new(
        (point.x - width / 2.0) as f32,
        (-(point.y - height / 2.0)) as f32,
    )
}

/// Resolve a display tag to a color.
///
/// Accepts a handful of CSS names and `#rrggbb` / `#rgb` hex strings.
/// Anything else draws as light grey.
pub fn resolve_color(tag: &ColorTag) -> Color {
    let name = tag.as_str().trim();
    if name.starts_with('#') {
        return Srgba::hex(name)
            .map(Color::from)
            .unwrap_or(Color::srgb(0.8, 0.8, 0.8));
    }
    let srgba = match name.to_ascii_lowercase().as_str() {
        "white" => css::WHITE,
        "black" => css::BLACK,
        "red" => css::RED,
        "blue" => css::BLUE,
        "green" => css::GREEN,
        "chocolate" => css::CHOCOLATE,
        "crimson" => css::CRIMSON,
        "skyblue" => css::SKY_BLUE,
        "gold" => css::GOLD,
        "orchid" => css::ORCHID,
        "seagreen" => css::SEA_GREEN,
        "tomato" => css::TOMATO,
        "steelblue" => css::STEEL_BLUE,
        "orange" => css::ORANGE,
        "teal" => css::TEAL,
        "yellow" => css::YELLOW,
        "purple" => css::PURPLE,
        _ => return Color::srgb(0.8, 0.8, 0.8),
    };
    Color::from(srgba)
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Build the shared disc mesh once.
pub fn setup_disc_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(unit_disc_mesh(DISC_SEGMENTS));
    commands.insert_resource(DiscMesh(handle));
}

/// Spawn the stats text node in the top-left corner.
pub fn setup_stats_text(mut commands: Commands, config: Res<SimConfig>) {
    let visibility = if config.show_stats {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            StatsTextDisplay,
            visibility,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Frame: 0 | Contacts: 0 | Wall hits: 0"),
                TextFont {
                    font_size: config.stats_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.0, 1.0, 1.0)),
            ));
        });
}

// ── Per-frame presentation ────────────────────────────────────────────────────

/// Turn the recorded draw commands into gizmo strokes and pooled disc fills.
pub fn present_display_list_system(
    mut commands: Commands,
    list: Res<DisplayList>,
    config: Res<SimConfig>,
    disc: Option<Res<DiscMesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut gizmos: Gizmos,
    mut discs: Query<(
        &BodyDisc,
        &mut Transform,
        &MeshMaterial2d<ColorMaterial>,
        &mut Visibility,
    )>,
) {
    let (w, h) = (config.display_width, config.display_height);

    for command in list.strokes() {
        if let DrawCommand::Stroke {
            center,
            radius,
            color,
        } = command
        {
            gizmos.circle_2d(
                Isometry2d::from_translation(canvas_to_world(*center, w, h)),
                *radius as f32,
                resolve_color(color),
            );
        }
    }

    let fills: Vec<(Vec2, f32, Color)> = list
        .fills()
        .filter_map(|command| match command {
            DrawCommand::Fill {
                center,
                radius,
                color,
            } => Some((
                canvas_to_world(*center, w, h),
                *radius as f32,
                resolve_color(color),
            )),
            DrawCommand::Stroke { .. } => None,
        })
        .collect();

    let mut pooled = 0;
    for (slot, mut transform, material, mut visibility) in discs.iter_mut() {
        pooled = pooled.max(slot.0 + 1);
        match fills.get(slot.0) {
            Some(&(pos, radius, color)) => {
                *transform = disc_transform(slot.0, pos, radius);
                if let Some(mat) = materials.get_mut(&material.0) {
                    mat.color = color;
                }
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    let Some(disc) = disc else {
        return;
    };
    for (index, &(pos, radius, color)) in fills.iter().enumerate().skip(pooled) {
        commands.spawn((
            BodyDisc(index),
            Mesh2d(disc.0.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(color))),
            disc_transform(index, pos, radius),
        ));
    }
}

/// Later fills sit slightly in front of earlier ones, matching draw order.
fn disc_transform(index: usize, pos: Vec2, radius: f32) -> Transform {
    Transform::from_translation(pos.extend(index as f32 * 0.01))
        .with_scale(Vec3::new(radius, radius, 1.0))
}

/// Refresh the stats overlay text.
pub fn stats_display_system(
    sim: Option<Res<Simulation>>,
    parent_query: Query<&Children, With<StatsTextDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let Some(sim) = sim else {
        return;
    };
    let stats = sim.stats();
    let largest = sim
        .bodies()
        .iter()
        .map(|b| b.radius)
        .fold(0.0_f64, f64::max);
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!(
                    "Frame: {} | Contacts: {} (total {}) | Wall hits: {} | Largest r: {:.0}",
                    stats.frame,
                    stats.contacts,
                    stats.total_contacts,
                    stats.boundary_hits,
                    largest
                ));
            }
        }
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Fan-triangulate a unit circle into a renderable [`Mesh`].
///
/// Vertex 0 is the center; the rim has `segments` vertices.  Scale the
/// entity's transform by the body radius to size it.
pub fn unit_disc_mesh(segments: usize) -> Mesh {
    let segments = segments.max(3);
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(segments + 1);
    positions.push([0.0, 0.0, 0.0]);
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        positions.push([angle.cos(), angle.sin(), 0.0]);
    }
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [p[0] * 0.5 + 0.5, p[1] * 0.5 + 0.5])
        .collect();

    let rim = segments as u32;
    let mut indices: Vec<u32> = Vec::with_capacity(segments * 3);
    for i in 1..=rim {
        let next = if i == rim { 1 } else { i + 1 };
        indices.extend_from_slice(&[0, i, next]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_center_maps_to_world_origin() {
        let p = canvas_to_world(DVec2::new(600.0, 340.0), 1200.0, 680.0);
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn canvas_y_down_becomes_world_y_up() {
        let p = canvas_to_world(DVec2::new(700.0, 440.0), 1200.0, 680.0);
        assert_eq!(p, Vec2::new(100.0, -100.0));
    }

    #[test]
    fn resolves_names_and_hex() {
        assert_eq!(resolve_color(&"crimson".into()), Color::from(css::CRIMSON));
        assert_eq!(resolve_color(&"SkyBlue".into()), Color::from(css::SKY_BLUE));
        assert_eq!(
            resolve_color(&"#ff0000".into()),
            Color::from(Srgba::rgb(1.0, 0.0, 0.0))
        );
        assert_eq!(
            resolve_color(&"no-such-color".into()),
            Color::srgb(0.8, 0.8, 0.8)
        );
    }

    #[test]
    fn disc_mesh_has_closed_fan() {
        let mesh = unit_disc_mesh(8);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), 8 * 3);
        assert_eq!(&indices[indices.len() - 3..], &[0, 8, 1]);
        assert_eq!(mesh.count_vertices(), 9);
    }
}

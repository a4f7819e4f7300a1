//! The drawing contract consumed by [`crate::simulation::Simulation::render`].
//!
//! The engine never talks to a GPU or window.  It describes a frame as circle
//! strokes and fills against a [`DrawSurface`]; the Bevy host records those
//! into a [`DisplayList`] and presents it (see [`crate::rendering`]).

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::body::ColorTag;

/// Anything that can outline and fill circles.
pub trait DrawSurface {
    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: &ColorTag);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &ColorTag);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke {
        center: DVec2,
        radius: f64,
        color: ColorTag,
    },
    Fill {
        center: DVec2,
        radius: f64,
        color: ColorTag,
    },
}

/// A frame's worth of draw calls, in submission order.
///
/// Lives as a Bevy [`Resource`] so the fixed-step simulation and the
/// per-frame presentation never share mutable state.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Drop last frame's commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
    }
}

impl DrawSurface for DisplayList {
    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: &ColorTag) {
        self.commands.push(DrawCommand::Stroke {
            center,
            radius,
            color: color.clone(),
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &ColorTag) {
        self.commands.push(DrawCommand::Fill {
            center,
            radius,
            color: color.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_list_keeps_submission_order() {
        let mut list = DisplayList::default();
        list.stroke_circle(DVec2::ZERO, 300.0, &"white".into());
        list.fill_circle(DVec2::X, 30.0, &"red".into());
        list.fill_circle(DVec2::Y, 31.0, &"blue".into());

        assert_eq!(list.commands.len(), 3);
        assert_eq!(list.strokes().count(), 1);
        assert_eq!(list.fills().count(), 2);
        assert!(matches!(list.commands[0], DrawCommand::Stroke { .. }));

        list.clear();
        assert!(list.commands.is_empty());
    }
}

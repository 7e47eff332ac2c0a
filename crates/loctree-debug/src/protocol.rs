//! Debug shape protocol - JSON shape/frame definitions

use serde::{Deserialize, Serialize};

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Shapes emitted by a debug-draw sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "params")]
pub enum DebugShape {
    /// Wireframe axis-aligned box
    Box {
        min: [f32; 3],
        max: [f32; 3],
        color: Color,
    },
}

/// All shapes recorded between two frame boundaries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugFrame {
    pub frame: u64,
    pub shapes: Vec<DebugShape>,
}

impl DebugFrame {
    pub fn box_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, DebugShape::Box { .. }))
            .count()
    }
}

//! Debug-draw sinks

use std::io::Write;

use thiserror::Error;

use crate::protocol::{Color, DebugFrame, DebugShape};

/// Errors raised while exporting recorded shapes
#[derive(Debug, Error)]
pub enum DebugError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receiver for debug shapes emitted during traversal
pub trait DebugDraw {
    fn draw_box(&mut self, min: [f32; 3], max: [f32; 3], color: Color);
}

impl<D: DebugDraw + ?Sized> DebugDraw for &mut D {
    fn draw_box(&mut self, min: [f32; 3], max: [f32; 3], color: Color) {
        (**self).draw_box(min, max, color);
    }
}

/// Sink that discards every shape
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDraw;

impl DebugDraw for NoopDraw {
    fn draw_box(&mut self, _min: [f32; 3], _max: [f32; 3], _color: Color) {}
}

/// Sink that keeps shapes in memory, one frame at a time.
#[derive(Debug, Default)]
pub struct ShapeRecorder {
    frame: u64,
    shapes: Vec<DebugShape>,
}

impl ShapeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes recorded since the last frame boundary
    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Close the current frame and return its shapes.
    pub fn take_frame(&mut self) -> DebugFrame {
        let frame = DebugFrame {
            frame: self.frame,
            shapes: std::mem::take(&mut self.shapes),
        };
        self.frame += 1;
        frame
    }

    /// Serialize the pending shapes without closing the frame.
    pub fn to_json(&self) -> Result<String, DebugError> {
        let frame = DebugFrame {
            frame: self.frame,
            shapes: self.shapes.clone(),
        };
        Ok(serde_json::to_string(&frame)?)
    }

    /// Close the current frame and write it as one JSON line.
    pub fn write_frame<W: Write>(&mut self, mut writer: W) -> Result<(), DebugError> {
        let frame = self.take_frame();
        log::debug!("Writing debug frame {} ({} shapes)", frame.frame, frame.shapes.len());
        serde_json::to_writer(&mut writer, &frame)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl DebugDraw for ShapeRecorder {
    fn draw_box(&mut self, min: [f32; 3], max: [f32; 3], color: Color) {
        self.shapes.push(DebugShape::Box { min, max, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_twice(sink: &mut impl DebugDraw) {
        sink.draw_box([0.0; 3], [1.0; 3], Color::WHITE);
        sink.draw_box([1.0; 3], [2.0; 3], Color::GREEN);
    }

    #[test]
    fn test_recorder_collects_boxes() {
        let mut recorder = ShapeRecorder::new();
        draw_twice(&mut recorder);
        assert_eq!(recorder.len(), 2);
        assert_eq!(
            recorder.shapes()[1],
            DebugShape::Box { min: [1.0; 3], max: [2.0; 3], color: Color::GREEN }
        );
    }

    #[test]
    fn test_take_frame_advances() {
        let mut recorder = ShapeRecorder::new();
        draw_twice(&mut recorder);
        let first = recorder.take_frame();
        assert_eq!(first.frame, 0);
        assert_eq!(first.box_count(), 2);
        assert!(recorder.is_empty());

        let second = recorder.take_frame();
        assert_eq!(second.frame, 1);
        assert!(second.shapes.is_empty());
    }

    #[test]
    fn test_write_frame_emits_json_line() {
        let mut recorder = ShapeRecorder::new();
        draw_twice(&mut recorder);
        let mut out = Vec::new();
        recorder.write_frame(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let frame: DebugFrame = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(frame.box_count(), 2);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_to_json_keeps_pending_shapes() {
        let mut recorder = ShapeRecorder::new();
        draw_twice(&mut recorder);
        let json = recorder.to_json().unwrap();

        let frame: DebugFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame.frame, 0);
        assert_eq!(frame.box_count(), 2);
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.take_frame().frame, 0);
    }

    #[test]
    fn test_noop_through_reference() {
        let mut noop = NoopDraw;
        let mut by_ref = &mut noop;
        draw_twice(&mut by_ref);
    }
}

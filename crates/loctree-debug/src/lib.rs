//! Debug-draw tools for loctree - shape sinks for visualizing octree nodes
//!
//! Pass a sink into a visibility query to capture the bounds of every node
//! that contributed objects:
//! ```ignore
//! let mut recorder = ShapeRecorder::new();
//! let visible = tree.query(&view, &proj, &mut recorder);
//! recorder.write_frame(std::io::stdout())?;
//! ```

pub mod protocol;
pub mod sink;

pub use protocol::*;
pub use sink::{DebugDraw, DebugError, NoopDraw, ShapeRecorder};

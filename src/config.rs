//! Octree configuration, persisted as JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::octree::MAX_DEPTH;

/// Parameters for building a [`LooseOctree`](crate::octree::LooseOctree)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Side length of the root's tight cell
    pub world_size: f32,
    /// Node bound inflation (>= 1.0)
    pub looseness: f32,
    /// Depth of the leaf level (root = 0)
    pub max_depth: u8,
    /// World-space center of the root
    pub center: [f32; 3],
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            world_size: 100.0,
            looseness: 1.2,
            max_depth: 3,
            center: [0.0; 3],
        }
    }
}

impl OctreeConfig {
    /// Check the values describe a buildable tree.
    pub fn validate(&self) -> Result<()> {
        if !self.world_size.is_finite() || self.world_size <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "world_size must be finite and positive, got {}",
                self.world_size
            )));
        }
        if !self.looseness.is_finite() || self.looseness < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "looseness must be finite and at least 1.0, got {}",
                self.looseness
            )));
        }
        if self.max_depth > MAX_DEPTH {
            return Err(Error::InvalidConfig(format!(
                "max_depth {} exceeds limit {}",
                self.max_depth, MAX_DEPTH
            )));
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "center must be finite, got {:?}",
                self.center
            )));
        }
        Ok(())
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded octree config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

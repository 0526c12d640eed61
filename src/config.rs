use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::{
        core::{Canvas, Rgba8},
        error::RigResult,
    },
    rig::model::RigDefinition,
    solve::{normalize::Normalizer, transform::SolveOptions},
};

/// Immutable engine configuration, built once at startup and handed to [`crate::Engine`].
///
/// Every field has a default, so a config file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Output surface size.
    pub canvas: Canvas,
    /// Directory holding one `<part_id>.png` per part.
    pub resource_dir: PathBuf,
    /// Shrink-and-center applied to detector keypoints.
    pub normalizer: Normalizer,
    /// Transform solver settings.
    pub solve: SolveOptions,
    /// Color the driver clears each frame to before compositing.
    pub background: Rgba8,
    /// Parts, bindings and draw order.
    pub rig: RigDefinition,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            resource_dir: PathBuf::from("character_parts"),
            normalizer: Normalizer::default(),
            solve: SolveOptions::default(),
            background: Rgba8::new(240, 248, 255, 255),
            rig: RigDefinition::humanoid(),
        }
    }
}

impl EngineConfig {
    /// Reject any setting that would make the engine mis-render.
    pub fn validate(&self) -> RigResult<()> {
        self.canvas.validate()?;
        self.normalizer.validate()?;
        self.solve.validate()?;
        self.rig.validate()
    }

    /// Parse a JSON config. Relative `resource_dir` values resolve against the file's
    /// directory.
    pub fn from_json_file(path: &Path) -> RigResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_slice(&bytes)?;
        if cfg.resource_dir.is_relative()
            && let Some(parent) = path.parent()
        {
            cfg.resource_dir = parent.join(&cfg.resource_dir);
        }
        Ok(cfg)
    }

    /// Pretty JSON rendering, e.g. as a starting point for a custom rig.
    pub fn to_json_pretty(&self) -> RigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

use crate::{
    assets::loader::load_rig,
    config::EngineConfig,
    foundation::error::RigResult,
    render::{compositor::composite, surface::Surface},
    rig::{keypoint::Keypoint, part::Rig},
    solve::transform::{PlacementSet, solve_frame},
};

/// Counters for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Parts blitted onto the surface.
    pub parts_drawn: usize,
    /// Render-order entries without a placement this frame.
    pub parts_skipped: usize,
}

/// Rigging engine: owns the configuration and the loaded rig for the process lifetime.
///
/// Per-frame calls take `&self`; nothing persists from one frame to the next.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    rig: Rig,
}

impl Engine {
    /// Validate `config` and load every part image from `config.resource_dir`.
    ///
    /// Missing images become placeholders; only configuration mistakes fail.
    #[tracing::instrument(skip(config), fields(resource_dir = %config.resource_dir.display()))]
    pub fn new(config: EngineConfig) -> RigResult<Self> {
        config.validate()?;
        let rig = load_rig(&config.resource_dir, &config.rig)?;
        let placeholders = rig.iter().filter(|(p, _)| p.is_placeholder()).count();
        tracing::info!(parts = rig.len(), placeholders, "rig loaded");
        Ok(Self { config, rig })
    }

    /// Build from an already-loaded rig, skipping filesystem access.
    ///
    /// `rig` must have been built from `config.rig`.
    pub fn from_parts(config: EngineConfig, rig: Rig) -> RigResult<Self> {
        config.validate()?;
        rig.ensure_matches(&config.rig)?;
        Ok(Self { config, rig })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Loaded rig.
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Normalize raw detector keypoints and solve every part.
    pub fn solve(&self, keypoints: &[Keypoint]) -> PlacementSet {
        let normalized = self.config.normalizer.normalize(keypoints);
        solve_frame(
            &self.rig,
            &normalized,
            self.config.canvas,
            &self.config.solve,
        )
    }

    /// Run one frame. `None` (no figure detected) draws nothing; the surface is never
    /// cleared here.
    #[tracing::instrument(level = "trace", skip_all, fields(detected = keypoints.is_some()))]
    pub fn render_frame<S: Surface + ?Sized>(
        &self,
        keypoints: Option<&[Keypoint]>,
        surface: &mut S,
    ) -> RigResult<FrameStats> {
        let Some(keypoints) = keypoints else {
            return Ok(FrameStats::default());
        };

        let placements = self.solve(keypoints);
        let parts_drawn = composite(self.rig.render_order(), &placements, surface)?;
        Ok(FrameStats {
            parts_drawn,
            parts_skipped: self.rig.render_order().len() - parts_drawn,
        })
    }
}

use crate::{
    foundation::error::{RigError, RigResult},
    rig::keypoint::Keypoint,
};

/// Affine shrink-and-center applied uniformly to every keypoint of a frame.
///
/// `v' = v * shrink + offset` on both axes keeps extremities off the canvas edge.
/// With `mirror`, `x` is flipped (`1 - x`) first, matching a selfie-view camera.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Normalizer {
    /// Scale applied to both axes.
    pub shrink: f64,
    /// Offset added to both axes after scaling.
    pub offset: f64,
    /// Flip horizontally before scaling.
    pub mirror: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            shrink: 0.7,
            offset: 0.15,
            mirror: false,
        }
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

impl Normalizer {
    /// Identity transform.
    pub const IDENTITY: Normalizer = Normalizer {
        shrink: 1.0,
        offset: 0.0,
        mirror: false,
    };

    /// The transform must map `[0,1]` into `[0,1]`.
    pub fn validate(&self) -> RigResult<()> {
        if !self.shrink.is_finite() || !self.offset.is_finite() {
            return Err(RigError::config("normalizer shrink/offset must be finite"));
        }
        if self.shrink <= 0.0 {
            return Err(RigError::config("normalizer shrink must be > 0"));
        }
        if self.offset < 0.0 || self.shrink + self.offset > 1.0 {
            return Err(RigError::config(
                "normalizer must map [0,1] into [0,1] (offset >= 0, shrink + offset <= 1)",
            ));
        }
        Ok(())
    }

    /// Normalize one keypoint. Out-of-range input is clamped, non-finite input becomes 0.
    pub fn apply(&self, kp: Keypoint) -> Keypoint {
        let mut x = unit(kp.x);
        let y = unit(kp.y);
        if self.mirror {
            x = 1.0 - x;
        }
        Keypoint {
            x: unit(x * self.shrink + self.offset),
            y: unit(y * self.shrink + self.offset),
            visibility: unit(kp.visibility),
        }
    }

    /// Normalize a whole frame.
    pub fn normalize(&self, keypoints: &[Keypoint]) -> Vec<Keypoint> {
        keypoints.iter().map(|kp| self.apply(*kp)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/solve/normalize.rs"]
mod tests;

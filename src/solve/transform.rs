use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::{Canvas, Point, Vec2},
        error::{RigError, RigResult},
    },
    rig::{
        keypoint::{Keypoint, keypoint_at},
        model::{PartBinding, PartId},
        part::{Rig, RigPart},
    },
    solve::raster::{rotate_image, rotation_affine, scale_image},
};

/// How a rotated part is positioned relative to its start keypoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// Center the rotated bounding box on the start keypoint; the part anchor is unused.
    #[default]
    BoxCenter,
    /// Put the part's anchor point (rotated with the image) on the start keypoint.
    Pivot,
}

/// Largest accepted [`SolveOptions::scale`].
pub const MAX_PART_SCALE: f32 = 16.0;

/// Per-engine knobs for the transform solver.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Uniform scale applied to every part image.
    pub scale: f32,
    /// Placement rule.
    pub anchor_mode: AnchorMode,
    /// Parts whose start keypoint is less confident than this are not placed.
    pub min_visibility: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            anchor_mode: AnchorMode::BoxCenter,
            min_visibility: 0.0,
        }
    }
}

impl SolveOptions {
    /// Reject settings that cannot produce a drawable image.
    pub fn validate(&self) -> RigResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > MAX_PART_SCALE {
            return Err(RigError::config(format!(
                "part scale must lie within (0, {MAX_PART_SCALE}]"
            )));
        }
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(RigError::config("min_visibility must lie within [0,1]"));
        }
        Ok(())
    }
}

/// One part's output for one frame: a transformed raster and where its top-left lands.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Part this placement draws.
    pub part: PartId,
    /// Scaled and rotated straight-alpha raster.
    pub image: image::RgbaImage,
    /// Output-surface pixel of the image's top-left corner. May be negative.
    pub top_left: (i32, i32),
    /// Orientation from start toward end keypoint, degrees, counter-clockwise from +x.
    pub angle_deg: f32,
}

/// Placements computed for one frame, keyed by part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacementSet {
    by_part: BTreeMap<PartId, Placement>,
}

impl PlacementSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the placement of `placement.part`.
    pub fn insert(&mut self, placement: Placement) {
        self.by_part.insert(placement.part, placement);
    }

    /// Placement of `part`, if it was solved this frame.
    pub fn get(&self, part: PartId) -> Option<&Placement> {
        self.by_part.get(&part)
    }

    /// Number of placed parts.
    pub fn len(&self) -> usize {
        self.by_part.len()
    }

    /// True when nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.by_part.is_empty()
    }

    /// Placements in [`PartId`] order (not draw order).
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.by_part.values()
    }
}

impl FromIterator<Placement> for PlacementSet {
    fn from_iter<I: IntoIterator<Item = Placement>>(iter: I) -> Self {
        let mut set = Self::new();
        for p in iter {
            set.insert(p);
        }
        set
    }
}

/// Normalized keypoint to integer pixel coordinates (truncating). `x = 1.0` maps to `W`.
pub fn denormalize(kp: &Keypoint, canvas: Canvas) -> (i32, i32) {
    let x = kp.x.clamp(0.0, 1.0) * f64::from(canvas.width);
    let y = kp.y.clamp(0.0, 1.0) * f64::from(canvas.height);
    (x as i32, y as i32)
}

/// Angle of the vector `start -> end` in degrees, counter-clockwise from +x with the
/// screen's downward y axis flipped upward. A zero-length vector yields `0`.
pub fn rotation_degrees(start: (i32, i32), end: (i32, i32)) -> f32 {
    let dir = Vec2::new(f64::from(end.0 - start.0), f64::from(start.1 - end.1));
    dir.atan2().to_degrees() as f32
}

/// Compute the placement of one part for one frame of normalized keypoints.
///
/// Returns `None` when the start landmark is beyond the keypoint sequence or below
/// the visibility threshold. An out-of-range end landmark leaves the part unrotated.
pub fn solve_part(
    part: &RigPart,
    binding: &PartBinding,
    keypoints: &[Keypoint],
    canvas: Canvas,
    opts: &SolveOptions,
) -> Option<Placement> {
    let start_kp = keypoint_at(keypoints, binding.start)?;
    if start_kp.visibility < opts.min_visibility {
        return None;
    }
    let start = denormalize(start_kp, canvas);

    let angle_deg = binding
        .end
        .and_then(|lm| keypoint_at(keypoints, lm))
        .map(|end_kp| rotation_degrees(start, denormalize(end_kp, canvas)))
        .unwrap_or(0.0);

    let scaled = scale_image(&part.image, opts.scale);
    let image = rotate_image(&scaled, -angle_deg);
    let (rw, rh) = image.dimensions();

    let top_left = match opts.anchor_mode {
        AnchorMode::BoxCenter => (start.0 - (rw / 2) as i32, start.1 - (rh / 2) as i32),
        AnchorMode::Pivot => {
            let (sw, sh) = scaled.dimensions();
            let anchor = Point::new(
                f64::from(part.anchor.x) * f64::from(sw),
                f64::from(part.anchor.y) * f64::from(sh),
            );
            let pivot = rotation_affine(sw, sh, -angle_deg) * anchor;
            (
                start.0 - pivot.x.round() as i32,
                start.1 - pivot.y.round() as i32,
            )
        }
    };

    Some(Placement {
        part: part.id,
        image,
        top_left,
        angle_deg,
    })
}

/// Solve every part of `rig` against one frame of normalized keypoints.
pub fn solve_frame(
    rig: &Rig,
    keypoints: &[Keypoint],
    canvas: Canvas,
    opts: &SolveOptions,
) -> PlacementSet {
    rig.iter()
        .filter_map(|(part, binding)| solve_part(part, binding, keypoints, canvas, opts))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/solve/transform.rs"]
mod tests;

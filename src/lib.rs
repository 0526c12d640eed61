//! rigsprite drives a rigged 2D sprite figure from body keypoints.
//!
//! Each frame, a pose detector (external to this crate) yields either nothing or a fixed
//! sequence of normalized [`Keypoint`]s. The engine turns that into a composited RGBA8
//! frame:
//!
//! 1. **Normalize**: shrink and center the keypoints ([`Normalizer`])
//! 2. **Solve**: per part, rotate and place its sprite from the bound landmarks
//!    ([`solve_part`] / [`solve_frame`] -> [`PlacementSet`])
//! 3. **Composite**: blit placements back-to-front in render order onto a [`Surface`]
//!    ([`composite`])
//!
//! [`Engine`] wires these together around an immutable [`EngineConfig`] and the parts
//! loaded once at startup ([`load_rig`]). Missing part images fall back to placeholder
//! art; only configuration mistakes are errors.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs give bit-identical placements; no state crosses
//!   frames.
//! - **Straight-alpha RGBA8** part images and surfaces.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod engine;
mod foundation;
mod render;
mod rig;
mod solve;

pub use assets::decode::{PLACEHOLDER_COLOR, PLACEHOLDER_SIZE, decode_part_image, placeholder_image};
pub use assets::loader::{LoadOutcome, load_part, load_rig, part_path, try_load_image};
pub use assets::prep::{PrepReport, fit_to_canvas, prepare_directory};
pub use config::EngineConfig;
pub use engine::{Engine, FrameStats};
pub use foundation::core::{Canvas, Rgba8};
pub use foundation::error::{RigError, RigResult};
pub use render::compositor::composite;
pub use render::surface::{FrameSurface, Surface};
pub use rig::keypoint::{Keypoint, KeypointFrame, KeypointSequence, keypoint_at};
pub use rig::landmark::{LANDMARK_COUNT, Landmark};
pub use rig::model::{Anchor, PartBinding, PartId, PartSpec, RigDefinition};
pub use rig::part::{PartSource, Rig, RigPart};
pub use solve::normalize::Normalizer;
pub use solve::raster::{rotate_image, rotated_extent, scale_image};
pub use solve::transform::{
    AnchorMode, MAX_PART_SCALE, Placement, PlacementSet, SolveOptions, denormalize,
    rotation_degrees, solve_frame, solve_part,
};

use std::path::{Path, PathBuf};

use crate::{
    assets::decode::{decode_part_image, placeholder_image},
    foundation::error::RigResult,
    rig::{
        model::{Anchor, PartSpec, RigDefinition},
        part::{PartSource, Rig, RigPart},
    },
};

/// Result of one attempt to load a part image.
#[derive(Clone, Debug)]
pub enum LoadOutcome {
    /// The file was read and decoded.
    Loaded(image::RgbaImage),
    /// The file was missing, unreadable or undecodable.
    Missing {
        /// Human-readable cause.
        reason: String,
    },
}

/// Read and decode `path`. Never fails; any problem becomes [`LoadOutcome::Missing`].
pub fn try_load_image(path: &Path) -> LoadOutcome {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            return LoadOutcome::Missing {
                reason: format!("read '{}': {err}", path.display()),
            };
        }
    };
    match decode_part_image(&bytes) {
        Ok(img) => LoadOutcome::Loaded(img),
        Err(err) => LoadOutcome::Missing {
            reason: format!("decode '{}': {err:#}", path.display()),
        },
    }
}

/// Path of the image for `spec` under `root`.
pub fn part_path(root: &Path, spec: &PartSpec) -> PathBuf {
    root.join(spec.id.file_name())
}

/// Load the image for one part, substituting placeholder art on failure.
pub fn load_part(root: &Path, spec: &PartSpec) -> RigPart {
    let path = part_path(root, spec);
    match try_load_image(&path) {
        LoadOutcome::Loaded(image) => {
            tracing::debug!(
                part = %spec.id,
                width = image.width(),
                height = image.height(),
                "loaded part image"
            );
            RigPart {
                id: spec.id,
                anchor: spec.anchor,
                image,
                source: PartSource::File(path),
            }
        }
        LoadOutcome::Missing { reason } => {
            tracing::warn!(part = %spec.id, %reason, "using placeholder for part");
            RigPart {
                id: spec.id,
                anchor: Anchor::CENTER,
                image: placeholder_image(),
                source: PartSource::Placeholder,
            }
        }
    }
}

/// Validate `def` and load every part image from `root`.
///
/// Only a malformed definition is an error; missing images become placeholders.
pub fn load_rig(root: &Path, def: &RigDefinition) -> RigResult<Rig> {
    def.validate()?;
    let parts = def.parts.iter().map(|spec| load_part(root, spec)).collect();
    Rig::from_parts(def, parts)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;

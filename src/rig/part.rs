use std::{collections::BTreeMap, path::PathBuf};

use crate::{
    foundation::error::{RigError, RigResult},
    rig::model::{Anchor, PartBinding, PartId, RigDefinition},
};

/// Where a part's raster came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartSource {
    /// Decoded from this file.
    File(PathBuf),
    /// Substituted placeholder art.
    Placeholder,
}

/// A loaded rig part. Owns its straight-alpha RGBA8 raster; immutable after load.
#[derive(Clone, Debug)]
pub struct RigPart {
    /// Part identifier.
    pub id: PartId,
    /// Pivot inside `image`.
    pub anchor: Anchor,
    /// Straight-alpha RGBA8 pixels.
    pub image: image::RgbaImage,
    /// Origin of `image`.
    pub source: PartSource,
}

impl RigPart {
    /// Whether this part fell back to placeholder art.
    pub fn is_placeholder(&self) -> bool {
        self.source == PartSource::Placeholder
    }
}

/// Loaded rig: parts and bindings keyed 1:1 by [`PartId`], plus the draw order.
#[derive(Clone, Debug)]
pub struct Rig {
    parts: BTreeMap<PartId, RigPart>,
    bindings: BTreeMap<PartId, PartBinding>,
    render_order: Vec<PartId>,
}

impl Rig {
    /// Pair already-loaded parts with the bindings of `def`.
    ///
    /// Every part spec needs exactly one loaded part and vice versa.
    pub fn from_parts(def: &RigDefinition, parts: Vec<RigPart>) -> RigResult<Self> {
        def.validate()?;

        let mut by_id = BTreeMap::new();
        for part in parts {
            let id = part.id;
            if def.part(id).is_none() {
                return Err(RigError::config(format!(
                    "loaded part '{id}' has no binding in the rig definition"
                )));
            }
            if by_id.insert(id, part).is_some() {
                return Err(RigError::config(format!("part '{id}' loaded twice")));
            }
        }

        let mut bindings = BTreeMap::new();
        for spec in &def.parts {
            if !by_id.contains_key(&spec.id) {
                return Err(RigError::config(format!(
                    "part '{}' is bound but has no image",
                    spec.id
                )));
            }
            bindings.insert(spec.id, spec.binding);
        }

        for id in def.unordered_parts() {
            tracing::warn!(part = %id, "part is not in render order and will never be drawn");
        }

        Ok(Self {
            parts: by_id,
            bindings,
            render_order: def.render_order.clone(),
        })
    }

    /// Fail unless this rig carries exactly the parts, anchors, bindings and draw order
    /// declared by `def`.
    pub fn ensure_matches(&self, def: &RigDefinition) -> RigResult<()> {
        if self.render_order != def.render_order {
            return Err(RigError::config(
                "loaded rig render order differs from the rig definition",
            ));
        }
        if self.parts.len() != def.parts.len() {
            return Err(RigError::config(format!(
                "loaded rig has {} parts, rig definition declares {}",
                self.parts.len(),
                def.parts.len()
            )));
        }
        for spec in &def.parts {
            let (Some(part), Some(binding)) = (self.part(spec.id), self.binding(spec.id)) else {
                return Err(RigError::config(format!(
                    "part '{}' is declared but missing from the loaded rig",
                    spec.id
                )));
            };
            if *binding != spec.binding || part.anchor != spec.anchor {
                return Err(RigError::config(format!(
                    "part '{}' differs between the loaded rig and the rig definition",
                    spec.id
                )));
            }
        }
        Ok(())
    }

    /// Loaded part for `id`.
    pub fn part(&self, id: PartId) -> Option<&RigPart> {
        self.parts.get(&id)
    }

    /// Binding for `id`.
    pub fn binding(&self, id: PartId) -> Option<&PartBinding> {
        self.bindings.get(&id)
    }

    /// Back-to-front draw order.
    pub fn render_order(&self) -> &[PartId] {
        &self.render_order
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when the rig has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Every part with its binding, in [`PartId`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&RigPart, &PartBinding)> {
        self.parts
            .iter()
            .filter_map(|(id, part)| self.bindings.get(id).map(|b| (part, b)))
    }
}

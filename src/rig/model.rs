use std::collections::BTreeSet;

use crate::{
    foundation::error::{RigError, RigResult},
    rig::landmark::Landmark,
};

/// Closed set of sprite parts a rig can carry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum PartId {
    Head,
    Body,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
}

impl PartId {
    /// Every part id in declaration order.
    pub const ALL: [PartId; 14] = [
        PartId::Head,
        PartId::Body,
        PartId::LeftUpperArm,
        PartId::LeftLowerArm,
        PartId::LeftHand,
        PartId::RightUpperArm,
        PartId::RightLowerArm,
        PartId::RightHand,
        PartId::LeftUpperLeg,
        PartId::LeftLowerLeg,
        PartId::LeftFoot,
        PartId::RightUpperLeg,
        PartId::RightLowerLeg,
        PartId::RightFoot,
    ];

    /// Stable snake_case identifier, also the image file stem.
    pub const fn as_str(self) -> &'static str {
        match self {
            PartId::Head => "head",
            PartId::Body => "body",
            PartId::LeftUpperArm => "left_upper_arm",
            PartId::LeftLowerArm => "left_lower_arm",
            PartId::LeftHand => "left_hand",
            PartId::RightUpperArm => "right_upper_arm",
            PartId::RightLowerArm => "right_lower_arm",
            PartId::RightHand => "right_hand",
            PartId::LeftUpperLeg => "left_upper_leg",
            PartId::LeftLowerLeg => "left_lower_leg",
            PartId::LeftFoot => "left_foot",
            PartId::RightUpperLeg => "right_upper_leg",
            PartId::RightLowerLeg => "right_lower_leg",
            PartId::RightFoot => "right_foot",
        }
    }

    /// Image file name looked up in the resource directory.
    pub fn file_name(self) -> String {
        format!("{}.png", self.as_str())
    }
}

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pivot point inside a part image, as fractions of its width/height (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Horizontal fraction.
    pub x: f32,
    /// Vertical fraction.
    pub y: f32,
}

impl Anchor {
    /// Image center; also the anchor of placeholder art.
    pub const CENTER: Anchor = Anchor { x: 0.5, y: 0.5 };

    /// Build an anchor from fractions.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn is_valid(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Which landmarks drive a part.
///
/// The part is positioned on `start`. With an `end`, it is rotated to point from `start`
/// toward `end`; without one it is drawn unrotated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PartBinding {
    /// Landmark the part is positioned on.
    pub start: Landmark,
    /// Orientation reference, if any.
    #[serde(default)]
    pub end: Option<Landmark>,
}

impl PartBinding {
    /// Binding oriented from `start` toward `end`.
    pub const fn oriented(start: Landmark, end: Landmark) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Binding without an orientation reference.
    pub const fn fixed(start: Landmark) -> Self {
        Self { start, end: None }
    }
}

/// Static authoring record for one rig part.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PartSpec {
    /// Part identifier.
    pub id: PartId,
    /// Pivot inside the part image.
    pub anchor: Anchor,
    /// Driving landmarks.
    pub binding: PartBinding,
}

/// Typed rig table: parts with their bindings plus the back-to-front draw order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RigDefinition {
    /// One entry per part; ids must be unique.
    pub parts: Vec<PartSpec>,
    /// Back-to-front draw order; later entries draw on top.
    pub render_order: Vec<PartId>,
}

impl Default for RigDefinition {
    fn default() -> Self {
        Self::humanoid()
    }
}

impl RigDefinition {
    /// Fourteen-part humanoid: legs behind the torso, arms in front, head on top.
    pub fn humanoid() -> Self {
        use Landmark as L;
        use PartId as P;

        let part = |id, ax, ay, binding| PartSpec {
            id,
            anchor: Anchor::new(ax, ay),
            binding,
        };

        let parts = vec![
            part(P::Head, 0.5, 0.8, PartBinding::fixed(L::Nose)),
            part(
                P::Body,
                0.5,
                0.2,
                PartBinding::oriented(L::LeftShoulder, L::RightShoulder),
            ),
            part(
                P::LeftUpperArm,
                0.2,
                0.5,
                PartBinding::oriented(L::LeftShoulder, L::LeftElbow),
            ),
            part(
                P::LeftLowerArm,
                0.2,
                0.8,
                PartBinding::oriented(L::LeftElbow, L::LeftWrist),
            ),
            part(
                P::LeftHand,
                0.5,
                0.2,
                PartBinding::oriented(L::LeftWrist, L::LeftPinky),
            ),
            part(
                P::RightUpperArm,
                0.8,
                0.5,
                PartBinding::oriented(L::RightShoulder, L::RightElbow),
            ),
            part(
                P::RightLowerArm,
                0.8,
                0.8,
                PartBinding::oriented(L::RightElbow, L::RightWrist),
            ),
            part(
                P::RightHand,
                0.5,
                0.2,
                PartBinding::oriented(L::RightWrist, L::RightPinky),
            ),
            part(
                P::LeftUpperLeg,
                0.3,
                0.2,
                PartBinding::oriented(L::LeftHip, L::LeftKnee),
            ),
            part(
                P::LeftLowerLeg,
                0.5,
                0.2,
                PartBinding::oriented(L::LeftKnee, L::LeftAnkle),
            ),
            part(
                P::LeftFoot,
                0.5,
                0.2,
                PartBinding::oriented(L::LeftAnkle, L::LeftHeel),
            ),
            part(
                P::RightUpperLeg,
                0.7,
                0.2,
                PartBinding::oriented(L::RightHip, L::RightKnee),
            ),
            part(
                P::RightLowerLeg,
                0.5,
                0.2,
                PartBinding::oriented(L::RightKnee, L::RightAnkle),
            ),
            part(
                P::RightFoot,
                0.5,
                0.2,
                PartBinding::oriented(L::RightAnkle, L::RightHeel),
            ),
        ];

        let render_order = vec![
            P::LeftUpperLeg,
            P::RightUpperLeg,
            P::LeftLowerLeg,
            P::RightLowerLeg,
            P::LeftFoot,
            P::RightFoot,
            P::Body,
            P::LeftUpperArm,
            P::RightUpperArm,
            P::LeftLowerArm,
            P::RightLowerArm,
            P::LeftHand,
            P::RightHand,
            P::Head,
        ];

        Self {
            parts,
            render_order,
        }
    }

    /// Look up the spec of `id`.
    pub fn part(&self, id: PartId) -> Option<&PartSpec> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// Parts that are declared but absent from the render order. They are never drawn.
    pub fn unordered_parts(&self) -> Vec<PartId> {
        self.parts
            .iter()
            .map(|p| p.id)
            .filter(|id| !self.render_order.contains(id))
            .collect()
    }

    /// Reject authoring mistakes before anything is loaded or drawn.
    pub fn validate(&self) -> RigResult<()> {
        if self.parts.is_empty() {
            return Err(RigError::config("rig must declare at least one part"));
        }

        let mut declared = BTreeSet::new();
        for spec in &self.parts {
            if !declared.insert(spec.id) {
                return Err(RigError::config(format!(
                    "part '{}' is declared more than once",
                    spec.id
                )));
            }
            if !spec.anchor.is_valid() {
                return Err(RigError::config(format!(
                    "part '{}' anchor ({}, {}) must lie within [0,1]",
                    spec.id, spec.anchor.x, spec.anchor.y
                )));
            }
        }

        let mut ordered = BTreeSet::new();
        for id in &self.render_order {
            if !declared.contains(id) {
                return Err(RigError::config(format!(
                    "render order references undeclared part '{id}'"
                )));
            }
            if !ordered.insert(*id) {
                return Err(RigError::config(format!(
                    "part '{id}' appears more than once in render order"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/model.rs"]
mod tests;

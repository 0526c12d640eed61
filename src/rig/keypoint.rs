use crate::rig::landmark::Landmark;

/// One detected body landmark.
///
/// `x`/`y` are normalized to `[0, 1]` in detector image space (origin top-left).
/// `visibility` is a `[0, 1]` confidence score.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keypoint {
    /// Normalized horizontal position.
    pub x: f64,
    /// Normalized vertical position (grows downward).
    pub y: f64,
    /// Detector confidence.
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Keypoint {
    /// Fully visible keypoint at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            visibility: 1.0,
        }
    }

    /// Keypoint with an explicit confidence score.
    pub const fn with_visibility(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, visibility }
    }
}

/// Look up `landmark` in a detector sequence; `None` when the sequence is too short.
pub fn keypoint_at(keypoints: &[Keypoint], landmark: Landmark) -> Option<&Keypoint> {
    keypoints.get(landmark.index())
}

/// One recorded detector frame. `keypoints: null` means no figure was detected.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeypointFrame {
    /// Landmarks in detector index order, or `None` for an empty frame.
    #[serde(default)]
    pub keypoints: Option<Vec<Keypoint>>,
}

impl KeypointFrame {
    /// Borrow the keypoints as a slice, if any were detected.
    pub fn as_slice(&self) -> Option<&[Keypoint]> {
        self.keypoints.as_deref()
    }
}

/// A recorded sequence of detector frames.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeypointSequence {
    /// Frames in capture order.
    pub frames: Vec<KeypointFrame>,
}

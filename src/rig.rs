pub(crate) mod keypoint;
pub(crate) mod landmark;
pub(crate) mod model;
pub(crate) mod part;

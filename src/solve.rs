pub(crate) mod normalize;
pub(crate) mod raster;
pub(crate) mod transform;

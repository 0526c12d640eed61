use anyhow::Context;

use crate::foundation::{core::Rgba8, error::RigResult};

/// Side length of placeholder art, in pixels.
pub const PLACEHOLDER_SIZE: u32 = 50;

/// Fill color of placeholder art: half-transparent red.
pub const PLACEHOLDER_COLOR: Rgba8 = Rgba8::new(255, 0, 0, 128);

/// Decode any raster format the `image` crate understands into straight-alpha RGBA8.
pub fn decode_part_image(bytes: &[u8]) -> RigResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode part image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Fixed-size stand-in for a part whose image could not be loaded.
pub fn placeholder_image() -> image::RgbaImage {
    image::RgbaImage::from_pixel(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        PLACEHOLDER_COLOR.into(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

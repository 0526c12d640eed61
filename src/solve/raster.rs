//! Raster operations used by the transform solver: scaling and expanding rotation.

use crate::foundation::{
    core::{Affine, Point},
    math::deg_to_rad,
};

const RIGHT_ANGLE_EPS_DEG: f32 = 1e-4;
const EXTENT_EPS: f64 = 1e-6;

/// Scale by `factor` with bilinear filtering. `1.0` returns an exact copy.
///
/// Output dimensions are `trunc(w * factor)` x `trunc(h * factor)`, at least one pixel.
pub fn scale_image(src: &image::RgbaImage, factor: f32) -> image::RgbaImage {
    if factor == 1.0 {
        return src.clone();
    }
    let (w, h) = src.dimensions();
    let nw = ((w as f32 * factor) as u32).max(1);
    let nh = ((h as f32 * factor) as u32).max(1);
    image::imageops::resize(src, nw, nh, image::imageops::FilterType::Triangle)
}

/// Dimensions of the axis-aligned box enclosing `w`x`h` rotated by `degrees`.
pub fn rotated_extent(w: u32, h: u32, degrees: f32) -> (u32, u32) {
    let rad = deg_to_rad(degrees);
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let (w, h) = (f64::from(w), f64::from(h));
    let rw = (w * cos + h * sin - EXTENT_EPS).ceil().max(1.0);
    let rh = (w * sin + h * cos - EXTENT_EPS).ceil().max(1.0);
    (rw as u32, rh as u32)
}

fn right_angle_turns(degrees: f32) -> Option<u32> {
    let norm = degrees.rem_euclid(360.0);
    for turns in 0..4u32 {
        let target = 90.0 * turns as f32;
        if (norm - target).abs() < RIGHT_ANGLE_EPS_DEG
            || (turns == 0 && (norm - 360.0).abs() < RIGHT_ANGLE_EPS_DEG)
        {
            return Some(turns);
        }
    }
    None
}

/// Affine map from source pixel space to the expanded destination box, rotating
/// counter-clockwise (as seen on screen, y down) by `degrees` about the image center.
pub fn rotation_affine(w: u32, h: u32, degrees: f32) -> Affine {
    let (rw, rh) = rotated_extent(w, h, degrees);
    let src_center = (f64::from(w) / 2.0, f64::from(h) / 2.0);
    let dst_center = (f64::from(rw) / 2.0, f64::from(rh) / 2.0);
    Affine::translate(dst_center)
        * Affine::rotate(-deg_to_rad(degrees))
        * Affine::translate((-src_center.0, -src_center.1))
}

/// Rotate counter-clockwise by `degrees`, expanding the output to the rotated bounding
/// box. Pixels outside the source are fully transparent; sampling is nearest-neighbour.
pub fn rotate_image(src: &image::RgbaImage, degrees: f32) -> image::RgbaImage {
    match right_angle_turns(degrees) {
        Some(0) => return src.clone(),
        Some(1) => return image::imageops::rotate270(src),
        Some(2) => return image::imageops::rotate180(src),
        Some(3) => return image::imageops::rotate90(src),
        _ => {}
    }

    let (w, h) = src.dimensions();
    let (rw, rh) = rotated_extent(w, h, degrees);
    let inverse = rotation_affine(w, h, degrees).inverse();

    let mut out = image::RgbaImage::new(rw, rh);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let p = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        let (sx, sy) = (p.x.floor(), p.y.floor());
        if sx >= 0.0 && sy >= 0.0 && sx < f64::from(w) && sy < f64::from(h) {
            *px = *src.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/solve/raster.rs"]
mod tests;

use crate::{
    foundation::{
        core::{Canvas, Rgba8},
        error::{RigError, RigResult},
    },
    render::blend::over_straight,
};

/// Drawing target for the compositor: anything that can alpha-blit an image at an
/// integer pixel offset.
pub trait Surface {
    /// Surface dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// Alpha-blend `image` with its top-left corner at `top_left`. Parts outside the
    /// surface are clipped.
    fn blit(&mut self, image: &image::RgbaImage, top_left: (i32, i32)) -> RigResult<()>;
}

/// In-memory straight-alpha RGBA8 surface.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSurface {
    image: image::RgbaImage,
}

impl FrameSurface {
    /// Transparent surface of `canvas` size.
    pub fn new(canvas: Canvas) -> RigResult<Self> {
        canvas.validate()?;
        Ok(Self {
            image: image::RgbaImage::new(canvas.width, canvas.height),
        })
    }

    /// Wrap an existing buffer.
    pub fn from_image(image: image::RgbaImage) -> RigResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RigError::render("surface must not be empty"));
        }
        Ok(Self { image })
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let px: image::Rgba<u8> = color.into();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Borrow the pixels.
    pub fn as_image(&self) -> &image::RgbaImage {
        &self.image
    }

    /// Take the pixels.
    pub fn into_image(self) -> image::RgbaImage {
        self.image
    }
}

impl Surface for FrameSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn blit(&mut self, src: &image::RgbaImage, top_left: (i32, i32)) -> RigResult<()> {
        let (dw, dh) = self.image.dimensions();
        let (sw, sh) = src.dimensions();
        let (ox, oy) = (i64::from(top_left.0), i64::from(top_left.1));

        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + i64::from(sw)).min(i64::from(dw));
        let y1 = (oy + i64::from(sh)).min(i64::from(dh));
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let s = src.get_pixel((x - ox) as u32, (y - oy) as u32).0;
                let d = self.image.get_pixel_mut(x as u32, y as u32);
                d.0 = over_straight(d.0, s);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

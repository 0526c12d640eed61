use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(w, h, image::Rgba(px))
}

fn surface(w: u32, h: u32) -> FrameSurface {
    FrameSurface::new(Canvas {
        width: w,
        height: h,
    })
    .unwrap()
}

#[test]
fn new_rejects_empty_canvas() {
    assert!(
        FrameSurface::new(Canvas {
            width: 0,
            height: 4
        })
        .is_err()
    );
    assert!(FrameSurface::from_image(image::RgbaImage::new(0, 0)).is_err());
}

#[test]
fn fill_sets_every_pixel() {
    let mut s = surface(3, 2);
    s.fill(Rgba8::new(240, 248, 255, 255));
    assert!(s.as_image().pixels().all(|p| p.0 == [240, 248, 255, 255]));
}

#[test]
fn blit_opaque_writes_exact_region() {
    let mut s = surface(6, 6);
    s.blit(&solid(2, 3, [9, 8, 7, 255]), (1, 2)).unwrap();

    let img = s.as_image();
    assert_eq!(img.get_pixel(1, 2).0, [9, 8, 7, 255]);
    assert_eq!(img.get_pixel(2, 4).0, [9, 8, 7, 255]);
    assert_eq!(img.get_pixel(0, 2).0, [0, 0, 0, 0]);
    assert_eq!(img.get_pixel(3, 2).0, [0, 0, 0, 0]);
    assert_eq!(img.get_pixel(1, 5).0, [0, 0, 0, 0]);
}

#[test]
fn blit_clips_every_edge_without_panicking() {
    let mut s = surface(4, 4);
    let big = solid(3, 3, [1, 2, 3, 255]);
    for offset in [(-2, -2), (3, -2), (-2, 3), (3, 3), (-100, 0), (0, 100)] {
        s.blit(&big, offset).unwrap();
    }
    assert_eq!(s.as_image().get_pixel(0, 0).0, [1, 2, 3, 255]);
    assert_eq!(s.as_image().get_pixel(3, 3).0, [1, 2, 3, 255]);
    assert_eq!(s.as_image().get_pixel(1, 2).0, [0, 0, 0, 0]);
}

#[test]
fn transparent_pixels_leave_destination_untouched() {
    let mut s = surface(2, 1);
    s.fill(Rgba8::new(50, 60, 70, 255));
    s.blit(&solid(2, 1, [255, 0, 0, 0]), (0, 0)).unwrap();
    assert!(s.as_image().pixels().all(|p| p.0 == [50, 60, 70, 255]));
}

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "rigsprite_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn wide_image_is_centered_with_transparent_margins() {
    let src = image::RgbaImage::from_pixel(40, 10, image::Rgba([0, 255, 0, 255]));
    let out = fit_to_canvas(&src, 20, 20).unwrap();

    assert_eq!(out.dimensions(), (20, 20));
    // 40x10 scales to 20x5, placed at y = 7.
    assert_eq!(out.get_pixel(10, 0).0[3], 0);
    assert_eq!(out.get_pixel(10, 19).0[3], 0);
    let mid = out.get_pixel(10, 9).0;
    assert_eq!(mid[3], 255);
    assert!(mid[1] >= 254);
}

#[test]
fn zero_target_is_rejected() {
    let src = image::RgbaImage::new(2, 2);
    assert!(fit_to_canvas(&src, 0, 10).is_err());
}

#[test]
fn prepare_directory_writes_pngs_and_reports_failures() {
    let input = temp_dir("prep_in");
    let output = temp_dir("prep_out");
    std::fs::create_dir_all(&input).unwrap();

    image::RgbaImage::from_pixel(8, 4, image::Rgba([1, 2, 3, 255]))
        .save_with_format(input.join("head.png"), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(input.join("body.jpg"), b"broken").unwrap();
    std::fs::write(input.join("notes.txt"), b"ignored").unwrap();

    let report = prepare_directory(&input, &output, 16, 16).unwrap();
    assert_eq!(report.written, vec![output.join("head.png")]);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("body.jpg"));

    let written = image::open(output.join("head.png")).unwrap();
    assert_eq!((written.width(), written.height()), (16, 16));

    std::fs::remove_dir_all(&input).ok();
    std::fs::remove_dir_all(&output).ok();
}

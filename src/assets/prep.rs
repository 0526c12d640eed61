//! Offline part-image preparation: fit raw artwork onto uniform transparent canvases.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::decode::decode_part_image,
    foundation::error::{RigError, RigResult},
};

const PREP_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Outcome of [`prepare_directory`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrepReport {
    /// Files written to the output directory.
    pub written: Vec<PathBuf>,
    /// Files that could not be processed, with the cause.
    pub failed: Vec<(PathBuf, String)>,
}

/// Scale `src` to fit inside `width`x`height` preserving aspect ratio, centered on a
/// transparent canvas of exactly that size.
pub fn fit_to_canvas(
    src: &image::RgbaImage,
    width: u32,
    height: u32,
) -> RigResult<image::RgbaImage> {
    if width == 0 || height == 0 {
        return Err(RigError::config("prep target width/height must be > 0"));
    }
    let (sw, sh) = src.dimensions();
    if sw == 0 || sh == 0 {
        return Err(RigError::asset("cannot fit an empty image"));
    }

    let scale = (f64::from(width) / f64::from(sw)).min(f64::from(height) / f64::from(sh));
    let nw = ((f64::from(sw) * scale) as u32).clamp(1, width);
    let nh = ((f64::from(sh) * scale) as u32).clamp(1, height);
    let resized = image::imageops::resize(src, nw, nh, image::imageops::FilterType::Lanczos3);

    let mut out = image::RgbaImage::new(width, height);
    let x = i64::from((width - nw) / 2);
    let y = i64::from((height - nh) / 2);
    image::imageops::overlay(&mut out, &resized, x, y);
    Ok(out)
}

fn has_prep_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PREP_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn prepare_file(src: &Path, dst: &Path, width: u32, height: u32) -> RigResult<()> {
    let bytes = std::fs::read(src).with_context(|| format!("read '{}'", src.display()))?;
    let img = decode_part_image(&bytes)?;
    let fitted = fit_to_canvas(&img, width, height)?;
    fitted
        .save_with_format(dst, image::ImageFormat::Png)
        .with_context(|| format!("write '{}'", dst.display()))?;
    Ok(())
}

/// Fit every `.png`/`.jpg`/`.jpeg` in `input` and write PNGs with the same stem to
/// `output`. Per-file failures are collected, not fatal.
pub fn prepare_directory(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
) -> RigResult<PrepReport> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("create output dir '{}'", output.display()))?;

    let mut files: Vec<PathBuf> = std::fs::read_dir(input)
        .with_context(|| format!("read input dir '{}'", input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_prep_extension(p))
        .collect();
    files.sort();

    if files.is_empty() {
        tracing::warn!(dir = %input.display(), "no part images found");
    }

    let mut report = PrepReport::default();
    for (i, src) in files.iter().enumerate() {
        let Some(stem) = src.file_stem() else {
            continue;
        };
        let dst = output.join(stem).with_extension("png");
        match prepare_file(src, &dst, width, height) {
            Ok(()) => {
                tracing::info!(
                    n = i + 1,
                    total = files.len(),
                    src = %src.display(),
                    "prepared part image"
                );
                report.written.push(dst);
            }
            Err(err) => {
                tracing::warn!(src = %src.display(), error = %err, "failed to prepare part image");
                report.failed.push((src.clone(), err.to_string()));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/prep.rs"]
mod tests;

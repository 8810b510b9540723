// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Image dimension probing and aspect-preserving scaling.

use std::path::Path;

use anyhow::{Context, Result};

use super::density::{DensityProvider, dp_to_px};

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Read the pixel dimensions of an image file without decoding its pixels.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or its header is not a
/// supported image format.
pub fn image_size(path: &Path) -> Result<ImageSize> {
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("Failed to read image dimensions: {:?}", path))?;
    Ok(ImageSize { width, height })
}

/// Scale `input` to a fixed width given in DPs, keeping the aspect ratio.
///
/// Both results are truncated to whole pixels. A zero-width input has no
/// meaningful ratio and maps to a zero height.
pub fn scale_to_width<D>(input: ImageSize, width_dp: f32, density: &D) -> ImageSize
where
    D: DensityProvider + ?Sized,
{
    let width_px = dp_to_px(density, width_dp);
    let height = if input.width == 0 {
        0
    } else {
        (input.height as f32 * width_px / input.width as f32) as u32
    };
    ImageSize {
        width: width_px as u32,
        height,
    }
}

/// Probe `path` and scale its dimensions to a fixed width in DPs.
///
/// # Errors
///
/// Propagates failures from [`image_size`].
pub fn scale_file_to_width<D>(path: &Path, width_dp: f32, density: &D) -> Result<ImageSize>
where
    D: DensityProvider + ?Sized,
{
    Ok(scale_to_width(image_size(path)?, width_dp, density))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{ImageBuffer, Rgba};
    use tempfile::TempDir;

    use super::{ImageSize, image_size, scale_file_to_width, scale_to_width};
    use crate::utils::density::Density;

    // Non-square input guards against reporting the width twice.
    #[test]
    fn image_size_reports_true_width_and_height() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wide.png");
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(40, 10, Rgba([10, 20, 30, 255]));
        img.save(&path).expect("png saved");

        assert_eq!(image_size(&path).unwrap(), ImageSize::new(40, 10));
    }

    #[test]
    fn image_size_errors_on_non_image() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.png");
        fs::write(&path, b"not an image").unwrap();

        assert!(image_size(&path).is_err());
    }

    #[test]
    fn scale_to_width_keeps_aspect_ratio() {
        let scaled = scale_to_width(ImageSize::new(200, 100), 100.0, &Density(2.0));
        assert_eq!(scaled, ImageSize::new(200, 100));

        let scaled = scale_to_width(ImageSize::new(300, 400), 90.0, &Density(1.0));
        assert_eq!(scaled, ImageSize::new(90, 120));
    }

    #[test]
    fn scale_to_width_truncates_fractional_pixels() {
        let scaled = scale_to_width(ImageSize::new(3, 1), 10.0, &Density(1.0));
        assert_eq!(scaled, ImageSize::new(10, 3));
    }

    #[test]
    fn scale_to_width_handles_zero_width_input() {
        let scaled = scale_to_width(ImageSize::new(0, 50), 10.0, &Density(1.0));
        assert_eq!(scaled, ImageSize::new(10, 0));
    }

    #[test]
    fn scale_file_to_width_probes_then_scales() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tall.png");
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(10, 20, Rgba([0, 0, 0, 255]));
        img.save(&path).unwrap();

        let scaled = scale_file_to_width(&path, 50.0, &Density(2.0)).unwrap();

        assert_eq!(scaled, ImageSize::new(100, 200));
    }
}

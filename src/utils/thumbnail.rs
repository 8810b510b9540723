// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Square chip thumbnails ready to upload as egui textures.

use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;

use super::density::{DensityProvider, dp_to_px};

/// Edge length of a chip thumbnail in DPs.
pub const CHIP_SIZE_DP: f32 = 35.0;

/// Decode `path` and stretch it into a `CHIP_SIZE_DP` square.
///
/// Uses nearest-neighbour sampling; chips are tiny and stay crisp without
/// filtering. The edge is at least one pixel.
///
/// # Errors
///
/// Returns an error when the file cannot be read or decoded.
pub fn chip_thumbnail<D>(path: &Path, density: &D) -> Result<egui::ColorImage>
where
    D: DensityProvider + ?Sized,
{
    let side = (dp_to_px(density, CHIP_SIZE_DP) as u32).max(1);
    let decoded =
        image::open(path).with_context(|| format!("Failed to decode image: {:?}", path))?;
    let resized = decoded
        .resize_exact(side, side, FilterType::Nearest)
        .to_rgba8();
    let size = [resized.width() as usize, resized.height() as usize];
    let pixels = resized.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

/// Return true when the path's extension maps to an `image/*` MIME type.
pub fn is_image(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE)
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Density-independent pixel (DP) to physical pixel conversion.

use egui::Context;

/// Anything that knows how many physical pixels make up one DP.
pub trait DensityProvider {
    fn pixels_per_point(&self) -> f32;
}

impl DensityProvider for Context {
    fn pixels_per_point(&self) -> f32 {
        Context::pixels_per_point(self)
    }
}

/// Fixed density, useful off the UI thread or in tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(pub f32);

impl DensityProvider for Density {
    fn pixels_per_point(&self) -> f32 {
        self.0
    }
}

/// Convert DPs into physical pixels for the given density.
pub fn dp_to_px<D: DensityProvider + ?Sized>(density: &D, dp: f32) -> f32 {
    dp * density.pixels_per_point()
}

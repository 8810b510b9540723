// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Stateless helpers reused across the UI.

pub mod content;
pub mod density;
pub mod focus;
pub mod image_size;
pub mod report;
pub mod temp_file;
pub mod text;
pub mod thumbnail;

/// Resolve locators and copy their bytes into temporary files.
pub use content::{ContentResolver, FileResolver, copy_locator_to_temporary_file};
/// Convert DPs into physical pixels.
pub use density::{Density, DensityProvider, dp_to_px};
/// Dismiss the on-screen keyboard.
pub use focus::{hide_keyboard, hide_keyboard_from};
/// Probe and scale image dimensions.
pub use image_size::{ImageSize, image_size, scale_file_to_width, scale_to_width};
/// Surface errors to users.
pub use report::{GENERIC_ERROR_MESSAGE, report_error};
/// Materialize byte streams into temporary files.
pub use temp_file::{
    ByteSource, CopyError, CopyOptions, ReaderSource, TemporaryFile, copy_to_temporary_file,
    copy_to_temporary_file_with, create_temporary_file, create_temporary_file_in,
};
/// Validate and encode form input.
pub use text::{encode_email, is_email_valid, is_name_valid};
/// Build chip thumbnails.
pub use thumbnail::{CHIP_SIZE_DP, chip_thumbnail, is_image};

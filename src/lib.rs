// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Small, stateless helpers for egui applications.
//!
//! The centerpiece is [`utils::copy_to_temporary_file`], which drains a
//! caller-owned byte stream into a uniquely named temporary file. The rest
//! covers DP/pixel conversion, image sizing, chip thumbnails, keyboard
//! dismissal and form input checks. [`worker::CopyWorker`] runs copies off
//! the UI thread.

pub mod utils;
pub mod worker;

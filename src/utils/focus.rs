// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Keyboard dismissal for text inputs.
//!
//! egui shows the on-screen keyboard (and IME) only while a text widget holds
//! focus, so giving focus up is what closes it.

use egui::{Context, Id, Response};

/// Drop keyboard focus from the widget identified by `id`.
///
/// Does nothing when another widget (or none) holds focus.
pub fn hide_keyboard(ctx: &Context, id: Id) {
    ctx.memory_mut(|mem| mem.surrender_focus(id));
}

/// Drop keyboard focus from the widget behind `response`.
pub fn hide_keyboard_from(response: &Response) {
    response.surrender_focus();
}

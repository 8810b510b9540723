// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Turn internal errors into a user-facing status message.

use std::error::Error;

/// Shown to users whenever an operation fails unexpectedly.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong ¯\\_(ツ)_/¯";

/// Log the full error chain and return the generic message for the status bar.
pub fn report_error(err: &(dyn Error + 'static)) -> String {
    log::error!("{}", format_chain(err));
    GENERIC_ERROR_MESSAGE.to_string()
}

/// `outer: inner: root` rendering of an error and its sources.
pub fn format_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        current = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io;

    use anyhow::Context;

    use super::{GENERIC_ERROR_MESSAGE, format_chain, report_error};

    #[test]
    fn report_error_returns_generic_message() {
        let err = io::Error::other("disk full");
        assert_eq!(report_error(&err), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn format_chain_includes_every_cause() {
        let err = Err::<(), _>(io::Error::other("disk full"))
            .context("Failed to save thumbnail")
            .unwrap_err();

        assert_eq!(
            format_chain(err.as_ref()),
            "Failed to save thumbnail: disk full"
        );
    }
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Form input checks and email key encoding.

use email_address::EmailAddress;

/// A display name needs more than two characters.
pub fn is_name_valid(name: &str) -> bool {
    name.chars().count() > 2
}

/// Syntactic email validation (RFC 5322 address spec).
pub fn is_email_valid(email: &str) -> bool {
    EmailAddress::is_valid(email)
}

/// Encode an email so it can be used as a path segment or key.
///
/// Only `.` and `@` are rewritten (`%2E` and `%40`); other characters pass
/// through untouched.
pub fn encode_email(email: &str) -> String {
    email.replace('.', "%2E").replace('@', "%40")
}

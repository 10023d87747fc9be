// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of external tool output.
//!
//! ```text
//! raw line bytes --(valid UTF-8?)--> borrowed &str
//!                \--(otherwise)----> Windows-1252 decode
//! ```
//!
//! The model builder and `taskkill` write in the console's ANSI code page on
//! most Windows installs, so anything that is not UTF-8 is read as CP1252.

use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

/// Decodes one chunk of process output to UTF-8.
///
/// # Example
/// ```
/// use modbuild_rs::utility::encoding::decode_output;
///
/// assert_eq!(decode_output(b"caf\xe9"), "café");
/// assert_eq!(decode_output("plain".as_bytes()), "plain");
/// ```
#[must_use]
pub fn decode_output(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

/// Decodes a single line, dropping the trailing `\r` left by CRLF output.
#[must_use]
pub fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    decode_output(bytes).into_owned()
}

#[cfg(test)]
mod tests;

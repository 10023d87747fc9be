// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::borrow::Cow;

use super::{decode_line, decode_output};

#[test]
fn test_utf8_is_borrowed() {
    let input = "Hello, 世界!";
    let result = decode_output(input.as_bytes());
    assert!(matches!(result, Cow::Borrowed(_)));
    insta::assert_snapshot!(result, @"Hello, 世界!");
}

#[test]
fn test_windows_1252_fallback() {
    // "Fehler: Übergröße" as CP1252 bytes
    let input = b"Fehler: \xdcbergr\xf6\xdfe";
    insta::assert_snapshot!(decode_output(input), @"Fehler: Übergröße");
}

#[test]
fn test_decode_line_strips_carriage_return() {
    assert_eq!(decode_line(b"Model built\r"), "Model built");
    assert_eq!(decode_line(b"no cr"), "no cr");
    assert_eq!(decode_line(b""), "");
}

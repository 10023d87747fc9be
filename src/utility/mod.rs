// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_output()  UTF-8, falling back to Windows-1252
//! fs
//!   walk:    parallel_map_files(), find_files(), WalkOptions
//!   atomic:  write_atomic(), copy_atomic()
//! ```

pub mod encoding;
pub mod fs;

// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and crash-safe writes.
//!
//! ```text
//! walk:    parallel_map_files()  ignore::WalkParallel + flume, per-file callback
//!          find_files()          glob pattern matching
//!          WalkOptions           max_depth, hidden, gitignore, threads
//! atomic:  write_atomic()        temp sibling + fsync + rename
//!          copy_atomic()         same, streaming from a source file
//! ```

pub mod atomic;
pub mod walk;

// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process management.
//!
//! ```text
//!              core
//!               |
//!        +------+------+
//!        |             |
//!        v             v
//!     process      lifecycle
//!        |             |
//!     Builder      ProcessTable (ToolHelp32, /proc, ps)
//!     Output       stop_all: signal -> wait -> kill -> verify
//!     detached     start: primary + companions
//! ```

pub mod lifecycle;
pub mod process;

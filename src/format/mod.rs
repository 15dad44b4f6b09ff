// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Markup formats consumed by the rendering engine.

pub mod bpmn;

pub use bpmn::{parse_process, BpmnParseError, ParsedProcess};

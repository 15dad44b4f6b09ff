// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Undine: terminal BPMN studio.
//!
//! Describe a business process in plain language, submit it to a generation backend, and
//! review the returned BPMN diagram and explanation without leaving the terminal.

pub mod client;
pub mod config;
pub mod controller;
pub mod engine;
pub mod format;
pub mod layout;
pub mod model;
pub mod render;
pub mod tui;
pub mod widget;

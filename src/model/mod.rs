// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Core data model: the backend wire contract and the parsed process graph.

pub mod fixtures;
pub mod process;
pub mod wire;

pub use process::{NodeKind, ProcessModel, ProcessNode, SequenceFlow};
pub use wire::{GenerationRequest, GenerationResult, ValidationOutcome};

// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Wire types for the generation backend.
//!
//! The backend owns the contract; these types only mirror it. Unknown response fields (the
//! backend also ships a `process_info` blob) are ignored on decode.

use serde::{Deserialize, Serialize};

/// Body of `POST /generate-bpmn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub text: String,
}

/// Backend judgement of the generated diagram, descriptive only; it never gates rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: String,
}

/// A completed generation. Immutable once received; each new result replaces the previous
/// one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub bpmn_xml: String,
    pub validation: ValidationOutcome,
    pub explanation: String,
}

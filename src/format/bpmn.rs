// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! BPMN 2.0 interchange markup parser.
//!
//! A deliberately small reader for the XML dialect the generation backend emits: it scans
//! start tags, reads their attributes, and collects the flow nodes and sequence flows of the
//! first `process` element. Structural and diagram-interchange elements (`definitions`,
//! `BPMNDiagram`, `BPMNShape`, …) are ignored. Flow-node kinds the renderer cannot draw are
//! skipped with a non-fatal warning, mirroring how import warnings are treated downstream.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use memchr::memchr;
use regex::Regex;
use smol_str::SmolStr;

use crate::model::{NodeKind, ProcessModel, ProcessNode, SequenceFlow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BpmnParseError {
    EmptyMarkup,
    UnterminatedTag { offset: usize },
    UnterminatedComment { offset: usize },
    MissingProcess,
    MissingAttribute { element: String, attribute: &'static str },
    DanglingFlow { flow: String, reference: String },
}

impl fmt::Display for BpmnParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMarkup => f.write_str("markup is empty"),
            Self::UnterminatedTag { offset } => {
                write!(f, "unterminated tag at byte offset {offset}")
            }
            Self::UnterminatedComment { offset } => {
                write!(f, "unterminated comment at byte offset {offset}")
            }
            Self::MissingProcess => f.write_str("markup contains no <process> element"),
            Self::MissingAttribute { element, attribute } => {
                write!(f, "<{element}> is missing required attribute '{attribute}'")
            }
            Self::DanglingFlow { flow, reference } => {
                write!(f, "sequence flow '{flow}' references unknown node '{reference}'")
            }
        }
    }
}

impl std::error::Error for BpmnParseError {}

/// Parse output: the process model plus non-fatal import warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProcess {
    model: ProcessModel,
    warnings: Vec<String>,
}

impl ParsedProcess {
    pub fn model(&self) -> &ProcessModel {
        &self.model
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_parts(self) -> (ProcessModel, Vec<String>) {
        (self.model, self.warnings)
    }
}

// Flow-node elements the renderer has no drawing for. Flows touching them are dropped with
// a warning instead of failing the whole import.
const UNSUPPORTED_FLOW_NODES: &[&str] = &[
    "subProcess",
    "callActivity",
    "intermediateCatchEvent",
    "intermediateThrowEvent",
    "boundaryEvent",
    "inclusiveGateway",
    "eventBasedGateway",
    "complexGateway",
];

fn attr_regex() -> &'static Regex {
    static ATTR_RE: OnceLock<Regex> = OnceLock::new();
    ATTR_RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_.:-]*)\s*=\s*"([^"]*)""#).expect("attribute regex")
    })
}

fn attr(tag_attrs: &str, name: &str) -> Option<String> {
    attr_regex().captures_iter(tag_attrs).find_map(|captures| {
        if &captures[1] == name {
            Some(unescape_entities(&captures[2]))
        } else {
            None
        }
    })
}

fn unescape_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_owned();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

struct RawFlow {
    id: SmolStr,
    source: SmolStr,
    target: SmolStr,
    label: Option<String>,
}

/// Parses BPMN markup into a [`ProcessModel`].
pub fn parse_process(markup: &str) -> Result<ParsedProcess, BpmnParseError> {
    if markup.trim().is_empty() {
        return Err(BpmnParseError::EmptyMarkup);
    }

    let bytes = markup.as_bytes();
    let mut model = ProcessModel::default();
    let mut warnings = Vec::new();
    let mut raw_flows = Vec::<RawFlow>::new();
    let mut skipped_ids = BTreeSet::<SmolStr>::new();
    let mut process_seen = false;
    let mut anonymous_flows = 0usize;

    let mut pos = 0usize;
    while let Some(offset) = memchr(b'<', &bytes[pos..]) {
        let start = pos + offset;

        if bytes[start..].starts_with(b"<!--") {
            let Some(end) = find_bytes(&bytes[start..], b"-->") else {
                return Err(BpmnParseError::UnterminatedComment { offset: start });
            };
            pos = start + end + 3;
            continue;
        }

        let Some(close) = memchr(b'>', &bytes[start..]) else {
            return Err(BpmnParseError::UnterminatedTag { offset: start });
        };
        let end = start + close;
        pos = end + 1;

        let tag = markup[start + 1..end].trim();
        // Declarations, doctypes, and end tags carry nothing the model needs.
        if tag.starts_with('?') || tag.starts_with('!') || tag.starts_with('/') || tag.is_empty() {
            continue;
        }
        let tag = tag.trim_end_matches('/').trim_end();

        let name_end = tag.find(char::is_whitespace).unwrap_or(tag.len());
        let qualified = &tag[..name_end];
        let local = qualified.rsplit(':').next().unwrap_or(qualified);
        let attrs = &tag[name_end..];

        match local {
            "process" => {
                if !process_seen {
                    process_seen = true;
                    if let Some(name) = attr(attrs, "name") {
                        model.set_name(name);
                    }
                }
            }
            "startEvent" => push_node(&mut model, local, attrs, NodeKind::StartEvent)?,
            "endEvent" => push_node(&mut model, local, attrs, NodeKind::EndEvent)?,
            "task" | "userTask" | "serviceTask" | "scriptTask" | "manualTask" | "sendTask"
            | "receiveTask" | "businessRuleTask" => {
                push_node(&mut model, local, attrs, NodeKind::Task)?;
            }
            "exclusiveGateway" => push_node(&mut model, local, attrs, NodeKind::ExclusiveGateway)?,
            "parallelGateway" => push_node(&mut model, local, attrs, NodeKind::ParallelGateway)?,
            "sequenceFlow" => {
                let source = attr(attrs, "sourceRef").ok_or(BpmnParseError::MissingAttribute {
                    element: local.to_owned(),
                    attribute: "sourceRef",
                })?;
                let target = attr(attrs, "targetRef").ok_or(BpmnParseError::MissingAttribute {
                    element: local.to_owned(),
                    attribute: "targetRef",
                })?;
                let id = attr(attrs, "id").map(SmolStr::from).unwrap_or_else(|| {
                    anonymous_flows += 1;
                    SmolStr::from(format!("flow-{anonymous_flows}"))
                });
                raw_flows.push(RawFlow {
                    id,
                    source: SmolStr::from(source),
                    target: SmolStr::from(target),
                    label: attr(attrs, "name").filter(|label| !label.trim().is_empty()),
                });
            }
            _ if UNSUPPORTED_FLOW_NODES.contains(&local) => {
                let id = attr(attrs, "id").unwrap_or_default();
                if id.is_empty() {
                    warnings.push(format!("unsupported element <{local}> skipped"));
                } else {
                    warnings.push(format!("unsupported element <{local}> '{id}' skipped"));
                    skipped_ids.insert(SmolStr::from(id));
                }
            }
            _ => {}
        }
    }

    if !process_seen {
        return Err(BpmnParseError::MissingProcess);
    }

    for raw in raw_flows {
        let mut skipped_reference = None;
        for reference in [&raw.source, &raw.target] {
            if skipped_ids.contains(reference) {
                skipped_reference = Some(reference.clone());
                break;
            }
            if model.node_index(reference).is_none() {
                return Err(BpmnParseError::DanglingFlow {
                    flow: raw.id.to_string(),
                    reference: reference.to_string(),
                });
            }
        }
        if let Some(reference) = skipped_reference {
            warnings
                .push(format!("flow '{}' touches skipped element '{reference}'; dropped", raw.id));
            continue;
        }
        model.push_flow(SequenceFlow::new(raw.id, raw.source, raw.target, raw.label));
    }

    Ok(ParsedProcess { model, warnings })
}

fn push_node(
    model: &mut ProcessModel,
    element: &str,
    attrs: &str,
    kind: NodeKind,
) -> Result<(), BpmnParseError> {
    let id = attr(attrs, "id").ok_or(BpmnParseError::MissingAttribute {
        element: element.to_owned(),
        attribute: "id",
    })?;
    let label = attr(attrs, "name").filter(|name| !name.trim().is_empty()).unwrap_or_else(|| id.clone());
    model.push_node(ProcessNode::new(SmolStr::from(id), label, kind));
    Ok(())
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

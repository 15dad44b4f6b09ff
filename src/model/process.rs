// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Parsed form of a BPMN process: flow nodes plus the sequence flows connecting them.

use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    StartEvent,
    EndEvent,
    Task,
    ExclusiveGateway,
    ParallelGateway,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessNode {
    id: SmolStr,
    label: String,
    kind: NodeKind,
}

impl ProcessNode {
    pub fn new(id: impl Into<SmolStr>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self { id: id.into(), label: label.into(), kind }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFlow {
    id: SmolStr,
    source: SmolStr,
    target: SmolStr,
    label: Option<String>,
}

impl SequenceFlow {
    pub fn new(
        id: impl Into<SmolStr>,
        source: impl Into<SmolStr>,
        target: impl Into<SmolStr>,
        label: Option<String>,
    ) -> Self {
        Self { id: id.into(), source: source.into(), target: target.into(), label }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A single BPMN process in document order. Node and flow order is the order of appearance
/// in the markup, which layout uses as the tie-breaker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessModel {
    name: String,
    nodes: Vec<ProcessNode>,
    flows: Vec<SequenceFlow>,
}

impl ProcessModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn nodes(&self) -> &[ProcessNode] {
        &self.nodes
    }

    pub fn flows(&self) -> &[SequenceFlow] {
        &self.flows
    }

    pub fn push_node(&mut self, node: ProcessNode) {
        self.nodes.push(node);
    }

    pub fn push_flow(&mut self, flow: SequenceFlow) {
        self.flows.push(flow);
    }

    /// Index of the first node with the given id.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeKind, ProcessModel, ProcessNode, SequenceFlow};

    #[test]
    fn node_index_finds_first_match() {
        let mut model = ProcessModel::default();
        model.push_node(ProcessNode::new("a", "A", NodeKind::StartEvent));
        model.push_node(ProcessNode::new("b", "B", NodeKind::Task));

        assert_eq!(model.node_index("b"), Some(1));
        assert_eq!(model.node_index("c"), None);
    }

    #[test]
    fn flow_label_is_optional() {
        let flow = SequenceFlow::new("f1", "a", "b", None);
        assert_eq!(flow.label(), None);

        let flow = SequenceFlow::new("f2", "a", "b", Some("yes".to_owned()));
        assert_eq!(flow.label(), Some("yes"));
    }
}

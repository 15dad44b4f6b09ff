// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Linearizes a process graph into the vertical row order the renderer draws.
//!
//! Nodes are visited depth-first along sequence flows, starting from start events (then any
//! node without incoming flows), with document order breaking ties. Branches of a gateway are
//! therefore emitted one after the other, each introduced by its flow's condition label.
//! Nodes unreachable from any root are appended in document order so nothing is dropped.

use smallvec::SmallVec;

use crate::model::ProcessModel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRow {
    node: usize,
    incoming_label: Option<String>,
}

impl LayoutRow {
    /// Index into `model.nodes()`.
    pub fn node(&self) -> usize {
        self.node
    }

    /// Condition label of the flow this row was reached through.
    pub fn incoming_label(&self) -> Option<&str> {
        self.incoming_label.as_deref()
    }
}

pub fn layout_process(model: &ProcessModel) -> Vec<LayoutRow> {
    let node_count = model.nodes().len();
    let mut outgoing: Vec<SmallVec<[(usize, usize); 2]>> = vec![SmallVec::new(); node_count];
    let mut has_incoming = vec![false; node_count];

    for (flow_idx, flow) in model.flows().iter().enumerate() {
        let (Some(source), Some(target)) =
            (model.node_index(flow.source()), model.node_index(flow.target()))
        else {
            continue;
        };
        outgoing[source].push((target, flow_idx));
        has_incoming[target] = true;
    }

    let mut roots: Vec<usize> = model
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind() == crate::model::NodeKind::StartEvent)
        .map(|(idx, _)| idx)
        .collect();
    for idx in 0..node_count {
        if !has_incoming[idx] && !roots.contains(&idx) {
            roots.push(idx);
        }
    }

    let mut rows = Vec::with_capacity(node_count);
    let mut visited = vec![false; node_count];
    let mut stack: Vec<(usize, Option<usize>)> =
        roots.into_iter().rev().map(|idx| (idx, None)).collect();

    while let Some((idx, via_flow)) = stack.pop() {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        rows.push(LayoutRow {
            node: idx,
            incoming_label: via_flow
                .and_then(|flow_idx| model.flows()[flow_idx].label().map(str::to_owned)),
        });
        for &(target, flow_idx) in outgoing[idx].iter().rev() {
            if !visited[target] {
                stack.push((target, Some(flow_idx)));
            }
        }
    }

    for idx in 0..node_count {
        if !visited[idx] {
            rows.push(LayoutRow { node: idx, incoming_label: None });
        }
    }

    rows
}

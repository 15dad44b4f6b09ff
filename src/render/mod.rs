// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Unicode rendering of a process model.
//!
//! One node per row, centered on a shared column, connected by `│`/`▼` with the flow's
//! condition label next to the connector. Tasks are boxed, start events drawn as `( … )`,
//! end events as `(( … ))`, exclusive gateways as `< … >`, parallel gateways as `<< … >>`.
//! Lines never carry trailing spaces.

use crate::layout::layout_process;
use crate::model::{NodeKind, ProcessModel, ProcessNode};

/// Renders the process into diagram text, one `\n`-separated line per row.
pub fn render_process_unicode(model: &ProcessModel) -> String {
    let rows = layout_process(model);
    if rows.is_empty() {
        return model.name().to_owned();
    }

    let blocks: Vec<Vec<String>> =
        rows.iter().map(|row| node_block(&model.nodes()[row.node()])).collect();

    let mut width = blocks
        .iter()
        .flat_map(|block| block.iter())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    if !model.name().is_empty() {
        width = width.max(model.name().chars().count());
    }
    let connector_column = width.saturating_sub(1) / 2;

    let mut lines = Vec::new();
    if !model.name().is_empty() {
        lines.push(centered(model.name(), width));
        lines.push(String::new());
    }

    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            let mut drop_line = pad(connector_column);
            drop_line.push('│');
            if let Some(label) = rows[idx].incoming_label() {
                drop_line.push(' ');
                drop_line.push_str(label);
            }
            lines.push(drop_line);

            let mut head_line = pad(connector_column);
            head_line.push('▼');
            lines.push(head_line);
        }
        for line in block {
            lines.push(centered(line, width));
        }
    }

    lines.join("\n")
}

fn node_block(node: &ProcessNode) -> Vec<String> {
    let label = node.label();
    match node.kind() {
        NodeKind::StartEvent => vec![format!("( {label} )")],
        NodeKind::EndEvent => vec![format!("(( {label} ))")],
        NodeKind::ExclusiveGateway => vec![format!("< {label} >")],
        NodeKind::ParallelGateway => vec![format!("<< {label} >>")],
        NodeKind::Task => {
            let interior = label.chars().count() + 2;
            let bar = "─".repeat(interior);
            vec![format!("┌{bar}┐"), format!("│ {label} │"), format!("└{bar}┘")]
        }
    }
}

fn centered(line: &str, width: usize) -> String {
    let line_width = line.chars().count();
    if line_width >= width {
        return line.to_owned();
    }
    let mut padded = pad((width - line_width) / 2);
    padded.push_str(line);
    padded
}

fn pad(count: usize) -> String {
    " ".repeat(count)
}

#[cfg(test)]
mod tests {
    use super::render_process_unicode;
    use crate::model::{NodeKind, ProcessModel, ProcessNode, SequenceFlow};

    #[test]
    fn snapshot_linear_chain() {
        let mut model = ProcessModel::default();
        model.push_node(ProcessNode::new("s", "Go", NodeKind::StartEvent));
        model.push_node(ProcessNode::new("t", "Check", NodeKind::Task));
        model.push_node(ProcessNode::new("e", "Ok", NodeKind::EndEvent));
        model.push_flow(SequenceFlow::new("f1", "s", "t", None));
        model.push_flow(SequenceFlow::new("f2", "t", "e", None));

        let rendered = render_process_unicode(&model);
        assert_eq!(
            rendered,
            " ( Go )\n    │\n    ▼\n┌───────┐\n│ Check │\n└───────┘\n    │\n    ▼\n(( Ok ))"
        );
    }

    #[test]
    fn snapshot_gateway_branch_labels() {
        let mut model = ProcessModel::default();
        model.push_node(ProcessNode::new("g", "Ok?", NodeKind::ExclusiveGateway));
        model.push_node(ProcessNode::new("p", "Pay", NodeKind::Task));
        model.push_node(ProcessNode::new("s", "Stop", NodeKind::Task));
        model.push_flow(SequenceFlow::new("f1", "g", "p", Some("yes".to_owned())));
        model.push_flow(SequenceFlow::new("f2", "g", "s", Some("no".to_owned())));

        let rendered = render_process_unicode(&model);
        assert_eq!(
            rendered,
            "< Ok? >\n   │ yes\n   ▼\n┌─────┐\n│ Pay │\n└─────┘\n   │ no\n   ▼\n┌──────┐\n│ Stop │\n└──────┘"
        );
    }

    #[test]
    fn process_name_becomes_title_line() {
        let mut model = ProcessModel::default();
        model.set_name("Leave");
        model.push_node(ProcessNode::new("t", "Approve", NodeKind::Task));

        let rendered = render_process_unicode(&model);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0].trim(), "Leave");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "┌─────────┐");
    }

    #[test]
    fn empty_model_renders_empty() {
        assert_eq!(render_process_unicode(&ProcessModel::default()), "");
    }

    #[test]
    fn no_trailing_spaces() {
        let mut model = ProcessModel::default();
        model.push_node(ProcessNode::new("s", "Start here", NodeKind::StartEvent));
        model.push_node(ProcessNode::new("e", "X", NodeKind::EndEvent));
        model.push_flow(SequenceFlow::new("f", "s", "e", None));

        let rendered = render_process_unicode(&model);
        assert!(rendered.lines().all(|line| !line.ends_with(' ')));
    }
}

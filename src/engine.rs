// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! The diagram rendering engine.
//!
//! [`DiagramEngine`] is the full contract the widget layer depends on: import markup (returning
//! non-fatal warnings), reset the camera, destroy. [`BpmnEngine`] is the built-in
//! implementation: it parses BPMN markup, renders it to unicode text, and keeps the camera
//! (scroll offsets) for the viewport it is drawn into.
//!
//! Lifecycle rules: an engine accepts imports only between construction and [`destroy`];
//! imports on a destroyed engine are no-ops. A failed import leaves the previously rendered
//! content untouched.
//!
//! [`destroy`]: DiagramEngine::destroy

use std::fmt;

use crate::format::bpmn::{parse_process, BpmnParseError};
use crate::render::render_process_unicode;

/// Result of a successful import: the warnings the caller may want to log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    warnings: Vec<String>,
}

impl ImportOutcome {
    pub fn new(warnings: Vec<String>) -> Self {
        Self { warnings }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    Parse(BpmnParseError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "markup import failed: {err}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<BpmnParseError> for ImportError {
    fn from(value: BpmnParseError) -> Self {
        Self::Parse(value)
    }
}

/// The rendering-engine contract the widget owns an instance of.
pub trait DiagramEngine {
    /// Parses and renders the markup, replacing any previous content wholesale.
    fn import_markup(&mut self, markup: &str) -> Result<ImportOutcome, ImportError>;

    /// Resets the camera so the next draw shows the content from its origin.
    fn fit_viewport_to_content(&mut self);

    /// Releases the instance; all later calls are no-ops.
    fn destroy(&mut self);
}

/// Built-in engine rendering BPMN markup as unicode text.
#[derive(Debug, Default)]
pub struct BpmnEngine {
    lines: Vec<String>,
    content_width: usize,
    scroll_x: usize,
    scroll_y: usize,
    fit_pending: bool,
    destroyed: bool,
    viewport: (usize, usize),
}

impl BpmnEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_content(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn content_size(&self) -> (usize, usize) {
        (self.content_width, self.lines.len())
    }

    pub fn scroll(&self) -> (usize, usize) {
        (self.scroll_x, self.scroll_y)
    }

    /// Moves the camera, clamped so the viewport never scrolls past the content.
    pub fn scroll_by(&mut self, dx: isize, dy: isize) {
        if self.destroyed {
            return;
        }
        let (viewport_width, viewport_height) = self.viewport;
        let max_x = self.content_width.saturating_sub(viewport_width);
        let max_y = self.lines.len().saturating_sub(viewport_height);
        self.scroll_x = self.scroll_x.saturating_add_signed(dx).min(max_x);
        self.scroll_y = self.scroll_y.saturating_add_signed(dy).min(max_y);
    }

    /// The lines visible through a viewport of the given size, with the content centered when
    /// it is smaller than the viewport. Applies any pending fit first.
    pub fn visible_lines(&mut self, width: usize, height: usize) -> Vec<String> {
        self.viewport = (width, height);
        if self.fit_pending {
            self.scroll_x = 0;
            self.scroll_y = 0;
            self.fit_pending = false;
        }

        let top_pad = (height.saturating_sub(self.lines.len())) / 2;
        let left_pad = (width.saturating_sub(self.content_width)) / 2;

        let mut out = Vec::with_capacity(height.min(top_pad + self.lines.len()));
        out.resize(top_pad, String::new());
        for line in self.lines.iter().skip(self.scroll_y).take(height.saturating_sub(top_pad)) {
            let visible: String =
                line.chars().skip(self.scroll_x).take(width.saturating_sub(left_pad)).collect();
            if left_pad > 0 && !visible.is_empty() {
                out.push(format!("{}{visible}", " ".repeat(left_pad)));
            } else {
                out.push(visible);
            }
        }
        out
    }
}

impl DiagramEngine for BpmnEngine {
    fn import_markup(&mut self, markup: &str) -> Result<ImportOutcome, ImportError> {
        if self.destroyed {
            tracing::debug!("import on destroyed engine ignored");
            return Ok(ImportOutcome::default());
        }

        let (model, warnings) = parse_process(markup)?.into_parts();
        let rendered = render_process_unicode(&model);

        self.lines = if rendered.is_empty() {
            Vec::new()
        } else {
            rendered.lines().map(str::to_owned).collect()
        };
        self.content_width =
            self.lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        Ok(ImportOutcome::new(warnings))
    }

    fn fit_viewport_to_content(&mut self) {
        if !self.destroyed {
            self.fit_pending = true;
        }
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.lines.clear();
        self.content_width = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{BpmnEngine, DiagramEngine, ImportError};
    use crate::format::bpmn::BpmnParseError;
    use crate::model::fixtures::SAMPLE_BPMN_XML;

    const TINY_PROCESS: &str = r#"
        <process id="p">
          <startEvent id="s" name="Go"/>
          <endEvent id="e" name="Done"/>
          <sequenceFlow id="f" sourceRef="s" targetRef="e"/>
        </process>"#;

    #[test]
    fn import_replaces_content() {
        let mut engine = BpmnEngine::new();
        assert!(!engine.has_content());

        let outcome = engine.import_markup(SAMPLE_BPMN_XML).expect("import sample");
        assert!(outcome.warnings().is_empty());
        assert!(engine.has_content());
        let sample_size = engine.content_size();

        engine.import_markup(TINY_PROCESS).expect("import tiny");
        assert!(engine.content_size().1 < sample_size.1);
    }

    #[test]
    fn failed_import_keeps_previous_content() {
        let mut engine = BpmnEngine::new();
        engine.import_markup(TINY_PROCESS).expect("import tiny");
        let before = engine.content_size();

        let err = engine.import_markup("<xml/>").unwrap_err();
        assert_eq!(err, ImportError::Parse(BpmnParseError::MissingProcess));
        assert_eq!(engine.content_size(), before);
    }

    #[test]
    fn fit_resets_camera_on_next_draw() {
        let mut engine = BpmnEngine::new();
        engine.import_markup(SAMPLE_BPMN_XML).expect("import sample");

        engine.visible_lines(10, 5);
        engine.scroll_by(3, 4);
        assert_eq!(engine.scroll(), (3, 4));

        engine.fit_viewport_to_content();
        engine.visible_lines(10, 5);
        assert_eq!(engine.scroll(), (0, 0));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut engine = BpmnEngine::new();
        engine.import_markup(TINY_PROCESS).expect("import tiny");
        let (width, height) = engine.content_size();

        engine.visible_lines(width + 10, height + 10);
        engine.scroll_by(100, 100);
        assert_eq!(engine.scroll(), (0, 0));
    }

    #[test]
    fn small_content_is_centered() {
        let mut engine = BpmnEngine::new();
        engine.import_markup(TINY_PROCESS).expect("import tiny");
        let (_, height) = engine.content_size();

        let lines = engine.visible_lines(80, height + 4);
        assert_eq!(lines.iter().take_while(|line| line.is_empty()).count(), 2);
        assert!(lines.iter().any(|line| line.starts_with(' ') && !line.trim().is_empty()));
    }

    #[test]
    fn destroyed_engine_ignores_imports() {
        let mut engine = BpmnEngine::new();
        engine.import_markup(TINY_PROCESS).expect("import tiny");
        engine.destroy();

        assert!(!engine.has_content());
        let outcome = engine.import_markup(SAMPLE_BPMN_XML).expect("no-op import");
        assert!(outcome.warnings().is_empty());
        assert!(!engine.has_content());
    }
}

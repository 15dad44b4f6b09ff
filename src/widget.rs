// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! The diagram widget: exclusive owner of one rendering-engine instance per mount.
//!
//! Mount constructs the widget around a fresh engine; unmount (or drop) destroys that engine
//! exactly once; syncs after unmount are no-ops. Markup revisions are monotonic: a sync with
//! a revision at or below the last imported one is ignored, so the displayed diagram always
//! corresponds to the newest accepted markup and never to a stale one.
//!
//! Import failures stay inside the widget boundary. By default they are only logged and the
//! viewport keeps its last valid content; [`RenderFailureMode::Surface`] additionally records
//! a notice the shell may display.

use crate::engine::DiagramEngine;

/// What to do with an engine import failure besides logging it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderFailureMode {
    /// Log and move on; the viewport silently keeps its previous content.
    #[default]
    LogOnly,
    /// Log and keep a user-visible notice until the next successful import.
    Surface,
}

#[derive(Debug)]
pub struct DiagramWidget<E: DiagramEngine> {
    engine: Option<E>,
    rendered_rev: u64,
    failure_mode: RenderFailureMode,
    failure_notice: Option<String>,
}

impl<E: DiagramEngine> DiagramWidget<E> {
    /// Mounts the widget, taking exclusive ownership of the engine instance.
    pub fn mount(engine: E, failure_mode: RenderFailureMode) -> Self {
        Self { engine: Some(engine), rendered_rev: 0, failure_mode, failure_notice: None }
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Revision of the markup last accepted for import.
    pub fn rendered_rev(&self) -> u64 {
        self.rendered_rev
    }

    /// Notice from the last failed import, present only in [`RenderFailureMode::Surface`].
    pub fn failure_notice(&self) -> Option<&str> {
        self.failure_notice.as_deref()
    }

    /// Imports `markup` if `rev` is newer than the last accepted revision. On success the
    /// camera is reset to fit the new content; warnings are logged. On failure the previous
    /// content stays on screen.
    pub fn sync(&mut self, markup: &str, rev: u64) {
        if rev <= self.rendered_rev {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            tracing::debug!(rev, "sync on unmounted widget ignored");
            return;
        };

        // The new markup supersedes the previous attempt even if its import fails.
        self.rendered_rev = rev;
        match engine.import_markup(markup) {
            Ok(outcome) => {
                for warning in outcome.warnings() {
                    tracing::warn!(rev, warning = %warning, "markup import warning");
                }
                engine.fit_viewport_to_content();
                self.failure_notice = None;
            }
            Err(err) => {
                tracing::error!(rev, error = %err, "markup import failed");
                if self.failure_mode == RenderFailureMode::Surface {
                    self.failure_notice = Some(err.to_string());
                }
            }
        }
    }

    /// Resets the camera to fit the current content.
    pub fn refit(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.fit_viewport_to_content();
        }
    }

    /// Destroys the engine. Exactly one destroy happens per mount even if both `unmount` and
    /// drop run.
    pub fn unmount(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
        }
    }
}

impl<E: DiagramEngine> Drop for DiagramWidget<E> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{DiagramWidget, RenderFailureMode};
    use crate::engine::{DiagramEngine, ImportError, ImportOutcome};
    use crate::format::bpmn::BpmnParseError;

    #[derive(Debug, Default)]
    struct Calls {
        imports: Vec<String>,
        fits: usize,
        destroys: usize,
    }

    /// Records every contract call; imports containing `boom` fail like malformed markup.
    struct ProbeEngine {
        calls: Rc<RefCell<Calls>>,
        destroyed: bool,
    }

    impl ProbeEngine {
        fn new() -> (Self, Rc<RefCell<Calls>>) {
            let calls = Rc::new(RefCell::new(Calls::default()));
            (Self { calls: calls.clone(), destroyed: false }, calls)
        }
    }

    impl DiagramEngine for ProbeEngine {
        fn import_markup(&mut self, markup: &str) -> Result<ImportOutcome, ImportError> {
            if self.destroyed {
                return Ok(ImportOutcome::default());
            }
            if markup.contains("boom") {
                return Err(ImportError::Parse(BpmnParseError::MissingProcess));
            }
            self.calls.borrow_mut().imports.push(markup.to_owned());
            Ok(ImportOutcome::default())
        }

        fn fit_viewport_to_content(&mut self) {
            self.calls.borrow_mut().fits += 1;
        }

        fn destroy(&mut self) {
            self.destroyed = true;
            self.calls.borrow_mut().destroys += 1;
        }
    }

    #[test]
    fn sync_imports_then_fits() {
        let (engine, calls) = ProbeEngine::new();
        let mut widget = DiagramWidget::mount(engine, RenderFailureMode::LogOnly);

        widget.sync("<a/>", 1);

        assert_eq!(calls.borrow().imports, ["<a/>"]);
        assert_eq!(calls.borrow().fits, 1);
        assert_eq!(widget.rendered_rev(), 1);
    }

    #[test]
    fn stale_revision_is_ignored() {
        let (engine, calls) = ProbeEngine::new();
        let mut widget = DiagramWidget::mount(engine, RenderFailureMode::LogOnly);

        widget.sync("<a/>", 2);
        widget.sync("<old/>", 2);
        widget.sync("<older/>", 1);

        assert_eq!(calls.borrow().imports, ["<a/>"]);
        assert_eq!(widget.rendered_rev(), 2);
    }

    #[test]
    fn failed_import_is_silent_by_default() {
        let (engine, calls) = ProbeEngine::new();
        let mut widget = DiagramWidget::mount(engine, RenderFailureMode::LogOnly);

        widget.sync("<a/>", 1);
        widget.sync("boom", 2);

        assert_eq!(calls.borrow().imports, ["<a/>"]);
        assert_eq!(calls.borrow().fits, 1);
        assert_eq!(widget.failure_notice(), None);
        // The failed markup still supersedes; replaying it changes nothing.
        assert_eq!(widget.rendered_rev(), 2);
    }

    #[test]
    fn surface_mode_records_notice_until_next_success() {
        let (engine, _calls) = ProbeEngine::new();
        let mut widget = DiagramWidget::mount(engine, RenderFailureMode::Surface);

        widget.sync("boom", 1);
        assert!(widget.failure_notice().is_some());

        widget.sync("<fixed/>", 2);
        assert_eq!(widget.failure_notice(), None);
    }

    #[test]
    fn unmount_destroys_exactly_once() {
        let (engine, calls) = ProbeEngine::new();
        let mut widget = DiagramWidget::mount(engine, RenderFailureMode::LogOnly);

        widget.sync("<a/>", 1);
        widget.unmount();
        widget.unmount();
        widget.sync("<b/>", 2);

        assert!(!widget.is_mounted());
        assert_eq!(calls.borrow().destroys, 1);
        assert_eq!(calls.borrow().imports, ["<a/>"]);

        drop(widget);
        assert_eq!(calls.borrow().destroys, 1);
    }

    #[test]
    fn drop_destroys_without_explicit_unmount() {
        let (engine, calls) = ProbeEngine::new();
        {
            let mut widget = DiagramWidget::mount(engine, RenderFailureMode::LogOnly);
            widget.sync("<a/>", 1);
        }
        assert_eq!(calls.borrow().destroys, 1);
    }
}

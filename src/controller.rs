// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Interaction state: input text, loading flag, last result, and the request lifecycle.
//!
//! The controller never talks to the network itself. [`Controller::begin_submit`] hands the
//! shell a ticket (sequence id + text) to fire; the shell delivers the settled outcome back
//! as a [`GenerationReply`]. Sequence ids are monotonic and only the newest one is honored,
//! so a reply that was overtaken by a later submit can never overwrite newer state.
//!
//! State machine: idle → loading (on submit) → idle (on success or failure). Submitting is
//! disabled while loading; blank input is silently ignored.

use crate::client::GenerateError;
use crate::model::{fixtures, GenerationResult};

/// The bundled example description, verbatim.
pub const EXAMPLE_TEXT: &str = "When a customer places an order, first check inventory. If the \
                                items are in stock, process the payment and then ship the order. \
                                If items are not in stock, notify the customer and suggest \
                                alternatives. After shipping, send a confirmation email.";

/// One authorized request: the shell fires it and routes the reply back under `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub seq: u64,
    pub text: String,
}

/// A settled generation request on its way back to the controller.
#[derive(Debug)]
pub struct GenerationReply {
    seq: u64,
    outcome: Result<GenerationResult, GenerateError>,
}

impl GenerationReply {
    pub fn new(seq: u64, outcome: Result<GenerationResult, GenerateError>) -> Self {
        Self { seq, outcome }
    }
}

#[derive(Debug, Default)]
pub struct Controller {
    input: String,
    loading: bool,
    result: Option<GenerationResult>,
    result_rev: u64,
    latest_seq: u64,
    alert: Option<String>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// Bumped every time a new result lands; the widget imports markup only when this moves.
    pub fn result_rev(&self) -> u64 {
        self.result_rev
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn push_input(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Replaces the input with the fixed example description. Does not submit.
    pub fn load_example(&mut self) {
        self.input = EXAMPLE_TEXT.to_owned();
    }

    /// Starts a submission. Returns `None`, leaving all state untouched, when the input is
    /// blank or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.loading || self.input.trim().is_empty() {
            return None;
        }
        self.latest_seq += 1;
        self.loading = true;
        tracing::info!(seq = self.latest_seq, "generation request started");
        Some(SubmitTicket { seq: self.latest_seq, text: self.input.clone() })
    }

    /// Applies a settled request. Replies that are not for the newest submitted sequence are
    /// discarded wholesale.
    pub fn apply_reply(&mut self, reply: GenerationReply) {
        if reply.seq != self.latest_seq {
            tracing::debug!(
                seq = reply.seq,
                latest = self.latest_seq,
                "discarding reply for superseded request"
            );
            return;
        }
        self.loading = false;
        match reply.outcome {
            Ok(result) => {
                tracing::info!(seq = reply.seq, "generation request succeeded");
                self.result = Some(result);
                self.result_rev += 1;
            }
            Err(err) => {
                // The previous result, if any, stays on screen.
                tracing::error!(seq = reply.seq, error = %err, "generation request failed");
                self.alert = Some(format!("Error generating BPMN: {err}"));
            }
        }
    }

    /// Installs a result without a request round trip (demo mode).
    pub fn preload(&mut self, result: GenerationResult) {
        self.result = Some(result);
        self.result_rev += 1;
    }

    /// The preloaded demo result.
    pub fn preload_sample(&mut self) {
        self.preload(fixtures::sample_result());
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Controller, GenerationReply, EXAMPLE_TEXT};
    use crate::client::GenerateError;
    use crate::model::{GenerationResult, ValidationOutcome};

    fn ok_result(markup: &str) -> GenerationResult {
        GenerationResult {
            bpmn_xml: markup.to_owned(),
            validation: ValidationOutcome { valid: true, message: "OK".to_owned() },
            explanation: "fine".to_owned(),
        }
    }

    fn typed(text: &str) -> Controller {
        let mut controller = Controller::new();
        for ch in text.chars() {
            controller.push_input(ch);
        }
        controller
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(" \n\t ")]
    fn blank_input_never_submits(#[case] text: &str) {
        let mut controller = typed(text);
        assert_eq!(controller.begin_submit(), None);
        assert!(!controller.loading());
        assert_eq!(controller.result_rev(), 0);
    }

    #[test]
    fn submit_sets_loading_and_hands_out_ticket() {
        let mut controller = typed("Approve leave request");
        let ticket = controller.begin_submit().expect("ticket");

        assert_eq!(ticket.seq, 1);
        assert_eq!(ticket.text, "Approve leave request");
        assert!(controller.loading());
    }

    #[test]
    fn submit_is_disabled_while_loading() {
        let mut controller = typed("something");
        controller.begin_submit().expect("first ticket");
        assert_eq!(controller.begin_submit(), None);
    }

    #[test]
    fn success_stores_result_and_clears_loading() {
        let mut controller = typed("Approve leave request");
        let ticket = controller.begin_submit().expect("ticket");

        controller.apply_reply(GenerationReply::new(ticket.seq, Ok(ok_result("<xml/>"))));

        assert!(!controller.loading());
        assert_eq!(controller.result().expect("result").bpmn_xml, "<xml/>");
        assert_eq!(controller.result().expect("result").validation.message, "OK");
        assert_eq!(controller.result_rev(), 1);
        assert_eq!(controller.alert(), None);
    }

    #[test]
    fn failure_raises_alert_and_keeps_previous_result() {
        let mut controller = typed("first");
        let ticket = controller.begin_submit().expect("ticket");
        controller.apply_reply(GenerationReply::new(ticket.seq, Ok(ok_result("<first/>"))));

        let ticket = controller.begin_submit().expect("second ticket");
        controller
            .apply_reply(GenerationReply::new(ticket.seq, Err(GenerateError::Status { status: 500 })));

        assert!(!controller.loading());
        assert_eq!(controller.alert(), Some("Error generating BPMN: backend returned HTTP 500"));
        assert_eq!(controller.result().expect("result").bpmn_xml, "<first/>");
        assert_eq!(controller.result_rev(), 1);

        controller.dismiss_alert();
        assert_eq!(controller.alert(), None);
    }

    #[test]
    fn superseded_reply_is_discarded() {
        let mut controller = typed("first");
        let first = controller.begin_submit().expect("first ticket");
        controller.apply_reply(GenerationReply::new(first.seq, Ok(ok_result("<first/>"))));

        let second = controller.begin_submit().expect("second ticket");

        // A duplicate of the settled first request arrives late; it must not touch anything.
        controller
            .apply_reply(GenerationReply::new(first.seq, Err(GenerateError::Status { status: 502 })));

        assert!(controller.loading(), "second request is still in flight");
        assert_eq!(controller.alert(), None);
        assert_eq!(controller.result().expect("result").bpmn_xml, "<first/>");

        controller.apply_reply(GenerationReply::new(second.seq, Ok(ok_result("<second/>"))));
        assert_eq!(controller.result().expect("result").bpmn_xml, "<second/>");
        assert_eq!(controller.result_rev(), 2);
    }

    #[test]
    fn load_example_fills_input_without_submitting() {
        let mut controller = Controller::new();
        controller.load_example();

        assert_eq!(controller.input(), EXAMPLE_TEXT);
        assert!(!controller.loading());
        assert_eq!(controller.result_rev(), 0);
    }

    #[test]
    fn loading_is_bounded_by_request_lifetime() {
        let mut controller = typed("text");
        assert!(!controller.loading());

        let ticket = controller.begin_submit().expect("ticket");
        assert!(controller.loading());

        controller.apply_reply(GenerationReply::new(ticket.seq, Ok(ok_result("<x/>"))));
        assert!(!controller.loading());
    }
}

// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Built-in sample data for demo mode and tests.

use super::wire::{GenerationResult, ValidationOutcome};

/// The order-fulfilment process from the bundled example description, as the backend would
/// return it.
pub const SAMPLE_BPMN_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL" id="Definitions_1">
  <bpmn:process id="Process_Order" name="Order Fulfilment">
    <bpmn:startEvent id="Start_Order" name="Order placed"/>
    <bpmn:task id="Task_Inventory" name="Check inventory"/>
    <bpmn:exclusiveGateway id="Gateway_Stock" name="In stock?"/>
    <bpmn:task id="Task_Payment" name="Process payment"/>
    <bpmn:task id="Task_Ship" name="Ship order"/>
    <bpmn:task id="Task_Confirm" name="Send confirmation email"/>
    <bpmn:task id="Task_Notify" name="Notify customer"/>
    <bpmn:task id="Task_Suggest" name="Suggest alternatives"/>
    <bpmn:endEvent id="End_Order" name="Order complete"/>
    <bpmn:sequenceFlow id="Flow_1" sourceRef="Start_Order" targetRef="Task_Inventory"/>
    <bpmn:sequenceFlow id="Flow_2" sourceRef="Task_Inventory" targetRef="Gateway_Stock"/>
    <bpmn:sequenceFlow id="Flow_3" name="yes" sourceRef="Gateway_Stock" targetRef="Task_Payment"/>
    <bpmn:sequenceFlow id="Flow_4" sourceRef="Task_Payment" targetRef="Task_Ship"/>
    <bpmn:sequenceFlow id="Flow_5" sourceRef="Task_Ship" targetRef="Task_Confirm"/>
    <bpmn:sequenceFlow id="Flow_6" name="no" sourceRef="Gateway_Stock" targetRef="Task_Notify"/>
    <bpmn:sequenceFlow id="Flow_7" sourceRef="Task_Notify" targetRef="Task_Suggest"/>
    <bpmn:sequenceFlow id="Flow_8" sourceRef="Task_Confirm" targetRef="End_Order"/>
  </bpmn:process>
</bpmn:definitions>
"#;

/// A complete generation result for `--demo` mode.
pub fn sample_result() -> GenerationResult {
    GenerationResult {
        bpmn_xml: SAMPLE_BPMN_XML.to_owned(),
        validation: ValidationOutcome { valid: true, message: "BPMN is valid.".to_owned() },
        explanation: "When a customer places an order the process first checks inventory. \
                      If the items are in stock, payment is processed, the order is shipped, \
                      and a confirmation email is sent. If items are not in stock, the \
                      customer is notified and alternatives are suggested."
            .to_owned(),
    }
}

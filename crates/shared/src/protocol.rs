//! Persisted document shape for a step sequence.

use serde::{Deserialize, Serialize};

pub const NEW_STEP_NAME: &str = "New Action";
pub const NEW_STEP_VALUE: f32 = 0.0;

const DEFAULT_SEED: [(&str, f32); 3] = [("Initial Move", 10.0), ("Wait", 2.5), ("Rotate", 90.0)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    pub value: f32,
}

impl StepRecord {
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The record inserted by an "add step" action.
    pub fn new_action() -> Self {
        Self::new(NEW_STEP_NAME, NEW_STEP_VALUE)
    }
}

/// Top-level persisted object. A document without a `steps` array is malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSequenceDocument {
    pub steps: Vec<StepRecord>,
}

impl StepSequenceDocument {
    pub fn new(steps: Vec<StepRecord>) -> Self {
        Self { steps }
    }
}

/// Sequence used when nothing usable is persisted.
pub fn default_seed() -> Vec<StepRecord> {
    DEFAULT_SEED
        .iter()
        .map(|(name, value)| StepRecord::new(*name, *value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_has_documented_order_and_values() {
        let seed = default_seed();
        assert_eq!(
            seed,
            vec![
                StepRecord::new("Initial Move", 10.0),
                StepRecord::new("Wait", 2.5),
                StepRecord::new("Rotate", 90.0),
            ]
        );
    }

    #[test]
    fn document_uses_steps_name_value_field_names() {
        let doc = StepSequenceDocument::new(vec![StepRecord::new("Wait", 2.5)]);
        let json = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "steps": [{ "name": "Wait", "value": 2.5 }] })
        );
    }

    #[test]
    fn document_without_steps_field_is_rejected() {
        assert!(serde_json::from_str::<StepSequenceDocument>("{}").is_err());
        assert!(serde_json::from_str::<StepSequenceDocument>(r#"{"steps":null}"#).is_err());
    }

    #[test]
    fn empty_steps_array_is_a_valid_document() {
        let doc: StepSequenceDocument =
            serde_json::from_str(r#"{"steps": []}"#).expect("empty document");
        assert!(doc.steps.is_empty());
    }
}

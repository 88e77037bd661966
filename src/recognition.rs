// File: src/recognition.rs
//! Interpreting handwriting-classifier responses.
//!
//! The classifier itself is a remote service; this module only reads its
//! JSON reply and decides whether the drawing matches the practiced
//! character.

use crate::core::types::CharacterEntry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const LABEL_FIELDS: [&str; 3] = ["class", "predicted_class", "label"];
const CONFIDENCE_FIELDS: [&str; 3] = ["confidence", "probability", "score"];
const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// In `[0, 1]`; 0 when the service did not report one.
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    Predicted(Prediction),
    Failed(String),
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self { label: label.into(), confidence }
    }

    /// Reads a classifier reply. Services disagree on field names, so the
    /// first non-empty label field and first positive confidence field win.
    pub fn from_json(value: &Value) -> RecognitionOutcome {
        if let Some(err) = value.get("error").filter(|e| !e.is_null()) {
            let message = err
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return RecognitionOutcome::Failed(message);
        }

        let label = LABEL_FIELDS
            .iter()
            .filter_map(|f| value.get(*f).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_LABEL);
        let confidence = CONFIDENCE_FIELDS
            .iter()
            .filter_map(|f| value.get(*f).and_then(Value::as_f64))
            .find(|c| *c > 0.0)
            .unwrap_or(0.0);

        RecognitionOutcome::Predicted(Prediction::new(label, confidence))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingVerdict {
    pub expected: String,
    pub predicted: String,
    pub confidence: f64,
    pub correct: bool,
}

impl DrawingVerdict {
    pub fn message(&self) -> String {
        if self.correct {
            format!("Perfect! You drew \"{}\" correctly!", self.expected)
        } else {
            format!(
                "I detected \"{}\" instead of \"{}\". Try again!",
                self.predicted, self.expected
            )
        }
    }

    /// e.g. `"87.5%"`; `None` when no confidence was reported.
    pub fn confidence_percent(&self) -> Option<String> {
        (self.confidence > 0.0).then(|| format!("{:.1}%", self.confidence * 100.0))
    }
}

/// Lenient match: either label containing the other counts as correct.
pub fn check_drawing(expected: &CharacterEntry, prediction: &Prediction) -> DrawingVerdict {
    let name = expected.name.to_lowercase();
    let predicted = prediction.label.to_lowercase();
    let correct = predicted.contains(&name) || name.contains(&predicted) || predicted == name;
    DrawingVerdict {
        expected: expected.name.clone(),
        predicted: prediction.label.clone(),
        confidence: prediction.confidence,
        correct,
    }
}

//! Request, result and persisted record types.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::encoder::EncodedImage;
use crate::error::TransportError;
use crate::normalize::{ParseDiagnostic, extract_json};

/// One generation request, built once per run.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Prompt text sent alongside the image.
    pub prompt: String,
    /// The invoice image, already base64-encoded; the raw bytes are not kept.
    pub image: EncodedImage,
    /// Model identifier.
    pub model: String,
}

impl ExtractionRequest {
    /// Create a request.
    pub fn new(prompt: impl Into<String>, image: EncodedImage, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image,
            model: model.into(),
        }
    }
}

/// Parsed model output, or the diagnostic explaining why parsing failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedJson {
    /// The recovered JSON value.
    Parsed(Value),
    /// Parse failure kept for manual inspection.
    Failed(ParseDiagnostic),
}

impl From<Result<Value, ParseDiagnostic>> for ParsedJson {
    fn from(result: Result<Value, ParseDiagnostic>) -> Self {
        match result {
            Ok(value) => ParsedJson::Parsed(value),
            Err(diagnostic) => ParsedJson::Failed(diagnostic),
        }
    }
}

impl ParsedJson {
    /// The parsed value, if parsing succeeded.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ParsedJson::Parsed(value) => Some(value),
            ParsedJson::Failed(_) => None,
        }
    }
}

/// Raw completion and its normalized form.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// Text as returned by the endpoint, or the `Error: ...` sentinel.
    pub raw_text: String,
    /// Normalized JSON.
    pub parsed_json: ParsedJson,
    /// Set when `raw_text` is a synthesized transport failure.
    pub transport_error: Option<String>,
}

impl ExtractionResult {
    /// Normalize text returned by the model.
    pub fn from_raw(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let parsed_json = extract_json(&raw_text).into();
        Self {
            raw_text,
            parsed_json,
            transport_error: None,
        }
    }

    /// Build a result from the outcome of an inference call.
    ///
    /// A transport failure still yields a result: its sentinel string
    /// flows through normalization like model text, and the failure is
    /// recorded in `transport_error`.
    pub fn from_outcome(outcome: std::result::Result<String, TransportError>) -> Self {
        match outcome {
            Ok(text) => Self::from_raw(text),
            Err(err) => {
                let mut result = Self::from_raw(err.to_sentinel());
                result.transport_error = Some(err.to_string());
                result
            }
        }
    }

    /// Whether the inference call itself failed.
    pub fn is_transport_failure(&self) -> bool {
        self.transport_error.is_some()
    }
}

/// The JSON artifact persisted for each run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    pub image_path: String,
    pub model: String,
    pub processing_time_seconds: f64,
    /// ISO-8601 local time, microsecond precision.
    pub timestamp: String,
    pub result: String,
    #[serde(rename = "result_JSON")]
    pub result_json: ParsedJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_error: Option<String>,
}

impl OutputRecord {
    /// Assemble a record for a finished run.
    pub fn new(
        result: &ExtractionResult,
        source_path: &Path,
        model: &str,
        elapsed: Duration,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            image_path: source_path.display().to_string(),
            model: model.to_string(),
            processing_time_seconds: round_secs(elapsed),
            timestamp: now.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            result: result.raw_text.clone(),
            result_json: result.parsed_json.clone(),
            inference_error: result.transport_error.clone(),
        }
    }
}

/// Seconds rounded to two decimals.
fn round_secs(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

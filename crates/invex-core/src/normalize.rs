//! Lenient recovery of JSON from model output.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

lazy_static! {
    // First ``` block, optionally tagged `json`; non-greedy so trailing prose is ignored.
    static ref FENCED_BLOCK: Regex = Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").unwrap();
}

/// Why model output could not be parsed as JSON.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{parse_error}")]
pub struct ParseDiagnostic {
    /// Parser error description.
    pub parse_error: String,
    /// The content that failed to parse.
    pub raw_content: String,
}

/// Strip whitespace and an optional fenced block, returning the JSON candidate.
pub fn unfence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCED_BLOCK.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => {
            debug!("Found fenced block in model output");
            inner.as_str()
        }
        None => trimmed,
    }
}

/// Parse the JSON object or array embedded in model output.
///
/// Never fails hard: a parse failure is returned as a [`ParseDiagnostic`]
/// carrying the unfenced content.
pub fn extract_json(raw: &str) -> Result<Value, ParseDiagnostic> {
    let content = unfence(raw);
    serde_json::from_str(content).map_err(|e| {
        warn!("Model output is not valid JSON: {}", e);
        ParseDiagnostic {
            parse_error: e.to_string(),
            raw_content: content.to_string(),
        }
    })
}

//! Core library for invoice field extraction with a local vision model.
//!
//! This crate provides:
//! - Image encoding for transport (base64)
//! - A client for an Ollama-style `/api/generate` endpoint
//! - Lenient recovery of JSON embedded in model output
//! - Timestamped output records written to disk

pub mod encoder;
pub mod error;
pub mod inference;
pub mod models;
pub mod normalize;
pub mod output;

pub use encoder::{EncodedImage, encode_image};
pub use error::{InvexError, Result, TransportError};
pub use inference::{INVOICE_PROMPT, InferenceClient};
pub use models::config::{InferenceConfig, InvexConfig, OutputConfig, PromptConfig};
pub use models::record::{ExtractionRequest, ExtractionResult, OutputRecord, ParsedJson};
pub use normalize::{ParseDiagnostic, extract_json};
pub use output::OutputWriter;

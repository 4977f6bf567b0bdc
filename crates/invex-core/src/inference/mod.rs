//! Inference endpoint client and prompt template.

mod client;
mod prompt;

pub use client::InferenceClient;
pub use prompt::INVOICE_PROMPT;

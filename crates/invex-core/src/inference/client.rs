//! Client for an Ollama-style `/api/generate` endpoint.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::encoder::EncodedImage;
use crate::error::{Result, TransportError};
use crate::models::config::InferenceConfig;
use crate::models::record::ExtractionRequest;

/// Request body sent to the generation endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: [&'a str; 1],
    stream: bool,
}

/// The parts of a generation response we use. Streaming responses send one per line.
#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Issues generation requests with one image attached.
pub struct InferenceClient {
    http: reqwest::Client,
    config: InferenceConfig,
}

impl InferenceClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::from)?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Build a request for the configured model.
    pub fn request(&self, prompt: impl Into<String>, image: EncodedImage) -> ExtractionRequest {
        ExtractionRequest::new(prompt, image, self.config.model.clone())
    }

    /// Send the request and wait for the full completion.
    ///
    /// Returns the `response` text, or an empty string when the endpoint
    /// omits it.
    pub async fn generate(
        &self,
        request: &ExtractionRequest,
    ) -> std::result::Result<String, TransportError> {
        let body = GenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            images: [request.image.data.as_str()],
            stream: self.config.stream,
        };

        debug!(
            "POST {} (model {}, {} image bytes, stream {})",
            self.config.endpoint, request.model, request.image.byte_len, self.config.stream
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion = if self.config.stream {
            collect_stream(&text)?
        } else {
            decode_response(&text)?.response.unwrap_or_default()
        };

        info!("Received {} characters from {}", completion.len(), request.model);
        Ok(completion)
    }

    /// Like [`generate`](Self::generate), but folds a transport failure into
    /// an `Error: <description>` string.
    pub async fn generate_or_sentinel(&self, request: &ExtractionRequest) -> String {
        match self.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Inference call failed: {}", e);
                e.to_sentinel()
            }
        }
    }
}

/// Decode one response object. An `error` field fails the call even after a 200 header.
fn decode_response(text: &str) -> std::result::Result<GenerateResponse, TransportError> {
    let decoded: GenerateResponse =
        serde_json::from_str(text).map_err(|e| TransportError::Decode(e.to_string()))?;
    match decoded.error {
        Some(message) => Err(TransportError::Endpoint(message)),
        None => Ok(decoded),
    }
}

/// Concatenate the `response` fields of a newline-delimited stream up to `done`.
fn collect_stream(text: &str) -> std::result::Result<String, TransportError> {
    let mut completion = String::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let chunk = decode_response(line)?;
        if let Some(piece) = chunk.response {
            completion.push_str(&piece);
        }
        if chunk.done {
            break;
        }
    }

    Ok(completion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            model: "llava",
            prompt: "Extract",
            images: ["aGVsbG8="],
            stream: false,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "model": "llava",
                "prompt": "Extract",
                "images": ["aGVsbG8="],
                "stream": false
            })
        );
    }

    #[test]
    fn test_decode_missing_response_field() {
        let decoded = decode_response(r#"{"model": "llava", "done": true}"#).unwrap();
        assert_eq!(decoded.response.unwrap_or_default(), "");
    }

    #[test]
    fn test_decode_invalid_body() {
        let err = decode_response("<html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn test_decode_error_field() {
        let err = decode_response(r#"{"error": "model requires more system memory"}"#).unwrap_err();
        assert!(
            matches!(err, TransportError::Endpoint(ref m) if m == "model requires more system memory")
        );
    }

    #[test]
    fn test_collect_stream_error_line() {
        let text = concat!(
            "{\"response\": \"{\\\"total\\\": \", \"done\": false}\n",
            "{\"error\": \"llama runner process has terminated\"}\n",
        );
        let err = collect_stream(text).unwrap_err();
        assert!(
            matches!(err, TransportError::Endpoint(ref m) if m == "llama runner process has terminated")
        );
    }

    #[test]
    fn test_collect_stream_until_done() {
        let text = concat!(
            "{\"response\": \"{\\\"total\\\"\", \"done\": false}\n",
            "\n",
            "{\"response\": \": 5}\", \"done\": false}\n",
            "{\"response\": \"\", \"done\": true}\n",
            "{\"response\": \"ignored\", \"done\": false}\n",
        );
        assert_eq!(collect_stream(text).unwrap(), "{\"total\": 5}");
    }

    #[test]
    fn test_collect_stream_bad_line() {
        let text = "{\"response\": \"a\", \"done\": false}\nnot json\n";
        assert!(matches!(collect_stream(text), Err(TransportError::Decode(_))));
    }

    #[test]
    fn test_client_uses_configured_model() {
        let config = InferenceConfig {
            model: "llava:13b".to_string(),
            ..InferenceConfig::default()
        };
        let client = InferenceClient::new(config).unwrap();
        let request = client.request("prompt", EncodedImage::from_bytes(b"img"));
        assert_eq!(request.model, "llava:13b");
        assert_eq!(request.prompt, "prompt");
    }
}

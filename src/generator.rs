//! Document Generation
//!
//! The collaborator boundary: everything the scheduler knows about turning
//! a batch of source files plus a prompt into an artifact lives behind
//! [`DocumentGenerator`]. The bundled implementation calls the Gemini
//! generateContent API with inline PDF payloads and writes the response to
//! an output directory. Retry policy, if any, belongs to implementations;
//! the scheduler never retries.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_MODEL;
use crate::error::RunError;

/// One generation job as the collaborator sees it.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Source documents for the logical batch, in group order.
    pub source_files: Vec<PathBuf>,
    pub prompt_text: String,
    /// Artifact base name without extension, e.g. "Bai 10_TN".
    pub output_base_name: String,
    pub model: String,
    /// Group name, for logging on the collaborator side.
    pub batch_label: String,
}

/// External generation collaborator.
///
/// An `Ok` path that does not exist on disk still counts as a failure; the
/// scheduler enforces that, implementations don't need to.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<PathBuf, String>;
}

/// Credentials and model selection, loaded from the environment.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub api_key: String,
    pub model: String,
}

impl JobContext {
    /// Load from `.env` / process environment.
    ///
    /// Accepts `GEMINI_API_KEY` or `GOOGLE_API_KEY`; `GENQUES_MODEL`
    /// overrides the default model.
    pub fn from_env() -> Result<Self, RunError> {
        // During development CWD may be a subdirectory; check parent too.
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_path("../.env");
        }
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| {
                RunError::Credentials(
                    "no Gemini API key found (GEMINI_API_KEY or GOOGLE_API_KEY)".to_string(),
                )
            })?;
        let model = std::env::var("GENQUES_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self { api_key, model })
    }
}

/// Gemini-backed generator writing artifacts under `output_dir`.
pub struct GeminiGenerator {
    client: Client,
    context: JobContext,
    output_dir: PathBuf,
}

impl GeminiGenerator {
    pub fn new(context: JobContext, output_dir: PathBuf) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(180))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;
        Ok(Self {
            client,
            context,
            output_dir,
        })
    }
}

#[async_trait]
impl DocumentGenerator for GeminiGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<PathBuf, String> {
        let mut parts = Vec::with_capacity(request.source_files.len() + 1);
        for file in &request.source_files {
            let bytes = tokio::fs::read(file)
                .await
                .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            parts.push(serde_json::json!({
                "inline_data": { "mime_type": "application/pdf", "data": encoded }
            }));
        }
        parts.push(serde_json::json!({ "text": request.prompt_text }));

        let model = if request.model.is_empty() {
            self.context.model.as_str()
        } else {
            request.model.as_str()
        };
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            model
        );

        tracing::debug!(
            batch = %request.batch_label,
            files = request.source_files.len(),
            model,
            "sending generation request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.context.api_key)
            .json(&serde_json::json!({ "contents": [{ "parts": parts }] }))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(format!("API error ({}): {}", status, text));
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: Content,
        }
        #[derive(Deserialize)]
        struct Content {
            #[serde(default)]
            parts: Vec<Part>,
        }
        #[derive(Deserialize)]
        struct Part {
            #[serde(default)]
            text: String,
        }

        let resp: Response = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;
        let text: String = resp
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err("Model returned empty content".to_string());
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
        let path = self
            .output_dir
            .join(format!("{}.md", request.output_base_name));
        tokio::fs::write(&path, text)
            .await
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

        Ok(path)
    }
}

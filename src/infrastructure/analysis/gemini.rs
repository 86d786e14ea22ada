//! Gemini API analysis adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnalysisClient, AnalysisError};
use crate::domain::analysis::{AnalysisPrompt, MediaEvaluation, TranscriptEvaluation};
use crate::domain::capture::{strip_data_uri_prefix, RecordedArtifact};
use crate::domain::scenario::ScenarioProfile;

/// Gemini API model to use
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Structured-output schema for media-mode evaluations. Declaring it on
/// the request pins the response to parseable JSON instead of prose.
fn media_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "totalScore": { "type": "NUMBER" },
            "metrics": {
                "type": "OBJECT",
                "properties": {
                    "clarity": { "type": "NUMBER" },
                    "confidence": { "type": "NUMBER" },
                    "empathy": { "type": "NUMBER" },
                    "logic": { "type": "NUMBER" }
                },
                "required": ["clarity", "confidence", "empathy", "logic"]
            },
            "feedback": { "type": "STRING" },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "improvements": { "type": "ARRAY", "items": { "type": "STRING" } },
            "transcription": { "type": "STRING" }
        },
        "required": [
            "totalScore", "metrics", "feedback",
            "strengths", "improvements", "transcription"
        ]
    })
}

/// Strip a markdown code fence from a model answer. Transcript-mode
/// requests cannot pin a response schema, so the model sometimes wraps
/// its JSON in ```json ... ``` despite being told not to.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Gemini API analysis client
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new Gemini client with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (used by tests against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the request body for a media-mode evaluation
    fn build_media_request(
        &self,
        artifact: &RecordedArtifact,
        prompt: &AnalysisPrompt,
    ) -> GenerateContentRequest {
        // The API wants bare base64; a data: URI head would be rejected.
        let encoded = artifact.transport_encoding();
        let data = strip_data_uri_prefix(&encoded).to_string();
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part {
                        text: Some(prompt.user_prompt().to_string()),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: artifact.mime_type().content_type().to_string(),
                            data,
                        }),
                    },
                ],
            }],
            system_instruction: prompt.system_instruction().map(|text| SystemInstruction {
                parts: vec![TextPart {
                    text: text.to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(media_response_schema()),
            }),
        }
    }

    /// Build the request body for a transcript-mode evaluation
    fn build_transcript_request(&self, prompt: &AnalysisPrompt) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(prompt.user_prompt().to_string()),
                    inline_data: None,
                }],
            }],
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Send a request and return the raw answer text
    async fn generate(&self, body: &GenerateContentRequest) -> Result<String, AnalysisError> {
        let response = self
            .client
            .post(self.api_url())
            .json(body)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AnalysisError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnalysisError::RateLimited);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AnalysisError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(AnalysisError::RequestFailed {
                status: status.as_u16(),
                message: error.message,
            });
        }

        let text = Self::extract_text(&response).ok_or(AnalysisError::EmptyResponse)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }

    /// Extract answer text from a response
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }
}

#[async_trait]
impl AnalysisClient for GeminiClient {
    async fn evaluate_media(
        &self,
        artifact: &RecordedArtifact,
        scenario: &ScenarioProfile,
    ) -> Result<MediaEvaluation, AnalysisError> {
        let prompt = AnalysisPrompt::for_media(scenario);
        let body = self.build_media_request(artifact, &prompt);
        let text = self.generate(&body).await?;

        serde_json::from_str(strip_code_fences(&text))
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }

    async fn evaluate_transcript(
        &self,
        transcript: &str,
        scenario: &ScenarioProfile,
    ) -> Result<TranscriptEvaluation, AnalysisError> {
        let prompt = AnalysisPrompt::for_transcript(transcript, scenario);
        let body = self.build_transcript_request(&prompt);
        let text = self.generate(&body).await?;

        serde_json::from_str(strip_code_fences(&text))
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }
}

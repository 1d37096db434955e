//! Wire types for the external generative service REST boundary.
//!
//! Two call shapes exist: multimodal `generateContent` (ordered text /
//! inline-image parts in, ordered parts out) and `predict` for pure
//! text-to-image generation. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::media::{codec, UploadedImage};

/// Inline binary payload of a content part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One part of a multimodal message: text or an inline image
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    pub fn inline_image(image: &UploadedImage) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.base64.clone(),
            }),
        }
    }
}

/// A role-tagged list of parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self { role: "user".to_string(), parts }
    }
}

/// Which modalities the model may answer with
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentGenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

/// Capability flags attached to a request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GoogleSearch {}

/// Request body for `generateContent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<ContentGenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    /// Plain text-only call.
    pub fn from_text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            generation_config: None,
            tools: Vec::new(),
        }
    }

    /// Multimodal call with ordered parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content::user(parts)],
            generation_config: None,
            tools: Vec::new(),
        }
    }

    pub fn with_modalities(mut self, modalities: &[&str]) -> Self {
        self.generation_config = Some(ContentGenerationConfig {
            response_modalities: Some(modalities.iter().map(|m| m.to_string()).collect()),
        });
        self
    }

    pub fn with_search(mut self) -> Self {
        self.tools.push(Tool { google_search: Some(GoogleSearch {}) });
        self
    }
}

/// Web citation attached to a grounded answer
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Response body for `generateContent`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A cited source with both fields present and non-empty URI
#[derive(Debug, Clone, PartialEq)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        let (text, _) = self.flatten();
        text
    }

    /// Flatten the first candidate into concatenated text plus image data
    /// URIs, preserving part order.
    pub fn flatten(&self) -> (String, Vec<String>) {
        let mut text = String::new();
        let mut images = Vec::new();
        if let Some(content) = self.candidates.first().and_then(|c| c.content.as_ref()) {
            for part in &content.parts {
                if let Some(t) = &part.text {
                    text.push_str(t);
                } else if let Some(inline) = &part.inline_data {
                    images.push(codec::data_url(&inline.data, &inline.mime_type));
                }
            }
        }
        (text, images)
    }

    /// Grounding citations, filtered to entries that actually carry a URI.
    pub fn sources(&self) -> Vec<GroundingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| {
                        let uri = web.uri.clone().filter(|u| !u.is_empty())?;
                        Some(GroundingSource {
                            title: web.title.clone().unwrap_or_default(),
                            uri,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One prompt instance of a `predict` image generation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParameters {
    pub sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_mime_type: Option<String>,
}

/// Request body for `predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateImagesRequest {
    pub instances: Vec<ImageInstance>,
    pub parameters: ImageParameters,
}

impl GenerateImagesRequest {
    pub fn new(prompt: impl Into<String>, parameters: ImageParameters) -> Self {
        Self {
            instances: vec![ImageInstance { prompt: prompt.into() }],
            parameters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePrediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Response body for `predict`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GenerateImagesResponse {
    #[serde(default)]
    pub predictions: Vec<ImagePrediction>,
}

impl GenerateImagesResponse {
    /// Generated images as data URIs with the given fallback MIME type.
    pub fn data_urls(&self, default_mime: &str) -> Vec<String> {
        self.predictions
            .iter()
            .filter_map(|p| {
                let bytes = p.bytes_base64_encoded.as_ref()?;
                let mime = p.mime_type.as_deref().unwrap_or(default_mime);
                Some(codec::data_url(bytes, mime))
            })
            .collect()
    }
}

//! Generation gateway - the sole boundary between the studio and the
//! external generative service. Every operation funnels through the
//! error-classifying client and returns normalized results.

pub mod client;
pub mod wire;

use std::sync::Arc;

use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::media::UploadedImage;
use crate::profiles::ConsistencyProfile;
use crate::prompts::edit::{
    advanced_edit_prompt, amateur_prompt, multi_profile_prompt, photoshoot_step_prompt,
    photoshoot_variation_prompt, profile_edit_prompt, professional_prompt, style_analysis_prompt,
    volumetric_rerender_prompt, AdvancedEditRequest,
};
use crate::prompts::expand::{expand_prompt, ExpandImageRequest};
use crate::prompts::lab::{lab_prompt, ImageLabRequest};
use crate::prompts::studio::{
    compose, resolved_image_count, scene_preview, GenerationEngine, PhotorealisticRequest,
};
use wire::{
    GenerateContentRequest, GenerateImagesRequest, GroundingSource, ImageParameters, Part,
};

pub use client::{GenerativeBackend, HttpGenerativeClient};

/// Normalized multimodal reply: prose plus zero or more image data URIs
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReply {
    pub text: String,
    pub images: Vec<String>,
}

/// Grounded text reply with cited sources
#[derive(Debug, Clone, PartialEq)]
pub struct GroundedReply {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

/// Stateless wrapper over the generative backend. All state lives in the
/// caller; the gateway only knows which models to address.
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn GenerativeBackend>,
    text_model: String,
    image_model: String,
}

impl Gateway {
    pub fn new(backend: Arc<dyn GenerativeBackend>, text_model: String, image_model: String) -> Self {
        Self { backend, text_model, image_model }
    }

    /// Plain text generation.
    pub async fn text_generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::from_text(prompt);
        let response = self.backend.generate_content(&self.text_model, request).await?;
        Ok(response.text())
    }

    /// Search-grounded text generation with citation sources.
    pub async fn text_generate_grounded(&self, prompt: &str) -> Result<GroundedReply> {
        let request = GenerateContentRequest::from_text(prompt).with_search();
        let response = self.backend.generate_content(&self.text_model, request).await?;
        let sources = response.sources();
        Ok(GroundedReply { text: response.text(), sources })
    }

    /// Pure text-to-image generation honoring the chat's defaults.
    pub async fn image_generate_from_text(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Vec<String>> {
        let request = GenerateImagesRequest::new(
            prompt,
            ImageParameters {
                sample_count: config.number_of_images,
                aspect_ratio: Some(config.aspect_ratio.as_str().to_string()),
                output_mime_type: Some(config.output_format.mime_type().to_string()),
            },
        );
        let response = self.backend.generate_images(&self.image_model, request).await?;
        Ok(response.data_urls(config.output_format.mime_type()))
    }

    /// Edit anchored to a profile's reference images.
    pub async fn edit_with_profile(
        &self,
        prompt: &str,
        profile: &ConsistencyProfile,
    ) -> Result<GatewayReply> {
        let full_prompt = profile_edit_prompt(prompt, profile);
        debug!(profile = %profile.name, "Profile edit");
        self.multimodal_edit(&profile.images, &full_prompt, || {
            format!("Imagem editada para: \"{}\"", prompt)
        })
        .await
    }

    /// Profile edit demanding studio-grade output.
    pub async fn edit_with_professional_profile(
        &self,
        prompt: &str,
        profile: &ConsistencyProfile,
    ) -> Result<GatewayReply> {
        self.edit_with_profile(&professional_prompt(prompt), profile).await
    }

    /// Profile edit simulating an amateur shot at the profile's level.
    pub async fn edit_with_amateur_profile(
        &self,
        prompt: &str,
        profile: &ConsistencyProfile,
    ) -> Result<GatewayReply> {
        let level = profile.amateur_level_or_default();
        self.edit_with_profile(&amateur_prompt(prompt, level), profile).await
    }

    /// Composition referencing several profiles at once.
    pub async fn edit_with_profiles(
        &self,
        prompt: &str,
        profiles: &[ConsistencyProfile],
    ) -> Result<GatewayReply> {
        let images: Vec<UploadedImage> =
            profiles.iter().flat_map(|p| p.images.iter().cloned()).collect();
        let full_prompt = multi_profile_prompt(prompt, profiles);
        self.multimodal_edit(&images, &full_prompt, || {
            format!("Imagem editada para: \"{}\"", prompt)
        })
        .await
    }

    /// One iteration of a photoshoot session. The previous shot, when
    /// present, is attached after the profile references so the model can
    /// vary pose and angle while keeping subject, wardrobe and scene.
    pub async fn photoshoot_step(
        &self,
        prompt: &str,
        profile: &ConsistencyProfile,
        previous_shot: Option<&UploadedImage>,
    ) -> Result<GatewayReply> {
        let mut parts: Vec<Part> = profile.images.iter().map(Part::inline_image).collect();
        if let Some(shot) = previous_shot {
            parts.push(Part::inline_image(shot));
        }
        let full_prompt = photoshoot_step_prompt(prompt, profile, previous_shot.is_some());
        parts.push(Part::text(full_prompt));

        let request = GenerateContentRequest::from_parts(parts).with_modalities(&["IMAGE", "TEXT"]);
        let response = self.backend.generate_content(&self.text_model, request).await?;
        let (text, images) = response.flatten();
        Ok(GatewayReply {
            text: if text.is_empty() { format!("Foto do ensaio para: \"{}\"", prompt) } else { text },
            images,
        })
    }

    /// Meta-call asking the model to propose the next shot's instruction.
    pub async fn photoshoot_next_prompt(
        &self,
        previous_shot: &UploadedImage,
        original_prompt: &str,
    ) -> Result<String> {
        let parts = vec![
            Part::inline_image(previous_shot),
            Part::text(photoshoot_variation_prompt(original_prompt)),
        ];
        let request = GenerateContentRequest::from_parts(parts);
        let response = self.backend.generate_content(&self.text_model, request).await?;
        Ok(response.text().trim().to_string())
    }

    /// Reusable technical analysis of an image.
    pub async fn analyze_style(&self, image: &UploadedImage) -> Result<String> {
        let parts = vec![Part::inline_image(image), Part::text(style_analysis_prompt())];
        let request = GenerateContentRequest::from_parts(parts);
        let response = self.backend.generate_content(&self.text_model, request).await?;
        Ok(response.text().trim().to_string())
    }

    /// Full studio generation. Base images switch the call into an edit
    /// constrained to exactly one output; otherwise the configured count and
    /// engine apply.
    pub async fn photorealistic_generate(
        &self,
        request: &PhotorealisticRequest,
        profile_name: Option<&str>,
    ) -> Result<Vec<String>> {
        let final_prompt = compose(request, profile_name);
        let image_count = resolved_image_count(request);

        if !request.base_images.is_empty() {
            let mut parts: Vec<Part> = request.base_images.iter().map(Part::inline_image).collect();
            parts.push(Part::text(final_prompt));
            let api_request = GenerateContentRequest::from_parts(parts).with_modalities(&["IMAGE"]);
            let response = self.backend.generate_content(&self.text_model, api_request).await?;
            let (_, images) = response.flatten();
            return Ok(images);
        }

        let model = match request.generation_engine {
            GenerationEngine::NanoExperimental => &self.text_model,
            GenerationEngine::Imagen4 => &self.image_model,
        };
        debug!(model = %model, count = image_count, "Studio generation");
        let api_request = GenerateImagesRequest::new(
            final_prompt,
            ImageParameters {
                sample_count: image_count,
                aspect_ratio: None,
                output_mime_type: Some("image/jpeg".to_string()),
            },
        );
        let response = self.backend.generate_images(model, api_request).await?;
        Ok(response.data_urls("image/jpeg"))
    }

    /// Free-form edit over a base image, optionally with profile references.
    pub async fn advanced_edit(
        &self,
        request: &AdvancedEditRequest,
        profile: Option<&ConsistencyProfile>,
    ) -> Result<GatewayReply> {
        let mut images = vec![request.base_image.clone()];
        if let Some(profile) = profile {
            images.extend(profile.images.iter().cloned());
        }
        let has_profile_images = profile.map(|p| !p.images.is_empty()).unwrap_or(false);
        let prompt = advanced_edit_prompt(request, has_profile_images);
        self.multimodal_edit(&images, &prompt, || {
            format!("Imagem editada para: \"{}\"", request.action)
        })
        .await
    }

    /// Single-image perspective change.
    pub async fn rerender_from_angle(
        &self,
        image: &UploadedImage,
        angle_prompt: &str,
    ) -> Result<GatewayReply> {
        let parts = vec![
            Part::inline_image(image),
            Part::text(volumetric_rerender_prompt(angle_prompt)),
        ];
        let request = GenerateContentRequest::from_parts(parts).with_modalities(&["IMAGE"]);
        let response = self.backend.generate_content(&self.text_model, request).await?;
        let (_, images) = response.flatten();
        Ok(GatewayReply {
            text: format!("Imagem re-renderizada a partir do ângulo: \"{}\"", angle_prompt),
            images,
        })
    }

    /// Outpainting to a new aspect ratio.
    pub async fn expand_image(&self, request: &ExpandImageRequest) -> Result<GatewayReply> {
        let parts = vec![Part::inline_image(&request.image), Part::text(expand_prompt(request))];
        let api_request = GenerateContentRequest::from_parts(parts).with_modalities(&["IMAGE"]);
        let response = self.backend.generate_content(&self.text_model, api_request).await?;
        let (_, images) = response.flatten();
        Ok(GatewayReply {
            text: format!("Imagem expandida para {}.", request.aspect_ratio.as_str()),
            images,
        })
    }

    /// Merge up to four labeled slots into one combined generation.
    pub async fn lab_compose(&self, request: &ImageLabRequest) -> Result<GatewayReply> {
        let mut parts: Vec<Part> =
            request.reference_images().into_iter().map(Part::inline_image).collect();
        parts.push(Part::text(lab_prompt(request)));
        let api_request =
            GenerateContentRequest::from_parts(parts).with_modalities(&["IMAGE", "TEXT"]);
        let response = self.backend.generate_content(&self.text_model, api_request).await?;
        let (text, images) = response.flatten();
        Ok(GatewayReply {
            text: if text.is_empty() {
                "Resultado da composição do Laboratório de Imagens.".to_string()
            } else {
                text
            },
            images,
        })
    }

    /// One-sentence preview of a configured studio shot.
    pub async fn scene_preview(&self, request: &PhotorealisticRequest) -> Result<String> {
        let api_request = GenerateContentRequest::from_text(scene_preview(request));
        let response = self.backend.generate_content(&self.text_model, api_request).await?;
        Ok(response.text().trim().to_string())
    }

    /// Lightweight credential check against the external service.
    pub async fn validate_api_key(&self, key: &str) -> bool {
        self.backend.validate_api_key(&self.text_model, key).await
    }

    /// Shared image+text edit call: reference images first, instruction
    /// last, both modalities allowed in the reply.
    async fn multimodal_edit(
        &self,
        images: &[UploadedImage],
        prompt: &str,
        fallback_text: impl FnOnce() -> String,
    ) -> Result<GatewayReply> {
        let mut parts: Vec<Part> = images.iter().map(Part::inline_image).collect();
        parts.push(Part::text(prompt));
        let request = GenerateContentRequest::from_parts(parts).with_modalities(&["IMAGE", "TEXT"]);
        let response = self.backend.generate_content(&self.text_model, request).await?;
        let (text, images) = response.flatten();
        Ok(GatewayReply {
            text: if text.is_empty() { fallback_text() } else { text },
            images,
        })
    }
}

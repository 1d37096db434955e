//! Prompt routing: profile matching, photoshoot sessions, engine selection.
//!
//! Routing order is a behavior contract: profile name matches are collected
//! in insertion order; a first match in photographic-reality mode always
//! enters the multi-shot loop, even when other profiles matched too; a
//! single match dispatches to its mode's edit variant; several matches
//! compose; no match falls through to engine selection.

use tracing::warn;

use crate::config::EngineSelector;
use crate::error::{AppError, Result};
use crate::media::UploadedImage;
use crate::profiles::{ConsistencyMode, ConsistencyProfile};
use crate::prompts::edit::{photoshoot_opening_prompt, AdvancedEditRequest};
use crate::prompts::expand::ExpandImageRequest;
use crate::prompts::lab::ImageLabRequest;
use crate::prompts::studio::PhotorealisticRequest;
use crate::session::{SendOutcome, Session};

/// Generation-intent keywords for the AUTO engine (case-insensitive)
const GENERATION_KEYWORDS: [&str; 4] = ["gere", "crie", "desenhe", "imagem de"];

fn has_generation_intent(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    GENERATION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

impl Session {
    /// Submit a free-text chat prompt. The placeholder is inserted
    /// immediately; the outcome is recorded on it when the async work
    /// resolves. No automatic retry: a failed message is terminal.
    pub async fn send(&self, prompt: &str) -> SendOutcome {
        let message_id = self.log.push_pair(prompt, Vec::new(), "");
        match self.dispatch(prompt, &message_id).await {
            Ok(()) => SendOutcome { message_id, error: None },
            Err(error) => {
                warn!(error = %error, "Chat dispatch failed");
                self.log.set_error(&message_id, error.to_string());
                SendOutcome { message_id, error: Some(error) }
            }
        }
    }

    async fn dispatch(&self, prompt: &str, message_id: &str) -> Result<()> {
        // Profiles are captured by value here; later store mutations do not
        // affect in-flight work.
        let matched = self.profiles.find_matches(prompt);

        if let Some(first) = matched.first() {
            if first.consistency_mode == ConsistencyMode::PhotographicReality {
                return self.run_photoshoot(prompt, first.clone(), message_id).await;
            }
            if matched.len() == 1 {
                // Single-profile dispatch table. PhotographicReality maps to
                // the plain variant here; the multi-shot loop only triggers
                // through the first-match branch above.
                let reply = match first.consistency_mode {
                    ConsistencyMode::Professional => {
                        self.gateway.edit_with_professional_profile(prompt, first).await?
                    }
                    ConsistencyMode::Amateur => {
                        self.gateway.edit_with_amateur_profile(prompt, first).await?
                    }
                    ConsistencyMode::Normal | ConsistencyMode::PhotographicReality => {
                        self.gateway.edit_with_profile(prompt, first).await?
                    }
                };
                self.log.set_done(message_id, reply.text, reply.images);
                return Ok(());
            }
            let reply = self.gateway.edit_with_profiles(prompt, &matched).await?;
            self.log.set_done(message_id, reply.text, reply.images);
            return Ok(());
        }

        let config = self.generation_config();
        let effective = match config.engine {
            EngineSelector::Auto => {
                if has_generation_intent(prompt) {
                    EngineSelector::ImageGeneration
                } else {
                    EngineSelector::Text
                }
            }
            other => other,
        };

        match effective {
            EngineSelector::ImageGeneration => {
                let images = self.gateway.image_generate_from_text(prompt, &config).await?;
                let text = if images.is_empty() {
                    "Não consegui gerar imagem.".to_string()
                } else {
                    format!("Imagens para \"{}\"", prompt)
                };
                self.log.set_done(message_id, text, images);
            }
            EngineSelector::ProfileEditor => {
                // This engine only works through consistency profiles, so
                // answer with guidance instead of calling the gateway.
                self.log.set_done(
                    message_id,
                    "Para editar, use um Perfil de Consistência ou a Edição Avançada.".to_string(),
                    Vec::new(),
                );
            }
            EngineSelector::GroundedSearch => {
                let reply = self.gateway.text_generate_grounded(prompt).await?;
                let mut text = reply.text;
                if !reply.sources.is_empty() {
                    text.push_str("\n\n**Fontes:**\n");
                    let lines: Vec<String> = reply
                        .sources
                        .iter()
                        .enumerate()
                        .map(|(index, source)| {
                            let title =
                                if source.title.is_empty() { &source.uri } else { &source.title };
                            format!("{}. [{}]({})", index + 1, title, source.uri)
                        })
                        .collect();
                    text.push_str(&lines.join("\n"));
                }
                self.log.set_done(message_id, text, Vec::new());
            }
            EngineSelector::Text | EngineSelector::Auto => {
                let text = self.gateway.text_generate(prompt).await?;
                self.log.set_done(message_id, text, Vec::new());
            }
        }
        Ok(())
    }

    /// Sequential multi-shot loop. Each iteration's output image becomes
    /// the next iteration's reference; any iteration producing zero images
    /// aborts the whole session.
    async fn run_photoshoot(
        &self,
        prompt: &str,
        profile: ConsistencyProfile,
        message_id: &str,
    ) -> Result<()> {
        let shots = profile.photoshoot_shots.unwrap_or(self.default_shots);
        self.log.set_progress(
            message_id,
            Some(format!("Iniciando ensaio de {} fotos...", shots)),
            None,
        );

        let mut final_images: Vec<String> = Vec::new();
        let mut previous_shot: Option<UploadedImage> = None;

        for shot_index in 0..shots {
            let current_prompt = match &previous_shot {
                None => photoshoot_opening_prompt(prompt),
                Some(previous) => self.gateway.photoshoot_next_prompt(previous, prompt).await?,
            };
            self.log.set_progress(
                message_id,
                Some(format!("Gerando foto {}/{}: {}", shot_index + 1, shots, current_prompt)),
                None,
            );
            if shot_index > 0 {
                tokio::time::sleep(self.shot_delay).await;
            }

            let reply = self
                .gateway
                .photoshoot_step(&current_prompt, &profile, previous_shot.as_ref())
                .await?;
            match reply.images.first() {
                Some(data_url) => {
                    final_images.push(data_url.clone());
                    previous_shot = Some(UploadedImage::from_data_url(
                        data_url,
                        format!("shot_{}.jpg", shot_index + 1),
                    )?);
                    self.log.set_progress(message_id, None, Some(final_images.clone()));
                }
                None => {
                    return Err(AppError::Generation(format!(
                        "Falha ao gerar a foto {}.",
                        shot_index + 1
                    )));
                }
            }
        }

        self.log
            .set_done(message_id, format!("Ensaio para \"{}\" concluído.", prompt), final_images);
        Ok(())
    }

    /// Studio panel submission.
    pub async fn submit_studio(
        &self,
        request: &PhotorealisticRequest,
        profile_id: Option<&str>,
    ) -> SendOutcome {
        let profile_name =
            profile_id.and_then(|id| self.profiles.get(id)).map(|profile| profile.name);

        let mut user_text = format!("**Estúdio Fotográfico**\n**Ação:** {}", request.prompt);
        if let Some(name) = &profile_name {
            user_text.push_str(&format!("\n**Perfil:** {}", name));
        }
        if !request.base_images.is_empty() {
            user_text.push_str(&format!("\n**Imagens Base:** {}", request.base_images.len()));
        }
        if request.auto_equip {
            user_text.push_str("\n**Equipamento:** Automático");
        }
        let user_images = request.base_images.iter().map(|i| i.to_data_url()).collect();
        let message_id = self.log.push_pair(&user_text, user_images, "Gerando no Estúdio...");

        match self.gateway.photorealistic_generate(request, profile_name.as_deref()).await {
            Ok(images) => {
                let text = if images.is_empty() {
                    "Não consegui gerar/editar a imagem.".to_string()
                } else {
                    format!("Resultado do Estúdio para \"{}\"", request.prompt)
                };
                self.log.set_done(&message_id, text, images);
                SendOutcome { message_id, error: None }
            }
            Err(error) => self.fail(message_id, error),
        }
    }

    /// Advanced editor submission.
    pub async fn submit_advanced_edit(&self, request: &AdvancedEditRequest) -> SendOutcome {
        let profile = request.profile_id.as_deref().and_then(|id| self.profiles.get(id));
        let mut user_text = format!("**Edição Avançada**\n**Ação:** {}", request.action);
        if let Some(profile) = &profile {
            user_text.push_str(&format!("\n**Perfil:** {}", profile.name));
        }
        let message_id = self.log.push_pair(
            &user_text,
            vec![request.base_image.to_data_url()],
            "Editando imagem...",
        );

        match self.gateway.advanced_edit(request, profile.as_ref()).await {
            Ok(reply) => {
                self.log.set_done(&message_id, reply.text, reply.images);
                SendOutcome { message_id, error: None }
            }
            Err(error) => self.fail(message_id, error),
        }
    }

    /// Image lab submission.
    pub async fn submit_lab(&self, request: &ImageLabRequest) -> SendOutcome {
        let message_id = self.log.push_pair(
            "**Laboratório de Imagens**\nIniciando a composição...",
            Vec::new(),
            "Misturando elementos...",
        );
        match self.gateway.lab_compose(request).await {
            Ok(reply) => {
                self.log.set_done(&message_id, reply.text, reply.images);
                SendOutcome { message_id, error: None }
            }
            Err(error) => self.fail(message_id, error),
        }
    }

    /// Outpainting submission.
    pub async fn submit_expand(&self, request: &ExpandImageRequest) -> SendOutcome {
        let message_id = self.log.push_pair(
            &format!("**Expandir Imagem**\nExpandindo para {}...", request.aspect_ratio.as_str()),
            vec![request.image.to_data_url()],
            "Expandindo e preenchendo a imagem...",
        );
        match self.gateway.expand_image(request).await {
            Ok(reply) => {
                self.log.set_done(&message_id, reply.text, reply.images);
                SendOutcome { message_id, error: None }
            }
            Err(error) => self.fail(message_id, error),
        }
    }

    /// Perspective re-render submission.
    pub async fn submit_rerender(&self, image: &UploadedImage, angle_prompt: &str) -> SendOutcome {
        let message_id = self.log.push_pair(
            &format!("**Volumetria**\nRenderizando de um novo ângulo: {}", angle_prompt),
            vec![image.to_data_url()],
            "Re-renderizando perspectiva...",
        );
        match self.gateway.rerender_from_angle(image, angle_prompt).await {
            Ok(reply) => {
                self.log.set_done(&message_id, reply.text, reply.images);
                SendOutcome { message_id, error: None }
            }
            Err(error) => self.fail(message_id, error),
        }
    }

    fn fail(&self, message_id: String, error: AppError) -> SendOutcome {
        warn!(error = %error, "Panel submission failed");
        self.log.set_error(&message_id, error.to_string());
        SendOutcome { message_id, error: Some(error) }
    }
}

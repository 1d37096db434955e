//! Instruction builders for profile-based editing, photoshoot sessions,
//! advanced edits, style analysis and perspective re-rendering.

use serde::{Deserialize, Serialize};

use crate::media::UploadedImage;
use crate::profiles::ConsistencyProfile;
use crate::prompts::style::additional_style_prompt;

/// Free-form edit over a base image, optionally anchored to a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedEditRequest {
    pub subject: String,
    pub action: String,
    pub style: String,
    pub negative_prompt: String,
    pub base_image: UploadedImage,
    pub profile_id: Option<String>,
}

/// Edit instruction anchored to a profile's reference images.
pub fn profile_edit_prompt(prompt: &str, profile: &ConsistencyProfile) -> String {
    let style_prompt = additional_style_prompt(profile.additional_style);
    format!(
        "Usando as imagens de referência do perfil '{}', execute a seguinte ação: {}. {}",
        profile.name, prompt, style_prompt
    )
}

/// Prefix demanding studio-grade output; delegates to the plain variant.
pub fn professional_prompt(prompt: &str) -> String {
    format!(
        "Gere uma imagem com qualidade de estúdio profissional, iluminação perfeita, alta nitidez e detalhes fotorrealistas. {}",
        prompt
    )
}

/// 1-5 scale of realistic "bad photography" imperfections.
pub fn amateur_level_description(level: u8) -> &'static str {
    match level {
        1 => "Simule uma foto tirada por um semi-profissional com um smartphone topo de linha. A imagem deve ser nítida, com bom HDR, mas pode ter uma composição ligeiramente imperfeita.",
        2 => "Simule uma foto casual bem tirada, com bom foco e iluminação, mas com uma composição simples e sem tratamento de cor profissional.",
        4 => "Simule uma foto mal tirada, com flash direto criando sombras duras, enquadramento cortando partes importantes e foco impreciso.",
        5 => "Simule uma foto muito ruim, com borrões de movimento, trepidação da câmera, baixo contraste e cores dessaturadas.",
        _ => "Simule uma foto casual típica, com composição centralizada, talvez um pouco de ruído, e iluminação ambiente normal, sem flash.",
    }
}

/// Prefix simulating an amateur shot at the profile's configured level.
pub fn amateur_prompt(prompt: &str, level: u8) -> String {
    format!(
        "Simule uma foto de amador (nível {}). {} Ação: {}",
        level,
        amateur_level_description(level),
        prompt
    )
}

/// Composition instruction referencing several profiles at once.
pub fn multi_profile_prompt(prompt: &str, profiles: &[ConsistencyProfile]) -> String {
    let names: Vec<String> = profiles.iter().map(|p| format!("'{}'", p.name)).collect();
    format!(
        "Usando as imagens de referência para os perfis {}, execute a seguinte ação: {}.",
        names.join(" e "),
        prompt
    )
}

/// One shot of a photoshoot session. `has_previous_shot` marks iterations
/// that vary an earlier output instead of opening the session.
pub fn photoshoot_step_prompt(
    prompt: &str,
    profile: &ConsistencyProfile,
    has_previous_shot: bool,
) -> String {
    let quality = if profile.photographic_reality_style
        == Some(crate::profiles::RealityStyle::Amateur)
        && profile.amateur_level.is_some()
    {
        format!("Simule uma foto de amador (nível {}).", profile.amateur_level_or_default())
    } else {
        "Gere uma imagem com qualidade de estúdio profissional.".to_string()
    };

    let mut full = format!(
        "Modo Ensaio Fotográfico. Mantenha a consistência do sujeito do perfil '{}', suas roupas e o cenário. {} Ação para esta foto: {}.",
        profile.name, quality, prompt
    );
    if has_previous_shot {
        full.push_str(
            " Esta foto deve ser uma variação da foto anterior, com uma pose ou ângulo de câmera diferente.",
        );
    }
    full
}

/// Synthesized instruction for the opening shot of a photoshoot.
pub fn photoshoot_opening_prompt(user_prompt: &str) -> String {
    format!("Para esta foto, {}. Capture um retrato em plano médio.", user_prompt)
}

/// Meta-instruction asking the model to propose the next shot's prompt.
pub fn photoshoot_variation_prompt(original_prompt: &str) -> String {
    format!(
        "A imagem fornecida é de um ensaio fotográfico. O prompt original era: \"{}\". Crie um prompt curto e direto para a PRÓXIMA foto do ensaio. Varie a pose, expressão ou ângulo da câmera. Responda apenas com o novo prompt.",
        original_prompt
    )
}

/// Instruction for the reusable style analysis of an image.
pub fn style_analysis_prompt() -> &'static str {
    "Analise esta imagem em detalhes. Descreva a composição, o tipo de iluminação (natural, artificial, dura, suave), o ângulo e a perspectiva da câmera (ex: close-up, plano médio, plongée), as configurações prováveis da câmera (distância focal, abertura), o estilo de cor e a atmosfera geral. Forneça a descrição como um prompt detalhado que poderia ser usado para recriar uma imagem semelhante."
}

/// Instruction for re-rendering a scene from a new camera position.
pub fn volumetric_rerender_prompt(angle_prompt: &str) -> String {
    format!(
        "Análise volumétrica da imagem fornecida. Reconstrua a cena com base na geometria implícita e renderize uma nova fotografia a partir de uma perspectiva dramaticamente diferente: {}. O objetivo é simular uma mudança real da posição da câmera no espaço 3D, mantendo a identidade do sujeito, a iluminação original e o estilo artístico. A nova imagem deve parecer uma foto tirada de um novo ponto de vista, não uma distorção 2D.",
        angle_prompt
    )
}

/// Instruction for the advanced editor. `has_profile_images` reflects
/// whether profile references were attached alongside the base image.
pub fn advanced_edit_prompt(request: &AdvancedEditRequest, has_profile_images: bool) -> String {
    let mut prompt = String::from("Considerando a imagem base");
    if has_profile_images {
        prompt.push_str(" e as imagens de referência do perfil");
    }
    prompt.push_str(", modifique");
    if !request.subject.is_empty() {
        prompt.push_str(&format!(" '{}'", request.subject));
    }
    prompt.push_str(&format!(" para '{}'.", request.action));
    if !request.style.is_empty() {
        prompt.push_str(&format!(" O estilo final deve ser: '{}'.", request.style));
    }
    if !request.negative_prompt.is_empty() {
        prompt.push_str(&format!(" Evite o seguinte: '{}'.", request.negative_prompt));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{AdditionalStyle, ConsistencyMode, RealityStyle};

    fn profile(name: &str, mode: ConsistencyMode, style: AdditionalStyle) -> ConsistencyProfile {
        ConsistencyProfile {
            id: format!("profile-{name}"),
            name: name.to_string(),
            images: vec![],
            consistency_mode: mode,
            additional_style: style,
            amateur_level: None,
            photographic_reality_style: None,
            photoshoot_shots: None,
        }
    }

    #[test]
    fn test_profile_edit_prompt_includes_style() {
        let p = profile("fido", ConsistencyMode::Professional, AdditionalStyle::Anime);
        let prompt = profile_edit_prompt("coloque fido em um surfboard", &p);
        assert!(prompt.contains("perfil 'fido'"));
        assert!(prompt.contains("anime japonês moderno"));
    }

    #[test]
    fn test_normal_mode_without_style_has_no_style_tail() {
        let p = profile("fido", ConsistencyMode::Normal, AdditionalStyle::None);
        let prompt = profile_edit_prompt("fido na praia", &p);
        assert!(prompt.ends_with("execute a seguinte ação: fido na praia. "));
    }

    #[test]
    fn test_amateur_levels_cover_scale() {
        for level in 1..=5 {
            let text = amateur_prompt("fido na praia", level);
            assert!(text.starts_with(&format!("Simule uma foto de amador (nível {})", level)));
            assert!(text.ends_with("Ação: fido na praia"));
        }
    }

    #[test]
    fn test_multi_profile_prompt_joins_names() {
        let profiles = vec![
            profile("fido", ConsistencyMode::Normal, AdditionalStyle::None),
            profile("rex", ConsistencyMode::Normal, AdditionalStyle::None),
        ];
        let prompt = multi_profile_prompt("os dois na praia", &profiles);
        assert!(prompt.contains("os perfis 'fido' e 'rex'"));
    }

    #[test]
    fn test_photoshoot_step_variation_sentence() {
        let p = profile("model_a", ConsistencyMode::PhotographicReality, AdditionalStyle::None);
        let opening = photoshoot_step_prompt("sessão na praia", &p, false);
        let followup = photoshoot_step_prompt("sessão na praia", &p, true);
        assert!(!opening.contains("variação da foto anterior"));
        assert!(followup.contains("variação da foto anterior"));
        assert!(followup.contains("qualidade de estúdio profissional"));
    }

    #[test]
    fn test_photoshoot_step_amateur_sub_style() {
        let mut p = profile("model_a", ConsistencyMode::PhotographicReality, AdditionalStyle::None);
        p.photographic_reality_style = Some(RealityStyle::Amateur);
        p.amateur_level = Some(2);
        let prompt = photoshoot_step_prompt("sessão na praia", &p, false);
        assert!(prompt.contains("foto de amador (nível 2)"));
    }

    #[test]
    fn test_advanced_edit_prompt_assembly() {
        let request = AdvancedEditRequest {
            subject: "o carro".to_string(),
            action: "pintar de vermelho".to_string(),
            style: "fotorrealista".to_string(),
            negative_prompt: "texto".to_string(),
            base_image: UploadedImage {
                base64: "AA==".to_string(),
                mime_type: "image/png".to_string(),
                name: "base.png".to_string(),
            },
            profile_id: None,
        };
        let with_profile = advanced_edit_prompt(&request, true);
        assert_eq!(
            with_profile,
            "Considerando a imagem base e as imagens de referência do perfil, modifique 'o carro' para 'pintar de vermelho'. O estilo final deve ser: 'fotorrealista'. Evite o seguinte: 'texto'."
        );

        let bare = advanced_edit_prompt(
            &AdvancedEditRequest {
                subject: String::new(),
                style: String::new(),
                negative_prompt: String::new(),
                ..request
            },
            false,
        );
        assert_eq!(bare, "Considerando a imagem base, modifique para 'pintar de vermelho'.");
    }
}

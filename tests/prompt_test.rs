//! Property-style tests for the prompt compiler

use lumium_studio::media::UploadedImage;
use lumium_studio::profiles::{AdditionalStyle, ConsistencyMode, ConsistencyProfile, RealityStyle};
use lumium_studio::prompts::edit::{amateur_prompt, professional_prompt, profile_edit_prompt};
use lumium_studio::prompts::studio::{
    compose, resolved_image_count, AtmosphereKind, FilmStock, FlareType, GrainLevel,
    PhotographicStyle, PhotorealisticRequest, SequenceType,
};
use lumium_studio::prompts::style::additional_style_prompt;

fn profile(mode: ConsistencyMode, style: AdditionalStyle) -> ConsistencyProfile {
    ConsistencyProfile {
        id: "profile-1".to_string(),
        name: "fido".to_string(),
        images: vec![],
        consistency_mode: mode,
        additional_style: style,
        amateur_level: Some(3),
        photographic_reality_style: Some(RealityStyle::Professional),
        photoshoot_shots: None,
    }
}

const ALL_STYLES: [AdditionalStyle; 11] = [
    AdditionalStyle::None,
    AdditionalStyle::Ghibli,
    AdditionalStyle::Anime,
    AdditionalStyle::Render3d,
    AdditionalStyle::OilPainting,
    AdditionalStyle::PencilDrawing,
    AdditionalStyle::Cinematic,
    AdditionalStyle::Watercolor,
    AdditionalStyle::Sketch,
    AdditionalStyle::ConceptArt,
    AdditionalStyle::Vaporwave,
];

const ALL_MODES: [ConsistencyMode; 4] = [
    ConsistencyMode::Normal,
    ConsistencyMode::Professional,
    ConsistencyMode::Amateur,
    ConsistencyMode::PhotographicReality,
];

/// The mode-specific edit instruction exactly as dispatch would build it.
fn mode_instruction(mode: ConsistencyMode, style: AdditionalStyle, prompt: &str) -> String {
    let profile = profile(mode, style);
    match mode {
        ConsistencyMode::Professional => profile_edit_prompt(&professional_prompt(prompt), &profile),
        ConsistencyMode::Amateur => profile_edit_prompt(&amateur_prompt(prompt, 3), &profile),
        ConsistencyMode::Normal | ConsistencyMode::PhotographicReality => {
            profile_edit_prompt(prompt, &profile)
        }
    }
}

#[test]
fn styled_edits_always_carry_their_style_sentence() {
    for mode in ALL_MODES {
        for style in ALL_STYLES {
            let instruction = mode_instruction(mode, style, "fido na praia");
            let style_sentence = additional_style_prompt(style);
            if style != AdditionalStyle::None {
                assert!(
                    instruction.contains(style_sentence),
                    "{mode:?}/{style:?} lost its style sentence"
                );
            }
        }
    }
}

#[test]
fn plain_mode_adds_no_quality_guidance() {
    // Normal mode contributes nothing beyond the action; quality guidance
    // belongs to professional/amateur variants only.
    for style in ALL_STYLES {
        let instruction = mode_instruction(ConsistencyMode::Normal, style, "fido na praia");
        assert!(!instruction.contains("qualidade de estúdio profissional"));
        assert!(!instruction.contains("foto de amador"));
    }
}

#[test]
fn professional_and_amateur_prefixes_precede_the_action() {
    let pro = mode_instruction(ConsistencyMode::Professional, AdditionalStyle::None, "fido surfando");
    assert!(pro.contains("qualidade de estúdio profissional"));
    let pos_quality = pro.find("qualidade de estúdio").unwrap();
    let pos_action = pro.find("fido surfando").unwrap();
    assert!(pos_quality < pos_action);

    let amateur = mode_instruction(ConsistencyMode::Amateur, AdditionalStyle::None, "fido surfando");
    assert!(amateur.contains("foto de amador (nível 3)"));
}

fn full_request() -> PhotorealisticRequest {
    PhotorealisticRequest {
        prompt: "uma mulher lendo um livro".to_string(),
        environment: "uma biblioteca antiga".to_string(),
        number_of_images: 3,
        negative_prompt: "texto, logotipos".to_string(),
        material_properties: "veludo, latão polido".to_string(),
        ..Default::default()
    }
}

#[test]
fn compose_is_idempotent() {
    let mut request = full_request();
    request.conceptual.sequence_type = SequenceType::StyleVariation;
    request.style.base = PhotographicStyle::ModaEditorial;
    request.film.stock = FilmStock::KodakPortra400;
    request.film.defects.film_grain = GrainLevel::Fine;
    request.film.defects.lens_flare = FlareType::Subtle;
    request.atmosphere.kind = AtmosphereKind::Mist;

    let first = compose(&request, Some("fido"));
    let second = compose(&request, Some("fido"));
    assert_eq!(first, second);
}

#[test]
fn base_images_force_exactly_one_output() {
    for configured in [1, 2, 4, 8] {
        let mut request = full_request();
        request.number_of_images = configured;
        request.base_images = vec![UploadedImage {
            base64: "QUJD".to_string(),
            mime_type: "image/jpeg".to_string(),
            name: "base.jpg".to_string(),
        }];
        assert_eq!(resolved_image_count(&request), 1, "configured={configured}");
    }
}

#[test]
fn sequences_force_at_least_two_outputs() {
    for sequence in
        [SequenceType::Timeline, SequenceType::StyleVariation, SequenceType::PsychologicalStates]
    {
        let mut request = full_request();
        request.number_of_images = 1;
        request.conceptual.sequence_type = sequence;
        assert!(resolved_image_count(&request) >= 2, "{sequence:?}");
    }
}

#[test]
fn profile_note_only_appears_when_a_profile_is_given() {
    let request = full_request();
    let with = compose(&request, Some("fido"));
    let without = compose(&request, None);
    assert!(with.contains("Consistência de Perfil"));
    assert!(with.contains("'fido'"));
    assert!(!without.contains("Consistência de Perfil"));
}

#[test]
fn negative_prompt_precedes_output_quality() {
    let prompt = compose(&full_request(), None);
    let negative = prompt.find("Prompt Negativo").unwrap();
    let quality = prompt.find("Qualidade de Saída").unwrap();
    assert!(negative < quality);
    assert!(prompt.contains("texto, logotipos"));
}

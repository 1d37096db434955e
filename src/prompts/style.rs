//! Additional-style instruction sentences for profile edits

use crate::profiles::AdditionalStyle;

/// Instruction sentence for an art style layered on top of a profile edit.
/// `None` is a no-op and contributes nothing to the prompt.
pub fn additional_style_prompt(style: AdditionalStyle) -> &'static str {
    match style {
        AdditionalStyle::Ghibli => {
            "Crie a imagem no estilo de arte do Studio Ghibli, com cores vibrantes, cenários pastorais e personagens com expressões suaves."
        }
        AdditionalStyle::Anime => {
            "Crie a imagem no estilo de anime japonês moderno, com linhas nítidas, olhos grandes e expressivos e cores saturadas."
        }
        AdditionalStyle::Render3d => {
            "Crie a imagem como uma renderização 3D fotorrealista, com iluminação e texturas detalhadas, semelhante ao Octane Render ou V-Ray."
        }
        AdditionalStyle::OilPainting => {
            "Crie a imagem como uma pintura a óleo clássica, com pinceladas visíveis, textura de tela e uma paleta de cores rica."
        }
        AdditionalStyle::PencilDrawing => {
            "Crie a imagem como um desenho detalhado a lápis de grafite, com sombreamento realista, hachuras e diferentes pesos de linha."
        }
        AdditionalStyle::Cinematic => {
            "Crie a imagem com uma estética cinematográfica, usando iluminação dramática, cores graduadas (color grading), e uma composição widescreen com profundidade de campo rasa."
        }
        AdditionalStyle::Watercolor => {
            "Crie a imagem como uma pintura em aquarela, com cores translúcidas, bordas suaves e a textura do papel visível."
        }
        AdditionalStyle::Sketch => {
            "Crie a imagem como um esboço rápido, com linhas gestuais, hachuras para sombreamento e uma sensação de espontaneidade."
        }
        AdditionalStyle::ConceptArt => {
            "Crie a imagem no estilo de arte conceitual para filmes ou videogames, com um foco em design, atmosfera e narrativa visual."
        }
        AdditionalStyle::Vaporwave => {
            "Crie a imagem com uma estética vaporwave, usando cores neon, grades de perspectiva, estátuas romanas, e elementos de design retro-futurista dos anos 80 e 90."
        }
        AdditionalStyle::None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_style_is_a_noop() {
        assert_eq!(additional_style_prompt(AdditionalStyle::None), "");
    }

    #[test]
    fn test_every_named_style_has_text() {
        let styles = [
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
        for style in styles {
            assert!(!additional_style_prompt(style).is_empty());
        }
    }
}

//! Outpainting request and master prompt.

use serde::{Deserialize, Serialize};

use crate::config::AspectRatio;
use crate::media::UploadedImage;

/// Canvas-expansion request: the original image stays the untouchable
/// center, everything around it is synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandImageRequest {
    pub image: UploadedImage,
    pub aspect_ratio: AspectRatio,
    /// Optional creative direction for the filled areas
    pub prompt: String,
}

/// Aspect-ratio-specific expansion phrasing.
pub fn aspect_ratio_directive(aspect_ratio: AspectRatio) -> &'static str {
    match aspect_ratio {
        AspectRatio::Square => {
            "Forme uma imagem perfeitamente quadrada (1:1). A imagem original é o centro da composição. Sua tarefa é preencher as áreas ausentes (sejam elas laterais ou superior/inferior) para completar o quadrado. A expansão deve dar continuidade lógica e natural a todos os elementos da cena: objetos, pessoas, texturas e iluminação. Mantenha a proporção dos elementos originais sem distorcer nada."
        }
        AspectRatio::Widescreen => {
            "Crie uma imagem panorâmica de paisagem (16:9), como uma cena de cinema. A imagem original é o ponto focal. Você deve expandir o campo de visão horizontalmente, preenchendo as laterais esquerda e direita. Imagine que a câmera se afastou, revelando mais do ambiente. Continue a cena, objetos e pessoas de forma coesa, mantendo o estilo fotográfico original."
        }
        AspectRatio::Vertical => {
            "Gere uma imagem alta, no formato de retrato vertical (9:16), ideal para stories. A imagem original deve permanecer centralizada. Sua tarefa é preencher o espaço vertical, adicionando conteúdo acima e abaixo da imagem original. Expanda a cena de forma lógica, mostrando mais do céu, do chão, ou completando o corpo de uma pessoa. A continuidade visual é crucial."
        }
        AspectRatio::Landscape => {
            "Expanda a imagem para o formato clássico de paisagem (4:3), como uma fotografia tradicional. Mantenha a imagem original no centro e preencha as laterais para atingir a proporção. A expansão deve ser uma continuação natural da cena, preservando a composição, iluminação e os detalhes dos objetos e pessoas existentes."
        }
        AspectRatio::Portrait => {
            "Transforme a imagem em um formato de retrato clássico (3:4). A imagem original é o elemento central. Você deve preencher as áreas superior e inferior para criar a composição vertical. Dê continuidade à cena, objetos e pessoas de maneira fotorrealista, mantendo a integridade e o estilo da imagem original sem cortes ou duplicações."
        }
    }
}

const DEFAULT_CREATIVE_DIRECTION: &str = "Continue a cena de forma natural e fotorrealista. Expanda o ambiente, os elementos e as pessoas existentes de maneira lógica e esteticamente agradável, completando a história visual da imagem.";

/// The complete outpainting instruction, fidelity directives included.
pub fn expand_prompt(request: &ExpandImageRequest) -> String {
    let creative_direction = if request.prompt.is_empty() {
        DEFAULT_CREATIVE_DIRECTION
    } else {
        request.prompt.as_str()
    };

    format!(
        "Missão Crítica de Expansão de Imagem (Outpainting) - MODO DE PRECISÃO MÁXIMA\n\n\
**Cenário:** A imagem fornecida é um recorte de alta qualidade de uma cena fotográfica maior. Considere-a como a \"verdade absoluta\" do centro da composição.\n\n\
**Sua Tarefa Imperativa:** Você deve expandir o canvas da imagem para {}. Sua função é preencher as áreas ausentes de forma tão perfeita que seja impossível distinguir o conteúdo original do conteúdo gerado. O resultado final deve ser uma única imagem, 100% coesa e completa.\n\n\
**DIRETRIZES NÃO-NEGOCIÁVEIS:**\n\n\
1.  **FIDELIDADE FOTOGRÁFICA TOTAL (100%):** A expansão DEVE ser uma continuação exata e indistinguível da imagem original. Isso inclui, mas não se limita a:\n    \
*   **Iluminação e Sombras:** A direção, qualidade (dura/suave) e cor da luz devem ser perfeitamente consistentes. Sombras projetadas devem continuar com o ângulo e a nitidez corretos.\n    \
*   **Paleta de Cores e Gradação:** A gradação de cores (color grading) e o balanço de branco devem ser idênticos.\n    \
*   **Texturas e Materiais:** Continue as texturas de superfícies (pele, tecido, madeira, etc.) de forma realista.\n    \
*   **Características da Lente:** Replique a profundidade de campo (bokeh), a nitidez, a vinheta, a distorção da lente e quaisquer aberrações cromáticas presentes na imagem original.\n    \
*   **Ruído/Granulação:** O ruído do sensor ou a granulação do filme devem ser uniformes em toda a imagem, incluindo as novas áreas. A transição deve ser invisível.\n\n\
2.  **TOLERÂNCIA ZERO PARA DUPLICAÇÃO:** É estritamente proibido copiar, clonar, espelhar ou repetir qualquer objeto, padrão ou elemento distinto da imagem original nas áreas expandidas. A IA deve gerar conteúdo completamente novo e original que continue a cena de forma lógica e criativa. A detecção de qualquer duplicação resultará em falha da missão.\n\n\
3.  **COMPOSIÇÃO COMPLETA E SEM CORTES:** A imagem final não deve conter elementos que pareçam cortados ou que terminem abruptamente nas bordas do novo enquadramento. Se um objeto (como um braço de uma pessoa ou o topo de uma árvore) se estende para a nova área, ele deve ser renderizado em sua totalidade de uma maneira que faça sentido composicional e contextual. A composição final deve parecer intencional e completa.\n\n\
4.  **DIREÇÃO CRIATIVA (Contexto):** Para guiar o preenchimento das áreas expandidas, use a seguinte instrução: \"{}\".\n\n\
**VERIFICAÇÃO FINAL:** Antes de finalizar, revise a imagem gerada em relação a todas as diretrizes acima. O resultado deve ser uma única fotografia impecável, expandida, que parece ter sido capturada originalmente na proporção final solicitada.",
        aspect_ratio_directive(request.aspect_ratio),
        creative_direction
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ratio: AspectRatio, prompt: &str) -> ExpandImageRequest {
        ExpandImageRequest {
            image: UploadedImage {
                base64: "AA==".to_string(),
                mime_type: "image/png".to_string(),
                name: "input.png".to_string(),
            },
            aspect_ratio: ratio,
            prompt: prompt.to_string(),
        }
    }

    #[test]
    fn test_every_ratio_has_specific_phrasing() {
        let ratios = [
            AspectRatio::Square,
            AspectRatio::Widescreen,
            AspectRatio::Vertical,
            AspectRatio::Landscape,
            AspectRatio::Portrait,
        ];
        for ratio in ratios {
            let directive = aspect_ratio_directive(ratio);
            assert!(directive.contains(ratio.as_str()), "directive for {ratio:?} must name the ratio");
        }
    }

    #[test]
    fn test_empty_prompt_falls_back_to_default_direction() {
        let prompt = expand_prompt(&request(AspectRatio::Widescreen, ""));
        assert!(prompt.contains("Continue a cena de forma natural e fotorrealista."));
    }

    #[test]
    fn test_custom_direction_is_embedded() {
        let prompt = expand_prompt(&request(AspectRatio::Square, "adicione montanhas ao fundo"));
        assert!(prompt.contains("\"adicione montanhas ao fundo\""));
        assert!(!prompt.contains(super::DEFAULT_CREATIVE_DIRECTION));
    }

    #[test]
    fn test_fidelity_directives_present() {
        let prompt = expand_prompt(&request(AspectRatio::Portrait, ""));
        for needle in [
            "FIDELIDADE FOTOGRÁFICA TOTAL",
            "TOLERÂNCIA ZERO PARA DUPLICAÇÃO",
            "COMPOSIÇÃO COMPLETA E SEM CORTES",
            "VERIFICAÇÃO FINAL",
        ] {
            assert!(prompt.contains(needle), "missing directive {needle}");
        }
    }
}

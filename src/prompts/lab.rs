//! Multi-source composition ("image lab") request and prompt.

use serde::{Deserialize, Serialize};

use crate::media::UploadedImage;

/// One labeled slot of the composition: reference images plus free text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabSlot {
    pub images: Vec<UploadedImage>,
    pub prompt: String,
}

impl LabSlot {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.prompt.is_empty()
    }
}

/// Final-quality treatment of the composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabMode {
    Normal,
    Professional,
    Amateur,
}

impl Default for LabMode {
    fn default() -> Self {
        Self::Normal
    }
}

/// Merge up to four labeled sources into one coherent image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageLabRequest {
    pub subject: LabSlot,
    pub scenery: LabSlot,
    pub style: LabSlot,
    pub extra: LabSlot,
    pub number_of_images: u32,
    pub mode: LabMode,
    pub amateur_level: Option<u8>,
    pub is_photoshoot: bool,
    pub perspective: Option<String>,
}

impl ImageLabRequest {
    /// Reference images in slot order: subject, scenery, style, extras.
    /// The order mirrors the numbered sections of the instruction text.
    pub fn reference_images(&self) -> Vec<&UploadedImage> {
        self.subject
            .images
            .iter()
            .chain(self.scenery.images.iter())
            .chain(self.style.images.iter())
            .chain(self.extra.images.iter())
            .collect()
    }
}

/// The combined composition instruction.
pub fn lab_prompt(request: &ImageLabRequest) -> String {
    let mut prompt = format!(
        "Crie uma nova e coesa imagem fotorrealista combinando os seguintes elementos. A imagem final deve ter {} variações. \n",
        request.number_of_images
    );

    if !request.subject.is_empty() {
        prompt.push_str("\n**1. Personagem/Objeto Principal:**\n");
        if !request.subject.images.is_empty() {
            prompt.push_str(
                "- Use as imagens de referência fornecidas para o sujeito principal. Mantenha sua aparência fiel.\n",
            );
        }
        if !request.subject.prompt.is_empty() {
            prompt.push_str(&format!("- Descrição textual do sujeito: {}\n", request.subject.prompt));
        }
    }

    if !request.scenery.is_empty() {
        prompt.push_str("\n**2. Cenário e Ambiente:**\n");
        if !request.scenery.images.is_empty() {
            prompt.push_str("- O cenário deve ser inspirado nas imagens de referência de cenário.\n");
        }
        if !request.scenery.prompt.is_empty() {
            prompt.push_str(&format!("- Descrição textual do cenário: {}\n", request.scenery.prompt));
        }
    }

    if !request.style.is_empty() {
        prompt.push_str("\n**3. Estilo Visual e Iluminação:**\n");
        if !request.style.images.is_empty() {
            prompt.push_str(
                "- O estilo artístico, a paleta de cores e a iluminação devem ser baseados nas imagens de referência de estilo.\n",
            );
        }
        if !request.style.prompt.is_empty() {
            prompt.push_str(&format!("- Descrição textual do estilo: {}\n", request.style.prompt));
        }
    }

    if !request.extra.is_empty() {
        prompt.push_str("\n**4. Elementos Extras:**\n");
        if !request.extra.images.is_empty() {
            prompt.push_str("- Inclua objetos ou elementos inspirados nas imagens de referência extras.\n");
        }
        if !request.extra.prompt.is_empty() {
            prompt.push_str(&format!("- Descrição textual dos extras: {}\n", request.extra.prompt));
        }
    }

    prompt.push_str("\n**5. Composição e Qualidade Final:**\n");
    if let Some(perspective) = request.perspective.as_deref() {
        prompt.push_str(&format!("- A perspectiva da câmera deve ser: {}.\n", perspective));
    }

    match request.mode {
        LabMode::Professional => {
            prompt.push_str(
                "- A qualidade final deve ser de estúdio profissional: alta nitidez, iluminação perfeita, e detalhes fotorrealistas.\n",
            );
        }
        LabMode::Amateur => {
            prompt.push_str(&format!(
                "- A qualidade final deve simular uma foto de amador (nível {}), com imperfeições realistas.\n",
                request.amateur_level.unwrap_or(3)
            ));
        }
        LabMode::Normal => {}
    }

    if request.is_photoshoot {
        prompt.push_str(&format!(
            "- Gere uma série de {} fotos como se fosse um ensaio fotográfico, variando a pose e o ângulo sutilmente entre cada imagem.\n",
            request.number_of_images
        ));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> UploadedImage {
        UploadedImage {
            base64: "AA==".to_string(),
            mime_type: "image/png".to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_empty_slots_are_skipped() {
        let request = ImageLabRequest {
            subject: LabSlot { images: vec![], prompt: "um robô".to_string() },
            number_of_images: 1,
            ..Default::default()
        };
        let prompt = lab_prompt(&request);
        assert!(prompt.contains("**1. Personagem/Objeto Principal:**"));
        assert!(!prompt.contains("**2. Cenário e Ambiente:**"));
        assert!(!prompt.contains("**3. Estilo Visual e Iluminação:**"));
        assert!(!prompt.contains("**4. Elementos Extras:**"));
        assert!(prompt.contains("**5. Composição e Qualidade Final:**"));
    }

    #[test]
    fn test_reference_images_follow_section_order() {
        let request = ImageLabRequest {
            subject: LabSlot { images: vec![image("s1"), image("s2")], prompt: String::new() },
            scenery: LabSlot { images: vec![image("c1")], prompt: String::new() },
            style: LabSlot { images: vec![image("e1")], prompt: String::new() },
            extra: LabSlot { images: vec![image("x1")], prompt: String::new() },
            number_of_images: 1,
            ..Default::default()
        };
        let names: Vec<_> = request.reference_images().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["s1", "s2", "c1", "e1", "x1"]);
    }

    #[test]
    fn test_amateur_mode_includes_level() {
        let request = ImageLabRequest {
            subject: LabSlot { images: vec![image("s1")], prompt: String::new() },
            number_of_images: 2,
            mode: LabMode::Amateur,
            amateur_level: Some(5),
            ..Default::default()
        };
        let prompt = lab_prompt(&request);
        assert!(prompt.contains("foto de amador (nível 5)"));
    }

    #[test]
    fn test_photoshoot_directive() {
        let request = ImageLabRequest {
            subject: LabSlot { images: vec![image("s1")], prompt: String::new() },
            number_of_images: 4,
            is_photoshoot: true,
            perspective: Some("vista aérea".to_string()),
            ..Default::default()
        };
        let prompt = lab_prompt(&request);
        assert!(prompt.contains("série de 4 fotos"));
        assert!(prompt.contains("A perspectiva da câmera deve ser: vista aérea."));
    }
}

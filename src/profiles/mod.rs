//! Consistency profiles - named reference-image bundles with generation modes

pub mod store;

use serde::{Deserialize, Serialize};

use crate::media::UploadedImage;

pub use store::{ProfileStore, ProfileUpdate};

/// How generated images should treat the profile's subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyMode {
    Normal,
    Professional,
    Amateur,
    PhotographicReality,
}

/// Quality sub-style for photographic-reality sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RealityStyle {
    Professional,
    Amateur,
}

/// Optional art style applied on top of profile edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalStyle {
    None,
    Ghibli,
    Anime,
    #[serde(rename = "3d_render")]
    Render3d,
    OilPainting,
    PencilDrawing,
    Cinematic,
    Watercolor,
    Sketch,
    ConceptArt,
    Vaporwave,
}

/// A named, reusable bundle of reference images plus generation-mode
/// settings, used to keep a subject's appearance stable across generations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyProfile {
    pub id: String,
    pub name: String,
    pub images: Vec<UploadedImage>,
    pub consistency_mode: ConsistencyMode,
    pub additional_style: AdditionalStyle,
    /// 1-5 scale of "bad photography" imperfections; only meaningful for
    /// amateur mode or photographic reality with the amateur sub-style
    pub amateur_level: Option<u8>,
    pub photographic_reality_style: Option<RealityStyle>,
    /// Number of shots in a photoshoot session (2-8)
    pub photoshoot_shots: Option<u32>,
}

impl ConsistencyProfile {
    /// Effective amateur level, defaulting to the middle of the scale.
    pub fn amateur_level_or_default(&self) -> u8 {
        self.amateur_level.unwrap_or(3)
    }
}

/// Profile names are used as chat-prompt triggers, so they stay restricted
/// to alphanumeric characters and underscores.
pub fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_name_validation() {
        assert!(is_valid_profile_name("robot_1"));
        assert!(is_valid_profile_name("Fido"));
        assert!(!is_valid_profile_name("robot 1"));
        assert!(!is_valid_profile_name("robot-1"));
        assert!(!is_valid_profile_name(""));
        assert!(!is_valid_profile_name("café"));
    }

    #[test]
    fn test_additional_style_wire_names() {
        assert_eq!(serde_json::to_string(&AdditionalStyle::Render3d).unwrap(), "\"3d_render\"");
        assert_eq!(
            serde_json::to_string(&AdditionalStyle::OilPainting).unwrap(),
            "\"oil_painting\""
        );
        let back: ConsistencyMode = serde_json::from_str("\"photographic_reality\"").unwrap();
        assert_eq!(back, ConsistencyMode::PhotographicReality);
    }
}

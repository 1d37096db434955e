//! In-memory profile collection with create/update/delete

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::media::UploadedImage;
use crate::profiles::{
    is_valid_profile_name, AdditionalStyle, ConsistencyMode, ConsistencyProfile, RealityStyle,
};

/// Partial update applied to an existing profile
#[derive(Debug, Default, Clone)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub images: Option<Vec<UploadedImage>>,
    pub consistency_mode: Option<ConsistencyMode>,
    pub additional_style: Option<AdditionalStyle>,
    pub amateur_level: Option<u8>,
    pub photographic_reality_style: Option<RealityStyle>,
    pub photoshoot_shots: Option<u32>,
}

/// Insertion-ordered collection of consistency profiles.
///
/// Order matters: chat dispatch resolves prompt mentions against profiles in
/// creation order, and the first match decides the photoshoot branch.
#[derive(Default)]
pub struct ProfileStore {
    profiles: RwLock<Vec<ConsistencyProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profile after validating name, mode and level constraints.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &self,
        name: &str,
        images: Vec<UploadedImage>,
        mode: ConsistencyMode,
        style: AdditionalStyle,
        amateur_level: Option<u8>,
        reality_style: Option<RealityStyle>,
        photoshoot_shots: Option<u32>,
    ) -> Result<ConsistencyProfile> {
        let name = name.trim();
        self.validate_name(name, None)?;
        validate_mode(mode, style, amateur_level, photoshoot_shots)?;
        if images.is_empty() {
            return Err(AppError::InvalidRequest(
                "Adicione pelo menos uma imagem de referência ao perfil.".to_string(),
            ));
        }

        let reality_style = match mode {
            ConsistencyMode::PhotographicReality => {
                Some(reality_style.unwrap_or(RealityStyle::Professional))
            }
            _ => None,
        };
        let amateur_level = match (mode, reality_style) {
            (ConsistencyMode::Amateur, _) => amateur_level,
            (ConsistencyMode::PhotographicReality, Some(RealityStyle::Amateur)) => amateur_level,
            _ => None,
        };
        let photoshoot_shots = match mode {
            ConsistencyMode::PhotographicReality => photoshoot_shots,
            _ => None,
        };

        let profile = ConsistencyProfile {
            id: format!("profile-{}", Uuid::new_v4()),
            name: name.to_string(),
            images,
            consistency_mode: mode,
            additional_style: style,
            amateur_level,
            photographic_reality_style: reality_style,
            photoshoot_shots,
        };

        debug!(profile = %profile.name, mode = ?mode, "Created consistency profile");
        self.profiles.write().push(profile.clone());
        Ok(profile)
    }

    /// Promote a generated image into a plain profile.
    pub fn create_from_image(&self, name: &str, image: UploadedImage) -> Result<ConsistencyProfile> {
        self.create(
            name,
            vec![image],
            ConsistencyMode::Normal,
            AdditionalStyle::None,
            None,
            None,
            None,
        )
    }

    /// Apply a partial update in place.
    pub fn update(&self, id: &str, update: ProfileUpdate) -> Result<ConsistencyProfile> {
        if let Some(new_name) = update.name.as_deref() {
            self.validate_name(new_name.trim(), Some(id))?;
        }

        let mut profiles = self.profiles.write();
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::InvalidRequest(format!("Perfil não encontrado: {}", id)))?;

        let mode = update.consistency_mode.unwrap_or(profile.consistency_mode);
        let style = update.additional_style.unwrap_or(profile.additional_style);
        let level = update.amateur_level.or(profile.amateur_level);
        let shots = update.photoshoot_shots.or(profile.photoshoot_shots);
        validate_mode(mode, style, level, shots)?;

        if let Some(name) = update.name {
            profile.name = name.trim().to_string();
        }
        if let Some(images) = update.images {
            if images.is_empty() {
                return Err(AppError::InvalidRequest(
                    "Adicione pelo menos uma imagem de referência ao perfil.".to_string(),
                ));
            }
            profile.images = images;
        }
        profile.consistency_mode = mode;
        profile.additional_style = style;
        profile.amateur_level = level;
        if let Some(reality_style) = update.photographic_reality_style {
            profile.photographic_reality_style = Some(reality_style);
        }
        profile.photoshoot_shots = shots;

        debug!(profile = %profile.name, "Updated consistency profile");
        Ok(profile.clone())
    }

    /// Delete by id. Unknown ids are a no-op, matching the original UI.
    pub fn delete(&self, id: &str) {
        self.profiles.write().retain(|p| p.id != id);
    }

    pub fn get(&self, id: &str) -> Option<ConsistencyProfile> {
        self.profiles.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn get_by_name(&self, name: &str) -> Option<ConsistencyProfile> {
        self.profiles.read().iter().find(|p| p.name == name).cloned()
    }

    pub fn list(&self) -> Vec<ConsistencyProfile> {
        self.profiles.read().clone()
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }

    /// All profiles whose name occurs as a substring of the prompt, in
    /// insertion order. Dispatch captures these by value before any async
    /// work begins.
    pub fn find_matches(&self, prompt: &str) -> Vec<ConsistencyProfile> {
        self.profiles
            .read()
            .iter()
            .filter(|p| prompt.contains(&p.name))
            .cloned()
            .collect()
    }

    fn validate_name(&self, name: &str, exclude_id: Option<&str>) -> Result<()> {
        if !is_valid_profile_name(name) {
            return Err(AppError::InvalidRequest(
                "Nome de perfil inválido. Use apenas letras, números e underscore.".to_string(),
            ));
        }
        let profiles = self.profiles.read();
        if profiles.iter().any(|p| p.name == name && Some(p.id.as_str()) != exclude_id) {
            return Err(AppError::InvalidRequest(format!("Já existe um perfil chamado '{}'.", name)));
        }
        Ok(())
    }
}

fn validate_mode(
    mode: ConsistencyMode,
    style: AdditionalStyle,
    amateur_level: Option<u8>,
    photoshoot_shots: Option<u32>,
) -> Result<()> {
    // Normal mode carries no styling guidance, so a style on top of it would
    // silently be ignored by the prompt compiler.
    if mode == ConsistencyMode::Normal && style != AdditionalStyle::None {
        return Err(AppError::InvalidRequest(
            "O modo normal não aceita estilos adicionais.".to_string(),
        ));
    }
    if let Some(level) = amateur_level {
        if !(1..=5).contains(&level) {
            return Err(AppError::InvalidRequest(
                "Nível de amador deve estar entre 1 e 5.".to_string(),
            ));
        }
    }
    if let Some(shots) = photoshoot_shots {
        if !(2..=8).contains(&shots) {
            return Err(AppError::InvalidRequest(
                "Número de fotos do ensaio deve estar entre 2 e 8.".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> UploadedImage {
        UploadedImage::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0], "image/jpeg", "ref.jpg")
            .unwrap()
    }

    fn store_with(names: &[&str]) -> ProfileStore {
        let store = ProfileStore::new();
        for name in names {
            store
                .create(
                    name,
                    vec![sample_image()],
                    ConsistencyMode::Normal,
                    AdditionalStyle::None,
                    None,
                    None,
                    None,
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_create_rejects_invalid_names() {
        let store = ProfileStore::new();
        for bad in ["robot 1", "robot-1", ""] {
            let result = store.create(
                bad,
                vec![sample_image()],
                ConsistencyMode::Normal,
                AdditionalStyle::None,
                None,
                None,
                None,
            );
            assert!(result.is_err(), "name {bad:?} should be rejected");
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_name() {
        let store = store_with(&["fido"]);
        let result = store.create(
            "fido",
            vec![sample_image()],
            ConsistencyMode::Normal,
            AdditionalStyle::None,
            None,
            None,
            None,
        );
        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_normal_mode_excludes_styles() {
        let store = ProfileStore::new();
        let result = store.create(
            "fido",
            vec![sample_image()],
            ConsistencyMode::Normal,
            AdditionalStyle::Anime,
            None,
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_amateur_level_only_kept_for_amateur_contexts() {
        let store = ProfileStore::new();
        let pro = store
            .create(
                "pro_model",
                vec![sample_image()],
                ConsistencyMode::Professional,
                AdditionalStyle::None,
                Some(4),
                None,
                None,
            )
            .unwrap();
        assert_eq!(pro.amateur_level, None);

        let amateur = store
            .create(
                "casual_model",
                vec![sample_image()],
                ConsistencyMode::Amateur,
                AdditionalStyle::None,
                Some(4),
                None,
                None,
            )
            .unwrap();
        assert_eq!(amateur.amateur_level, Some(4));
    }

    #[test]
    fn test_photographic_reality_defaults() {
        let store = ProfileStore::new();
        let profile = store
            .create(
                "model_a",
                vec![sample_image()],
                ConsistencyMode::PhotographicReality,
                AdditionalStyle::None,
                None,
                None,
                Some(6),
            )
            .unwrap();
        assert_eq!(profile.photographic_reality_style, Some(RealityStyle::Professional));
        assert_eq!(profile.photoshoot_shots, Some(6));
    }

    #[test]
    fn test_photoshoot_shots_bounds() {
        let store = ProfileStore::new();
        for bad in [1, 9] {
            let result = store.create(
                "model_a",
                vec![sample_image()],
                ConsistencyMode::PhotographicReality,
                AdditionalStyle::None,
                None,
                None,
                Some(bad),
            );
            assert!(result.is_err(), "shots={bad} should be rejected");
        }
    }

    #[test]
    fn test_create_from_image_promotes_to_plain_profile() {
        let store = ProfileStore::new();
        let profile = store.create_from_image("gato_gerado", sample_image()).unwrap();
        assert_eq!(profile.consistency_mode, ConsistencyMode::Normal);
        assert_eq!(profile.additional_style, AdditionalStyle::None);
        assert_eq!(profile.images.len(), 1);
        assert!(store.get_by_name("gato_gerado").is_some());
    }

    #[test]
    fn test_update_and_delete() {
        let store = store_with(&["fido", "rex"]);
        let id = store.get_by_name("fido").unwrap().id;

        let updated = store
            .update(
                &id,
                ProfileUpdate { name: Some("fido_2".to_string()), ..Default::default() },
            )
            .unwrap();
        assert_eq!(updated.name, "fido_2");
        assert!(store.get_by_name("fido").is_none());

        // Renaming onto an existing profile's name is rejected
        let clash = store.update(&id, ProfileUpdate { name: Some("rex".to_string()), ..Default::default() });
        assert!(clash.is_err());

        store.delete(&id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_find_matches_preserves_insertion_order() {
        let store = store_with(&["rex", "fido"]);
        let matches = store.find_matches("coloque fido e rex na praia");
        let names: Vec<_> = matches.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["rex", "fido"]);
    }
}

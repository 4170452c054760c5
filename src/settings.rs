use std::{
    path::PathBuf,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    CatalogKind,
    ZukanError,
};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub creature: CreatureCatalogSettings,
    pub character: CharacterCatalogSettings,
    /// Upper bound of every radar axis.
    pub chart_ceiling: f32,
    pub request_timeout_secs: u64,
    /// Font with CJK coverage, needed to render localized names.
    pub font_path: Option<PathBuf>,
    pub dark_mode: bool,
    pub active_catalog: CatalogKind,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            creature: CreatureCatalogSettings::default(),
            character: CharacterCatalogSettings::default(),
            chart_ceiling: 150.0,
            request_timeout_secs: 30,
            font_path: None,
            dark_mode: true,
            active_catalog: CatalogKind::Creature,
        }
    }
}

impl SettingsData {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureCatalogSettings {
    pub base_url: String,
    pub min_id: u32,
    pub max_id: u32,
    pub language: String,
}

impl Default for CreatureCatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            min_id: 1,
            max_id: 898,
            language: "ja-Hrkt".to_string(),
        }
    }
}

impl CreatureCatalogSettings {
    pub fn id_range(&self) -> Result<IdRange, ZukanError> {
        IdRange::new(self.min_id, self.max_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterCatalogSettings {
    pub base_url: String,
    /// Loaded on start instead of a random pick.
    pub initial_character: Option<String>,
}

impl Default for CharacterCatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://nikke-api.vercel.app".to_string(),
            initial_character: Some("anis".to_string()),
        }
    }
}

/// Inclusive, non-empty range of valid creature ids. Ids start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    min: u32,
    max: u32,
}

impl IdRange {
    pub fn new(min: u32, max: u32) -> Result<Self, ZukanError> {
        if min == 0 || min > max {
            return Err(ZukanError::InvalidIdRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, id: u32) -> bool {
        (self.min..=self.max).contains(&id)
    }

    pub fn pick<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min..=self.max)
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    #[test]
    fn test_id_range_validation() {
        assert!(IdRange::new(1, 898).is_ok());
        assert!(IdRange::new(5, 5).is_ok());
        assert!(matches!(IdRange::new(0, 10), Err(ZukanError::InvalidIdRange { .. })));
        assert!(matches!(IdRange::new(10, 9), Err(ZukanError::InvalidIdRange { .. })));
    }

    #[test]
    fn test_id_range_pick_stays_in_bounds() {
        let range = IdRange::new(1, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(range.contains(range.pick(&mut rng)));
        }

        let single = IdRange::new(42, 42).unwrap();
        assert_eq!(single.pick(&mut rng), 42);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{ "creature": { "max_id": 151 }, "dark_mode": false }"#)
                .unwrap();
        assert_eq!(settings.creature.max_id, 151);
        assert_eq!(settings.creature.min_id, 1);
        assert_eq!(settings.creature.language, "ja-Hrkt");
        assert_eq!(settings.chart_ceiling, 150.0);
        assert!(!settings.dark_mode);
        assert_eq!(settings.character.initial_character.as_deref(), Some("anis"));
    }

    #[test]
    fn test_active_catalog_round_trips_as_snake_case() {
        let settings =
            SettingsData { active_catalog: CatalogKind::Character, ..Default::default() };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["active_catalog"], "character");
    }
}

//! Response shapes of the character catalog (NIKKE API).

use serde::Deserialize;

use crate::core::{
    fetch::{
        fetch_typed,
        JsonFetcher,
    },
    http::resource_url,
    ZukanError,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterImages {
    pub icon: Option<String>,
    pub card: Option<String>,
    pub full: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterResponse {
    pub name: String,
    pub rarity: String,
    pub element: String,
    pub weapon: String,
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    pub images: CharacterImages,
}

impl CharacterResponse {
    /// Largest image available, falling back to the smaller variants.
    pub fn best_image(&self) -> Option<&str> {
        self.images
            .full
            .as_deref()
            .or(self.images.card.as_deref())
            .or(self.images.icon.as_deref())
    }
}

/// Entry of the `/characters` listing; only the name is needed to pick one.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterSummary {
    pub name: String,
}

pub const MAX_RARITY_TIER: u32 = 3;

/// Numeric tier used for the chart: R=1, SR=2, SSR=3, anything else 0.
pub fn rarity_tier(rarity: &str) -> u32 {
    match rarity.trim().to_ascii_uppercase().as_str() {
        "R" => 1,
        "SR" => 2,
        "SSR" => MAX_RARITY_TIER,
        _ => 0,
    }
}

pub async fn list_characters<F>(
    fetcher: &F,
    base_url: &str,
) -> Result<Vec<CharacterSummary>, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    let url = resource_url(base_url, &["characters"])?;
    fetch_typed(fetcher, url.as_str()).await
}

pub async fn get_character<F>(
    fetcher: &F,
    base_url: &str,
    name: &str,
) -> Result<CharacterResponse, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    let url = resource_url(base_url, &["characters", name])?;
    fetch_typed(fetcher, url.as_str()).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_rarity_tier() {
        assert_eq!(rarity_tier("SSR"), 3);
        assert_eq!(rarity_tier("sr"), 2);
        assert_eq!(rarity_tier(" R "), 1);
        assert_eq!(rarity_tier("UR"), 0);
    }

    #[test]
    fn test_best_image_prefers_full() {
        let character: CharacterResponse = serde_json::from_value(json!({
            "name": "Anis", "rarity": "SR", "element": "Electric", "weapon": "RL",
            "class": "Supporter",
            "skills": [],
            "images": { "icon": "i.png", "card": "c.png", "full": null }
        }))
        .unwrap();
        assert_eq!(character.best_image(), Some("c.png"));
    }
}

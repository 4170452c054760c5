//! Response shapes of the creature catalog (PokeAPI v2). Only the fields the
//! viewer reads are declared; everything else in the payload is ignored.

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    fetch::{
        fetch_typed,
        JsonFetcher,
    },
    http::resource_url,
    ZukanError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameEntry {
    pub name: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatureResponse {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub sprites: Sprites,
    pub species: NamedResource,
    pub abilities: Vec<AbilitySlot>,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesResponse {
    pub name: String,
    #[serde(default)]
    pub names: Vec<NameEntry>,
}

pub async fn get_record<F>(
    fetcher: &F,
    base_url: &str,
    id: u32,
) -> Result<CreatureResponse, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    let url = resource_url(base_url, &["pokemon", &id.to_string()])?;
    fetch_typed(fetcher, url.as_str()).await
}

/// Species, abilities and types are fetched through the URLs a prior response
/// handed out, never rebuilt from the base URL.
pub async fn get_species<F>(
    fetcher: &F,
    resource: &NamedResource,
) -> Result<SpeciesResponse, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    fetch_typed(fetcher, &resource.url).await
}

use futures::future::try_join_all;
use rand::seq::IndexedRandom;

use super::{
    fetch::JsonFetcher,
    localization::{
        lookup_localized_name,
        resolve_localized_name,
    },
    models::{
        CatalogKind,
        DisplayRecord,
        Fact,
        LocalizedName,
        Section,
        Selection,
        Stat,
    },
    ZukanError,
};
use crate::{
    catalog::{
        character::{
            self,
            rarity_tier,
        },
        creature::{
            self,
            NamedResource,
        },
    },
    settings::{
        CharacterCatalogSettings,
        CreatureCatalogSettings,
        SettingsData,
    },
};

pub const ABILITIES_SECTION: &str = "Abilities";
pub const TYPES_SECTION: &str = "Types";
pub const SKILLS_SECTION: &str = "Skills";

/// Runs one fetch cycle for `catalog`. Stateless: every call is independent and
/// either returns a complete record or an error, never a partial record.
pub async fn build_display_record<F>(
    fetcher: &F,
    settings: &SettingsData,
    catalog: CatalogKind,
    selection: &Selection,
) -> Result<DisplayRecord, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    match catalog {
        CatalogKind::Creature => {
            let id = match selection {
                Selection::Random => {
                    let range = settings.creature.id_range()?;
                    let mut rng = rand::rng();
                    range.pick(&mut rng)
                }
                Selection::Forced(key) => key.trim().parse::<u32>().map_err(|_| {
                    ZukanError::InvalidSelection(format!("'{key}' is not a creature id"))
                })?,
            };
            build_creature_record(fetcher, &settings.creature, id).await
        }
        CatalogKind::Character => {
            let name = match selection {
                Selection::Random => pick_random_character(fetcher, &settings.character).await?,
                Selection::Forced(name) => name.clone(),
            };
            build_character_record(fetcher, &settings.character, &name).await
        }
    }
}

pub async fn build_creature_record<F>(
    fetcher: &F,
    settings: &CreatureCatalogSettings,
    id: u32,
) -> Result<DisplayRecord, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    let record = creature::get_record(fetcher, &settings.base_url, id).await?;
    let species = creature::get_species(fetcher, &record.species).await?;

    let display_name = lookup_localized_name(&species.names, &settings.language)
        .map(str::to_string)
        .unwrap_or_else(|| record.name.clone());

    let language = settings.language.as_str();
    let (abilities, types) = futures::try_join!(
        resolve_all(fetcher, record.abilities.iter().map(|slot| &slot.ability), language),
        resolve_all(fetcher, record.types.iter().map(|slot| &slot.kind), language),
    )?;

    tracing::debug!(
        id,
        name = %record.name,
        abilities = abilities.len(),
        types = types.len(),
        "creature record resolved"
    );

    Ok(DisplayRecord {
        catalog: CatalogKind::Creature,
        id: record.id.to_string(),
        name: record.name.clone(),
        display_name,
        image_url: record.sprites.front_default.clone(),
        facts: vec![
            Fact::new("No.", record.id.to_string()),
            Fact::new("Height", format!("{} dm", record.height)),
            Fact::new("Weight", format!("{} hg", record.weight)),
        ],
        sections: vec![
            Section { title: ABILITIES_SECTION.to_string(), entries: abilities },
            Section { title: TYPES_SECTION.to_string(), entries: types },
        ],
        stats: record
            .stats
            .iter()
            .map(|entry| Stat { name: entry.stat.name.clone(), value: entry.base_stat as f32 })
            .collect(),
    })
}

/// Resolves every reference concurrently. Results keep the input order no
/// matter which request finishes first; the first failure fails the batch.
async fn resolve_all<'a, F, I>(
    fetcher: &F,
    references: I,
    language: &str,
) -> Result<Vec<LocalizedName>, ZukanError>
where
    F: JsonFetcher + ?Sized,
    I: IntoIterator<Item = &'a NamedResource>,
{
    let tasks = references.into_iter().map(|resource| async move {
        let display = resolve_localized_name(fetcher, &resource.url, language).await?;
        Ok::<_, ZukanError>(LocalizedName { key: resource.name.clone(), display, detail: None })
    });

    try_join_all(tasks).await
}

pub async fn pick_random_character<F>(
    fetcher: &F,
    settings: &CharacterCatalogSettings,
) -> Result<String, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    let characters = character::list_characters(fetcher, &settings.base_url).await?;

    let picked = {
        let mut rng = rand::rng();
        characters.choose(&mut rng).map(|c| c.name.clone())
    };

    picked.ok_or(ZukanError::EmptyCatalog)
}

pub async fn build_character_record<F>(
    fetcher: &F,
    settings: &CharacterCatalogSettings,
    name: &str,
) -> Result<DisplayRecord, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    let record = character::get_character(fetcher, &settings.base_url, name).await?;

    let skills = record
        .skills
        .iter()
        .map(|skill| LocalizedName {
            key: skill.name.clone(),
            display: skill.name.clone(),
            detail: (!skill.description.is_empty()).then(|| skill.description.clone()),
        })
        .collect();

    Ok(DisplayRecord {
        catalog: CatalogKind::Character,
        id: name.to_string(),
        name: record.name.clone(),
        display_name: record.name.clone(),
        image_url: record.best_image().map(str::to_string),
        facts: vec![
            Fact::new("Rarity", &record.rarity),
            Fact::new("Element", &record.element),
            Fact::new("Weapon", &record.weapon),
            Fact::new("Class", &record.class_name),
        ],
        sections: vec![Section { title: SKILLS_SECTION.to_string(), entries: skills }],
        stats: vec![Stat {
            name: "Rarity tier".to_string(),
            value: rarity_tier(&record.rarity) as f32,
        }],
    })
}

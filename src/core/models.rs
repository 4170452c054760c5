use serde::{
    Deserialize,
    Serialize,
};

/// Which external catalog a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    #[default]
    Creature,
    Character,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Creature, CatalogKind::Character];

    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Creature => "Creatures",
            CatalogKind::Character => "Characters",
        }
    }

    pub fn refresh_label(&self) -> &'static str {
        match self {
            CatalogKind::Creature => "Random creature",
            CatalogKind::Character => "Random character",
        }
    }
}

/// What a fetch cycle should load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Random,
    /// A numeric id for creatures, a character name for characters.
    Forced(String),
}

/// A sub-reference resolved to its display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub key: String,
    pub display: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

impl Fact {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub entries: Vec<LocalizedName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: f32,
}

/// Fully resolved, render-ready record. Only ever built once every
/// sub-resolution of a cycle has succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub catalog: CatalogKind,
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub image_url: Option<String>,
    pub facts: Vec<Fact>,
    pub sections: Vec<Section>,
    pub stats: Vec<Stat>,
}

impl DisplayRecord {
    pub fn sub_field_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

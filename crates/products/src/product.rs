use core::str::FromStr;

use serde::{Deserialize, Serialize};

use weide_core::{DomainError, Entity, ProductId};

/// Milk source of a cheese. Fixed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheeseCategory {
    #[default]
    Cow,
    Goat,
    Sheep,
    Mixed,
    #[serde(rename = "Plant-based")]
    PlantBased,
}

impl CheeseCategory {
    pub const ALL: [CheeseCategory; 5] = [
        CheeseCategory::Cow,
        CheeseCategory::Goat,
        CheeseCategory::Sheep,
        CheeseCategory::Mixed,
        CheeseCategory::PlantBased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheeseCategory::Cow => "Cow",
            CheeseCategory::Goat => "Goat",
            CheeseCategory::Sheep => "Sheep",
            CheeseCategory::Mixed => "Mixed",
            CheeseCategory::PlantBased => "Plant-based",
        }
    }
}

impl core::fmt::Display for CheeseCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheeseCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::validation(format!("unknown cheese category: {needle}")))
    }
}

/// Catalog entry. Names are expected to be unique but this is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: CheeseCategory,
}

impl Product {
    pub fn new(name: impl Into<String>, category: CheeseCategory) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            category,
        }
    }

    /// Case-insensitive substring match on name or category.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.category.as_str().to_lowercase().contains(&term)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Trim a product name, rejecting blank input.
pub fn normalize_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Product name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

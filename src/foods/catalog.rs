use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// One catalog entry. Fields the API does not interpret are kept in `extra`
/// so resolved recipes return the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub fdc_id: i64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub food_nutrients: Vec<FoodNutrient>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodNutrient {
    pub nutrient: Nutrient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientTotal {
    pub total: f64,
    pub unit: String,
}

// FoodData Central exports wrap the list; hand-made catalogs may not.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped {
        #[serde(rename = "FoundationFoods")]
        foods: Vec<Food>,
    },
    Bare(Vec<Food>),
}

/// Immutable food list loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<Food>,
}

impl FoodCatalog {
    pub fn new(foods: Vec<Food>) -> Self {
        Self { foods }
    }

    /// Loads the catalog from `path`. A missing file yields an empty catalog
    /// so the journal keeps working with food features disabled.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "food catalog not found; food endpoints disabled");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read food catalog {}", path.display()))
            }
        };
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("parse food catalog {}", path.display()))?;
        info!(path = %path.display(), foods = catalog.len(), "food catalog loaded");
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let foods = match serde_json::from_str::<CatalogFile>(raw)? {
            CatalogFile::Wrapped { foods } | CatalogFile::Bare(foods) => foods,
        };
        Ok(Self { foods })
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Case-insensitive substring match on the description, first `limit` hits.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Food> {
        let needle = query.trim().to_lowercase();
        self.foods
            .iter()
            .filter(|f| f.description.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Catalog entries whose id appears in `ids`, in catalog order.
    pub fn resolve(&self, ids: &[i64]) -> Vec<&Food> {
        let wanted: HashSet<i64> = ids.iter().copied().collect();
        self.foods
            .iter()
            .filter(|f| wanted.contains(&f.fdc_id))
            .collect()
    }
}

/// Sums nutrient amounts over `foods`, keyed by nutrient name. Missing
/// amounts count as zero; the unit is taken from the first occurrence.
pub fn nutrient_totals<'a>(foods: impl IntoIterator<Item = &'a Food>) -> BTreeMap<String, NutrientTotal> {
    let mut totals: BTreeMap<String, NutrientTotal> = BTreeMap::new();
    for food in foods {
        for fnut in &food.food_nutrients {
            let entry = totals
                .entry(fnut.nutrient.name.clone())
                .or_insert_with(|| NutrientTotal {
                    total: 0.0,
                    unit: fnut.nutrient.unit_name.clone(),
                });
            entry.total += fnut.amount.unwrap_or(0.0);
        }
    }
    totals
}

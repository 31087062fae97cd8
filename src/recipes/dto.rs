use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foods::catalog::{Food, NutrientTotal};

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub food_fdc_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreateRecipeResponse {
    pub message: String,
}

/// A stored recipe joined against the food catalog.
#[derive(Debug, Serialize)]
pub struct RecipeDetails {
    pub name: String,
    pub foods: Vec<Food>,
    pub nutrient_totals: BTreeMap<String, NutrientTotal>,
}

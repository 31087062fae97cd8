use serde::{Deserialize, Serialize};

use super::catalog::Food;

/// Catalog row as listed by `GET /foods`.
#[derive(Debug, Serialize)]
pub struct FoodSummary {
    #[serde(rename = "fdcId")]
    pub fdc_id: i64,
    pub description: String,
}

impl From<&Food> for FoodSummary {
    fn from(f: &Food) -> Self {
        Self {
            fdc_id: f.fdc_id,
            description: f.description.clone(),
        }
    }
}

/// Search results returned when `limit` is not given.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct FoodQuery {
    pub q: Option<String>,
    /// Caps both search results and the plain listing; a plain listing
    /// without it returns the whole catalog.
    pub limit: Option<usize>,
}

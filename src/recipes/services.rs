use tracing::info;

use super::dto::RecipeDetails;
use super::repo;
use crate::error::{ApiError, ApiResult};
use crate::foods::catalog::{nutrient_totals, FoodCatalog};
use crate::storage::KvStore;

/// Create-only: a second recipe whose name differs only in case is rejected.
pub async fn save_recipe(store: &dyn KvStore, name: &str, food_fdc_ids: &[i64]) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidArgument("Recipe name must not be empty".into()));
    }
    if !repo::insert_recipe(store, name, food_fdc_ids).await? {
        return Err(ApiError::AlreadyExists(format!("Recipe '{}' already exists", name)));
    }
    info!(recipe = %name, foods = food_fdc_ids.len(), "recipe saved");
    Ok(())
}

pub async fn get_recipe(store: &dyn KvStore, catalog: &FoodCatalog, name: &str) -> ApiResult<RecipeDetails> {
    let ids = repo::find_recipe(store, name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Recipe '{}' not found", name)))?;

    let foods = catalog.resolve(&ids);
    let totals = nutrient_totals(foods.iter().copied());
    Ok(RecipeDetails {
        name: name.to_string(),
        foods: foods.into_iter().cloned().collect(),
        nutrient_totals: totals,
    })
}

#[cfg(test)]
mod recipe_service_tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn catalog() -> FoodCatalog {
        FoodCatalog::from_json(
            r#"[
                {"fdcId": 1, "description": "Carrot", "foodNutrients": [{"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 41.0}]},
                {"fdcId": 2, "description": "Onion", "foodNutrients": [{"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 40.0}]},
                {"fdcId": 3, "description": "Leek"}
            ]"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_name_is_case_insensitive() {
        let store = MemoryStore::new();
        save_recipe(&store, "Soup", &[1, 2]).await.unwrap();
        let err = save_recipe(&store, "soup", &[3]).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyExists(_)));

        // the first write wins
        let details = get_recipe(&store, &catalog(), "SOUP").await.unwrap();
        let ids: Vec<i64> = details.foods.iter().map(|f| f.fdc_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn missing_recipe_is_not_found() {
        let store = MemoryStore::new();
        let err = get_recipe(&store, &catalog(), "missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let store = MemoryStore::new();
        let err = save_recipe(&store, "   ", &[1]).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn resolves_foods_and_totals() {
        let store = MemoryStore::new();
        save_recipe(&store, "Stock", &[2, 1, 99]).await.unwrap();

        let details = get_recipe(&store, &catalog(), "stock").await.unwrap();
        assert_eq!(details.name, "stock");
        assert_eq!(details.foods.len(), 2);
        assert_eq!(details.nutrient_totals["Energy"].total, 81.0);
        assert_eq!(details.nutrient_totals["Energy"].unit, "kcal");
    }

    #[tokio::test]
    async fn corrupt_stored_recipe_is_a_store_error() {
        let store = MemoryStore::new();
        store.set_nx("recipe:broken", "not a list").await.unwrap();
        let err = get_recipe(&store, &catalog(), "broken").await.unwrap_err();
        assert!(matches!(err, ApiError::Store(_)));
    }
}

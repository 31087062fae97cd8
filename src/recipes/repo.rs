use anyhow::Context;

use crate::storage::KvStore;

/// Recipe names are case-insensitive: `Soup` and `soup` share a key.
pub fn recipe_key(name: &str) -> String {
    format!("recipe:{}", name.to_lowercase())
}

/// Stores the id list unless the name is taken. Returns whether it was written.
pub async fn insert_recipe(store: &dyn KvStore, name: &str, food_fdc_ids: &[i64]) -> anyhow::Result<bool> {
    let value = serde_json::to_string(food_fdc_ids)?;
    store.set_nx(&recipe_key(name), &value).await
}

pub async fn find_recipe(store: &dyn KvStore, name: &str) -> anyhow::Result<Option<Vec<i64>>> {
    let key = recipe_key(name);
    let Some(raw) = store.get(&key).await? else {
        return Ok(None);
    };
    let ids = serde_json::from_str::<Vec<i64>>(&raw)
        .with_context(|| format!("decode stored recipe {}", key))?;
    Ok(Some(ids))
}

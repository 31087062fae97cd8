use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::storage::KvStore;

/// Stored value of one hash field of `day:<date>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourPayload {
    pub mood: Option<i64>,
    pub notes: Option<String>,
}

pub fn day_key(date: &str) -> String {
    format!("day:{}", date)
}

pub fn hour_field(hour: u8) -> String {
    format!("{:02}", hour)
}

/// All stored hour fields of one day, raw and unparsed.
pub async fn fetch_day(store: &dyn KvStore, date: &str) -> anyhow::Result<HashMap<String, String>> {
    store.hget_all(&day_key(date)).await
}

pub async fn write_hour(
    store: &dyn KvStore,
    date: &str,
    hour: u8,
    payload: &HourPayload,
) -> anyhow::Result<()> {
    let value = serde_json::to_string(payload)?;
    store.hset(&day_key(date), &hour_field(hour), &value).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_store_layout() {
        assert_eq!(day_key("2025-06-01"), "day:2025-06-01");
        assert_eq!(hour_field(0), "00");
        assert_eq!(hour_field(5), "05");
        assert_eq!(hour_field(23), "23");
    }

    #[test]
    fn payload_serializes_nulls_explicitly() {
        let json = serde_json::to_string(&HourPayload { mood: None, notes: None }).unwrap();
        assert_eq!(json, r#"{"mood":null,"notes":null}"#);
    }
}

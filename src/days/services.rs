use lazy_static::lazy_static;
use regex::Regex;
use time::{macros::format_description, Date};
use tracing::{debug, warn};

use super::dto::HourEntry;
use super::repo::{self, HourPayload};
use crate::error::{ApiError, ApiResult};
use crate::storage::KvStore;

pub const HOURS_PER_DAY: u8 = 24;

/// Accepts `YYYY-MM-DD` strings that parse as a calendar date.
pub fn validate_date(date: &str) -> ApiResult<Date> {
    lazy_static! {
        static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }
    let invalid = || ApiError::InvalidArgument(format!("Invalid date format: {:?}, expected YYYY-MM-DD", date));
    if !DATE_RE.is_match(date) {
        return Err(invalid());
    }
    Date::parse(date, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())
}

pub fn validate_hour(hour: i64) -> ApiResult<u8> {
    u8::try_from(hour)
        .ok()
        .filter(|h| *h < HOURS_PER_DAY)
        .ok_or_else(|| ApiError::InvalidArgument(format!("Hour must be between 0 and 23, got {}", hour)))
}

/// Reads all 24 hours of `date`. Hours never written, and hours whose stored
/// payload no longer parses, come back empty.
pub async fn get_day(store: &dyn KvStore, date: &str) -> ApiResult<Vec<HourEntry>> {
    validate_date(date)?;
    let stored = repo::fetch_day(store, date).await?;

    let entries = (0..HOURS_PER_DAY)
        .map(|hour| {
            let field = repo::hour_field(hour);
            let Some(raw) = stored.get(&field) else {
                return HourEntry::empty(hour);
            };
            match serde_json::from_str::<HourPayload>(raw) {
                Ok(p) => HourEntry {
                    hour,
                    mood: p.mood,
                    notes: p.notes,
                },
                Err(e) => {
                    warn!(%date, hour, error = %e, "corrupt hour payload; treating as empty");
                    HourEntry::empty(hour)
                }
            }
        })
        .collect();
    Ok(entries)
}

/// Replaces whatever is stored for (`date`, `hour`). Absent fields clear the
/// previous value.
pub async fn upsert_hour(
    store: &dyn KvStore,
    date: &str,
    hour: i64,
    mood: Option<i64>,
    notes: Option<String>,
) -> ApiResult<u8> {
    validate_date(date)?;
    let hour = validate_hour(hour)?;
    repo::write_hour(store, date, hour, &HourPayload { mood, notes }).await?;
    debug!(%date, hour, "hour entry saved");
    Ok(hour)
}

use serde::{Deserialize, Serialize};

/// One hour of one day as returned by `GET /day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEntry {
    pub hour: u8,
    pub mood: Option<i64>,
    pub notes: Option<String>,
}

impl HourEntry {
    pub fn empty(hour: u8) -> Self {
        Self {
            hour,
            mood: None,
            notes: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct UpsertHourRequest {
    pub date: String,
    pub hour: i64,
    #[serde(default)]
    pub mood: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpsertHourResponse {
    pub status: &'static str,
    pub date: String,
    pub hour: u8,
}

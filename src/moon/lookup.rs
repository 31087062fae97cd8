use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::dataset::{read_dataset, MoonDataPoint};

#[derive(Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("invalid format, use YYYY-MM-DD or YYYY-MM-DDTHH")]
    Format,
    #[error("date format is wrong: {0}")]
    Invalid(String),
}

/// Turns `YYYY-MM-DD` (noon UTC) or `YYYY-MM-DDTHH` into the dataset's
/// `datetime` key.
pub fn parse_query(input: &str) -> Result<String, LookupError> {
    let input = input.trim();
    let key = match input.len() {
        10 => format!("{}T12:00:00+00:00", input),
        13 => format!("{}:00:00+00:00", input),
        _ => return Err(LookupError::Format),
    };
    OffsetDateTime::parse(&key, &Rfc3339).map_err(|e| LookupError::Invalid(e.to_string()))?;
    Ok(key)
}

/// Generated dataset keyed by its `datetime` strings.
#[derive(Debug, Default)]
pub struct MoonIndex {
    by_datetime: HashMap<String, MoonDataPoint>,
}

impl MoonIndex {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::from_points(read_dataset(path)?))
    }

    pub fn from_points(points: Vec<MoonDataPoint>) -> Self {
        Self {
            by_datetime: points.into_iter().map(|p| (p.datetime.clone(), p)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_datetime.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_datetime.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MoonDataPoint> {
        self.by_datetime.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moon::dataset::{Approach, Phase};

    fn point(datetime: &str) -> MoonDataPoint {
        MoonDataPoint {
            datetime: datetime.into(),
            illumination: 42.0,
            waxing_waning: Phase::Waxing,
            ra_hours: 3.5,
            distance_km: 390_000.0,
            approaching: Approach::Apogee,
        }
    }

    #[test]
    fn date_only_defaults_to_noon() {
        assert_eq!(parse_query("2025-08-03").unwrap(), "2025-08-03T12:00:00+00:00");
        assert_eq!(parse_query(" 2025-08-03T14 \n").unwrap(), "2025-08-03T14:00:00+00:00");
    }

    #[test]
    fn rejects_bad_shapes_and_values() {
        assert_eq!(parse_query("2025-8-3"), Err(LookupError::Format));
        assert_eq!(parse_query("2025-08-03T14:30"), Err(LookupError::Format));
        assert!(matches!(parse_query("2025-02-30"), Err(LookupError::Invalid(_))));
        assert!(matches!(parse_query("2025-08-03T25"), Err(LookupError::Invalid(_))));
    }

    #[test]
    fn finds_points_by_key() {
        let index = MoonIndex::from_points(vec![
            point("2025-08-03T12:00:00+00:00"),
            point("2025-08-03T13:00:00+00:00"),
        ]);
        assert_eq!(index.len(), 2);
        let key = parse_query("2025-08-03T13").unwrap();
        assert_eq!(index.get(&key).unwrap().datetime, key);
        assert!(index.get("2025-08-04T12:00:00+00:00").is_none());
    }
}

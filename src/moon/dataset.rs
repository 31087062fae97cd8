use std::fmt;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::{macros::format_description, Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::ephemeris::{epoch_from_utc, phase_angle, Body, Correction, Ephemeris, EphemerisError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Waxing,
    Waning,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approach {
    Apogee,
    Perigee,
    Unknown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Waxing => write!(f, "waxing"),
            Phase::Waning => write!(f, "waning"),
            Phase::Unknown => write!(f, "unknown"),
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Approach::Apogee => write!(f, "apogee"),
            Approach::Perigee => write!(f, "perigee"),
            Approach::Unknown => write!(f, "unknown"),
        }
    }
}

/// One row of the generated moon dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonDataPoint {
    pub datetime: String,
    pub illumination: f64,
    pub waxing_waning: Phase,
    pub ra_hours: f64,
    pub distance_km: f64,
    pub approaching: Approach,
}

/// Moon observation at one instant, before trend labelling. Values are
/// already rounded to what the dataset stores.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonSample {
    pub at: OffsetDateTime,
    pub illumination: f64,
    pub ra_hours: f64,
    pub distance_km: f64,
}

struct Previous {
    illumination: f64,
    distance_km: f64,
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Illuminated fraction of the disc, in percent, for a phase angle in radians.
pub fn illumination_percent(phase_angle: f64) -> f64 {
    (1.0 + phase_angle.cos()) / 2.0 * 100.0
}

/// `2025-01-01T00:00:00+00:00`
pub fn format_datetime(at: OffsetDateTime) -> anyhow::Result<String> {
    let fmt = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
    );
    Ok(at.format(fmt)?)
}

/// Apparent Moon from Earth at `at`, with values rounded for storage.
pub fn sample(eph: &dyn Ephemeris, at: OffsetDateTime) -> Result<MoonSample, EphemerisError> {
    let epoch = epoch_from_utc(at);
    let moon = eph.observe(Body::Earth, Body::Moon, epoch, Correction::Apparent)?;

    let illumination = illumination_percent(phase_angle(eph, Body::Moon, &moon, epoch)?);
    let radec = moon.radec();
    Ok(MoonSample {
        at,
        illumination: round2(illumination),
        ra_hours: round2(radec.ra_hours),
        distance_km: round2(radec.distance_km),
    })
}

/// Labels each sample against the one before it. The first sample has no
/// predecessor and gets `unknown`; ties count as waning / perigee.
pub fn label_trends(samples: impl IntoIterator<Item = MoonSample>) -> anyhow::Result<Vec<MoonDataPoint>> {
    samples
        .into_iter()
        .scan(None::<Previous>, |prev, s| {
            let (waxing_waning, approaching) = match prev.as_ref() {
                None => (Phase::Unknown, Approach::Unknown),
                Some(p) => (
                    if s.illumination > p.illumination { Phase::Waxing } else { Phase::Waning },
                    if s.distance_km > p.distance_km { Approach::Apogee } else { Approach::Perigee },
                ),
            };
            *prev = Some(Previous {
                illumination: s.illumination,
                distance_km: s.distance_km,
            });
            Some(format_datetime(s.at).map(|datetime| MoonDataPoint {
                datetime,
                illumination: s.illumination,
                waxing_waning,
                ra_hours: s.ra_hours,
                distance_km: s.distance_km,
                approaching,
            }))
        })
        .collect()
}

/// Samples the Moon on the grid `[start, end)` every `step` and labels the
/// result.
pub fn generate(
    eph: &dyn Ephemeris,
    start: OffsetDateTime,
    end: OffsetDateTime,
    step: Duration,
) -> anyhow::Result<Vec<MoonDataPoint>> {
    anyhow::ensure!(step.is_positive(), "step must be positive");

    let mut samples = Vec::new();
    let mut at = start;
    while at < end {
        samples.push(sample(eph, at).with_context(|| format!("observe moon at {}", at))?);
        if samples.len() % 1000 == 0 {
            debug!(samples = samples.len(), %at, "moon sampling progress");
        }
        at += step;
    }
    info!(samples = samples.len(), "moon sampling finished");
    label_trends(samples)
}

/// Writes the dataset as pretty JSON. The file only appears once fully
/// written.
pub fn write_dataset(path: &Path, points: &[MoonDataPoint]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut tmp, points).context("serialize moon dataset")?;
    tmp.flush()?;
    tmp.persist(path)
        .with_context(|| format!("move moon dataset into {}", path.display()))?;
    info!(path = %path.display(), records = points.len(), "moon dataset written");
    Ok(())
}

pub fn read_dataset(path: &Path) -> anyhow::Result<Vec<MoonDataPoint>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read moon dataset {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse moon dataset {}", path.display()))
}

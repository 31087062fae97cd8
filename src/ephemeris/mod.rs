//! Solar-system positions from a JPL ephemeris.
//!
//! Kernel reading, frame chaining and aberration are done by `anise`; this
//! module only names the bodies the tools care about and turns observer to
//! target vectors (km, ICRF) into right ascension, declination and distance.

pub mod almanac;
pub mod report;

use std::fmt;
use std::path::PathBuf;

use hifitime::{Duration, Epoch};
use thiserror::Error;
use time::{OffsetDateTime, UtcOffset};

pub use almanac::AlmanacEphemeris;
pub use anise::math::Vector3;

/// Speed of light, km/s.
pub const C_KM_S: f64 = 299_792.458;
/// Astronomical unit, km.
pub const AU_KM: f64 = 149_597_870.700;

#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("load ephemeris {path}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("no position for {target} seen from {observer} at {epoch}: {message}")]
    Query {
        observer: Body,
        target: Body,
        epoch: Epoch,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    JupiterBarycenter,
    SaturnBarycenter,
}

impl Body {
    pub fn naif_id(self) -> i32 {
        match self {
            Body::Sun => 10,
            Body::Mercury => 199,
            Body::Venus => 299,
            Body::Earth => 399,
            Body::Moon => 301,
            Body::Mars => 499,
            Body::JupiterBarycenter => 5,
            Body::SaturnBarycenter => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::JupiterBarycenter => "Jupiter barycenter",
            Body::SaturnBarycenter => "Saturn barycenter",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an observation is corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Astrometric: the target where it was when the light left it.
    LightTime,
    /// Light time plus stellar aberration from the observer's motion.
    Apparent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaDec {
    pub ra_hours: f64,
    pub dec_degrees: f64,
    pub distance_km: f64,
}

impl RaDec {
    pub fn distance_au(&self) -> f64 {
        self.distance_km / AU_KM
    }
}

/// Where a target appears from an observer: the observer-to-target vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub vector: Vector3,
    pub light_time: f64,
}

impl Position {
    pub fn from_vector(vector: Vector3) -> Self {
        Self {
            light_time: vector.norm() / C_KM_S,
            vector,
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.vector.norm()
    }

    pub fn radec(&self) -> RaDec {
        let v = self.vector;
        let distance_km = v.norm();
        let ra = v.y.atan2(v.x).rem_euclid(std::f64::consts::TAU);
        let dec = if distance_km > 0.0 {
            (v.z / distance_km).asin()
        } else {
            0.0
        };
        RaDec {
            ra_hours: ra.to_degrees() / 15.0,
            dec_degrees: dec.to_degrees(),
            distance_km,
        }
    }
}

pub trait Ephemeris {
    /// Position of `target` seen from `observer` at `epoch`.
    fn observe(
        &self,
        observer: Body,
        target: Body,
        epoch: Epoch,
        correction: Correction,
    ) -> Result<Position, EphemerisError>;
}

/// Epoch of a wall-clock instant; leap seconds are applied by hifitime.
pub fn epoch_from_utc(at: OffsetDateTime) -> Epoch {
    let at = at.to_offset(UtcOffset::UTC);
    Epoch::from_gregorian_utc(
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second(),
        at.nanosecond(),
    )
}

/// Sun-body-observer angle at `body`, in radians. `seen` is the body as the
/// observer sees it at `epoch`; the Sun is observed from the body at the
/// instant the light reaching the observer left it.
pub fn phase_angle(
    eph: &dyn Ephemeris,
    body: Body,
    seen: &Position,
    epoch: Epoch,
) -> Result<f64, EphemerisError> {
    let emitted = epoch - Duration::from_seconds(seen.light_time);
    let sun = eph.observe(body, Body::Sun, emitted, Correction::LightTime)?;
    Ok((-seen.vector).angle(&sun.vector))
}

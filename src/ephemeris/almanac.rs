use std::path::Path;

use anise::prelude::{Aberration, Almanac, Frame};
use hifitime::Epoch;
use tracing::{debug, info};

use super::{Body, Correction, Ephemeris, EphemerisError, Position};

/// Ephemeris backed by an `anise` almanac holding a JPL SPK kernel such as
/// `de421.bsp`.
pub struct AlmanacEphemeris {
    almanac: Almanac,
}

impl AlmanacEphemeris {
    pub fn open(path: &Path) -> Result<Self, EphemerisError> {
        let failed = |message: String| EphemerisError::Load {
            path: path.to_path_buf(),
            message,
        };
        let name = path
            .to_str()
            .ok_or_else(|| failed("path is not valid UTF-8".into()))?;
        let almanac = Almanac::new(name).map_err(|e| failed(e.to_string()))?;
        info!(path = %path.display(), "ephemeris loaded");
        Ok(Self::from_almanac(almanac))
    }

    pub fn from_almanac(almanac: Almanac) -> Self {
        Self { almanac }
    }
}

impl Ephemeris for AlmanacEphemeris {
    fn observe(
        &self,
        observer: Body,
        target: Body,
        epoch: Epoch,
        correction: Correction,
    ) -> Result<Position, EphemerisError> {
        let aberration = match correction {
            Correction::LightTime => Aberration::LT,
            Correction::Apparent => Aberration::LT_S,
        };
        let state = self
            .almanac
            .translate(
                Frame::from_ephem_j2000(target.naif_id()),
                Frame::from_ephem_j2000(observer.naif_id()),
                epoch,
                aberration,
            )
            .map_err(|e| EphemerisError::Query {
                observer,
                target,
                epoch,
                message: e.to_string(),
            })?;
        debug!(%observer, %target, %epoch, distance_km = state.rmag_km(), "observed");
        Ok(Position::from_vector(state.radius_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_kernel_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de421.bsp");
        let err = AlmanacEphemeris::open(&path).err().unwrap();
        assert!(matches!(err, EphemerisError::Load { .. }));
        assert!(err.to_string().contains("de421.bsp"));
    }

    #[test]
    fn unreadable_kernel_is_rejected_without_panicking() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xffu8; 2048]).unwrap();
        file.flush().unwrap();

        let outcome = std::panic::catch_unwind(|| AlmanacEphemeris::open(file.path()).map(|_| ()));
        assert!(matches!(outcome, Ok(Err(EphemerisError::Load { .. }))));
    }
}

use time::OffsetDateTime;

use super::{epoch_from_utc, Body, Correction, Ephemeris, EphemerisError, Position};

/// Bodies listed by the position report, in print order.
pub const REPORT_BODIES: [Body; 7] = [
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::JupiterBarycenter,
    Body::SaturnBarycenter,
    Body::Moon,
    Body::Sun,
];

pub fn format_line(body: Body, pos: &Position) -> String {
    let radec = pos.radec();
    format!(
        "{:<12}: RA={:.2}h  Dec={:.2}°  Dist={:.6} AU",
        body.label(),
        radec.ra_hours,
        radec.dec_degrees,
        radec.distance_au()
    )
}

/// One line per body as seen from Earth at `at`, light-time corrected. The
/// first failing body aborts the report.
pub fn position_report(eph: &dyn Ephemeris, at: OffsetDateTime) -> Result<Vec<String>, EphemerisError> {
    let epoch = epoch_from_utc(at);
    REPORT_BODIES
        .iter()
        .map(|&body| {
            let pos = eph.observe(Body::Earth, body, epoch, Correction::LightTime)?;
            Ok(format_line(body, &pos))
        })
        .collect()
}

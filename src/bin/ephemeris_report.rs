use moodlog::{config::AstroConfig, ephemeris::report::position_report, ephemeris::AlmanacEphemeris, logging};
use time::OffsetDateTime;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init("moodlog=info");

    let config = AstroConfig::from_env()?;
    let eph = AlmanacEphemeris::open(&config.ephemeris_path)?;

    for line in position_report(&eph, OffsetDateTime::now_utc())? {
        println!("{}", line);
    }
    Ok(())
}

use moodlog::{config::AstroConfig, ephemeris::AlmanacEphemeris, logging, moon};
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init("moodlog=info");

    let config = AstroConfig::from_env()?;
    let eph = AlmanacEphemeris::open(&config.ephemeris_path)?;

    info!(
        start = %config.moon_start,
        end = %config.moon_end,
        step_minutes = config.moon_step.whole_minutes(),
        "generating moon dataset"
    );
    let points = moon::generate(&eph, config.moon_start, config.moon_end, config.moon_step)?;
    moon::write_dataset(&config.moon_data_path, &points)?;

    println!("Done! Data saved to {}", config.moon_data_path.display());
    Ok(())
}

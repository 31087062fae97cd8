use std::io::{self, BufRead, Write};

use moodlog::{config::AstroConfig, logging, moon};

fn prompt(stdout: &mut io::Stdout, text: &str) -> io::Result<()> {
    write!(stdout, "{}", text)?;
    stdout.flush()
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init("moodlog=info");

    let config = AstroConfig::from_env()?;
    let index = moon::MoonIndex::load(&config.moon_data_path)?;
    if index.is_empty() {
        tracing::warn!(path = %config.moon_data_path.display(), "moon dataset is empty");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        prompt(&mut stdout, "Enter a datetime (e.g., 2025-08-03 or 2025-08-03T14): ")?;
        let Some(input) = lines.next().transpose()? else {
            break;
        };

        match moon::parse_query(&input) {
            Ok(key) => match index.get(&key) {
                Some(point) => {
                    println!("\nMoon data for {}:", key);
                    println!("   datetime: {}", point.datetime);
                    println!("   illumination: {}", point.illumination);
                    println!("   waxing_waning: {}", point.waxing_waning);
                    println!("   ra_hours: {}", point.ra_hours);
                    println!("   distance_km: {}", point.distance_km);
                    println!("   approaching: {}", point.approaching);
                }
                None => println!("No data found for {}.", key),
            },
            Err(e) => println!("{}", e),
        }

        prompt(&mut stdout, "\nLook up another? (y/n): ")?;
        match lines.next().transpose()? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }
    Ok(())
}

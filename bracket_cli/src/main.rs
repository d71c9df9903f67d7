//! Command line tool for drawing, scheduling and running single-elimination
//! brackets stored in a JSON file.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Error;
use config::{CliConfig, ConfigOverrides};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Draw, schedule and run a single-elimination bracket

USAGE:
  bracket_cli <COMMAND> [OPTIONS]

COMMANDS:
  generate     Draw a bracket from a roster file
  schedule     Assign order of play, areas and start times
  winner       Record a match result and advance the winner
  show         Print the order of play

OPTIONS:
  --roster     FILE        Roster JSON (array of participants)        [generate]
  --out        FILE        Bracket file to write                      [generate]
  --category   ID          Category ID                                [generate, default: 1]
  --seed       N           Seed for a reproducible draw               [generate, default: env BRACKET_RNG_SEED]
  --bracket    FILE        Bracket file to read and update            [schedule, winner, show]
  --areas      N           Concurrent playing areas                   [schedule, default: env BRACKET_AREA_COUNT or 1]
  --duration   MIN         Minutes per contest                        [schedule, default: env BRACKET_MATCH_DURATION_MINUTES or 20]
  --date       YYYY-MM-DD  Competition day                            [schedule, default: env BRACKET_START_DATE or today]
  --start      HH:MM       First call of the day                      [schedule, default: env BRACKET_START_TIME or 08:00]
  --match      UUID        Match being decided                        [winner]
  --winner     ID          Winning participant                        [winner]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                         Log filter (e.g., info)
  BRACKET_AREA_COUNT               Default for --areas
  BRACKET_MATCH_DURATION_MINUTES   Default for --duration
  BRACKET_START_DATE               Default for --date
  BRACKET_START_TIME               Default for --start
  BRACKET_RNG_SEED                 Default for --seed
  (A .env file in the working directory is read if present)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::builder().format_target(false).init();

    let Some(command) = pargs.subcommand()? else {
        print!("{HELP}");
        std::process::exit(2);
    };

    let overrides = ConfigOverrides {
        area_count: pargs.opt_value_from_str("--areas")?,
        match_duration_minutes: pargs.opt_value_from_str("--duration")?,
        start_date: pargs.opt_value_from_str("--date")?,
        start_time: pargs.opt_value_from_fn("--start", config::parse_clock_time)?,
        rng_seed: pargs.opt_value_from_str("--seed")?,
    };
    let config = CliConfig::from_env(overrides)?;
    config.validate()?;

    match command.as_str() {
        "generate" => {
            let roster: PathBuf = pargs.value_from_str("--roster")?;
            let out: PathBuf = pargs.value_from_str("--out")?;
            let category_id = pargs
                .opt_value_from_str("--category")?
                .unwrap_or(commands::DEFAULT_CATEGORY);

            let participants = commands::load_roster(&roster)?;
            let file = commands::generate(participants, category_id, config.rng_seed).await?;
            file.save(&out)?;
            info!("Bracket written to {}", out.display());
            print!("{}", commands::render_table(&commands::show(&file)));
        }
        "schedule" => {
            let path: PathBuf = pargs.value_from_str("--bracket")?;
            let mut file = commands::BracketFile::load(&path)?;
            let scheduled =
                commands::schedule(&mut file, &config.schedule.to_schedule_config()).await?;
            file.save(&path)?;
            info!(
                "Scheduled {} matches over {} area(s)",
                scheduled, config.schedule.area_count
            );
            print!("{}", commands::render_table(&commands::show(&file)));
        }
        "winner" => {
            let path: PathBuf = pargs.value_from_str("--bracket")?;
            let match_id: uuid::Uuid = pargs.value_from_str("--match")?;
            let winner_id: i64 = pargs.value_from_str("--winner")?;
            let mut file = commands::BracketFile::load(&path)?;
            let champion = commands::winner(&mut file, match_id, winner_id).await?;
            file.save(&path)?;
            if let Some(champion) = champion {
                let name = file
                    .participants
                    .iter()
                    .find(|p| p.id == champion)
                    .map_or("unknown participant", |p| p.display_name.as_str());
                println!("Champion: {name}");
            }
        }
        "show" => {
            let path: PathBuf = pargs.value_from_str("--bracket")?;
            let file = commands::BracketFile::load(&path)?;
            print!("{}", commands::render_table(&commands::show(&file)));
        }
        other => {
            return Err(anyhow::anyhow!("Unknown command '{}', see --help", other));
        }
    }

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        log::warn!("Ignored arguments: {:?}", remaining);
    }

    Ok(())
}

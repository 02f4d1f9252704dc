// SPDX-License-Identifier: MIT

mod folders;
mod settings;

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use datemath_core::{Clock, DateMath, Field, FixedClock, Offset, SystemClock, time::to_iso_string};
use itertools::Itertools;
use settings::Settings;
use tracing_subscriber::fmt::format::FmtSpan;

const APP_NAME: &str = "datemath";
const CONFIG_FILE_NAME: &str = "settings.toml";
const KEEP_LOG_FILES_COUNT: usize = 5;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, name("PATH_TO_CONFIG_FILE"), help("/path/to/settings.toml"))]
    settings_file: Option<String>,

    #[arg(short, long, value_name("RFC3339"), help("use this moment instead of the system clock"))]
    now: Option<FixedClock>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Now moved by an offset such as 3mo, -2d or 45m
    FromNow {
        #[arg(allow_hyphen_values = true)]
        offset: Offset,
    },
    MonthsFromNow {
        #[arg(allow_negative_numbers = true)]
        months: i64,
    },
    DaysFromNow {
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
    MinutesFromNow {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Start time for an event on the given YYYY-MM-DD date
    StartTime { date: String },
    StartOfToday {},
    /// 23:59:59 today, moved by a number of months
    EndOfToday {
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        months: i64,
    },
    ConfigDir {},
    /// Write the current settings to the settings file
    InitConfig {},
}

fn clear_old_logs(path: &Path, file_name_pattern: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut files = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_str().is_some_and(|s| s.starts_with(file_name_pattern)))
        .map(|e| e.path())
        .sorted()
        .collect::<Vec<PathBuf>>();
    if files.len() <= KEEP_LOG_FILES_COUNT {
        return Ok(());
    }

    files.truncate(files.len() - KEEP_LOG_FILES_COUNT);
    for f in files {
        std::fs::remove_file(f)?;
    }

    Ok(())
}

fn init_logging(cfg: &Settings) {
    let log_path = match folders::log_folder(APP_NAME) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Logging is disabled: {e}");
            return;
        }
    };
    let log_file_pattern = format!("{APP_NAME}.log");

    let file_appender = tracing_appender::rolling::daily(&log_path, &log_file_pattern);
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_max_level(cfg.log_level())
        .init();
    if let Err(e) = clear_old_logs(&log_path, log_file_pattern.as_str()) {
        tracing::error!(target: "main", error=?e, "Clear old files");
    }
}

fn settings_path(settings_file: &Option<String>) -> color_eyre::Result<String> {
    if let Some(p) = settings_file {
        return Ok(p.clone());
    }

    let config_path = folders::config_folder(APP_NAME)?.join(CONFIG_FILE_NAME);
    Ok(config_path.to_string_lossy().into_owned())
}

fn date_math(now: Option<FixedClock>, cfg: &Settings) -> color_eyre::Result<DateMath<Box<dyn Clock>>> {
    let clock: Box<dyn Clock> = match now {
        Some(c) => Box::new(c),
        None => Box::new(SystemClock),
    };

    let lead = TimeDelta::try_minutes(cfg.start_time_lead_minutes).ok_or(datemath_core::Error::OutOfRange {
        field: Field::Minutes,
        amount: cfg.start_time_lead_minutes,
    })?;

    Ok(DateMath::new(clock).with_start_time_lead(lead))
}

fn run<C: Clock>(command: &Commands, dm: &DateMath<C>, cfg: &Settings) -> color_eyre::Result<String> {
    let result = match command {
        Commands::FromNow { offset } => to_iso_string(&dm.from_now(*offset)?),
        Commands::MonthsFromNow { months } => to_iso_string(&dm.months_from_now(*months)?),
        Commands::DaysFromNow { days } => to_iso_string(&dm.days_from_now(*days)?),
        Commands::MinutesFromNow { minutes } => to_iso_string(&dm.minutes_from_now(*minutes)?),
        Commands::StartTime { date } => dm.exact_start_time(date)?,
        Commands::StartOfToday {} => to_iso_string(&dm.start_of_today()),
        Commands::EndOfToday { months } => to_iso_string(&dm.months_from_end_of_today(*months)?),
        Commands::ConfigDir {} => folders::config_folder(APP_NAME)?.to_string_lossy().into_owned(),
        Commands::InitConfig {} => {
            cfg.save().map_err(|e| color_eyre::eyre::eyre!("Save settings error: {e}"))?;
            format!("Settings are written to {}", cfg.file_name())
        }
    };

    Ok(result)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let cfg = Settings::new(&settings_path(&cli.settings_file)?);

    init_logging(&cfg);
    tracing::info!(command=?cli.command, "Start application");

    let dm = match date_math(cli.now, &cfg) {
        Ok(dm) => dm,
        Err(e) => {
            tracing::error!(target: "main", error=?e, "Start time lead from {}", cfg.file_name());
            return Err(e);
        }
    };
    match run(&cli.command, &dm, &cfg) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            tracing::error!(target: "main", error=?e, "Run command");
            return Err(e);
        }
    }

    tracing::info!("End application");
    Ok(())
}

#![warn(clippy::pedantic)]

mod common;
mod page;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use log::{LevelFilter, info, warn};

use liftrank_app::{self as app, SettingsService, log::Service as _};
use liftrank_domain::{self as domain, WorkoutService};
use liftrank_storage::{KeyValueStore, file::FileStore, local_storage::LocalStorage};

#[derive(Parser)]
#[command(name = "liftrank")]
#[command(about = "Log strength workouts and rank your exercises", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory of the stored data [default: $HOME/.liftrank]
    #[arg(long, global = true, env = "LIFTRANK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List all workouts, most recent first
    Workouts,

    /// Log a workout
    Add {
        /// Name of the exercise
        exercise: String,

        /// Sets as REPSxWEIGHT, e.g. 10x135
        #[arg(required = true, value_name = "SET")]
        sets: Vec<domain::WorkoutSet>,
    },

    /// List exercises for quick selection
    Exercises,

    /// Delete a workout
    Delete {
        /// Workout ID
        id: String,
    },

    /// Delete all workouts
    Clear,

    /// Show the rank of every exercise
    Leaderboard,

    /// Show the activity of the last days and the progress per exercise
    Progress {
        /// Write a chart of the daily volume as SVG
        #[arg(long, value_name = "FILE")]
        chart: Option<PathBuf>,
    },

    /// Show or change the settings
    Settings {
        #[arg(long)]
        unit: Option<app::Unit>,

        #[arg(long)]
        theme: Option<app::Theme>,

        #[arg(long, value_parser = app::Settings::validate_chart_width)]
        chart_width: Option<u32>,
    },

    /// Show the application log
    Log,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = FileStore::new(data_dir(cli.data_dir));

    init_logging(store.clone(), cli.verbose)?;

    let workout_service = domain::Service::new(LocalStorage::new(store.clone()));
    let app_service = app::Service::new(LocalStorage::new(store));
    let settings = block_on(app_service.get_settings()).unwrap_or_else(|err| {
        warn!("failed to read settings: {err}");
        app::Settings::default()
    });

    match cli.command {
        Command::Workouts => {
            let workouts = block_on(workout_service.get_workouts());
            println!(
                "{}",
                page::workouts::view(&workouts, settings.unit, &Local::now())
            );
        }
        Command::Add { exercise, sets } => {
            match block_on(workout_service.create_workout(&exercise, sets, Utc::now())) {
                Ok(workout) => {
                    info!("saved workout {} ({})", workout.id, workout.exercise);
                    println!("{}", page::add_workout::view_created(&workout, settings.unit));
                }
                Err(err) => bail!(create_error_message(&err)),
            }
        }
        Command::Exercises => {
            let exercises = block_on(workout_service.get_exercise_suggestions());
            println!("{}", page::add_workout::view_exercises(&exercises));
        }
        Command::Delete { id } => {
            let id = block_on(workout_service.delete_workout(domain::WorkoutID::from(id)))
                .map_err(|_| anyhow!("Failed to delete workout"))?;
            info!("deleted workout {id}");
        }
        Command::Clear => {
            block_on(workout_service.clear_workouts())
                .map_err(|_| anyhow!("Failed to delete workouts"))?;
            info!("deleted all workouts");
        }
        Command::Leaderboard => {
            let stats = block_on(workout_service.get_exercise_stats());
            println!("{}", page::leaderboard::view(&stats, settings.unit));
        }
        Command::Progress { chart } => {
            let progress = block_on(workout_service.get_progress(&Local::now()));
            println!("{}", page::progress::view(&progress, settings.unit));
            if let Some(path) = chart {
                write_chart(&progress, &settings, &path)?;
            }
        }
        Command::Settings {
            unit,
            theme,
            chart_width,
        } => {
            let mut settings = settings;
            if unit.is_some() || theme.is_some() || chart_width.is_some() {
                settings.unit = unit.unwrap_or(settings.unit);
                settings.theme = theme.unwrap_or(settings.theme);
                settings.chart_width = chart_width.unwrap_or(settings.chart_width);
                block_on(app_service.set_settings(settings))
                    .map_err(|err| anyhow!("Failed to save settings: {err}"))?;
                info!("changed settings");
            }
            println!("{}", page::settings::view(&settings));
        }
        Command::Log => {
            let entries = app_service
                .get_log_entries()
                .map_err(|err| anyhow!("Failed to read log: {err}"))?;
            println!("{}", page::log::view(&entries));
        }
    }

    Ok(())
}

fn init_logging<S>(store: S, verbose: bool) -> Result<()>
where
    S: KeyValueStore + Send + Sync + 'static,
{
    app::log::init(
        Arc::new(Mutex::new(LocalStorage::new(store))),
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        },
    )?;
    Ok(())
}

fn create_error_message(err: &domain::CreateError) -> String {
    match err {
        domain::CreateError::Validation(err) => err.to_string(),
        domain::CreateError::Conflict => {
            "Another workout was saved at the same moment, please try again".to_string()
        }
        domain::CreateError::Storage(_) | domain::CreateError::Other(_) => {
            "Failed to save workout".to_string()
        }
    }
}

fn data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".liftrank")))
        .unwrap_or_else(|| PathBuf::from(".liftrank"))
}

fn write_chart(
    progress: &domain::Progress,
    settings: &app::Settings,
    path: &Path,
) -> Result<()> {
    match app::chart::plot_daily_volume(progress, settings.theme, settings.chart_width)
        .map_err(|err| anyhow!("Failed to plot chart: {err}"))?
    {
        Some(svg) => {
            fs::write(path, svg)
                .with_context(|| format!("Failed to write chart to {}", path.display()))?;
            println!("\nChart written to {}", path.display());
        }
        None => println!("\nNo activity in the last 7 days, no chart written"),
    }
    Ok(())
}

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use worktime_engine::api::{AppState, create_router};
use worktime_engine::calculation::{compute_duration, format_minutes_human, generate_holidays};
use worktime_engine::config::ConfigLoader;
use worktime_engine::notes::{finalize_note, status_line};
use worktime_engine::storage::{HolidayFile, ensure_holidays_for_year};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // try_init so repeated initialization does not panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    tracing::debug!(config = ?config.config(), "loaded configuration");

    match cli.command {
        Some(Commands::Duration { start, end }) => {
            let result = compute_duration(&start, &end, &config.break_rules());
            if result.is_error {
                bail!("cannot compute a duration from '{start}' to '{end}'");
            }
            println!("{}", format_minutes_human(result.net_minutes));
        }
        Some(Commands::Holidays {
            year,
            region,
            write,
        }) => {
            let year = year.unwrap_or_else(|| Local::now().year());
            let region = region.unwrap_or_else(|| config.config().region.clone());

            if write {
                let path = config.holiday_path();
                let holidays = ensure_holidays_for_year(&path, year, &region)
                    .with_context(|| format!("failed to write holidays to {}", path.display()))?;
                println!(
                    "{} holidays for {year} written to {}",
                    holidays.len(),
                    path.display()
                );
            } else {
                let holidays = generate_holidays(year, &region);
                println!("{}", serde_json::to_string_pretty(&holidays)?);
            }
        }
        Some(Commands::HolidayAdd { date, name }) => {
            let path = config.holiday_path();
            let mut file = HolidayFile::load(&path).context("failed to load holiday file")?;
            if let Some(existing) = file.name_for(date) {
                tracing::warn!(%date, existing, "date already has a day off, overriding it");
            }
            file.add_custom(date, &name)?;
            file.save(&path).context("failed to save holiday file")?;
            println!("{date}: {}", name.trim());
        }
        Some(Commands::HolidayRemove { date }) => {
            let path = config.holiday_path();
            let mut file = HolidayFile::load(&path).context("failed to load holiday file")?;
            let Some(name) = file.remove(date) else {
                bail!("no day off stored on {date}");
            };
            file.save(&path).context("failed to save holiday file")?;
            println!("removed {date}: {name}");
        }
        Some(Commands::HolidayList { year }) => {
            let year = year.unwrap_or_else(|| Local::now().year());
            let file = HolidayFile::load(config.holiday_path())
                .context("failed to load holiday file")?;
            for (date, name) in file.merged_for_year(year) {
                println!("{date}  {name}");
            }
        }
        Some(Commands::Finalize { note }) => {
            let content = read_note(&note)?;
            let finalized = finalize_note(&content, &config.break_rules())
                .with_context(|| format!("cannot finalize {}", note.display()))?;
            fs::write(&note, &finalized.content)
                .with_context(|| format!("failed to write {}", note.display()))?;
            println!("{}", finalized.display);
        }
        Some(Commands::Status { note }) => {
            let content = read_note(&note)?;
            let now = Local::now().naive_local();
            println!("{}", status_line(&content, now, &config.break_rules()));
        }
        Some(Commands::Serve { addr }) => serve(config, addr).await?,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

fn read_note(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

async fn serve(config: ConfigLoader, addr: SocketAddr) -> Result<()> {
    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "listening");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}

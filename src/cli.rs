//! Command-line argument definitions.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Work time calculator.
///
/// Computes net working time with break deductions and maintains the
/// public holidays of a German federal state.
#[derive(Debug, Parser)]
#[command(name = "worktime", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the YAML config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute the net duration between two timestamps.
    Duration {
        /// Start timestamp (YYYY-MM-DD[Thh:mm[:ss]]).
        start: String,

        /// End timestamp (YYYY-MM-DD[Thh:mm[:ss]]).
        end: String,
    },

    /// Print or write the public holidays of a year.
    Holidays {
        /// The year; defaults to the current one.
        #[arg(long)]
        year: Option<i32>,

        /// Region code (e.g. HE); defaults to the configured region.
        #[arg(long)]
        region: Option<String>,

        /// Store the holidays in the holiday file instead of printing them.
        #[arg(long)]
        write: bool,
    },

    /// Add a custom day off to the holiday file.
    HolidayAdd {
        /// The date (YYYY-MM-DD).
        date: NaiveDate,

        /// Name of the day off.
        name: String,
    },

    /// Remove a day off from the holiday file, custom entries first.
    HolidayRemove {
        /// The date (YYYY-MM-DD).
        date: NaiveDate,
    },

    /// List the stored holidays of a year together with the custom days off.
    HolidayList {
        /// The year; defaults to the current one.
        #[arg(long)]
        year: Option<i32>,
    },

    /// Write the final work time into a note.
    Finalize {
        /// Path to the note file.
        note: PathBuf,
    },

    /// Print the live status line of a note.
    Status {
        /// Path to the note file.
        note: PathBuf,
    },

    /// Serve the HTTP API.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

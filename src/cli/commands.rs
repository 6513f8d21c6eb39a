use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const VERSION: &str = env!("LUNCHPLAN_VERSION");

#[derive(Parser)]
#[command(
    name = "lunchplan",
    version = VERSION,
    about = "Plan tomorrow's lunch and its prep steps",
    after_help = "\
NOTE:
  Data lives in --data-dir, else $LUNCHPLAN_HOME, else <platform data dir>/lunchplan.
  Run `lunchplan init` before any other command.
  Without a subcommand: shows tomorrow's plan, or the plan list when
  `show_tomorrow_on_launch` is off.

PLAN REFERENCES:
  `today`, `tomorrow`, a date (YYYY-MM-DD), or a plan ID / unique ID prefix.
  If several plans share a date, the most recently created one is used.

EXIT CODES:
  0  Success
  1  Error (not initialized, validation, not found, DB, etc.)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding lunchplan.db and config.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and, on first run, an example plan
    Init {
        /// Do not create the example plan
        #[arg(long)]
        no_seed: bool,
    },

    /// Show tomorrow's plan with its prep checklist
    #[command(after_help = "\
NOTE:
  --check toggles a step (ID or ID prefix) for this rendering only.
  Checked state is never saved; every run starts unchecked.")]
    Tomorrow {
        /// Toggle a step as done (repeatable)
        #[arg(long = "check")]
        check: Vec<String>,
    },

    /// Plan management
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List all plans, newest date first
    List,
    /// Show plan details
    Show {
        /// Date, `today`, `tomorrow`, or plan ID
        reference: String,
    },
    /// Create a new plan
    #[command(after_help = "\
NOTE:
  --main must not be blank. --sides is comma separated; blank entries are dropped.
  Empty --drink / --notes are stored as absent.
  --date defaults to today and is normalized to the start of the day.")]
    Create {
        #[arg(long)]
        date: Option<String>,
        /// Main dish
        #[arg(long, default_value = "")]
        main: String,
        /// Comma separated sides
        #[arg(long)]
        sides: Option<String>,
        #[arg(long)]
        drink: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Night-before prep step (repeatable)
        #[arg(long)]
        night: Vec<String>,
        /// Morning-of prep step (repeatable)
        #[arg(long)]
        morning: Vec<String>,
    },
    /// Edit a plan
    #[command(after_help = "\
NOTE:
  Step indices are positions within a bucket, as shown by `plan show`.
  Order of application: --set-*, then --remove-*, then --add-*.
  All edits are saved together; a blank main dish rejects the whole edit.")]
    Edit {
        /// Date, `today`, `tomorrow`, or plan ID
        reference: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        main: Option<String>,
        #[arg(long)]
        sides: Option<String>,
        #[arg(long)]
        drink: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Replace a night-before step's text: IDX=TEXT
        #[arg(long)]
        set_night: Vec<String>,
        /// Replace a morning-of step's text: IDX=TEXT
        #[arg(long)]
        set_morning: Vec<String>,
        /// Remove night-before step at bucket index
        #[arg(long)]
        remove_night: Vec<usize>,
        /// Remove morning-of step at bucket index
        #[arg(long)]
        remove_morning: Vec<usize>,
        /// Append a night-before step
        #[arg(long)]
        add_night: Vec<String>,
        /// Append a morning-of step
        #[arg(long)]
        add_morning: Vec<String>,
    },
    /// Delete a plan and its steps
    Delete {
        /// Date, `today`, `tomorrow`, or plan ID
        reference: String,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show settings and data summary
    Show,
    /// Change settings
    Set {
        /// true|false
        #[arg(long)]
        show_tomorrow_on_launch: Option<bool>,
        /// Fixed UTC offset for date math, e.g. +02:00
        #[arg(long, conflicts_with = "local_time")]
        utc_offset: Option<String>,
        /// Use the machine's local offset again
        #[arg(long)]
        local_time: bool,
    },
}

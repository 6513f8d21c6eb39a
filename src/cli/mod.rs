pub mod commands;
pub mod init;
pub mod launch;
pub mod plan;
pub mod settings;
pub mod tomorrow;

pub use commands::*;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::config::Settings;
use crate::db::{connection, plan_repo};
use crate::error::LunchError;
use crate::events::EventBus;
use crate::models::{Calendar, LunchPlan};

/// Everything one command invocation works with.
pub struct Session {
    pub data_dir: PathBuf,
    pub conn: Connection,
    pub settings: Settings,
    pub calendar: Calendar,
    pub events: EventBus,
    pub now: DateTime<Utc>,
}

impl Session {
    pub fn open(data_dir_flag: Option<&Path>) -> Result<Self, LunchError> {
        let data_dir = connection::resolve_data_dir(data_dir_flag)?;
        let conn = connection::open_db(&data_dir)?;
        let settings = Settings::load(&connection::config_path(&data_dir))?;
        let calendar = settings.calendar()?;
        Ok(Self {
            data_dir,
            conn,
            settings,
            calendar,
            events: EventBus::new().with_logging(),
            now: Utc::now(),
        })
    }

    pub fn save_settings(&self) -> Result<(), LunchError> {
        self.settings.save(&connection::config_path(&self.data_dir))
    }

    /// Resolve `today`, `tomorrow`, a date, or an ID / ID prefix to a plan.
    pub fn resolve_plan(&self, reference: &str) -> Result<LunchPlan, LunchError> {
        if let Ok(date) = self.calendar.parse_date_input(reference, self.now) {
            return plan_repo::find_plan_for_date(&self.conn, date)?
                .ok_or_else(|| LunchError::plan_not_found(reference));
        }
        plan_repo::resolve_plan(&self.conn, reference)
    }
}

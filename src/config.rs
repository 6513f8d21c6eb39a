use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LunchError;
use crate::models::Calendar;

/// Persisted application settings, stored as JSON next to the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Set once the example plan has been created.
    pub has_seeded: bool,
    /// Bare `lunchplan` shows tomorrow's plan instead of the plan list.
    pub show_tomorrow_on_launch: bool,
    /// Pins the calendar to a fixed offset such as "+02:00".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            has_seeded: false,
            show_tomorrow_on_launch: true,
            utc_offset: None,
        }
    }
}

impl Settings {
    /// Read settings; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, LunchError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| LunchError::config(format!("Cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| LunchError::config(format!("Invalid settings in {}: {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> Result<(), LunchError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LunchError::config(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| LunchError::config(e.to_string()))?;
        fs::write(path, content).map_err(|e| LunchError::config(format!("Cannot write {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// The calendar all date math runs in.
    pub fn calendar(&self) -> Result<Calendar, LunchError> {
        match self.utc_offset.as_deref() {
            Some(offset) => Calendar::parse_offset(offset),
            None => Ok(Calendar::local()),
        }
    }
}

use std::path::Path;

use serde_json::json;

use crate::cli::commands::{SettingsCommands, VERSION};
use crate::cli::Session;
use crate::db::plan_repo;
use crate::error::LunchError;
use crate::models::Calendar;
use crate::output;

pub fn run(cmd: SettingsCommands, json_output: bool, data_dir: Option<&Path>) -> i32 {
    let result = match cmd {
        SettingsCommands::Show => run_show(json_output, data_dir),
        SettingsCommands::Set {
            show_tomorrow_on_launch,
            utc_offset,
            local_time,
        } => run_set(show_tomorrow_on_launch, utc_offset, local_time, json_output, data_dir),
    };
    match result {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

fn run_show(json_output: bool, data_dir: Option<&Path>) -> Result<i32, LunchError> {
    let session = Session::open(data_dir)?;
    let total_plans = plan_repo::count_plans(&session.conn)?;

    if json_output {
        println!("{}", output::json::render(&output::json::success(json!({
            "settings": output::json::settings_json(&session.settings),
            "total_plans": total_plans,
            "data_dir": session.data_dir.to_string_lossy(),
            "version": VERSION
        }))));
    } else {
        output::text::print_settings(&session.settings, total_plans, VERSION);
    }
    Ok(0)
}

fn run_set(
    show_tomorrow_on_launch: Option<bool>,
    utc_offset: Option<String>,
    local_time: bool,
    json_output: bool,
    data_dir: Option<&Path>,
) -> Result<i32, LunchError> {
    let mut session = Session::open(data_dir)?;

    if let Some(show) = show_tomorrow_on_launch {
        session.settings.show_tomorrow_on_launch = show;
    }
    if let Some(offset) = utc_offset {
        // reject before writing
        Calendar::parse_offset(&offset)?;
        session.settings.utc_offset = Some(offset);
    }
    if local_time {
        session.settings.utc_offset = None;
    }
    session.save_settings()?;

    if json_output {
        println!("{}", output::json::render(&output::json::success(json!({
            "settings": output::json::settings_json(&session.settings)
        }))));
    } else {
        println!("Settings saved.");
        output::text::print_settings(
            &session.settings,
            plan_repo::count_plans(&session.conn)?,
            VERSION,
        );
    }
    Ok(0)
}

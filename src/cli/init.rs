use std::path::Path;

use serde_json::json;

use crate::cli::Session;
use crate::db::connection;
use crate::error::LunchError;
use crate::output;
use crate::planner::seed::{self, SeedOutcome};

pub fn run(no_seed: bool, json_output: bool, data_dir: Option<&Path>) -> i32 {
    match run_inner(no_seed, json_output, data_dir) {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

fn run_inner(no_seed: bool, json_output: bool, data_dir: Option<&Path>) -> Result<i32, LunchError> {
    let dir = connection::resolve_data_dir(data_dir)?;
    let path = connection::init_db(&dir)?;
    let mut session = Session::open(Some(&dir))?;

    let outcome = if no_seed {
        None
    } else {
        let outcome = seed::ensure_seed(
            &session.conn,
            &session.settings,
            &session.calendar,
            session.now,
            &mut session.events,
        );
        if outcome.marks_seeded() && !session.settings.has_seeded {
            session.settings.has_seeded = true;
            session.save_settings()?;
        }
        Some(outcome)
    };

    let (seed_status, seed_plan_id) = match &outcome {
        None => ("skipped", None),
        Some(SeedOutcome::Seeded { plan_id }) => ("seeded", Some(plan_id.as_str())),
        Some(SeedOutcome::StoreNotEmpty) => ("store_not_empty", None),
        Some(SeedOutcome::AlreadySeeded) => ("already_seeded", None),
        Some(SeedOutcome::Failed { .. }) => ("failed", None),
    };

    if json_output {
        let mut data = json!({
            "path": path.to_string_lossy(),
            "seed": seed_status
        });
        if let Some(id) = seed_plan_id {
            data["seed_plan_id"] = json!(id);
        }
        println!("{}", output::json::render(&output::json::success(data)));
    } else {
        println!("Initialized lunchplan at {}", path.display());
        match &outcome {
            Some(SeedOutcome::Seeded { .. }) => println!("Added an example plan for tomorrow."),
            Some(SeedOutcome::Failed { reason }) => println!("Could not add the example plan: {reason}"),
            _ => {}
        }
    }
    Ok(0)
}

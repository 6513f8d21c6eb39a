use std::path::Path;

use serde_json::json;

use crate::cli::Session;
use crate::error::LunchError;
use crate::models::iso_date;
use crate::output;
use crate::planner::{self, Checklist};

pub fn run(check: &[String], json_output: bool, data_dir: Option<&Path>) -> i32 {
    match run_inner(check, json_output, data_dir) {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

pub(crate) fn run_inner(check: &[String], json_output: bool, data_dir: Option<&Path>) -> Result<i32, LunchError> {
    let session = Session::open(data_dir)?;
    let date = session.calendar.tomorrow(session.now);
    let plan = planner::tomorrow_plan(&session.conn, &session.calendar, session.now)?;

    let Some(plan) = plan else {
        if json_output {
            println!("{}", output::json::render(&output::json::success(json!({
                "date": iso_date(date),
                "plan": null
            }))));
        } else {
            println!("No plan available");
        }
        return Ok(0);
    };

    // fresh per run
    let mut checklist = Checklist::new();
    for reference in check {
        checklist.toggle_ref(&plan, reference)?;
    }

    if json_output {
        println!("{}", output::json::render(&output::json::success(json!({
            "date": iso_date(date),
            "plan": output::json::plan_json(&plan, Some(&checklist)),
            "checked": checklist.checked_count(),
            "total_steps": plan.steps.len()
        }))));
    } else {
        output::text::print_plan(&plan, Some(&checklist));
        if !plan.steps.is_empty() {
            println!("\n{}/{} steps done", checklist.checked_count(), plan.steps.len());
        }
    }
    Ok(0)
}

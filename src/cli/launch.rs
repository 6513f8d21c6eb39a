use std::path::Path;

use crate::cli::{plan, tomorrow, Session};
use crate::error::LunchError;
use crate::output;

/// Bare `lunchplan`: tomorrow's plan or the plan list, per settings.
pub fn run(json_output: bool, data_dir: Option<&Path>) -> i32 {
    match run_inner(json_output, data_dir) {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

fn run_inner(json_output: bool, data_dir: Option<&Path>) -> Result<i32, LunchError> {
    let show_tomorrow = Session::open(data_dir)?.settings.show_tomorrow_on_launch;
    if show_tomorrow {
        tomorrow::run_inner(&[], json_output, data_dir)
    } else {
        plan::run_list(json_output, data_dir)
    }
}

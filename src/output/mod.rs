pub mod json;
pub mod text;

use crate::error::LunchError;

/// Print an error in the selected format and return the exit code.
pub fn report_error(e: &LunchError, json_output: bool) -> i32 {
    if json_output {
        println!("{}", json::render(&json::error(e)));
    } else {
        eprintln!("Error: {}", e.message);
    }
    1
}

use std::path::Path;

use serde_json::json;

use crate::cli::commands::PlanCommands;
use crate::cli::Session;
use crate::error::LunchError;
use crate::models::{iso_date, weekday_month_day, PrepTiming};
use crate::output;
use crate::planner::{editor, PlanDraft};

pub fn run(cmd: PlanCommands, json_output: bool, data_dir: Option<&Path>) -> i32 {
    let result = match cmd {
        PlanCommands::List => run_list(json_output, data_dir),
        PlanCommands::Show { reference } => run_show(&reference, json_output, data_dir),
        PlanCommands::Create { date, main, sides, drink, notes, night, morning } => {
            let fields = FieldEdits { date, main: Some(main), sides, drink, notes };
            run_create(fields, &night, &morning, json_output, data_dir)
        }
        PlanCommands::Edit {
            reference,
            date,
            main,
            sides,
            drink,
            notes,
            set_night,
            set_morning,
            remove_night,
            remove_morning,
            add_night,
            add_morning,
        } => {
            let fields = FieldEdits { date, main, sides, drink, notes };
            let steps = StepEdits {
                set_night,
                set_morning,
                remove_night,
                remove_morning,
                add_night,
                add_morning,
            };
            run_edit(&reference, fields, steps, json_output, data_dir)
        }
        PlanCommands::Delete { reference } => run_delete(&reference, json_output, data_dir),
    };
    match result {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

struct FieldEdits {
    date: Option<String>,
    main: Option<String>,
    sides: Option<String>,
    drink: Option<String>,
    notes: Option<String>,
}

struct StepEdits {
    set_night: Vec<String>,
    set_morning: Vec<String>,
    remove_night: Vec<usize>,
    remove_morning: Vec<usize>,
    add_night: Vec<String>,
    add_morning: Vec<String>,
}

fn apply_fields(draft: &mut PlanDraft, fields: FieldEdits, session: &Session) -> Result<(), LunchError> {
    if let Some(date) = fields.date {
        draft.date = session.calendar.parse_date_input(&date, session.now)?;
    }
    if let Some(main) = fields.main {
        draft.main = main;
    }
    if let Some(sides) = fields.sides {
        draft.sides_text = sides;
    }
    if let Some(drink) = fields.drink {
        draft.drink = drink;
    }
    if let Some(notes) = fields.notes {
        draft.notes = notes;
    }
    Ok(())
}

/// Parse `IDX=TEXT`.
fn parse_step_assignment(raw: &str) -> Result<(usize, &str), LunchError> {
    let (idx, text) = raw
        .split_once('=')
        .ok_or_else(|| LunchError::validation(format!("Expected IDX=TEXT, got '{raw}'")))?;
    let idx = idx
        .trim()
        .parse::<usize>()
        .map_err(|_| LunchError::validation(format!("Invalid step index in '{raw}'")))?;
    Ok((idx, text))
}

fn apply_steps(draft: &mut PlanDraft, steps: StepEdits) -> Result<(), LunchError> {
    for (timing, assignments) in [
        (PrepTiming::NightBefore, &steps.set_night),
        (PrepTiming::MorningOf, &steps.set_morning),
    ] {
        for raw in assignments {
            let (idx, text) = parse_step_assignment(raw)?;
            draft.set_step_text(timing, idx, text)?;
        }
    }
    draft.delete_steps(PrepTiming::NightBefore, &steps.remove_night)?;
    draft.delete_steps(PrepTiming::MorningOf, &steps.remove_morning)?;
    for text in steps.add_night {
        draft.add_step_with_text(PrepTiming::NightBefore, text);
    }
    for text in steps.add_morning {
        draft.add_step_with_text(PrepTiming::MorningOf, text);
    }
    Ok(())
}

pub(crate) fn run_list(json_output: bool, data_dir: Option<&Path>) -> Result<i32, LunchError> {
    let session = Session::open(data_dir)?;
    let plans = crate::db::plan_repo::list_plans(&session.conn)?;

    if json_output {
        let plans_json: Vec<_> = plans
            .iter()
            .map(|p| output::json::plan_summary(p))
            .collect();
        println!("{}", output::json::render(&output::json::success(json!({ "plans": plans_json }))));
    } else {
        output::text::print_plan_list(&plans);
    }
    Ok(0)
}

fn run_show(reference: &str, json_output: bool, data_dir: Option<&Path>) -> Result<i32, LunchError> {
    let session = Session::open(data_dir)?;
    let plan = session.resolve_plan(reference)?;

    if json_output {
        println!("{}", output::json::render(&output::json::success(json!({
            "plan": output::json::plan_json(&plan, None)
        }))));
    } else {
        output::text::print_plan(&plan, None);
    }
    Ok(0)
}

fn run_create(
    fields: FieldEdits,
    night: &[String],
    morning: &[String],
    json_output: bool,
    data_dir: Option<&Path>,
) -> Result<i32, LunchError> {
    let mut session = Session::open(data_dir)?;
    let mut draft = PlanDraft::new(session.calendar.date_of(session.now));
    apply_fields(&mut draft, fields, &session)?;
    for text in night {
        draft.add_step_with_text(PrepTiming::NightBefore, text.as_str());
    }
    for text in morning {
        draft.add_step_with_text(PrepTiming::MorningOf, text.as_str());
    }

    let plan = editor::save_draft(&session.conn, &draft, &mut session.events)?;

    if json_output {
        println!("{}", output::json::render(&output::json::success(json!({
            "plan": output::json::plan_json(&plan, None)
        }))));
    } else {
        println!(
            "Created plan for {}: {} ({})",
            weekday_month_day(plan.date),
            plan.main,
            plan.id
        );
    }
    Ok(0)
}

fn run_edit(
    reference: &str,
    fields: FieldEdits,
    steps: StepEdits,
    json_output: bool,
    data_dir: Option<&Path>,
) -> Result<i32, LunchError> {
    let mut session = Session::open(data_dir)?;
    let plan = session.resolve_plan(reference)?;

    let mut draft = PlanDraft::from_plan(&plan);
    apply_fields(&mut draft, fields, &session)?;
    apply_steps(&mut draft, steps)?;

    let plan = editor::save_draft(&session.conn, &draft, &mut session.events)?;

    if json_output {
        println!("{}", output::json::render(&output::json::success(json!({
            "plan": output::json::plan_json(&plan, None)
        }))));
    } else {
        println!("Updated plan: {} ({})", plan.main, plan.id);
        output::text::print_plan(&plan, None);
    }
    Ok(0)
}

fn run_delete(reference: &str, json_output: bool, data_dir: Option<&Path>) -> Result<i32, LunchError> {
    let mut session = Session::open(data_dir)?;
    let plan = session.resolve_plan(reference)?;
    let steps_removed = editor::delete_plan(&session.conn, &plan.id, &mut session.events)?;

    if json_output {
        println!("{}", output::json::render(&output::json::success(json!({
            "deleted": {
                "id": plan.id,
                "date": iso_date(plan.date),
                "main": plan.main,
                "steps_removed": steps_removed
            }
        }))));
    } else {
        println!("Deleted plan: {} ({}), {} steps removed", plan.main, plan.id, steps_removed);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_step_assignment() {
        assert_eq!(parse_step_assignment("1=Pack bag").unwrap(), (1, "Pack bag"));
        assert_eq!(parse_step_assignment("0=a=b").unwrap(), (0, "a=b"));
        assert_eq!(parse_step_assignment("2=").unwrap(), (2, ""));
        assert!(parse_step_assignment("Pack bag").is_err());
        assert!(parse_step_assignment("x=Pack").is_err());
    }

    #[test]
    fn test_apply_steps_order() {
        let mut draft = PlanDraft::new(NaiveDate::from_ymd_opt(2024, 7, 16).unwrap());
        draft.add_step_with_text(PrepTiming::NightBefore, "A");
        draft.add_step_with_text(PrepTiming::MorningOf, "B");
        draft.add_step_with_text(PrepTiming::NightBefore, "C");

        apply_steps(
            &mut draft,
            StepEdits {
                set_night: vec!["0=A2".into()],
                set_morning: vec![],
                remove_night: vec![1],
                remove_morning: vec![],
                add_night: vec![],
                add_morning: vec!["D".into()],
            },
        )
        .unwrap();
        let texts: Vec<_> = draft.steps().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["A2", "B", "D"]);
    }
}

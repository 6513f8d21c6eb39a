use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::error::LunchError;
use crate::models::{iso_date, parse_iso_date, LunchPlan};

use super::step_repo;

const PLAN_COLUMNS: &str = "id, date, main, sides, drink, notes, created_at, updated_at";

/// Register a new plan and its steps. Caller owns the transaction.
pub fn insert_plan(conn: &Connection, plan: &LunchPlan) -> Result<(), LunchError> {
    conn.execute(
        "INSERT INTO plans (id, date, main, sides, drink, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            plan.id,
            iso_date(plan.date),
            plan.main,
            serde_json::to_string(&plan.sides)?,
            plan.drink,
            plan.notes,
        ],
    )?;
    for (position, step) in plan.steps.iter().enumerate() {
        step_repo::upsert_step(conn, step, position)?;
    }
    tracing::debug!(plan = %plan.id, steps = plan.steps.len(), "inserted plan");
    Ok(())
}

/// Overwrite a stored plan's fields and step collection in place.
pub fn update_plan(conn: &Connection, plan: &LunchPlan) -> Result<(), LunchError> {
    let changed = conn.execute(
        "UPDATE plans SET date = ?1, main = ?2, sides = ?3, drink = ?4, notes = ?5,
             updated_at = datetime('now')
         WHERE id = ?6",
        params![
            iso_date(plan.date),
            plan.main,
            serde_json::to_string(&plan.sides)?,
            plan.drink,
            plan.notes,
            plan.id,
        ],
    )?;
    if changed == 0 {
        return Err(LunchError::plan_not_found(&plan.id));
    }
    step_repo::replace_steps(conn, &plan.id, &plan.steps)?;
    tracing::debug!(plan = %plan.id, steps = plan.steps.len(), "updated plan");
    Ok(())
}

pub fn get_plan_by_id(conn: &Connection, id: &str) -> Result<LunchPlan, LunchError> {
    let plan = conn
        .query_row(
            &format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"),
            params![id],
            row_to_plan,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => LunchError::plan_not_found(id),
            _ => LunchError::from(e),
        })?;
    with_steps(conn, plan)
}

pub fn plan_exists(conn: &Connection, id: &str) -> Result<bool, LunchError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM plans WHERE id = ?1", params![id], |row| row.get(0))?;
    Ok(count > 0)
}

/// The plan for a calendar day.
///
/// One plan per date is a convention the store does not enforce. When several
/// share a date the most recently created one wins.
pub fn find_plan_for_date(conn: &Connection, date: NaiveDate) -> Result<Option<LunchPlan>, LunchError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PLAN_COLUMNS} FROM plans WHERE date = ?1 ORDER BY rowid DESC LIMIT 1"
    ))?;
    let mut rows = stmt.query(params![iso_date(date)])?;
    match rows.next()? {
        Some(row) => Ok(Some(with_steps(conn, row_to_plan(row)?)?)),
        None => Ok(None),
    }
}

/// Resolve a plan reference by exact ID, then literal ID prefix.
pub fn resolve_plan(conn: &Connection, reference: &str) -> Result<LunchPlan, LunchError> {
    if reference.is_empty() {
        return Err(LunchError::validation("Plan reference must not be empty"));
    }
    if plan_exists(conn, reference)? {
        return get_plan_by_id(conn, reference);
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT {PLAN_COLUMNS} FROM plans WHERE substr(id, 1, length(?1)) = ?1 ORDER BY date DESC"
    ))?;
    let plans: Vec<LunchPlan> = stmt
        .query_map(params![reference], row_to_plan)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut plans = plans.into_iter();
    match (plans.next(), plans.next()) {
        (None, _) => Err(LunchError::plan_not_found(reference)),
        (Some(plan), None) => with_steps(conn, plan),
        (Some(first), Some(second)) => {
            let candidates: Vec<String> = [first, second]
                .into_iter()
                .chain(plans)
                .map(|p| format!("{} ({})", p.main, p.id))
                .collect();
            Err(LunchError::ambiguous_ref(reference, &candidates))
        }
    }
}

/// All plans, newest date first.
pub fn list_plans(conn: &Connection) -> Result<Vec<LunchPlan>, LunchError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PLAN_COLUMNS} FROM plans ORDER BY date DESC, rowid DESC"
    ))?;
    let plans = stmt
        .query_map([], row_to_plan)?
        .collect::<Result<Vec<_>, _>>()?;
    plans.into_iter().map(|p| with_steps(conn, p)).collect()
}

pub fn count_plans(conn: &Connection) -> Result<i64, LunchError> {
    let count = conn.query_row("SELECT COUNT(*) FROM plans", [], |row| row.get(0))?;
    Ok(count)
}

/// Delete a plan and every step it owns.
pub fn delete_plan(conn: &Connection, id: &str) -> Result<usize, LunchError> {
    let steps_removed = step_repo::delete_steps_for_plan(conn, id)?;
    let changed = conn.execute("DELETE FROM plans WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(LunchError::plan_not_found(id));
    }
    tracing::debug!(plan = %id, steps_removed, "deleted plan");
    Ok(steps_removed)
}

fn with_steps(conn: &Connection, mut plan: LunchPlan) -> Result<LunchPlan, LunchError> {
    plan.steps = step_repo::list_steps_for_plan(conn, &plan.id)?;
    Ok(plan)
}

fn row_to_plan(row: &rusqlite::Row) -> rusqlite::Result<LunchPlan> {
    let date: String = row.get(1)?;
    let sides: String = row.get(3)?;
    Ok(LunchPlan {
        id: row.get(0)?,
        date: parse_iso_date(&date).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        main: row.get(2)?,
        sides: serde_json::from_str(&sides).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?,
        drink: row.get(4)?,
        notes: row.get(5)?,
        steps: Vec::new(),
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::connection;
    use crate::error::ErrorCode;

    fn stored(conn: &Connection, main: &str) -> LunchPlan {
        let plan = LunchPlan::new(NaiveDate::from_ymd_opt(2030, 7, 16).unwrap(), main, vec![]);
        insert_plan(conn, &plan).unwrap();
        plan
    }

    #[test]
    fn test_resolve_by_exact_id_and_prefix() {
        let conn = connection::open_in_memory().unwrap();
        let plan = stored(&conn, "Soup");
        assert_eq!(resolve_plan(&conn, &plan.id).unwrap().id, plan.id);
        assert_eq!(resolve_plan(&conn, &plan.id[..6]).unwrap().id, plan.id);
    }

    #[test]
    fn test_resolve_treats_wildcards_literally() {
        let conn = connection::open_in_memory().unwrap();
        stored(&conn, "Soup");
        for reference in ["%", "_", "__%"] {
            let err = resolve_plan(&conn, reference).unwrap_err();
            assert_eq!(err.code, ErrorCode::PlanNotFound, "{reference}");
        }
    }

    #[test]
    fn test_resolve_rejects_empty_reference() {
        let conn = connection::open_in_memory().unwrap();
        stored(&conn, "Soup");
        let err = resolve_plan(&conn, "").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_date_is_stored_as_calendar_day() {
        let conn = connection::open_in_memory().unwrap();
        let plan = stored(&conn, "Soup");
        let raw: String = conn
            .query_row("SELECT date FROM plans WHERE id = ?1", params![plan.id], |row| row.get(0))
            .unwrap();
        assert_eq!(raw, "2030-07-16");
        assert_eq!(get_plan_by_id(&conn, &plan.id).unwrap().date, plan.date);
    }
}

use rusqlite::{params, Connection};

use crate::error::LunchError;
use crate::models::{PrepStep, PrepTiming};

/// Insert a step, or take it over if the id already exists elsewhere.
///
/// Upserting on the id keeps a step in exactly one plan: writing it under a
/// new `plan_id` moves it out of the old plan.
pub fn upsert_step(conn: &Connection, step: &PrepStep, position: usize) -> Result<(), LunchError> {
    conn.execute(
        "INSERT INTO prep_steps (id, plan_id, text, timing, position) VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
             plan_id = excluded.plan_id,
             text = excluded.text,
             timing = excluded.timing,
             position = excluded.position",
        params![step.id, step.plan_id, step.text, step.timing.as_str(), position as i64],
    )?;
    Ok(())
}

pub fn list_steps_for_plan(conn: &Connection, plan_id: &str) -> Result<Vec<PrepStep>, LunchError> {
    let mut stmt = conn.prepare(
        "SELECT id, plan_id, text, timing FROM prep_steps WHERE plan_id = ?1 ORDER BY position ASC, rowid ASC",
    )?;
    let steps = stmt
        .query_map(params![plan_id], row_to_step)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(steps)
}

pub fn get_step_by_id(conn: &Connection, id: &str) -> Result<PrepStep, LunchError> {
    conn.query_row(
        "SELECT id, plan_id, text, timing FROM prep_steps WHERE id = ?1",
        params![id],
        row_to_step,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => LunchError::step_not_found(id),
        _ => LunchError::from(e),
    })
}

/// Make the stored collection for `plan_id` exactly `steps`, in order.
pub fn replace_steps(conn: &Connection, plan_id: &str, steps: &[PrepStep]) -> Result<(), LunchError> {
    let keep: Vec<&str> = steps.iter().map(|s| s.id.as_str()).collect();
    for existing in list_steps_for_plan(conn, plan_id)? {
        if !keep.contains(&existing.id.as_str()) {
            conn.execute("DELETE FROM prep_steps WHERE id = ?1", params![existing.id])?;
        }
    }
    for (position, step) in steps.iter().enumerate() {
        upsert_step(conn, step, position)?;
    }
    Ok(())
}

/// Move a step to the end of another plan's collection.
pub fn reassign_step(conn: &Connection, step_id: &str, new_plan_id: &str) -> Result<PrepStep, LunchError> {
    let step = get_step_by_id(conn, step_id)?;
    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM plans WHERE id = ?1",
        params![new_plan_id],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(LunchError::plan_not_found(new_plan_id));
    }

    let next_position: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM prep_steps WHERE plan_id = ?1",
        params![new_plan_id],
        |row| row.get(0),
    )?;
    conn.execute(
        "UPDATE prep_steps SET plan_id = ?1, position = ?2 WHERE id = ?3",
        params![new_plan_id, next_position, step.id],
    )?;
    tracing::debug!(step = %step.id, from = %step.plan_id, to = %new_plan_id, "reassigned step");
    get_step_by_id(conn, &step.id)
}

pub fn delete_steps_for_plan(conn: &Connection, plan_id: &str) -> Result<usize, LunchError> {
    let removed = conn.execute("DELETE FROM prep_steps WHERE plan_id = ?1", params![plan_id])?;
    Ok(removed)
}

pub fn count_steps(conn: &Connection, plan_id: &str) -> Result<i64, LunchError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM prep_steps WHERE plan_id = ?1",
        params![plan_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn row_to_step(row: &rusqlite::Row) -> rusqlite::Result<PrepStep> {
    let timing: String = row.get(3)?;
    Ok(PrepStep {
        id: row.get(0)?,
        plan_id: row.get(1)?,
        text: row.get(2)?,
        timing: PrepTiming::from_str(&timing).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("unknown timing '{timing}'").into(),
            )
        })?,
    })
}

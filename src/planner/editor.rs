use rusqlite::Connection;

use crate::db::{connection, plan_repo};
use crate::error::LunchError;
use crate::events::{EventBus, PlanEvent};
use crate::models::LunchPlan;

use super::draft::PlanDraft;

/// Commit a draft. Validation runs before any store access; the write itself
/// is a single transaction.
pub fn save_draft(
    conn: &Connection,
    draft: &PlanDraft,
    events: &mut EventBus,
) -> Result<LunchPlan, LunchError> {
    let plan = draft.to_plan()?;

    let is_new = draft.is_new() && !plan_repo::plan_exists(conn, &plan.id)?;
    connection::with_transaction(conn, |conn| {
        if is_new {
            plan_repo::insert_plan(conn, &plan)
        } else {
            plan_repo::update_plan(conn, &plan)
        }
    })?;

    let saved = plan_repo::get_plan_by_id(conn, &plan.id)?;
    let event = if is_new {
        PlanEvent::Created {
            plan_id: saved.id.clone(),
            date: saved.date,
        }
    } else {
        PlanEvent::Updated {
            plan_id: saved.id.clone(),
            date: saved.date,
        }
    };
    events.publish(&event);
    Ok(saved)
}

/// Delete a plan together with its steps.
pub fn delete_plan(conn: &Connection, plan_id: &str, events: &mut EventBus) -> Result<usize, LunchError> {
    let steps_removed = connection::with_transaction(conn, |conn| plan_repo::delete_plan(conn, plan_id))?;
    events.publish(&PlanEvent::Deleted {
        plan_id: plan_id.to_string(),
        steps_removed,
    });
    Ok(steps_removed)
}

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::config::Settings;
use crate::db::{connection, plan_repo};
use crate::error::LunchError;
use crate::events::{EventBus, PlanEvent};
use crate::models::{Calendar, LunchPlan, PrepTiming};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Example plan written; `has_seeded` should now be persisted.
    Seeded { plan_id: String },
    /// The store already held plans; nothing written but the flag still flips.
    StoreNotEmpty,
    /// Seeding ran on an earlier launch.
    AlreadySeeded,
    /// Fetch or save failed; startup continues without seed data.
    Failed { reason: String },
}

impl SeedOutcome {
    /// Whether `has_seeded` should be set after this outcome.
    pub fn marks_seeded(&self) -> bool {
        matches!(self, Self::Seeded { .. } | Self::StoreNotEmpty | Self::AlreadySeeded)
    }
}

/// The example plan written on first launch, dated tomorrow.
pub fn example_plan(calendar: &Calendar, now: DateTime<Utc>) -> LunchPlan {
    let mut plan = LunchPlan::new(
        calendar.tomorrow(now),
        "Sandwich",
        vec!["Chips".to_string(), "Fruit".to_string()],
    );
    plan.drink = Some("Water".to_string());
    plan.notes = Some("Pack utensils".to_string());
    plan.push_step("Prepare ingredients", PrepTiming::NightBefore);
    plan.push_step("Assemble sandwich", PrepTiming::MorningOf);
    plan.push_step("Pack lunch bag", PrepTiming::MorningOf);
    plan
}

/// First-launch bootstrap. Never fails: store errors are logged and reported
/// through the outcome.
pub fn ensure_seed(
    conn: &Connection,
    settings: &Settings,
    calendar: &Calendar,
    now: DateTime<Utc>,
    events: &mut EventBus,
) -> SeedOutcome {
    if settings.has_seeded {
        return SeedOutcome::AlreadySeeded;
    }
    match try_seed(conn, calendar, now) {
        Ok(Some(plan)) => {
            events.publish(&PlanEvent::Seeded {
                plan_id: plan.id.clone(),
                date: plan.date,
            });
            SeedOutcome::Seeded { plan_id: plan.id }
        }
        Ok(None) => SeedOutcome::StoreNotEmpty,
        Err(e) => {
            tracing::warn!(error = %e, "failed to seed example plan");
            SeedOutcome::Failed { reason: e.message }
        }
    }
}

fn try_seed(conn: &Connection, calendar: &Calendar, now: DateTime<Utc>) -> Result<Option<LunchPlan>, LunchError> {
    if plan_repo::count_plans(conn)? > 0 {
        return Ok(None);
    }
    let plan = example_plan(calendar, now);
    connection::with_transaction(conn, |conn| plan_repo::insert_plan(conn, &plan))?;
    Ok(Some(plan))
}

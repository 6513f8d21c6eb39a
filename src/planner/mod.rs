pub mod checklist;
pub mod draft;
pub mod editor;
pub mod seed;
pub mod sides;
pub mod steps;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::db::plan_repo;
use crate::error::LunchError;
use crate::models::{Calendar, LunchPlan};

pub use checklist::Checklist;
pub use draft::PlanDraft;

/// The plan dated the day after `now`, if any.
pub fn tomorrow_plan(conn: &Connection, calendar: &Calendar, now: DateTime<Utc>) -> Result<Option<LunchPlan>, LunchError> {
    plan_repo::find_plan_for_date(conn, calendar.tomorrow(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connection, step_repo};
    use chrono::NaiveDate;

    use crate::models::PrepTiming;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn test_tomorrow_plan_lookup() {
        let conn = connection::open_in_memory().unwrap();
        let cal = Calendar::parse_offset("+02:00").unwrap();
        let now = at("2024-07-16T21:30:00Z"); // 23:30 local on Jul 16

        assert!(tomorrow_plan(&conn, &cal, now).unwrap().is_none());

        let today = LunchPlan::new(cal.date_of(now), "Leftovers", vec![]);
        let tomorrow = LunchPlan::new(day(17), "Soup", vec![]);
        plan_repo::insert_plan(&conn, &today).unwrap();
        plan_repo::insert_plan(&conn, &tomorrow).unwrap();

        let found = tomorrow_plan(&conn, &cal, now).unwrap().unwrap();
        assert_eq!(found.id, tomorrow.id);
    }

    #[test]
    fn test_lookup_does_not_depend_on_writer_offset() {
        let conn = connection::open_in_memory().unwrap();
        let winter = Calendar::parse_offset("+01:00").unwrap();
        let date = winter.parse_date_input("2030-07-16", at("2030-01-10T12:00:00Z")).unwrap();
        let plan = LunchPlan::new(date, "Soup", vec![]);
        plan_repo::insert_plan(&conn, &plan).unwrap();

        for (offset, now) in [
            ("+02:00", "2030-07-15T10:00:00Z"),
            ("+02:00", "2030-07-15T21:59:00Z"), // 23:59 local
            ("-05:00", "2030-07-16T03:00:00Z"), // 22:00 local on Jul 15
            ("Z", "2030-07-15T00:00:00Z"),
        ] {
            let cal = Calendar::parse_offset(offset).unwrap();
            let found = tomorrow_plan(&conn, &cal, at(now)).unwrap();
            assert_eq!(found.map(|p| p.id), Some(plan.id.clone()), "{offset} at {now}");
        }
    }

    #[test]
    fn test_duplicate_date_prefers_most_recent() {
        let conn = connection::open_in_memory().unwrap();
        let date = day(17);
        let older = LunchPlan::new(date, "Older", vec![]);
        let newer = LunchPlan::new(date, "Newer", vec![]);
        plan_repo::insert_plan(&conn, &older).unwrap();
        plan_repo::insert_plan(&conn, &newer).unwrap();

        let found = plan_repo::find_plan_for_date(&conn, date).unwrap().unwrap();
        assert_eq!(found.main, "Newer");
    }

    #[test]
    fn test_reassigned_step_leaves_old_plan() {
        let conn = connection::open_in_memory().unwrap();
        let mut first = LunchPlan::new(day(17), "First", vec![]);
        first.push_step("Chop", PrepTiming::NightBefore);
        first.push_step("Pack", PrepTiming::MorningOf);
        let mut second = LunchPlan::new(day(18), "Second", vec![]);
        second.push_step("Boil", PrepTiming::MorningOf);
        plan_repo::insert_plan(&conn, &first).unwrap();
        plan_repo::insert_plan(&conn, &second).unwrap();

        let moved = step_repo::reassign_step(&conn, &first.steps[0].id, &second.id).unwrap();
        assert_eq!(moved.plan_id, second.id);

        let first = plan_repo::get_plan_by_id(&conn, &first.id).unwrap();
        let second = plan_repo::get_plan_by_id(&conn, &second.id).unwrap();
        assert_eq!(first.steps.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(), vec!["Pack"]);
        assert_eq!(second.steps.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(), vec!["Boil", "Chop"]);
    }

    #[test]
    fn test_stored_plan_round_trip_keeps_order_and_absent_fields() {
        let conn = connection::open_in_memory().unwrap();
        let mut plan = LunchPlan::new(day(17), "Wrap", vec!["B".into(), "A".into()]);
        plan.push_step("one", PrepTiming::MorningOf);
        plan.push_step("two", PrepTiming::NightBefore);
        plan.push_step("three", PrepTiming::MorningOf);
        plan_repo::insert_plan(&conn, &plan).unwrap();

        let stored = plan_repo::get_plan_by_id(&conn, &plan.id).unwrap();
        assert_eq!(stored.sides, vec!["B", "A"]);
        assert_eq!(stored.drink, None);
        assert_eq!(stored.notes, None);
        assert_eq!(stored.steps, plan.steps);
    }
}

use crate::config::Settings;
use crate::models::{iso_date, weekday_month_day, LunchPlan, PrepTiming};
use crate::planner::steps;
use crate::planner::Checklist;

fn short_id(id: &str) -> &str {
    &id[..std::cmp::min(8, id.len())]
}

pub fn print_plan(p: &LunchPlan, checklist: Option<&Checklist>) {
    println!("{}", weekday_month_day(p.date));
    println!("  Main: {}", p.main);
    if !p.sides.is_empty() {
        println!("  Sides: {}", p.sides.join(", "));
    }
    if let Some(ref drink) = p.drink {
        println!("  Drink: {drink}");
    }
    if let Some(ref notes) = p.notes {
        println!("  Notes: {notes}");
    }
    println!("  ID: {}", p.id);

    let buckets = steps::partition(&p.steps);
    for timing in PrepTiming::ALL {
        let bucket = buckets.get(timing);
        if bucket.is_empty() {
            continue;
        }
        let heading = if checklist.is_some() { timing.label() } else { timing.section_title() };
        println!("\n{heading}:");
        for (i, s) in bucket.iter().enumerate() {
            let text = if s.text.is_empty() { "(empty)" } else { s.text.as_str() };
            match checklist {
                Some(list) => {
                    let mark = if list.is_checked(s) { "x" } else { " " };
                    println!("  [{mark}] {text} ({})", short_id(&s.id));
                }
                None => println!("  {i}. {text}"),
            }
        }
    }
}

pub fn print_plan_list(plans: &[LunchPlan]) {
    if plans.is_empty() {
        println!("No plans found.");
        return;
    }
    for p in plans {
        println!(
            "  {} {} ({}) - {} [{} steps]",
            iso_date(p.date),
            weekday_month_day(p.date),
            short_id(&p.id),
            p.main,
            p.steps.len()
        );
    }
}

pub fn print_settings(s: &Settings, total_plans: i64, version: &str) {
    println!("General:");
    println!("  Show tomorrow on launch: {}", s.show_tomorrow_on_launch);
    println!("  UTC offset: {}", s.utc_offset.as_deref().unwrap_or("local"));
    println!("Data:");
    println!("  Total lunch plans: {total_plans}");
    println!("\nVersion {version}");
}

use serde_json::{json, Value};

use crate::config::Settings;
use crate::error::LunchError;
use crate::models::{iso_date, weekday_month_day, LunchPlan, PrepStep, PrepTiming};
use crate::planner::steps;
use crate::planner::Checklist;

pub fn render(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &LunchError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn step_json(s: &PrepStep, position: usize) -> Value {
    json!({
        "id": s.id,
        "text": s.text,
        "timing": s.timing.as_str(),
        "index": position
    })
}

/// One timing bucket. `index` is the step's visible index in the bucket, the
/// number `plan edit --remove-*` and `--set-*` expect.
pub fn bucket_json(bucket: &[&PrepStep], timing: PrepTiming, checklist: Option<&Checklist>) -> Value {
    let steps: Vec<Value> = bucket
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut v = step_json(s, i);
            if let Some(list) = checklist {
                v["checked"] = json!(list.is_checked(s));
            }
            v
        })
        .collect();
    json!({
        "label": timing.label(),
        "color": timing.header_color(),
        "steps": steps
    })
}

pub fn plan_summary(p: &LunchPlan) -> Value {
    json!({
        "id": p.id,
        "date": iso_date(p.date),
        "display_date": weekday_month_day(p.date),
        "main": p.main,
        "step_count": p.steps.len()
    })
}

pub fn plan_json(p: &LunchPlan, checklist: Option<&Checklist>) -> Value {
    let buckets = steps::partition(&p.steps);
    let mut prep = serde_json::Map::new();
    for timing in PrepTiming::ALL {
        prep.insert(timing.as_str().to_string(), bucket_json(buckets.get(timing), timing, checklist));
    }
    json!({
        "id": p.id,
        "date": iso_date(p.date),
        "display_date": weekday_month_day(p.date),
        "main": p.main,
        "sides": p.sides,
        "drink": p.drink,
        "notes": p.notes,
        "prep": prep,
        "created_at": p.created_at,
        "updated_at": p.updated_at
    })
}

pub fn settings_json(s: &Settings) -> Value {
    json!({
        "has_seeded": s.has_seeded,
        "show_tomorrow_on_launch": s.show_tomorrow_on_launch,
        "utc_offset": s.utc_offset
    })
}

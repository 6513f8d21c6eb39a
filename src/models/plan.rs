use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::step::{PrepStep, PrepTiming};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LunchPlan {
    pub id: String,
    /// Calendar day the lunch is for. Stored as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub main: String,
    pub sides: Vec<String>,
    pub drink: Option<String>,
    pub notes: Option<String>,
    pub steps: Vec<PrepStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl LunchPlan {
    pub fn new(date: NaiveDate, main: impl Into<String>, sides: Vec<String>) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            date,
            main: main.into(),
            sides,
            drink: None,
            notes: None,
            steps: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Append a step owned by this plan.
    pub fn push_step(&mut self, text: impl Into<String>, timing: PrepTiming) -> &PrepStep {
        self.steps.push(PrepStep::new(&self.id, text, timing));
        &self.steps[self.steps.len() - 1]
    }

    pub fn steps_for(&self, timing: PrepTiming) -> Vec<&PrepStep> {
        crate::planner::steps::steps_for(&self.steps, timing)
    }
}

use chrono::NaiveDate;

use crate::error::LunchError;
use crate::models::{LunchPlan, PrepStep, PrepTiming};

use super::sides::{join_sides, parse_sides};
use super::steps;

/// Uncommitted edit state for a new or existing plan.
///
/// Text fields hold what the user typed: absent drink/notes show up as empty
/// strings here and turn back into `None` when the draft becomes a plan.
#[derive(Debug, Clone)]
pub struct PlanDraft {
    id: String,
    is_new: bool,
    created_at: Option<String>,
    pub date: NaiveDate,
    pub main: String,
    pub sides_text: String,
    pub drink: String,
    pub notes: String,
    steps: Vec<PrepStep>,
}

impl PlanDraft {
    /// Blank draft for a plan that does not exist yet.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            is_new: true,
            created_at: None,
            date,
            main: String::new(),
            sides_text: String::new(),
            drink: String::new(),
            notes: String::new(),
            steps: Vec::new(),
        }
    }

    pub fn from_plan(plan: &LunchPlan) -> Self {
        Self {
            id: plan.id.clone(),
            is_new: false,
            created_at: plan.created_at.clone(),
            date: plan.date,
            main: plan.main.clone(),
            sides_text: join_sides(&plan.sides),
            drink: plan.drink.clone().unwrap_or_default(),
            notes: plan.notes.clone().unwrap_or_default(),
            steps: plan.steps.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn parsed_sides(&self) -> Vec<String> {
        parse_sides(&self.sides_text)
    }

    pub fn steps(&self) -> &[PrepStep] {
        &self.steps
    }

    pub fn steps_for(&self, timing: PrepTiming) -> Vec<&PrepStep> {
        steps::steps_for(&self.steps, timing)
    }

    /// Append an empty step. It is visible in its bucket right away.
    pub fn add_step(&mut self, timing: PrepTiming) -> &mut PrepStep {
        self.steps.push(PrepStep::new(&self.id, "", timing));
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    pub fn add_step_with_text(&mut self, timing: PrepTiming, text: impl Into<String>) -> &PrepStep {
        let step = self.add_step(timing);
        step.text = text.into();
        step
    }

    pub fn set_step_text(&mut self, timing: PrepTiming, visible: usize, text: impl Into<String>) -> Result<(), LunchError> {
        let index = self.absolute(timing, visible)?;
        self.steps[index].text = text.into();
        Ok(())
    }

    /// Remove steps by their indices within one timing's bucket.
    ///
    /// All offsets are checked before anything is removed, so a bad offset
    /// leaves the draft untouched.
    pub fn delete_steps(&mut self, timing: PrepTiming, visible_offsets: &[usize]) -> Result<Vec<PrepStep>, LunchError> {
        let mut absolute = visible_offsets
            .iter()
            .map(|&v| self.absolute(timing, v))
            .collect::<Result<Vec<_>, _>>()?;
        absolute.sort_unstable();
        absolute.dedup();

        let mut removed: Vec<PrepStep> = absolute.iter().rev().map(|&i| self.steps.remove(i)).collect();
        removed.reverse();
        Ok(removed)
    }

    /// Whether the save action is available.
    pub fn can_save(&self) -> bool {
        !self.main.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), LunchError> {
        if !self.can_save() {
            return Err(LunchError::validation("Main dish is required"));
        }
        Ok(())
    }

    /// Build the plan to commit: validated, sides parsed,
    /// empty drink/notes stored as absent, every step pointing at this plan.
    pub fn to_plan(&self) -> Result<LunchPlan, LunchError> {
        self.validate()?;
        let steps = self
            .steps
            .iter()
            .map(|s| PrepStep {
                plan_id: self.id.clone(),
                ..s.clone()
            })
            .collect();
        Ok(LunchPlan {
            id: self.id.clone(),
            date: self.date,
            main: self.main.clone(),
            sides: self.parsed_sides(),
            drink: absent_if_empty(&self.drink),
            notes: absent_if_empty(&self.notes),
            steps,
            created_at: self.created_at.clone(),
            updated_at: None,
        })
    }

    fn absolute(&self, timing: PrepTiming, visible: usize) -> Result<usize, LunchError> {
        steps::absolute_index(&self.steps, timing, visible).ok_or_else(|| {
            LunchError::validation(format!(
                "No {} step at index {visible} (bucket has {})",
                timing.label().to_lowercase(),
                self.steps_for(timing).len()
            ))
        })
    }
}

fn absent_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 16).unwrap()
    }

    fn texts(draft: &PlanDraft) -> Vec<&str> {
        draft.steps().iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_empty_drink_becomes_absent_and_back() {
        let mut draft = PlanDraft::new(day());
        draft.main = "Soup".into();
        draft.drink = String::new();
        draft.notes = "Bring spoon".into();

        let plan = draft.to_plan().unwrap();
        assert_eq!(plan.drink, None);
        assert_eq!(plan.notes.as_deref(), Some("Bring spoon"));

        let reloaded = PlanDraft::from_plan(&plan);
        assert_eq!(reloaded.drink, "");
        assert_eq!(reloaded.notes, "Bring spoon");
    }

    #[test]
    fn test_whitespace_main_is_rejected() {
        let mut draft = PlanDraft::new(day());
        draft.main = "   ".into();
        assert!(!draft.can_save());
        let err = draft.to_plan().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);

        draft.main = "Soup".into();
        assert!(draft.can_save());
        assert!(draft.to_plan().is_ok());
    }

    #[test]
    fn test_to_plan_parses_sides() {
        let mut draft = PlanDraft::new(day());
        draft.main = "Wrap".into();
        draft.sides_text = "Chips, Fruit,  ,Juice".into();
        let plan = draft.to_plan().unwrap();
        assert_eq!(plan.date, day());
        assert_eq!(plan.sides, vec!["Chips", "Fruit", "Juice"]);
        assert_eq!(plan.id, draft.id());
    }

    #[test]
    fn test_added_step_is_visible_with_empty_text() {
        let mut draft = PlanDraft::new(day());
        draft.add_step(PrepTiming::MorningOf);
        let morning = draft.steps_for(PrepTiming::MorningOf);
        assert_eq!(morning.len(), 1);
        assert_eq!(morning[0].text, "");
        assert!(draft.steps_for(PrepTiming::NightBefore).is_empty());

        // empty step text does not block saving
        draft.main = "Salad".into();
        let plan = draft.to_plan().unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].plan_id, plan.id);
    }

    #[test]
    fn test_delete_by_visible_index_removes_right_step() {
        let mut draft = PlanDraft::new(day());
        draft.add_step_with_text(PrepTiming::NightBefore, "A");
        draft.add_step_with_text(PrepTiming::MorningOf, "B");
        draft.add_step_with_text(PrepTiming::NightBefore, "C");

        let removed = draft.delete_steps(PrepTiming::NightBefore, &[1]).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].text, "C");
        assert_eq!(texts(&draft), vec!["A", "B"]);
    }

    #[test]
    fn test_delete_multiple_offsets() {
        let mut draft = PlanDraft::new(day());
        for t in ["m0", "m1", "m2"] {
            draft.add_step_with_text(PrepTiming::MorningOf, t);
            draft.add_step_with_text(PrepTiming::NightBefore, t.replace('m', "n"));
        }
        let removed = draft.delete_steps(PrepTiming::MorningOf, &[2, 0]).unwrap();
        assert_eq!(removed.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(), vec!["m0", "m2"]);
        assert_eq!(texts(&draft), vec!["n0", "m1", "n1", "n2"]);
    }

    #[test]
    fn test_delete_out_of_range_leaves_draft_untouched() {
        let mut draft = PlanDraft::new(day());
        draft.add_step_with_text(PrepTiming::NightBefore, "A");
        draft.add_step_with_text(PrepTiming::NightBefore, "B");
        assert!(draft.delete_steps(PrepTiming::NightBefore, &[0, 5]).is_err());
        assert_eq!(texts(&draft), vec!["A", "B"]);
    }

    #[test]
    fn test_set_step_text_through_bucket_index() {
        let mut draft = PlanDraft::new(day());
        draft.add_step(PrepTiming::NightBefore);
        draft.add_step(PrepTiming::MorningOf);
        draft.add_step(PrepTiming::MorningOf);
        draft.set_step_text(PrepTiming::MorningOf, 1, "Pack bag").unwrap();
        assert_eq!(texts(&draft), vec!["", "", "Pack bag"]);
        assert!(draft.set_step_text(PrepTiming::NightBefore, 1, "x").is_err());
    }

    #[test]
    fn test_from_plan_round_trips_sides() {
        let mut plan = LunchPlan::new(day(), "Sandwich", vec!["Chips".into(), "Fruit".into()]);
        plan.push_step("Prepare ingredients", PrepTiming::NightBefore);
        let draft = PlanDraft::from_plan(&plan);
        assert!(!draft.is_new());
        assert_eq!(draft.sides_text, "Chips, Fruit");
        assert_eq!(draft.parsed_sides(), plan.sides);
        assert_eq!(draft.steps(), plan.steps.as_slice());
    }
}

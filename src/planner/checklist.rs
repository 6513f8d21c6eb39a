use std::collections::HashSet;

use crate::error::LunchError;
use crate::models::{LunchPlan, PrepStep, PrepTiming};

/// Which steps of the displayed plan are ticked off.
///
/// Lives only as long as one view of the plan; it is rebuilt empty on every
/// load and never written to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    night_before: HashSet<String>,
    morning_of: HashSet<String>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a step. Returns whether it is checked afterwards.
    pub fn toggle(&mut self, step: &PrepStep) -> bool {
        let set = self.set_mut(step.timing);
        if set.remove(&step.id) {
            false
        } else {
            set.insert(step.id.clone());
            true
        }
    }

    /// Toggle the step of `plan` whose id is `reference` or starts with it.
    pub fn toggle_ref(&mut self, plan: &LunchPlan, reference: &str) -> Result<bool, LunchError> {
        let step = find_step(plan, reference)?;
        Ok(self.toggle(step))
    }

    pub fn is_checked(&self, step: &PrepStep) -> bool {
        self.set(step.timing).contains(&step.id)
    }

    pub fn checked(&self, timing: PrepTiming) -> &HashSet<String> {
        self.set(timing)
    }

    pub fn checked_count(&self) -> usize {
        self.night_before.len() + self.morning_of.len()
    }

    fn set(&self, timing: PrepTiming) -> &HashSet<String> {
        match timing {
            PrepTiming::NightBefore => &self.night_before,
            PrepTiming::MorningOf => &self.morning_of,
        }
    }

    fn set_mut(&mut self, timing: PrepTiming) -> &mut HashSet<String> {
        match timing {
            PrepTiming::NightBefore => &mut self.night_before,
            PrepTiming::MorningOf => &mut self.morning_of,
        }
    }
}

fn find_step<'a>(plan: &'a LunchPlan, reference: &str) -> Result<&'a PrepStep, LunchError> {
    if reference.is_empty() {
        return Err(LunchError::validation("Step reference must not be empty"));
    }
    if let Some(step) = plan.steps.iter().find(|s| s.id == reference) {
        return Ok(step);
    }
    let matches: Vec<&PrepStep> = plan.steps.iter().filter(|s| s.id.starts_with(reference)).collect();
    match matches.as_slice() {
        [] => Err(LunchError::step_not_found(reference)),
        [step] => Ok(*step),
        _ => {
            let candidates: Vec<String> = matches.iter().map(|s| format!("{} ({})", s.text, s.id)).collect();
            Err(LunchError::ambiguous_ref(reference, &candidates))
        }
    }
}

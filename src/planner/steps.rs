use crate::models::{PrepStep, PrepTiming};

/// Steps of one timing, in collection order.
pub fn steps_for(steps: &[PrepStep], timing: PrepTiming) -> Vec<&PrepStep> {
    steps.iter().filter(|s| s.timing == timing).collect()
}

/// Absolute positions of the steps in a timing's bucket.
pub fn bucket_indices(steps: &[PrepStep], timing: PrepTiming) -> Vec<usize> {
    steps
        .iter()
        .enumerate()
        .filter(|(_, s)| s.timing == timing)
        .map(|(i, _)| i)
        .collect()
}

/// Map a bucket-visible index back to its position in the full collection.
pub fn absolute_index(steps: &[PrepStep], timing: PrepTiming, visible: usize) -> Option<usize> {
    bucket_indices(steps, timing).get(visible).copied()
}

/// Both buckets of a step list. Every step lands in exactly one of them.
#[derive(Debug, Clone, Default)]
pub struct StepBuckets<'a> {
    pub night_before: Vec<&'a PrepStep>,
    pub morning_of: Vec<&'a PrepStep>,
}

impl<'a> StepBuckets<'a> {
    pub fn get(&self, timing: PrepTiming) -> &[&'a PrepStep] {
        match timing {
            PrepTiming::NightBefore => &self.night_before,
            PrepTiming::MorningOf => &self.morning_of,
        }
    }
}

pub fn partition(steps: &[PrepStep]) -> StepBuckets<'_> {
    let mut buckets = StepBuckets::default();
    for step in steps {
        match step.timing {
            PrepTiming::NightBefore => buckets.night_before.push(step),
            PrepTiming::MorningOf => buckets.morning_of.push(step),
        }
    }
    buckets
}

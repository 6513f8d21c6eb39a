use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepTiming {
    NightBefore,
    MorningOf,
}

impl PrepTiming {
    /// Display order of the two buckets.
    pub const ALL: [PrepTiming; 2] = [PrepTiming::NightBefore, PrepTiming::MorningOf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NightBefore => "night_before",
            Self::MorningOf => "morning_of",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "night_before" => Some(Self::NightBefore),
            "morning_of" => Some(Self::MorningOf),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NightBefore => "Night Before",
            Self::MorningOf => "Morning Of",
        }
    }

    /// Editor section heading.
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::NightBefore => "Prep Tonight",
            Self::MorningOf => "Prep Morning",
        }
    }

    pub fn header_color(&self) -> &'static str {
        match self {
            Self::NightBefore => "purple",
            Self::MorningOf => "yellow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepStep {
    pub id: String,
    /// Owning plan. A lookup key only; the plan holds the authoritative list.
    pub plan_id: String,
    pub text: String,
    pub timing: PrepTiming,
}

impl PrepStep {
    pub fn new(plan_id: &str, text: impl Into<String>, timing: PrepTiming) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            plan_id: plan_id.to_string(),
            text: text.into(),
            timing,
        }
    }
}

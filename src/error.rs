use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    PlanNotFound,
    StepNotFound,
    AmbiguousRef,
    ValidationError,
    InvalidDate,
    ConfigError,
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::PlanNotFound => "PLAN_NOT_FOUND",
            Self::StepNotFound => "STEP_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidDate => "INVALID_DATE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct LunchError {
    pub code: ErrorCode,
    pub message: String,
}

impl LunchError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "lunchplan is not initialized. Run `lunchplan init` first.",
        )
    }

    pub fn plan_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::PlanNotFound,
            format!("Plan not found: {reference}"),
        )
    }

    pub fn step_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::StepNotFound,
            format!("Step not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_date(input: &str) -> Self {
        Self::new(
            ErrorCode::InvalidDate,
            format!("Invalid date '{input}'. Use YYYY-MM-DD, an RFC 3339 timestamp, `today` or `tomorrow`."),
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl From<rusqlite::Error> for LunchError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}

impl From<serde_json::Error> for LunchError {
    fn from(e: serde_json::Error) -> Self {
        Self::database(format!("Corrupt stored value: {e}"))
    }
}

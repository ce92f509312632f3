pub mod json;
pub mod md;

use crate::behavior::rules::RuleSet;
use crate::error::Result;
use crate::stats::OverviewStats;
use crate::types::report::{ProfileReport, ScoreReport};
use crate::types::trip::ScoredTrip;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Everything the CLI prints. JSON output is the bare payload.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Score(&'a ScoreReport),
    Trips(&'a [ScoredTrip]),
    Profile(&'a ProfileReport),
    Stats(&'a OverviewStats),
    Rules(&'a RuleSet),
}

pub fn render(report: Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::to_json(report)?),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

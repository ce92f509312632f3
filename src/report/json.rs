use super::Report;

pub fn to_json(report: Report<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&report)
}

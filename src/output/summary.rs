use crate::engine::SummaryResult;
use crate::error::OutputError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::report::build_markdown;

/// A summarization run as written to disk
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryReport {
    pub run_id: Uuid,
    pub timestamp: String,
    pub duration_sec: f64,
    #[serde(flatten)]
    pub result: SummaryResult,
}

impl SummaryReport {
    pub fn new(result: SummaryResult, duration_sec: f64) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now().to_rfc3339(),
            duration_sec,
            result,
        }
    }
}

/// Write `summary.json` and `summary.md` into `report_dir`, returning both paths
pub fn write_summary(
    report_dir: &Path,
    report: &SummaryReport,
) -> Result<(PathBuf, PathBuf), OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let json_path = report_dir.join("summary.json");
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let md_path = report_dir.join("summary.md");
    fs::write(&md_path, build_markdown(report)).map_err(OutputError::WriteReport)?;

    Ok((json_path, md_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SummaryMode;

    #[test]
    fn test_write_summary_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let report_dir = dir.path().join("2026-10-19");
        let report = SummaryReport::new(
            SummaryResult {
                mode: SummaryMode::ByCriterion,
                assignment_id: 3,
                reviewees: Vec::new(),
            },
            1.5,
        );

        let (json_path, md_path) = write_summary(&report_dir, &report).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(written["mode"], "by_criterion");
        assert_eq!(written["assignment_id"], 3);
        assert_eq!(written["run_id"], report.run_id.to_string());
        assert!(fs::read_to_string(md_path).unwrap().contains("# Review Summary"));
    }
}

//! Export assessments to JSON.
//!
//! The export carries the input, the raw model output and the derived
//! presentation (tiers, labels, hex colors) so it can be rendered elsewhere.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::Assessment;
use crate::error::AppError;

/// Write one assessment as pretty-printed JSON.
pub fn write_assessment_json(path: &Path, assessment: &Assessment) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, assessment)
        .map_err(|e| AppError::usage(format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

/// Render one assessment as a JSON string (for `cv assess --json`).
pub fn assessment_to_json(assessment: &Assessment) -> Result<String, AppError> {
    serde_json::to_string_pretty(assessment)
        .map_err(|e| AppError::runtime(format!("Failed to serialize assessment: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicantInput, RiskResult};
    use crate::presenter::present;
    use chrono::Utc;
    use tempfile::tempdir;

    #[test]
    fn export_contains_presentation() {
        let input = ApplicantInput {
            loan_amount: 4_000_000.0,
            ..ApplicantInput::default()
        };
        let result = RiskResult {
            probability: 0.08,
            credit_score: 860,
            rating: "AAA".to_string(),
        };
        let presentation = present(&input, &result);
        let a = Assessment {
            assessed_at: Utc::now(),
            model: "test".to_string(),
            input,
            result,
            presentation,
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");
        write_assessment_json(&path, &a).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["presentation"]["affordability"]["tier"], "HighRisk");
        assert_eq!(v["presentation"]["rating_color"], "#27ae60");
        assert_eq!(v["input"]["loan_amount"], 4_000_000.0);
        assert_eq!(text, assessment_to_json(&a).unwrap());
    }
}
